#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    hemo_scan_lib::run()
}
