mod commands;
mod error;
mod models;
mod services;

use services::form::{AnalysisForm, FormConfig};
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            app.manage(AnalysisForm::new(FormConfig::default()));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::form::select_image,
            commands::form::submit_analysis,
            commands::form::form_snapshot,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
