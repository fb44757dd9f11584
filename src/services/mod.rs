pub mod form;
pub mod predict_client;
pub mod preview_service;

#[cfg(test)]
pub mod stub_server;
