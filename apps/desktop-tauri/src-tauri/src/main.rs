#![forbid(unsafe_code)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod dto;
mod support;

use kf_app::{AppConfig, Session, init_logging};
use std::sync::Mutex;

fn main() {
    let config = AppConfig::from_env();
    init_logging(&config);

    let session = Session::start(&config);

    tauri::Builder::default()
        .manage(Mutex::new(session))
        .invoke_handler(tauri::generate_handler![
            commands::load_data,
            commands::save_data,
            commands::taxonomy_get,
            commands::taxonomy_apply,
            commands::form_options,
            commands::form_validate,
            commands::cost_summary_export,
        ])
        .run(tauri::generate_context!())
        .expect("tauri run");
}
