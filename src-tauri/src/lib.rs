//! OPS Hub Backend
//!
//! Layered architecture:
//! - repository: SQLite record store for toolbox items
//! - state: what the IPC commands share
//! - config: app configuration file
//! - commands: Tauri command handlers (`desktop` feature)
//!
//! Domain types come from `ops-hub-core`, shared with the frontend.

pub mod config;
pub mod repository;
mod state;

#[cfg(feature = "desktop")]
mod commands;

pub use config::AppConfig;
pub use state::AppState;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    let result = tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let paths = app.handle().path();
            let (config, config_warning) = AppConfig::load(&paths.app_config_dir()?);

            // Initialize logging
            if let Err(e) = rolling_logger::init_logger_with(
                paths.app_log_dir()?,
                &config.log_app_name,
                config.logger_config(),
            ) {
                eprintln!("[{}] Failed to init rolling logger: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
            }
            if let Some(warning) = config_warning {
                log::warn!("{}; using defaults", warning);
            }

            let db_path = config.database_path(&paths.app_data_dir()?);
            let state = AppState::open(config, &db_path)?;
            let _ = rolling_logger::info(&format!("OPS Hub started, database {}", db_path.display()));

            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_toolbox_items,
            commands::get_toolbox_item,
            commands::create_toolbox_item,
            commands::update_toolbox_item,
            commands::delete_toolbox_item,
            commands::get_recent_logs,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        let _ = rolling_logger::error(&format!("Tauri runtime error: {}", e));
        eprintln!("error while running tauri application: {}", e);
        std::process::exit(1);
    }
}
