pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("failed to launch application: {error}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle();

            crate::utils::logger::init_logging(&handle)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let mut data_dir = handle
                .path()
                .app_data_dir()
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            std::fs::create_dir_all(&data_dir)?;
            data_dir.push("accountability.sqlite");

            let pool = crate::db::DbPool::new(&data_dir)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let config = crate::services::team_service::AppConfig::from_env();
            let state = crate::commands::AppState::new(pool, config)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::session::session_create_team,
            crate::commands::session::session_join_team,
            crate::commands::session::session_set_user,
            crate::commands::session::session_current,
            crate::commands::checkin::habits_list,
            crate::commands::checkin::checkin_save_today,
            crate::commands::checkin::checkin_today_entries,
            crate::commands::checkin::checkin_week_rows,
            crate::commands::target::targets_get,
            crate::commands::target::targets_update,
            crate::commands::compare::compare_weekly,
            crate::commands::compare::compare_my_summary,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
