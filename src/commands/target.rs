use std::collections::HashMap;

use tauri::{async_runtime, State};

use crate::commands::{AppState, CommandError, CommandResult};
use crate::error::AppError;
use crate::models::target::TargetUpsert;

#[tauri::command]
pub async fn targets_get(state: State<'_, AppState>) -> CommandResult<HashMap<String, f64>> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let (team_id, user_name) = app_state.session().require_user()?;
        app_state.targets().resolved(&team_id, &user_name)
    })
    .await
}

#[tauri::command]
pub async fn targets_update(
    state: State<'_, AppState>,
    targets: Vec<TargetUpsert>,
) -> CommandResult<HashMap<String, f64>> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let (team_id, user_name) = app_state.session().require_user()?;
        app_state
            .targets()
            .set_targets(&team_id, &user_name, &targets)
    })
    .await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("target task failed: {err}"), None))?
        .map_err(CommandError::from)
}
