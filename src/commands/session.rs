use tauri::{async_runtime, State};

use crate::commands::{AppState, CommandError, CommandResult};
use crate::error::AppError;
use crate::services::session_service::SessionContext;

#[tauri::command]
pub async fn session_create_team(
    state: State<'_, AppState>,
    name: String,
    passcode: Option<String>,
) -> CommandResult<SessionContext> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        app_state
            .teams()
            .create_team(&name, passcode.as_deref().unwrap_or(""))
    })
    .await
}

#[tauri::command]
pub async fn session_join_team(
    state: State<'_, AppState>,
    team_id: String,
    passcode: Option<String>,
) -> CommandResult<SessionContext> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        app_state
            .teams()
            .join_team(&team_id, passcode.as_deref().unwrap_or(""))
    })
    .await
}

#[tauri::command]
pub async fn session_set_user(
    state: State<'_, AppState>,
    name: String,
) -> CommandResult<SessionContext> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.session().set_user(&name)).await
}

#[tauri::command]
pub async fn session_current(
    state: State<'_, AppState>,
) -> CommandResult<Option<SessionContext>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.session().current()).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("session task failed: {err}"), None))?
        .map_err(CommandError::from)
}
