use tauri::{async_runtime, State};

use crate::commands::{AppState, CommandError, CommandResult};
use crate::error::AppError;
use crate::models::summary::{UserWeekSummary, WeeklyComparison};

#[tauri::command]
pub async fn compare_weekly(state: State<'_, AppState>) -> CommandResult<WeeklyComparison> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let context = app_state.session().require()?;
        app_state.summaries().weekly_comparison(&context.team_id)
    })
    .await
}

#[tauri::command]
pub async fn compare_my_summary(state: State<'_, AppState>) -> CommandResult<UserWeekSummary> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let (team_id, user_name) = app_state.session().require_user()?;
        app_state.summaries().user_summary(&team_id, &user_name)
    })
    .await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("summary task failed: {err}"), None))?
        .map_err(CommandError::from)
}
