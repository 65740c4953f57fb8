use std::collections::HashMap;

use tauri::{async_runtime, State};

use crate::commands::{AppState, CommandError, CommandResult};
use crate::error::AppError;
use crate::models::checkin::{CheckInEntry, CheckInRecord, WeekOverview};
use crate::models::habit::{HabitDefinition, HABIT_CATALOG};

#[tauri::command]
pub async fn habits_list() -> CommandResult<Vec<HabitDefinition>> {
    Ok(HABIT_CATALOG.to_vec())
}

#[tauri::command]
pub async fn checkin_save_today(
    state: State<'_, AppState>,
    entries: Vec<CheckInEntry>,
) -> CommandResult<usize> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let (team_id, user_name) = app_state.session().require_user()?;
        app_state
            .checkins()
            .save_today(&team_id, &user_name, &entries)
    })
    .await
}

#[tauri::command]
pub async fn checkin_today_entries(
    state: State<'_, AppState>,
) -> CommandResult<HashMap<String, CheckInRecord>> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let (team_id, user_name) = app_state.session().require_user()?;
        app_state.checkins().today_entries(&team_id, &user_name)
    })
    .await
}

#[tauri::command]
pub async fn checkin_week_rows(state: State<'_, AppState>) -> CommandResult<WeekOverview> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let context = app_state.session().require()?;
        app_state.checkins().week_rows(&context.team_id)
    })
    .await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("check-in task failed: {err}"), None))?
        .map_err(CommandError::from)
}
