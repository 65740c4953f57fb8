use std::collections::HashMap;

use chrono::Local;
use tracing::info;

use crate::db::repositories::checkin_repository::CheckInRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::checkin::{CheckInEntry, CheckInRecord, WeekOverview};
use crate::models::habit::{find_habit, HabitValueType};
use crate::utils::week::WeekWindow;

pub struct CheckInService {
    db: DbPool,
}

impl CheckInService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Upsert one batch of entries for "today". The store accepts any
    /// date, but this path never backdates.
    pub fn save_today(
        &self,
        team_id: &str,
        user_name: &str,
        entries: &[CheckInEntry],
    ) -> AppResult<usize> {
        let today = Local::now().date_naive();
        let conn = self.db.get_connection()?;

        for entry in entries {
            let habit = find_habit(&entry.habit_key).ok_or_else(|| {
                AppError::validation(format!("unknown habit key: {}", entry.habit_key))
            })?;

            match habit.value_type {
                HabitValueType::Bool => {
                    if entry.value_number.is_some() {
                        return Err(AppError::validation(format!(
                            "habit {} is boolean and cannot carry a number",
                            habit.key
                        )));
                    }
                }
                HabitValueType::Num => {
                    if entry.value_bool.is_some() {
                        return Err(AppError::validation(format!(
                            "habit {} is numeric and cannot carry a boolean",
                            habit.key
                        )));
                    }
                    if let Some(value) = entry.value_number {
                        if !value.is_finite() || value < 0.0 {
                            return Err(AppError::validation(format!(
                                "value for {} must be a non-negative number",
                                habit.key
                            )));
                        }
                    }
                }
            }

            CheckInRepository::upsert(&conn, team_id, user_name, entry, today)?;
        }

        info!(
            target: "app::checkin",
            team_id,
            user = user_name,
            date = %today,
            count = entries.len(),
            "check-ins saved"
        );

        Ok(entries.len())
    }

    /// Today's saved values keyed by habit, for form prefill.
    pub fn today_entries(
        &self,
        team_id: &str,
        user_name: &str,
    ) -> AppResult<HashMap<String, CheckInRecord>> {
        let today = Local::now().date_naive();
        let conn = self.db.get_connection()?;
        let records = CheckInRepository::list_for_date(&conn, team_id, user_name, today)?;

        Ok(records
            .into_iter()
            .map(|record| (record.habit_key.clone(), record))
            .collect())
    }

    /// The whole team's raw rows for the current week.
    pub fn week_rows(&self, team_id: &str) -> AppResult<WeekOverview> {
        let window = WeekWindow::current();
        let conn = self.db.get_connection()?;
        let rows = CheckInRepository::list_range(&conn, team_id, window.start, window.end)?;

        Ok(WeekOverview {
            week_start: window.start,
            week_end: window.end,
            rows,
        })
    }
}
