use std::convert::TryFrom;

use chrono::{NaiveDate, Utc};
use rusqlite::{named_params, Connection, Row};

use crate::error::{AppError, AppResult};
use crate::models::checkin::{CheckInEntry, CheckInRecord};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct CheckInRow {
    pub id: i64,
    pub team_id: String,
    pub user_name: String,
    pub habit_key: String,
    pub date: String,
    pub value_bool: Option<bool>,
    pub value_number: Option<f64>,
    pub note: Option<String>,
}

impl CheckInRow {
    pub fn into_record(self) -> AppResult<CheckInRecord> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|err| {
            AppError::validation(format!("invalid check-in date {}: {err}", self.date))
        })?;

        Ok(CheckInRecord {
            id: self.id,
            team_id: self.team_id,
            user_name: self.user_name,
            habit_key: self.habit_key,
            date,
            value_bool: self.value_bool,
            value_number: self.value_number,
            note: self.note,
        })
    }
}

impl TryFrom<&Row<'_>> for CheckInRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            team_id: row.get("team_id")?,
            user_name: row.get("user_name")?,
            habit_key: row.get("habit_key")?,
            date: row.get("date")?,
            value_bool: row.get("value_bool")?,
            value_number: row.get("value_number")?,
            note: row.get("note")?,
        })
    }
}

pub struct CheckInRepository;

impl CheckInRepository {
    /// Last write wins for a given (team, user, habit, date) key.
    pub fn upsert(
        conn: &Connection,
        team_id: &str,
        user_name: &str,
        entry: &CheckInEntry,
        date: NaiveDate,
    ) -> AppResult<()> {
        let now = Utc::now().to_rfc3339();

        conn.execute(
            r#"
                INSERT INTO checkins (
                    team_id,
                    user_name,
                    habit_key,
                    date,
                    value_bool,
                    value_number,
                    note,
                    created_at,
                    updated_at
                ) VALUES (
                    :team_id,
                    :user_name,
                    :habit_key,
                    :date,
                    :value_bool,
                    :value_number,
                    :note,
                    :now,
                    :now
                )
                ON CONFLICT (team_id, user_name, habit_key, date) DO UPDATE SET
                    value_bool = excluded.value_bool,
                    value_number = excluded.value_number,
                    note = excluded.note,
                    updated_at = excluded.updated_at
            "#,
            named_params! {
                ":team_id": team_id,
                ":user_name": user_name,
                ":habit_key": &entry.habit_key,
                ":date": date.format(DATE_FORMAT).to_string(),
                ":value_bool": &entry.value_bool,
                ":value_number": &entry.value_number,
                ":note": &entry.note,
                ":now": &now,
            },
        )?;

        Ok(())
    }

    pub fn list_for_date(
        conn: &Connection,
        team_id: &str,
        user_name: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<CheckInRecord>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    id,
                    team_id,
                    user_name,
                    habit_key,
                    date,
                    value_bool,
                    value_number,
                    note
                FROM checkins
                WHERE team_id = :team_id
                  AND user_name = :user_name
                  AND date = :date
                ORDER BY habit_key ASC
            "#,
        )?;

        let records = stmt
            .query_map(
                named_params! {
                    ":team_id": team_id,
                    ":user_name": user_name,
                    ":date": date.format(DATE_FORMAT).to_string(),
                },
                |row| CheckInRow::try_from(row),
            )?
            .map(|row| {
                row.map_err(AppError::from)
                    .and_then(|row| row.into_record())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(records)
    }

    pub fn list_range(
        conn: &Connection,
        team_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CheckInRecord>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    id,
                    team_id,
                    user_name,
                    habit_key,
                    date,
                    value_bool,
                    value_number,
                    note
                FROM checkins
                WHERE team_id = :team_id
                  AND date >= :start
                  AND date <= :end
                ORDER BY user_name ASC, date ASC, habit_key ASC
            "#,
        )?;

        let records = stmt
            .query_map(
                named_params! {
                    ":team_id": team_id,
                    ":start": start.format(DATE_FORMAT).to_string(),
                    ":end": end.format(DATE_FORMAT).to_string(),
                },
                |row| CheckInRow::try_from(row),
            )?
            .map(|row| {
                row.map_err(AppError::from)
                    .and_then(|row| row.into_record())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(records)
    }
}
