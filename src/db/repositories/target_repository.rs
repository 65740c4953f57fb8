use std::collections::HashMap;
use std::convert::TryFrom;

use rusqlite::{named_params, Connection, Row};

use crate::error::{AppError, AppResult};
use crate::models::target::{TargetRecord, TargetUpsert};

#[derive(Debug, Clone)]
pub struct TargetRow {
    pub team_id: String,
    pub user_name: String,
    pub habit_key: String,
    pub target_number: f64,
}

impl TargetRow {
    pub fn into_record(self) -> TargetRecord {
        TargetRecord {
            team_id: self.team_id,
            user_name: self.user_name,
            habit_key: self.habit_key,
            target_number: self.target_number,
        }
    }
}

impl TryFrom<&Row<'_>> for TargetRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            team_id: row.get("team_id")?,
            user_name: row.get("user_name")?,
            habit_key: row.get("habit_key")?,
            target_number: row.get("target_number")?,
        })
    }
}

pub struct TargetRepository;

impl TargetRepository {
    pub fn upsert(
        conn: &Connection,
        team_id: &str,
        user_name: &str,
        target: &TargetUpsert,
    ) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO targets (
                    team_id,
                    user_name,
                    habit_key,
                    target_number
                ) VALUES (
                    :team_id,
                    :user_name,
                    :habit_key,
                    :target_number
                )
                ON CONFLICT (team_id, user_name, habit_key) DO UPDATE SET
                    target_number = excluded.target_number
            "#,
            named_params! {
                ":team_id": team_id,
                ":user_name": user_name,
                ":habit_key": &target.habit_key,
                ":target_number": target.target_number,
            },
        )?;

        Ok(())
    }

    /// Stored overrides only; defaults are merged in by the target service.
    pub fn map_for_user(
        conn: &Connection,
        team_id: &str,
        user_name: &str,
    ) -> AppResult<HashMap<String, f64>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT team_id, user_name, habit_key, target_number
                FROM targets
                WHERE team_id = :team_id
                  AND user_name = :user_name
            "#,
        )?;

        let map = stmt
            .query_map(
                named_params! {
                    ":team_id": team_id,
                    ":user_name": user_name,
                },
                |row| TargetRow::try_from(row),
            )?
            .map(|row| {
                row.map_err(AppError::from)
                    .map(|row| (row.habit_key.clone(), row.target_number))
            })
            .collect::<AppResult<HashMap<_, _>>>()?;

        Ok(map)
    }
}
