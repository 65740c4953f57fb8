use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::AppResult;
use crate::models::team::TeamRecord;

#[derive(Debug, Clone)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub passcode: String,
    pub created_at: String,
}

impl TeamRow {
    pub fn into_record(self) -> TeamRecord {
        TeamRecord {
            id: self.id,
            name: self.name,
            passcode: self.passcode,
            created_at: self.created_at,
        }
    }
}

impl TryFrom<&Row<'_>> for TeamRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            passcode: row.get("passcode")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct TeamRepository;

impl TeamRepository {
    pub fn insert(conn: &Connection, team: &TeamRecord) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO teams (id, name, passcode, created_at)
                VALUES (:id, :name, :passcode, :created_at)
            "#,
            named_params! {
                ":id": &team.id,
                ":name": &team.name,
                ":passcode": &team.passcode,
                ":created_at": &team.created_at,
            },
        )?;

        Ok(())
    }

    pub fn find_by_id(conn: &Connection, id: &str) -> AppResult<Option<TeamRecord>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT id, name, passcode, created_at
                FROM teams
                WHERE id = :id
            "#,
        )?;

        let row = stmt
            .query_row(named_params! {":id": id}, |row| TeamRow::try_from(row))
            .optional()?;

        Ok(row.map(TeamRow::into_record))
    }
}
