use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::repositories::team_repository::TeamRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::team::TeamRecord;
use crate::services::session_service::{SessionContext, SessionService};

const PASSCODE_ENV: &str = "ACCOUNTABILITY_PASSCODE";

/// Startup configuration. An empty passcode disables the gate entirely,
/// mirroring the original beta behavior.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub passcode: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            passcode: std::env::var(PASSCODE_ENV).unwrap_or_default(),
        }
    }
}

pub struct TeamService {
    db: DbPool,
    config: AppConfig,
    session: Arc<SessionService>,
}

impl TeamService {
    pub fn new(db: DbPool, config: AppConfig, session: Arc<SessionService>) -> Self {
        Self {
            db,
            config,
            session,
        }
    }

    fn verify_passcode(&self, passcode: &str) -> AppResult<()> {
        if self.config.passcode.is_empty() || passcode == self.config.passcode {
            return Ok(());
        }
        Err(AppError::unauthorized("wrong passcode"))
    }

    /// Create a new team and start a session for it. The returned context
    /// carries the team id the partner needs to join.
    pub fn create_team(&self, name: &str, passcode: &str) -> AppResult<SessionContext> {
        self.verify_passcode(passcode)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("team name must not be empty"));
        }

        let stored_passcode = if passcode.is_empty() {
            self.config.passcode.clone()
        } else {
            passcode.to_string()
        };

        let team = TeamRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            passcode: stored_passcode,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.db.get_connection()?;
        TeamRepository::insert(&conn, &team)?;

        info!(target: "app::team", team_id = %team.id, "team created");
        self.session.start(&team)
    }

    /// Join an existing team by id. An unknown id is a user-visible
    /// rejection; the current session is left untouched.
    pub fn join_team(&self, team_id: &str, passcode: &str) -> AppResult<SessionContext> {
        self.verify_passcode(passcode)?;

        let team_id = team_id.trim();
        if team_id.is_empty() {
            return Err(AppError::validation("team id must not be empty"));
        }

        let conn = self.db.get_connection()?;
        let team = TeamRepository::find_by_id(&conn, team_id)?.ok_or_else(AppError::not_found)?;

        info!(target: "app::team", team_id = %team.id, "joined team");
        self.session.start(&team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(passcode: &str) -> (TeamService, Arc<SessionService>, TempDir) {
        let dir = TempDir::new().unwrap();
        let pool = DbPool::new(dir.path().join("teams.sqlite")).unwrap();
        let session = Arc::new(SessionService::new());
        let config = AppConfig {
            passcode: passcode.to_string(),
        };
        (
            TeamService::new(pool, config, Arc::clone(&session)),
            session,
            dir,
        )
    }

    #[test]
    fn wrong_passcode_is_rejected_without_touching_the_session() {
        let (service, session, _guard) = setup("secret");

        let err = service.create_team("Us", "nope").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(session.current().unwrap().is_none());
    }

    #[test]
    fn empty_configured_passcode_disables_the_gate() {
        let (service, _session, _guard) = setup("");
        let context = service.create_team("Us", "anything").unwrap();
        assert_eq!(context.team_name, "Us");
    }

    #[test]
    fn join_unknown_team_is_not_found_and_keeps_session() {
        let (service, session, _guard) = setup("secret");

        let err = service.join_team("no-such-team", "secret").unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert!(session.current().unwrap().is_none());
    }

    #[test]
    fn create_then_join_round_trips_the_team_id() {
        let (service, _session, _guard) = setup("secret");

        let created = service.create_team("  Us  ", "secret").unwrap();
        let joined = service.join_team(&created.team_id, "secret").unwrap();

        assert_eq!(joined.team_id, created.team_id);
        assert_eq!(joined.team_name, "Us");
    }
}
