pub mod checkin;
pub mod compare;
pub mod session;
pub mod target;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::checkin_service::CheckInService;
use crate::services::session_service::SessionService;
use crate::services::summary_service::SummaryService;
use crate::services::target_service::TargetService;
use crate::services::team_service::{AppConfig, TeamService};

#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    session_service: Arc<SessionService>,
    team_service: Arc<TeamService>,
    checkin_service: Arc<CheckInService>,
    target_service: Arc<TargetService>,
    summary_service: Arc<SummaryService>,
}

impl AppState {
    pub fn new(db_pool: DbPool, config: AppConfig) -> AppResult<Self> {
        let session_service = Arc::new(SessionService::new());
        let team_service = Arc::new(TeamService::new(
            db_pool.clone(),
            config,
            Arc::clone(&session_service),
        ));
        let checkin_service = Arc::new(CheckInService::new(db_pool.clone()));
        let target_service = Arc::new(TargetService::new(db_pool.clone()));
        let summary_service = Arc::new(SummaryService::new(
            db_pool.clone(),
            Arc::clone(&target_service),
        ));

        Ok(Self {
            db_pool,
            session_service,
            team_service,
            checkin_service,
            target_service,
            summary_service,
        })
    }

    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session_service)
    }

    pub fn teams(&self) -> Arc<TeamService> {
        Arc::clone(&self.team_service)
    }

    pub fn checkins(&self) -> Arc<CheckInService> {
        Arc::clone(&self.checkin_service)
    }

    pub fn targets(&self) -> Arc<TargetService> {
        Arc::clone(&self.target_service)
    }

    pub fn summaries(&self) -> Arc<SummaryService> {
        Arc::clone(&self.summary_service)
    }

    pub fn db(&self) -> DbPool {
        self.db_pool.clone()
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "requested resource does not exist", None)
            }
            AppError::Conflict { message } => CommandError::new("CONFLICT", message, None),
            AppError::Unauthorized(message) => {
                warn!(target: "app::command", %message, "unauthorized command");
                CommandError::new("UNAUTHORIZED", message, None)
            }
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "serialization failed", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "filesystem read/write failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}
