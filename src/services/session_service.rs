use std::sync::RwLock;

use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::team::TeamRecord;

/// The acting team and user for this app instance. Replaces the original
/// per-interaction global state with one explicit object: initialized on
/// create/join, display name set separately, never torn down.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub team_id: String,
    pub team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

pub struct SessionService {
    current: RwLock<Option<SessionContext>>,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    pub fn start(&self, team: &TeamRecord) -> AppResult<SessionContext> {
        let context = SessionContext {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            user_name: None,
        };

        let mut guard = self
            .current
            .write()
            .map_err(|_| AppError::other("session lock poisoned"))?;
        *guard = Some(context.clone());

        info!(target: "app::session", team_id = %context.team_id, "session started");
        Ok(context)
    }

    pub fn set_user(&self, name: &str) -> AppResult<SessionContext> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("display name must not be empty"));
        }

        let mut guard = self
            .current
            .write()
            .map_err(|_| AppError::other("session lock poisoned"))?;

        let context = guard
            .as_mut()
            .ok_or_else(|| AppError::validation("no active team session"))?;
        context.user_name = Some(name.to_string());

        info!(target: "app::session", team_id = %context.team_id, user = %name, "display name set");
        Ok(context.clone())
    }

    pub fn current(&self) -> AppResult<Option<SessionContext>> {
        let guard = self
            .current
            .read()
            .map_err(|_| AppError::other("session lock poisoned"))?;
        Ok(guard.clone())
    }

    /// Session with a team, user optional.
    pub fn require(&self) -> AppResult<SessionContext> {
        self.current()?
            .ok_or_else(|| AppError::validation("no active team session"))
    }

    /// Session with both a team and a display name set.
    pub fn require_user(&self) -> AppResult<(String, String)> {
        let context = self.require()?;
        let user = context
            .user_name
            .ok_or_else(|| AppError::validation("no display name set for this session"))?;
        Ok((context.team_id, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> TeamRecord {
        TeamRecord {
            id: "team-1".to_string(),
            name: "Us".to_string(),
            passcode: String::new(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn require_fails_before_start() {
        let service = SessionService::new();
        assert!(service.require().is_err());
        assert!(service.current().unwrap().is_none());
    }

    #[test]
    fn start_then_set_user_yields_full_context() {
        let service = SessionService::new();
        service.start(&team()).unwrap();

        let context = service.set_user("  Joshua ").unwrap();
        assert_eq!(context.user_name.as_deref(), Some("Joshua"));

        let (team_id, user) = service.require_user().unwrap();
        assert_eq!(team_id, "team-1");
        assert_eq!(user, "Joshua");
    }

    #[test]
    fn blank_display_name_is_rejected() {
        let service = SessionService::new();
        service.start(&team()).unwrap();
        assert!(service.set_user("   ").is_err());
    }

    #[test]
    fn require_user_fails_without_display_name() {
        let service = SessionService::new();
        service.start(&team()).unwrap();
        assert!(service.require_user().is_err());
    }
}
