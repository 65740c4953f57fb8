use std::collections::HashMap;

use tracing::info;

use crate::db::repositories::target_repository::TargetRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::habit::{find_habit, HabitValueType, DEFAULT_TARGETS};
use crate::models::target::TargetUpsert;

pub struct TargetService {
    db: DbPool,
}

impl TargetService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Two-step resolution: start from the catalog defaults, then overlay
    /// whatever the user has stored. Every numeric habit ends up with an
    /// entry; habits without a default and without a stored row resolve
    /// to nothing and score as goalless.
    pub fn resolved(&self, team_id: &str, user_name: &str) -> AppResult<HashMap<String, f64>> {
        let conn = self.db.get_connection()?;
        let stored = TargetRepository::map_for_user(&conn, team_id, user_name)?;

        let mut resolved: HashMap<String, f64> = DEFAULT_TARGETS
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect();
        resolved.extend(stored);

        Ok(resolved)
    }

    pub fn set_targets(
        &self,
        team_id: &str,
        user_name: &str,
        targets: &[TargetUpsert],
    ) -> AppResult<HashMap<String, f64>> {
        let conn = self.db.get_connection()?;

        for target in targets {
            let habit = find_habit(&target.habit_key).ok_or_else(|| {
                AppError::validation(format!("unknown habit key: {}", target.habit_key))
            })?;

            if habit.value_type != HabitValueType::Num {
                return Err(AppError::validation(format!(
                    "habit {} is not numeric and cannot have a target",
                    habit.key
                )));
            }

            if !target.target_number.is_finite() || target.target_number < 0.0 {
                return Err(AppError::validation(format!(
                    "target for {} must be a non-negative number",
                    habit.key
                )));
            }

            TargetRepository::upsert(&conn, team_id, user_name, target)?;
        }

        info!(
            target: "app::targets",
            team_id,
            user = user_name,
            count = targets.len(),
            "targets saved"
        );

        self.resolved(team_id, user_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TargetService, TempDir) {
        let dir = TempDir::new().unwrap();
        let pool = DbPool::new(dir.path().join("targets.sqlite")).unwrap();
        (TargetService::new(pool), dir)
    }

    #[test]
    fn defaults_apply_when_nothing_is_stored() {
        let (service, _guard) = setup();
        let resolved = service.resolved("team", "Joshua").unwrap();

        assert_eq!(resolved.get("water_liters"), Some(&2.0));
        assert_eq!(resolved.get("job_apps"), Some(&10.0));
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn stored_rows_override_defaults_per_user() {
        let (service, _guard) = setup();

        let resolved = service
            .set_targets(
                "team",
                "Joshua",
                &[TargetUpsert {
                    habit_key: "water_liters".to_string(),
                    target_number: 3.5,
                }],
            )
            .unwrap();

        assert_eq!(resolved.get("water_liters"), Some(&3.5));
        assert_eq!(resolved.get("job_apps"), Some(&10.0));

        // The partner keeps the defaults.
        let partner = service.resolved("team", "Partner").unwrap();
        assert_eq!(partner.get("water_liters"), Some(&2.0));
    }

    #[test]
    fn second_save_overwrites_instead_of_duplicating() {
        let (service, _guard) = setup();
        let upsert = |value: f64| TargetUpsert {
            habit_key: "job_apps".to_string(),
            target_number: value,
        };

        service.set_targets("team", "Joshua", &[upsert(5.0)]).unwrap();
        let resolved = service.set_targets("team", "Joshua", &[upsert(8.0)]).unwrap();

        assert_eq!(resolved.get("job_apps"), Some(&8.0));
    }

    #[test]
    fn non_numeric_habits_cannot_carry_targets() {
        let (service, _guard) = setup();
        let err = service
            .set_targets(
                "team",
                "Joshua",
                &[TargetUpsert {
                    habit_key: "fitness".to_string(),
                    target_number: 1.0,
                }],
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn negative_and_unknown_targets_are_rejected() {
        let (service, _guard) = setup();

        assert!(service
            .set_targets(
                "team",
                "Joshua",
                &[TargetUpsert {
                    habit_key: "water_liters".to_string(),
                    target_number: -1.0,
                }],
            )
            .is_err());

        assert!(service
            .set_targets(
                "team",
                "Joshua",
                &[TargetUpsert {
                    habit_key: "screen_time".to_string(),
                    target_number: 1.0,
                }],
            )
            .is_err());
    }
}
