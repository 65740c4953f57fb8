use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::db::repositories::checkin_repository::CheckInRepository;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::checkin::CheckInRecord;
use crate::models::habit::{HabitDefinition, HabitFrequency, HabitValueType, HABIT_CATALOG};
use crate::models::summary::{
    ComparisonRow, HabitProgress, OverallPoint, UserWeekSummary, WeeklyComparison,
};
use crate::services::target_service::TargetService;
use crate::utils::week::WeekWindow;

const WEEKLY_DONE_MARKER: &str = "✅ once";
const WEEKLY_PENDING_MARKER: &str = "❌ not yet";

/// Weekly aggregation: turns raw per-day check-in rows into per-habit
/// progress strings and an overall completion percentage.
pub struct SummaryService {
    db: DbPool,
    target_service: Arc<TargetService>,
}

impl SummaryService {
    pub fn new(db: DbPool, target_service: Arc<TargetService>) -> Self {
        Self { db, target_service }
    }

    /// One user's summary for the current week.
    pub fn user_summary(&self, team_id: &str, user_name: &str) -> AppResult<UserWeekSummary> {
        let window = WeekWindow::current();
        let conn = self.db.get_connection()?;
        let rows = CheckInRepository::list_range(&conn, team_id, window.start, window.end)?;
        let records: Vec<CheckInRecord> = rows
            .into_iter()
            .filter(|row| row.user_name == user_name)
            .collect();
        let targets = self.target_service.resolved(team_id, user_name)?;

        Ok(summarize_week(user_name, &records, &targets, HABIT_CATALOG))
    }

    /// Side-by-side weekly comparison for every user that has at least one
    /// check-in this week. Users are ordered by name; the table carries one
    /// row per habit in catalog order plus a final "Overall %" row.
    pub fn weekly_comparison(&self, team_id: &str) -> AppResult<WeeklyComparison> {
        let window = WeekWindow::current();
        let conn = self.db.get_connection()?;
        let rows = CheckInRepository::list_range(&conn, team_id, window.start, window.end)?;

        let users: Vec<String> = rows
            .iter()
            .map(|row| row.user_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut summaries = Vec::with_capacity(users.len());
        for user in &users {
            let records: Vec<CheckInRecord> = rows
                .iter()
                .filter(|row| &row.user_name == user)
                .cloned()
                .collect();
            let targets = self.target_service.resolved(team_id, user)?;
            summaries.push(summarize_week(user, &records, &targets, HABIT_CATALOG));
        }

        let mut table = Vec::with_capacity(HABIT_CATALOG.len() + 1);
        for (index, habit) in HABIT_CATALOG.iter().enumerate() {
            table.push(ComparisonRow {
                habit: habit.name.to_string(),
                values: summaries
                    .iter()
                    .map(|summary| summary.per_habit[index].display.clone())
                    .collect(),
            });
        }
        table.push(ComparisonRow {
            habit: "Overall %".to_string(),
            values: summaries
                .iter()
                .map(|summary| format!("{:.1}%", summary.overall_pct))
                .collect(),
        });

        let chart = summaries
            .iter()
            .map(|summary| OverallPoint {
                user_name: summary.user_name.clone(),
                completion_pct: summary.overall_pct,
            })
            .collect();

        debug!(
            target: "app::summary",
            team_id,
            week_start = %window.start,
            users = users.len(),
            "weekly comparison computed"
        );

        Ok(WeeklyComparison {
            week_start: window.start,
            week_end: window.end,
            users,
            rows: table,
            summaries,
            chart,
        })
    }
}

/// Pure aggregation over one user's records for one week.
///
/// Slot accounting: a daily habit is worth 7 slots, a weekly habit 1.
/// Numeric habits score `min(total/goal, 1) * 7` against `target * 7`;
/// a numeric habit with no goal still occupies 7 slots but can achieve
/// none of them. Records whose habit key is not in the catalog are
/// ignored.
pub fn summarize_week(
    user_name: &str,
    records: &[CheckInRecord],
    targets: &HashMap<String, f64>,
    catalog: &[HabitDefinition],
) -> UserWeekSummary {
    let mut achieved_slots = 0.0_f64;
    let mut total_slots = 0.0_f64;
    let mut per_habit = Vec::with_capacity(catalog.len());

    for habit in catalog {
        let matching: Vec<&CheckInRecord> = records
            .iter()
            .filter(|record| record.habit_key == habit.key)
            .collect();

        let (display, achieved, slots) = match habit.value_type {
            HabitValueType::Bool => match habit.frequency {
                HabitFrequency::Daily => {
                    let done = matching
                        .iter()
                        .filter(|record| record.value_bool.unwrap_or(false))
                        .count();
                    (format!("{done}/7"), done as f64, 7.0)
                }
                HabitFrequency::Weekly => {
                    let done = matching
                        .iter()
                        .any(|record| record.value_bool.unwrap_or(false));
                    let marker = if done {
                        WEEKLY_DONE_MARKER
                    } else {
                        WEEKLY_PENDING_MARKER
                    };
                    (marker.to_string(), if done { 1.0 } else { 0.0 }, 1.0)
                }
            },
            HabitValueType::Num => {
                let total: f64 = matching
                    .iter()
                    .filter_map(|record| record.value_number)
                    .sum();
                let goal = targets.get(habit.key).copied().unwrap_or(0.0) * 7.0;

                if goal > 0.0 {
                    (
                        format!("{total:.1}/{goal:.1}"),
                        (total / goal).min(1.0) * 7.0,
                        7.0,
                    )
                } else {
                    (format!("{total:.1}"), 0.0, 7.0)
                }
            }
        };

        achieved_slots += achieved;
        total_slots += slots;
        per_habit.push(HabitProgress {
            habit_key: habit.key.to_string(),
            habit_name: habit.name.to_string(),
            display,
            achieved_slots: achieved,
            total_slots: slots,
        });
    }

    let overall_pct = if total_slots > 0.0 {
        round1(100.0 * achieved_slots / total_slots)
    } else {
        0.0
    };

    UserWeekSummary {
        user_name: user_name.to_string(),
        per_habit,
        overall_pct,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn record(key: &str, d: u32, value_bool: Option<bool>, value_number: Option<f64>) -> CheckInRecord {
        CheckInRecord {
            id: 0,
            team_id: "team".to_string(),
            user_name: "Joshua".to_string(),
            habit_key: key.to_string(),
            date: day(d),
            value_bool,
            value_number,
            note: None,
        }
    }

    fn bool_daily(key: &'static str) -> HabitDefinition {
        HabitDefinition {
            key,
            name: key,
            value_type: HabitValueType::Bool,
            frequency: HabitFrequency::Daily,
        }
    }

    fn bool_weekly(key: &'static str) -> HabitDefinition {
        HabitDefinition {
            key,
            name: key,
            value_type: HabitValueType::Bool,
            frequency: HabitFrequency::Weekly,
        }
    }

    fn numeric(key: &'static str) -> HabitDefinition {
        HabitDefinition {
            key,
            name: key,
            value_type: HabitValueType::Num,
            frequency: HabitFrequency::Daily,
        }
    }

    #[test]
    fn empty_week_scores_zero_with_zero_displays() {
        let summary = summarize_week("Joshua", &[], &HashMap::new(), HABIT_CATALOG);

        assert_eq!(summary.overall_pct, 0.0);
        for progress in &summary.per_habit {
            let habit = crate::models::habit::find_habit(&progress.habit_key).unwrap();
            if habit.value_type == HabitValueType::Bool
                && habit.frequency == HabitFrequency::Daily
            {
                assert_eq!(progress.display, "0/7");
            }
        }
    }

    #[test]
    fn empty_catalog_guards_the_zero_denominator() {
        let summary = summarize_week("Joshua", &[], &HashMap::new(), &[]);
        assert_eq!(summary.overall_pct, 0.0);
        assert!(summary.per_habit.is_empty());
    }

    #[test]
    fn daily_bool_counts_true_days() {
        let catalog = [bool_daily("fitness")];
        let records = vec![
            record("fitness", 6, Some(true), None),
            record("fitness", 7, Some(true), None),
            record("fitness", 8, Some(false), None),
            record("fitness", 9, None, None),
            record("fitness", 10, Some(true), None),
        ];

        let summary = summarize_week("Joshua", &records, &HashMap::new(), &catalog);
        assert_eq!(summary.per_habit[0].display, "3/7");
        assert_eq!(summary.per_habit[0].achieved_slots, 3.0);
        assert_eq!(summary.per_habit[0].total_slots, 7.0);
    }

    #[test]
    fn weekly_bool_needs_a_single_true() {
        let catalog = [bool_weekly("faith_fasting")];

        let done = summarize_week(
            "Joshua",
            &[record("faith_fasting", 8, Some(true), None)],
            &HashMap::new(),
            &catalog,
        );
        assert_eq!(done.per_habit[0].display, "✅ once");
        assert_eq!(done.per_habit[0].achieved_slots, 1.0);
        assert_eq!(done.per_habit[0].total_slots, 1.0);
        assert_eq!(done.overall_pct, 100.0);

        let pending = summarize_week(
            "Joshua",
            &[record("faith_fasting", 8, Some(false), None)],
            &HashMap::new(),
            &catalog,
        );
        assert_eq!(pending.per_habit[0].display, "❌ not yet");
        assert_eq!(pending.per_habit[0].achieved_slots, 0.0);
    }

    #[test]
    fn numeric_habit_scores_against_weekly_goal() {
        let catalog = [numeric("water_liters")];
        let targets = HashMap::from([("water_liters".to_string(), 2.0)]);
        let records = vec![
            record("water_liters", 6, None, Some(2.0)),
            record("water_liters", 7, None, Some(3.0)),
        ];

        let summary = summarize_week("Joshua", &records, &targets, &catalog);
        assert_eq!(summary.per_habit[0].display, "5.0/14.0");
        assert!((summary.per_habit[0].achieved_slots - 2.5).abs() < 1e-9);
    }

    #[test]
    fn numeric_overshoot_caps_at_full_slots() {
        let catalog = [numeric("water_liters")];
        let targets = HashMap::from([("water_liters".to_string(), 2.0)]);
        let records = vec![
            record("water_liters", 6, None, Some(12.0)),
            record("water_liters", 7, None, Some(8.0)),
        ];

        let summary = summarize_week("Joshua", &records, &targets, &catalog);
        assert_eq!(summary.per_habit[0].display, "20.0/14.0");
        assert_eq!(summary.per_habit[0].achieved_slots, 7.0);
        assert_eq!(summary.overall_pct, 100.0);
    }

    #[test]
    fn goalless_numeric_habit_still_counts_in_the_denominator() {
        let catalog = [numeric("steps"), bool_weekly("faith_fasting")];
        let records = vec![
            record("steps", 6, None, Some(4.5)),
            record("faith_fasting", 6, Some(true), None),
        ];

        let summary = summarize_week("Joshua", &records, &HashMap::new(), &catalog);
        assert_eq!(summary.per_habit[0].display, "4.5");
        assert_eq!(summary.per_habit[0].achieved_slots, 0.0);
        assert_eq!(summary.per_habit[0].total_slots, 7.0);
        // 1 achieved of 8 slots, so the goalless habit drags the score down.
        assert_eq!(summary.overall_pct, 12.5);
    }

    #[test]
    fn records_outside_the_catalog_are_ignored() {
        let catalog = [bool_daily("fitness")];
        let records = vec![
            record("fitness", 6, Some(true), None),
            record("left_over_habit", 6, Some(true), None),
        ];

        let summary = summarize_week("Joshua", &records, &HashMap::new(), &catalog);
        assert_eq!(summary.per_habit.len(), 1);
        assert_eq!(summary.per_habit[0].display, "1/7");
    }

    #[test]
    fn overall_percentage_rounds_to_one_decimal() {
        let catalog = [bool_daily("fitness")];
        let records = vec![
            record("fitness", 6, Some(true), None),
            record("fitness", 7, Some(true), None),
        ];

        // 2 of 7 slots = 28.571...% -> 28.6
        let summary = summarize_week("Joshua", &records, &HashMap::new(), &catalog);
        assert_eq!(summary.overall_pct, 28.6);
    }

    #[test]
    fn full_catalog_perfect_week_is_exactly_100() {
        let targets = HashMap::from([
            ("water_liters".to_string(), 2.0),
            ("job_apps".to_string(), 10.0),
        ]);

        let mut records = Vec::new();
        for habit in HABIT_CATALOG {
            match habit.value_type {
                HabitValueType::Bool => match habit.frequency {
                    HabitFrequency::Daily => {
                        for d in 6..=12 {
                            records.push(record(habit.key, d, Some(true), None));
                        }
                    }
                    HabitFrequency::Weekly => {
                        records.push(record(habit.key, 8, Some(true), None));
                    }
                },
                HabitValueType::Num => {
                    let per_day = targets[habit.key];
                    for d in 6..=12 {
                        records.push(record(habit.key, d, None, Some(per_day)));
                    }
                }
            }
        }

        let summary = summarize_week("Joshua", &records, &targets, HABIT_CATALOG);
        assert_eq!(summary.overall_pct, 100.0);
        assert_eq!(summary.per_habit.len(), HABIT_CATALOG.len());
    }
}
