use chrono::NaiveDate;
use serde::Serialize;

/// One habit's weekly progress for one user: the human-readable display
/// string plus the slot accounting behind the overall percentage.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitProgress {
    pub habit_key: String,
    pub habit_name: String,
    pub display: String,
    pub achieved_slots: f64,
    pub total_slots: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserWeekSummary {
    pub user_name: String,
    pub per_habit: Vec<HabitProgress>,
    pub overall_pct: f64,
}

/// One row of the side-by-side comparison table. `values` is aligned with
/// the `users` column order of the enclosing [`WeeklyComparison`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub habit: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallPoint {
    pub user_name: String,
    pub completion_pct: f64,
}

/// Weekly side-by-side comparison for the whole team: the table rows in
/// catalog order (with a final "Overall %" row) and the bar-chart series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyComparison {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub users: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub summaries: Vec<UserWeekSummary>,
    pub chart: Vec<OverallPoint>,
}
