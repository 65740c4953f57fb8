use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One persisted check-in: a single user's value for a single habit on a
/// single calendar date. Unique per (team, user, habit, date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub id: i64,
    pub team_id: String,
    pub user_name: String,
    pub habit_key: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_bool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Incoming value for one habit, as submitted from the Today form. A bool
/// habit carries only `value_bool`, a numeric habit only `value_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInEntry {
    pub habit_key: String,
    #[serde(default)]
    pub value_bool: Option<bool>,
    #[serde(default)]
    pub value_number: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// The whole team's raw check-in rows for one Monday-to-Sunday window,
/// sorted by (user, date, habit) for tabular display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekOverview {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub rows: Vec<CheckInRecord>,
}
