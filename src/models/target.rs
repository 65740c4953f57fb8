use serde::{Deserialize, Serialize};

/// A stored per-user daily target for a numeric habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    pub team_id: String,
    pub user_name: String,
    pub habit_key: String,
    pub target_number: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUpsert {
    pub habit_key: String,
    pub target_number: f64,
}
