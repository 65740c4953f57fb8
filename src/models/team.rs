use serde::Serialize;

/// A team row. Created once, never mutated; the id doubles as the shared
/// secret a partner uses to join.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub passcode: String,
    pub created_at: String,
}
