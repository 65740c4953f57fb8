use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HabitValueType {
    Bool,
    Num,
}

impl HabitValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitValueType::Bool => "bool",
            HabitValueType::Num => "num",
        }
    }
}

impl fmt::Display for HabitValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for HabitValueType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "bool" => Ok(HabitValueType::Bool),
            "num" => Ok(HabitValueType::Num),
            other => Err(format!("unsupported habit value type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

impl HabitFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekly => "weekly",
        }
    }
}

impl fmt::Display for HabitFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for HabitFrequency {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "daily" => Ok(HabitFrequency::Daily),
            "weekly" => Ok(HabitFrequency::Weekly),
            other => Err(format!("unsupported habit frequency: {other}")),
        }
    }
}

/// One entry of the static habit catalog. Definitions are fixed at compile
/// time and shared read-only across every team and user.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub value_type: HabitValueType,
    pub frequency: HabitFrequency,
}

/// The catalog, in display order. Order matters: weekly summaries emit one
/// row per habit in exactly this sequence.
pub static HABIT_CATALOG: &[HabitDefinition] = &[
    HabitDefinition {
        key: "productivity",
        name: "Productivity",
        value_type: HabitValueType::Bool,
        frequency: HabitFrequency::Daily,
    },
    HabitDefinition {
        key: "fitness",
        name: "Fitness",
        value_type: HabitValueType::Bool,
        frequency: HabitFrequency::Daily,
    },
    HabitDefinition {
        key: "faith_bible",
        name: "Bible Reading",
        value_type: HabitValueType::Bool,
        frequency: HabitFrequency::Daily,
    },
    HabitDefinition {
        key: "faith_prayer",
        name: "Prayer",
        value_type: HabitValueType::Bool,
        frequency: HabitFrequency::Daily,
    },
    HabitDefinition {
        key: "faith_fasting",
        name: "Fasting",
        value_type: HabitValueType::Bool,
        frequency: HabitFrequency::Weekly,
    },
    HabitDefinition {
        key: "food_healthy",
        name: "Healthy Eating",
        value_type: HabitValueType::Bool,
        frequency: HabitFrequency::Daily,
    },
    HabitDefinition {
        key: "water_liters",
        name: "Water (L)",
        value_type: HabitValueType::Num,
        frequency: HabitFrequency::Daily,
    },
    HabitDefinition {
        key: "job_apps",
        name: "Job Applications",
        value_type: HabitValueType::Num,
        frequency: HabitFrequency::Daily,
    },
];

/// Per-day fallback targets for numeric habits without a stored override.
pub static DEFAULT_TARGETS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([("water_liters", 2.0), ("job_apps", 10.0)])
});

pub fn find_habit(key: &str) -> Option<&'static HabitDefinition> {
    HABIT_CATALOG.iter().find(|habit| habit.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        for (index, habit) in HABIT_CATALOG.iter().enumerate() {
            assert!(
                !HABIT_CATALOG[index + 1..].iter().any(|h| h.key == habit.key),
                "duplicate habit key: {}",
                habit.key
            );
        }
    }

    #[test]
    fn default_targets_cover_exactly_the_numeric_habits() {
        let numeric: Vec<_> = HABIT_CATALOG
            .iter()
            .filter(|h| h.value_type == HabitValueType::Num)
            .map(|h| h.key)
            .collect();

        assert_eq!(numeric.len(), DEFAULT_TARGETS.len());
        for key in numeric {
            assert!(DEFAULT_TARGETS.contains_key(key));
        }
    }

    #[test]
    fn value_type_round_trips_through_str() {
        assert_eq!(
            HabitValueType::try_from(HabitValueType::Num.as_str()),
            Ok(HabitValueType::Num)
        );
        assert!(HabitValueType::try_from("decimal").is_err());
    }
}
