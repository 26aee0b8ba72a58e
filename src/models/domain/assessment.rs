use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::constants::recommendations::{
    EXCELLENT_RECOMMENDATION, GOOD_RECOMMENDATION, NEEDS_IMPROVEMENT_RECOMMENDATION,
    SATISFACTORY_RECOMMENDATION,
};

/// Attempts finished in fewer minutes than this count as efficient.
pub const EFFICIENT_TIME_THRESHOLD_MINUTES: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Satisfactory,
    NeedsImprovement,
}

impl PerformanceBand {
    pub const ALL: [PerformanceBand; 4] = [
        PerformanceBand::Excellent,
        PerformanceBand::Good,
        PerformanceBand::Satisfactory,
        PerformanceBand::NeedsImprovement,
    ];

    /// Bands use the raw percentage; boundaries are inclusive.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            PerformanceBand::Excellent
        } else if percentage >= 80.0 {
            PerformanceBand::Good
        } else if percentage >= 70.0 {
            PerformanceBand::Satisfactory
        } else {
            PerformanceBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::Good => "Good",
            PerformanceBand::Satisfactory => "Satisfactory",
            PerformanceBand::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => EXCELLENT_RECOMMENDATION,
            PerformanceBand::Good => GOOD_RECOMMENDATION,
            PerformanceBand::Satisfactory => SATISFACTORY_RECOMMENDATION,
            PerformanceBand::NeedsImprovement => NEEDS_IMPROVEMENT_RECOMMENDATION,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum TimeEfficiency {
    Efficient,
    NeedsMoreTimeManagement,
}

impl TimeEfficiency {
    pub fn from_minutes(minutes: u32) -> Self {
        if minutes < EFFICIENT_TIME_THRESHOLD_MINUTES {
            TimeEfficiency::Efficient
        } else {
            TimeEfficiency::NeedsMoreTimeManagement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeEfficiency::Efficient => "Efficient",
            TimeEfficiency::NeedsMoreTimeManagement => "Needs more time management",
        }
    }
}
