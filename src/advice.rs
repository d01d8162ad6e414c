//! Canned advice selected by threshold comparison.
//!
//! Both policies use strict inequalities: a value sitting exactly on a bound
//! (`diff == threshold`, `ratio == low`) lands in the steady bucket.

use crate::errors::DataError;
use crate::models::{ActivityDataset, AdviceMessage, DerivedStatistics, Severity};
use crate::stats::delta_between;
use serde::Serialize;

pub const DEFAULT_DELTA_THRESHOLD: i64 = 500;
pub const DEFAULT_RATIO_LOW: f64 = 0.8;
pub const DEFAULT_RATIO_HIGH: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AdvicePolicy {
    /// Compares a day's steps with the preceding row.
    Delta { threshold: i64 },
    /// Compares a day's steps with the dataset mean.
    Ratio { low: f64, high: f64 },
}

impl Default for AdvicePolicy {
    fn default() -> Self {
        AdvicePolicy::Delta {
            threshold: DEFAULT_DELTA_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceBucket {
    Above,
    Steady,
    Below,
}

impl AdvicePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            AdvicePolicy::Delta { .. } => "delta",
            AdvicePolicy::Ratio { .. } => "ratio",
        }
    }

    /// `input` is a step difference for `Delta` and a steps/mean ratio for `Ratio`.
    pub fn classify(&self, input: f64) -> AdviceBucket {
        let (low, high) = match *self {
            AdvicePolicy::Delta { threshold } => (-(threshold as f64), threshold as f64),
            AdvicePolicy::Ratio { low, high } => (low, high),
        };
        if input > high {
            AdviceBucket::Above
        } else if input < low {
            AdviceBucket::Below
        } else {
            AdviceBucket::Steady
        }
    }

    pub fn message(&self, bucket: AdviceBucket) -> AdviceMessage {
        match (self, bucket) {
            (AdvicePolicy::Delta { .. }, AdviceBucket::Above) => AdviceMessage {
                text: "You were more active than the day before. Amazing effort!",
                severity: Severity::Success,
            },
            (AdvicePolicy::Delta { .. }, AdviceBucket::Below) => AdviceMessage {
                text: "You slowed down compared to the day before. Maybe take a walk today!",
                severity: Severity::Danger,
            },
            (AdvicePolicy::Delta { .. }, AdviceBucket::Steady) => AdviceMessage {
                text: "Consistent performance. Steady progress!",
                severity: Severity::Info,
            },
            (AdvicePolicy::Ratio { .. }, AdviceBucket::Above) => AdviceMessage {
                text: "Excellent! You are above your average. Keep up the momentum!",
                severity: Severity::Success,
            },
            (AdvicePolicy::Ratio { .. }, AdviceBucket::Below) => AdviceMessage {
                text: "You walked less than your average. Try a short evening walk or take the stairs.",
                severity: Severity::Warning,
            },
            (AdvicePolicy::Ratio { .. }, AdviceBucket::Steady) => AdviceMessage {
                text: "You're right around your average. Consistency is key.",
                severity: Severity::Info,
            },
        }
    }
}

pub fn select_advice(policy: &AdvicePolicy, input: f64) -> AdviceMessage {
    policy.message(policy.classify(input))
}

/// Steps over mean, with a zero mean treated as "exactly average".
pub fn steps_ratio(steps: u64, mean_steps: f64) -> f64 {
    if mean_steps > 0.0 {
        steps as f64 / mean_steps
    } else {
        1.0
    }
}

/// Advice for the record at `index`, feeding the policy its own kind of input.
pub fn advice_for_day(
    policy: &AdvicePolicy,
    dataset: &ActivityDataset,
    stats: &DerivedStatistics,
    index: usize,
) -> Result<AdviceMessage, DataError> {
    let records = dataset.records();
    let record = records.get(index).ok_or(DataError::EmptyDataset)?;

    let input = match policy {
        AdvicePolicy::Delta { .. } => {
            let previous = index
                .checked_sub(1)
                .and_then(|prev| records.get(prev))
                .ok_or(DataError::InsufficientData {
                    required: 2,
                    found: index + 1,
                })?;
            delta_between(previous, record).steps_diff as f64
        }
        AdvicePolicy::Ratio { .. } => steps_ratio(record.steps, stats.mean_steps),
    };

    Ok(select_advice(policy, input))
}
