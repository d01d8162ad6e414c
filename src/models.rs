use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A day label as it appears in the data, tagged with its weekday rank when
/// the label names a weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Day {
    label: String,
    weekday: Option<Weekday>,
}

impl Day {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let weekday = label.trim().parse::<Weekday>().ok();
        Self { label, weekday }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Monday=0 … Sunday=6; `None` for labels that are not weekday names.
    pub fn rank(&self) -> Option<u32> {
        self.weekday.map(|day| day.num_days_from_monday())
    }
}

impl From<String> for Day {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl From<Day> for String {
    fn from(day: Day) -> Self {
        day.label
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub day: Day,
    pub steps: u64,
    pub calories: f64,
}

impl ActivityRecord {
    pub fn new(day: impl Into<String>, steps: u64, calories: f64) -> Self {
        Self {
            day: Day::new(day),
            steps,
            calories,
        }
    }
}

/// Records in insertion order. Weekday order is only a display key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityDataset {
    records: Vec<ActivityRecord>,
}

impl ActivityDataset {
    pub fn new(records: Vec<ActivityRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: ActivityRecord) {
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&ActivityRecord> {
        self.records.last()
    }

    /// Index of the first record whose label matches `label` (case-insensitive).
    pub fn position_of(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.records
            .iter()
            .position(|record| record.day.label().trim().eq_ignore_ascii_case(label))
    }

    /// Records sorted Monday..Sunday; unranked labels keep dataset order at the end.
    pub fn weekday_ordered(&self) -> Vec<&ActivityRecord> {
        let mut ordered: Vec<&ActivityRecord> = self.records.iter().collect();
        ordered.sort_by_key(|record| record.day.rank().unwrap_or(u32::MAX));
        ordered
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDelta {
    pub day: String,
    pub previous_day: String,
    pub steps_diff: i64,
    pub calories_diff: f64,
    pub steps_diff_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStatistics {
    pub days: usize,
    pub total_steps: u64,
    pub total_calories: f64,
    pub mean_steps: f64,
    pub mean_calories: f64,
    pub best_day: ActivityRecord,
    pub worst_day: ActivityRecord,
    pub last_day_delta: Option<DayDelta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSummary {
    pub trend: Option<Trend>,
    pub calorie_bonus: f64,
    pub personal_best: bool,
    pub steps_progress: Option<f64>,
    pub calories_progress: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdviceMessage {
    pub text: &'static str,
    pub severity: Severity,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub contents: String,
}

/// A numeric field that arrives as text from HTML forms and as a number from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Number(value) => value.to_string(),
            FieldValue::Text(text) => text.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub day: String,
    pub steps: Option<FieldValue>,
    pub calories: Option<FieldValue>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub records: Vec<ActivityRecord>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub day: String,
    pub steps: u64,
    pub calories: f64,
    pub advice: AdviceMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_ranks_weekdays_and_keeps_label() {
        assert_eq!(Day::new("Monday").rank(), Some(0));
        assert_eq!(Day::new("sunday").rank(), Some(6));
        assert_eq!(Day::new("Wed").rank(), Some(2));

        let other = Day::new("Holiday");
        assert_eq!(other.rank(), None);
        assert_eq!(other.label(), "Holiday");
    }

    #[test]
    fn weekday_ordering_puts_unranked_last_in_dataset_order() {
        let dataset = ActivityDataset::new(vec![
            ActivityRecord::new("Friday", 1, 0.0),
            ActivityRecord::new("Race day", 2, 0.0),
            ActivityRecord::new("Monday", 3, 0.0),
            ActivityRecord::new("Rest", 4, 0.0),
            ActivityRecord::new("Wednesday", 5, 0.0),
        ]);

        let labels: Vec<&str> = dataset
            .weekday_ordered()
            .iter()
            .map(|record| record.day.label())
            .collect();
        assert_eq!(labels, ["Monday", "Wednesday", "Friday", "Race day", "Rest"]);
        assert_eq!(dataset.records()[0].day.label(), "Friday");
    }

    #[test]
    fn day_serializes_as_plain_label() {
        let record = ActivityRecord::new("Tuesday", 9200, 368.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["day"], "Tuesday");

        let back: ActivityRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.day.rank(), Some(1));
    }
}
