use crate::errors::DataError;
use crate::models::{ActivityDataset, ActivityRecord, DayDelta, DerivedStatistics, InsightSummary, Trend};

pub fn compute(dataset: &ActivityDataset) -> Result<DerivedStatistics, DataError> {
    let records = dataset.records();
    let (first, rest) = records.split_first().ok_or(DataError::EmptyDataset)?;

    let mut total_steps = 0u128;
    let mut total_calories = 0.0;
    let mut best = first;
    let mut worst = first;
    for record in records {
        total_steps += u128::from(record.steps);
        total_calories += record.calories;
    }
    // strict comparisons keep the first occurrence on ties
    for record in rest {
        if record.steps > best.steps {
            best = record;
        }
        if record.steps < worst.steps {
            worst = record;
        }
    }

    let count = records.len() as f64;
    Ok(DerivedStatistics {
        days: records.len(),
        total_steps: u64::try_from(total_steps).unwrap_or(u64::MAX),
        total_calories,
        mean_steps: total_steps as f64 / count,
        mean_calories: total_calories / count,
        best_day: best.clone(),
        worst_day: worst.clone(),
        last_day_delta: last_day_delta(records),
    })
}

fn last_day_delta(records: &[ActivityRecord]) -> Option<DayDelta> {
    match records {
        [.., previous, last] => Some(delta_between(previous, last)),
        _ => None,
    }
}

pub fn delta_between(previous: &ActivityRecord, current: &ActivityRecord) -> DayDelta {
    let diff = i128::from(current.steps) - i128::from(previous.steps);
    let steps_diff = i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX });
    let steps_diff_percent = if previous.steps > 0 {
        Some(diff as f64 / previous.steps as f64 * 100.0)
    } else {
        None
    };

    DayDelta {
        day: current.day.label().to_string(),
        previous_day: previous.day.label().to_string(),
        steps_diff,
        calories_diff: current.calories - previous.calories,
        steps_diff_percent,
    }
}

impl DerivedStatistics {
    pub fn last_day_delta(&self) -> Result<&DayDelta, DataError> {
        self.last_day_delta
            .as_ref()
            .ok_or(DataError::InsufficientData {
                required: 2,
                found: self.days,
            })
    }
}

pub fn insights(dataset: &ActivityDataset, stats: &DerivedStatistics) -> InsightSummary {
    let records = dataset.records();

    let trend = match records {
        [.., a, b, c] if c.steps > b.steps && b.steps > a.steps => Some(Trend::Rising),
        [.., a, b, c] if c.steps < b.steps && b.steps < a.steps => Some(Trend::Falling),
        _ => None,
    };

    let (active, quiet): (Vec<&ActivityRecord>, Vec<&ActivityRecord>) = records
        .iter()
        .partition(|record| record.steps as f64 > stats.mean_steps);
    let calorie_bonus = match (mean_calories(&active), mean_calories(&quiet)) {
        (Some(high), Some(low)) => high - low,
        _ => 0.0,
    };

    let last = records.last();
    let personal_best =
        records.len() > 1 && last.is_some_and(|record| record.steps == stats.best_day.steps);

    InsightSummary {
        trend,
        calorie_bonus,
        personal_best,
        steps_progress: last.and_then(|record| percent_of(record.steps as f64, stats.mean_steps)),
        calories_progress: last.and_then(|record| percent_of(record.calories, stats.mean_calories)),
    }
}

fn mean_calories(records: &[&ActivityRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|record| record.calories).sum();
    Some(sum / records.len() as f64)
}

fn percent_of(value: f64, mean: f64) -> Option<f64> {
    if mean > 0.0 {
        Some(value / mean * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> ActivityDataset {
        let steps = [8500, 9200, 7800, 10500, 12300, 15200, 9500];
        let days = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        ActivityDataset::new(
            days.iter()
                .zip(steps)
                .map(|(day, steps)| ActivityRecord::new(*day, steps, steps as f64 * 0.04))
                .collect(),
        )
    }

    #[test]
    fn canonical_week_means() {
        let stats = compute(&week()).unwrap();
        assert_eq!(stats.days, 7);
        assert_eq!(stats.total_steps, 73_000);
        assert!((stats.mean_steps - 73_000.0 / 7.0).abs() < 1e-9);
        assert_eq!(stats.mean_steps.round(), 10_429.0);
        assert!((stats.mean_calories - 2920.0 / 7.0).abs() < 1e-9);
        assert_eq!(stats.best_day.day.label(), "Saturday");
        assert_eq!(stats.worst_day.day.label(), "Wednesday");
    }

    #[test]
    fn last_day_delta_compares_final_two_rows() {
        let stats = compute(&week()).unwrap();
        let delta = stats.last_day_delta().unwrap();
        assert_eq!(delta.day, "Sunday");
        assert_eq!(delta.previous_day, "Saturday");
        assert_eq!(delta.steps_diff, -5700);
        assert!((delta.calories_diff - (-228.0)).abs() < 1e-9);
        assert!((delta.steps_diff_percent.unwrap() - (-37.5)).abs() < 0.01);
    }

    #[test]
    fn empty_dataset_is_reported_not_panicked() {
        let err = compute(&ActivityDataset::default()).unwrap_err();
        assert!(matches!(err, DataError::EmptyDataset));
    }

    #[test]
    fn single_row_has_stats_but_no_delta() {
        let dataset = ActivityDataset::new(vec![ActivityRecord::new("Monday", 4000, 160.0)]);
        let stats = compute(&dataset).unwrap();
        assert_eq!(stats.mean_steps, 4000.0);
        assert!(stats.last_day_delta.is_none());
        assert!(matches!(
            stats.last_day_delta(),
            Err(DataError::InsufficientData { required: 2, found: 1 })
        ));
    }

    #[test]
    fn ties_resolve_to_first_occurrence() {
        let dataset = ActivityDataset::new(vec![
            ActivityRecord::new("Monday", 5000, 1.0),
            ActivityRecord::new("Tuesday", 9000, 2.0),
            ActivityRecord::new("Wednesday", 5000, 3.0),
            ActivityRecord::new("Thursday", 9000, 4.0),
        ]);
        let stats = compute(&dataset).unwrap();
        assert_eq!(stats.best_day.day.label(), "Tuesday");
        assert_eq!(stats.worst_day.day.label(), "Monday");
    }

    #[test]
    fn zero_previous_steps_has_no_percent() {
        let dataset = ActivityDataset::new(vec![
            ActivityRecord::new("Monday", 0, 0.0),
            ActivityRecord::new("Tuesday", 3000, 120.0),
        ]);
        let delta = compute(&dataset).unwrap().last_day_delta.unwrap();
        assert_eq!(delta.steps_diff, 3000);
        assert_eq!(delta.steps_diff_percent, None);
    }

    #[test]
    fn extreme_step_counts_keep_sign_and_mean() {
        let dataset = ActivityDataset::new(vec![
            ActivityRecord::new("Monday", 0, 0.0),
            ActivityRecord::new("Tuesday", u64::MAX, 1.0),
        ]);
        let stats = compute(&dataset).unwrap();
        assert_eq!(stats.total_steps, u64::MAX);
        assert!((stats.mean_steps - u64::MAX as f64 / 2.0).abs() < 1e6);
        assert_eq!(stats.last_day_delta.unwrap().steps_diff, i64::MAX);

        let dataset = ActivityDataset::new(vec![
            ActivityRecord::new("Monday", 1, 10.0),
            ActivityRecord::new("Tuesday", 9_223_372_036_854_775_808, 20.0),
            ActivityRecord::new("Wednesday", 1, 10.0),
        ]);
        let delta = compute(&dataset).unwrap().last_day_delta.unwrap();
        assert_eq!(delta.steps_diff, i64::MIN + 1);
    }

    #[test]
    fn insights_detect_trends_and_bonus() {
        let rising = ActivityDataset::new(vec![
            ActivityRecord::new("Monday", 4000, 100.0),
            ActivityRecord::new("Tuesday", 6000, 200.0),
            ActivityRecord::new("Wednesday", 8000, 300.0),
        ]);
        let stats = compute(&rising).unwrap();
        let summary = insights(&rising, &stats);
        assert_eq!(summary.trend, Some(Trend::Rising));
        assert!(summary.personal_best);
        // mean 6000: above = [300], at-or-below = [100, 200]
        assert!((summary.calorie_bonus - 150.0).abs() < 1e-9);
        assert!((summary.steps_progress.unwrap() - 8000.0 / 6000.0 * 100.0).abs() < 1e-9);

        let week = week();
        let stats = compute(&week).unwrap();
        let summary = insights(&week, &stats);
        assert_eq!(summary.trend, None);
        assert!(!summary.personal_best);
    }

    #[test]
    fn insights_on_flat_data_have_no_bonus() {
        let flat = ActivityDataset::new(vec![
            ActivityRecord::new("Monday", 0, 0.0),
            ActivityRecord::new("Tuesday", 0, 0.0),
        ]);
        let stats = compute(&flat).unwrap();
        let summary = insights(&flat, &stats);
        assert_eq!(summary.calorie_bonus, 0.0);
        assert_eq!(summary.steps_progress, None);
        assert_eq!(summary.trend, None);
    }
}
