use crate::models::ActivityDataset;
use serde::Serialize;

pub const STEPS_COLOR: &str = "#ffeb3b";
pub const CALORIES_COLOR: &str = "#e53935";
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A renderable chart description; drawing happens client side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color: &'static str,
    pub background: &'static str,
    pub markers: bool,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub steps: ChartSpec,
    pub calories: ChartSpec,
}

/// Steps as a line chart and calories as a bar chart, both in weekday order.
pub fn build_charts(dataset: &ActivityDataset) -> DashboardCharts {
    let ordered = dataset.weekday_ordered();

    let steps = ChartSpec {
        kind: ChartKind::Line,
        title: "Weekly Step Trend",
        x_label: "Day",
        y_label: "Steps",
        color: STEPS_COLOR,
        background: TRANSPARENT,
        markers: true,
        points: ordered
            .iter()
            .map(|record| ChartPoint {
                label: record.day.label().to_string(),
                value: record.steps as f64,
            })
            .collect(),
    };

    let calories = ChartSpec {
        kind: ChartKind::Bar,
        title: "Weekly Calories Burned",
        x_label: "Day",
        y_label: "Calories",
        color: CALORIES_COLOR,
        background: TRANSPARENT,
        markers: false,
        points: ordered
            .iter()
            .map(|record| ChartPoint {
                label: record.day.label().to_string(),
                value: record.calories,
            })
            .collect(),
    };

    DashboardCharts { steps, calories }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityRecord;

    #[test]
    fn charts_follow_weekday_order() {
        let dataset = ActivityDataset::new(vec![
            ActivityRecord::new("Sunday", 9500, 380.0),
            ActivityRecord::new("Monday", 8500, 340.0),
            ActivityRecord::new("Cheat day", 1000, 40.0),
            ActivityRecord::new("Tuesday", 9200, 368.0),
        ]);
        let charts = build_charts(&dataset);

        let labels: Vec<&str> = charts.steps.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Monday", "Tuesday", "Sunday", "Cheat day"]);
        assert_eq!(charts.steps.points[0].value, 8500.0);
        assert_eq!(charts.calories.points[2].value, 380.0);
        assert_eq!(charts.steps.kind, ChartKind::Line);
        assert!(charts.steps.markers);
        assert_eq!(charts.calories.kind, ChartKind::Bar);
    }

    #[test]
    fn empty_dataset_gives_empty_specs() {
        let charts = build_charts(&ActivityDataset::default());
        assert!(charts.steps.points.is_empty());
        assert!(charts.calories.points.is_empty());
        assert_eq!(charts.calories.background, TRANSPARENT);

        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["steps"]["kind"], "line");
        assert_eq!(json["calories"]["points"], serde_json::json!([]));
    }
}
