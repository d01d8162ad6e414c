use crate::advice::advice_for_day;
use crate::charts::{build_charts, DashboardCharts};
use crate::errors::{AppError, DataError};
use crate::loader::{parse_calories, parse_steps};
use crate::models::{
    ActivityDataset, ActivityRecord, AdviceResponse, DatasetResponse, DayQuery, DerivedStatistics,
    EntryRequest, FieldValue, UploadRequest,
};
use crate::state::{AppState, Page};
use crate::stats::compute;
use crate::ui::{render_page, PageContext, StatusLine};
use axum::{
    extract::{Query, State},
    http::Uri,
    response::Html,
    Form, Json,
};
use chrono::Local;
use tracing::warn;

async fn render(state: &AppState, page: Page, status: Option<StatusLine>, day: Option<&str>) -> Html<String> {
    let dataset = state.snapshot().await;
    let ctx = PageContext {
        dataset: &dataset,
        policy: &state.config.advice,
        status: status.as_ref(),
        selected_day: day,
    };
    Html(render_page(page, &ctx))
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    render(&state, Page::Dashboard, None, None).await
}

pub async fn insights(State(state): State<AppState>, Query(query): Query<DayQuery>) -> Html<String> {
    let day = query.day.as_deref().filter(|day| !day.trim().is_empty());
    render(&state, Page::Insights, None, day).await
}

pub async fn upload_page(State(state): State<AppState>) -> Html<String> {
    render(&state, Page::Upload, None, None).await
}

pub async fn about(State(state): State<AppState>) -> Html<String> {
    render(&state, Page::About, None, None).await
}

pub async fn add_page(State(state): State<AppState>) -> Html<String> {
    render(&state, Page::AddEntry, None, None).await
}

pub async fn fallback(State(state): State<AppState>, uri: Uri) -> Html<String> {
    render(&state, Page::from_path(uri.path()), None, None).await
}

pub async fn refresh_form(State(state): State<AppState>) -> Html<String> {
    let status = match state.reload_from_source().await {
        Ok(rows) => StatusLine::ok(format!(
            "Reloaded {} ({rows} rows) at {}",
            state.config.data_path.display(),
            Local::now().format("%H:%M:%S")
        )),
        Err(err) => {
            warn!("refresh failed: {err}");
            StatusLine::error(format!("Error reading CSV: {err}"))
        }
    };
    render(&state, Page::Dashboard, Some(status), None).await
}

pub async fn add_form(State(state): State<AppState>, Form(entry): Form<EntryRequest>) -> Html<String> {
    let status = match add_entry(&state, entry).await {
        Ok(record) => StatusLine::ok(format!(
            "Added {}: {} steps, {} kcal",
            record.day, record.steps, record.calories
        )),
        Err(err) => {
            warn!("rejected entry: {err}");
            StatusLine::error(err.to_string())
        }
    };
    render(&state, Page::AddEntry, Some(status), None).await
}

pub async fn save_form(State(state): State<AppState>) -> Html<String> {
    let status = match state.save().await {
        Ok(rows) => StatusLine::ok(format!(
            "Data saved to {} ({rows} rows)",
            state.config.data_path.display()
        )),
        Err(err) => {
            warn!("save failed: {err}");
            StatusLine::error(format!("Save failed: {err}"))
        }
    };
    render(&state, Page::AddEntry, Some(status), None).await
}

pub async fn get_dataset(State(state): State<AppState>) -> Json<DatasetResponse> {
    let dataset = state.snapshot().await;
    Json(dataset_response(dataset, "current dataset".to_string()))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DerivedStatistics>, AppError> {
    let dataset = state.snapshot().await;
    Ok(Json(compute(&dataset)?))
}

pub async fn get_charts(State(state): State<AppState>) -> Json<DashboardCharts> {
    let dataset = state.snapshot().await;
    Json(build_charts(&dataset))
}

pub async fn get_advice(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<AdviceResponse>, AppError> {
    let dataset = state.snapshot().await;
    let stats = compute(&dataset)?;
    let index = match query.day.as_deref() {
        Some(day) => dataset
            .position_of(day)
            .ok_or_else(|| AppError::bad_request(format!("no entry for '{day}'")))?,
        None => dataset.len() - 1,
    };

    let advice = advice_for_day(&state.config.advice, &dataset, &stats, index)?;
    let record = &dataset.records()[index];
    Ok(Json(AdviceResponse {
        day: record.day.label().to_string(),
        steps: record.steps,
        calories: record.calories,
        advice,
    }))
}

pub async fn upload(
    State(state): State<AppState>,
    Json(payload): Json<UploadRequest>,
) -> Result<Json<DatasetResponse>, AppError> {
    match state.apply_upload(&payload.filename, &payload.contents).await {
        Ok(_) => {
            let dataset = state.snapshot().await;
            let message = format!("Uploaded: {}", payload.filename);
            Ok(Json(dataset_response(dataset, message)))
        }
        Err(err) => {
            warn!(filename = %payload.filename, "upload rejected: {err}");
            Err(err.into())
        }
    }
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(entry): Json<EntryRequest>,
) -> Result<Json<DatasetResponse>, AppError> {
    let record = add_entry(&state, entry).await?;
    let dataset = state.snapshot().await;
    let message = format!("Added {}", record.day);
    Ok(Json(dataset_response(dataset, message)))
}

pub async fn save(State(state): State<AppState>) -> Result<Json<DatasetResponse>, AppError> {
    let rows = state.save().await?;
    let dataset = state.snapshot().await;
    let message = format!("Data saved to {} ({rows} rows)", state.config.data_path.display());
    Ok(Json(dataset_response(dataset, message)))
}

pub async fn refresh(State(state): State<AppState>) -> Result<Json<DatasetResponse>, AppError> {
    let rows = state.reload_from_source().await?;
    let dataset = state.snapshot().await;
    let message = format!("Reloaded {} rows", rows);
    Ok(Json(dataset_response(dataset, message)))
}

async fn add_entry(state: &AppState, entry: EntryRequest) -> Result<ActivityRecord, DataError> {
    let record = entry_to_record(entry, state.config.calories_per_step)?;
    state.append(record.clone()).await;
    Ok(record)
}

/// Validates a manual entry. Blank calories are estimated from steps, truncated.
pub fn entry_to_record(entry: EntryRequest, calories_per_step: f64) -> Result<ActivityRecord, DataError> {
    let day = entry.day.trim();
    let steps = entry.steps.as_ref().map(FieldValue::to_text).unwrap_or_default();
    if day.is_empty() || steps.is_empty() {
        return Err(DataError::InvalidEntry("Please fill in both Day and Steps.".into()));
    }

    let steps = parse_steps(&steps).map_err(DataError::InvalidEntry)?;
    let calories = match entry.calories.as_ref().map(FieldValue::to_text) {
        Some(raw) if !raw.is_empty() => parse_calories(&raw).map_err(DataError::InvalidEntry)?,
        _ => (steps as f64 * calories_per_step).trunc(),
    };

    Ok(ActivityRecord::new(day, steps, calories))
}

fn dataset_response(dataset: ActivityDataset, message: String) -> DatasetResponse {
    DatasetResponse {
        records: dataset.records().to_vec(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, steps: Option<&str>, calories: Option<&str>) -> EntryRequest {
        EntryRequest {
            day: day.to_string(),
            steps: steps.map(|s| FieldValue::Text(s.to_string())),
            calories: calories.map(|c| FieldValue::Text(c.to_string())),
        }
    }

    #[test]
    fn entry_estimates_missing_calories() {
        let record = entry_to_record(entry("Monday", Some("8555"), None), 0.05).unwrap();
        assert_eq!(record.steps, 8555);
        assert_eq!(record.calories, 427.0);
        assert_eq!(record.day.rank(), Some(0));

        let record = entry_to_record(entry(" Friday ", Some("1000"), Some(" ")), 0.05).unwrap();
        assert_eq!(record.day.label(), "Friday");
        assert_eq!(record.calories, 50.0);
    }

    #[test]
    fn entry_keeps_explicit_calories() {
        let record = entry_to_record(entry("Sunday", Some("9500"), Some("401.5")), 0.05).unwrap();
        assert_eq!(record.calories, 401.5);
    }

    #[test]
    fn entry_requires_day_and_steps() {
        for bad in [
            entry("", Some("100"), None),
            entry("Monday", None, None),
            entry("Monday", Some(""), None),
            serde_json::from_str(r#"{"steps": "100"}"#).unwrap(),
        ] {
            let err = entry_to_record(bad, 0.05).unwrap_err();
            assert_eq!(err.to_string(), "Please fill in both Day and Steps.");
        }
    }

    #[test]
    fn entry_accepts_json_numbers() {
        let entry: EntryRequest =
            serde_json::from_str(r#"{"day": "Thursday", "steps": 10500, "calories": 420}"#).unwrap();
        let record = entry_to_record(entry, 0.05).unwrap();
        assert_eq!(record.steps, 10500);
        assert_eq!(record.calories, 420.0);

        let entry: EntryRequest =
            serde_json::from_str(r#"{"day": "Thursday", "steps": 10.5}"#).unwrap();
        assert!(entry_to_record(entry, 0.05).is_err());
    }

    #[test]
    fn entry_rejects_bad_numbers() {
        assert!(matches!(
            entry_to_record(entry("Monday", Some("-3"), None), 0.05),
            Err(DataError::InvalidEntry(_))
        ));
        assert!(matches!(
            entry_to_record(entry("Monday", Some("100"), Some("lots")), 0.05),
            Err(DataError::InvalidEntry(_))
        ));
    }
}
