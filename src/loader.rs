use crate::errors::DataError;
use crate::models::{ActivityDataset, ActivityRecord};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

pub const REQUIRED_COLUMNS: [&str; 3] = ["Day", "Steps", "Calories"];

/// Upper bound for a single day's step count.
pub const MAX_DAILY_STEPS: u64 = 1_000_000;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Day")]
    day: String,
    #[serde(rename = "Steps")]
    steps: String,
    #[serde(rename = "Calories")]
    calories: String,
}

/// Parses a `Day,Steps,Calories` table. Extra columns are ignored.
pub fn parse_csv(bytes: &[u8]) -> Result<ActivityDataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(DataError::Schema(missing.join(", ")));
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = row.map_err(|err| DataError::Parse(format!("row {line}: {err}")))?;
        records.push(parse_row(row, line)?);
    }

    Ok(ActivityDataset::new(records))
}

fn parse_row(row: CsvRow, line: usize) -> Result<ActivityRecord, DataError> {
    if row.day.is_empty() {
        return Err(DataError::Parse(format!("row {line}: Day is empty")));
    }
    let steps = parse_steps(&row.steps)
        .map_err(|msg| DataError::Parse(format!("row {line}: {msg}")))?;
    let calories = parse_calories(&row.calories)
        .map_err(|msg| DataError::Parse(format!("row {line}: {msg}")))?;

    Ok(ActivityRecord::new(row.day, steps, calories))
}

pub(crate) fn parse_steps(raw: &str) -> Result<u64, String> {
    let steps = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("Steps must be a non-negative integer, got '{raw}'"))?;
    if steps > MAX_DAILY_STEPS {
        return Err(format!("Steps must be at most {MAX_DAILY_STEPS}, got '{raw}'"));
    }
    Ok(steps)
}

pub(crate) fn parse_calories(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(format!("Calories must be a non-negative number, got '{raw}'")),
    }
}

pub async fn load_file(path: &Path) -> Result<ActivityDataset, DataError> {
    let bytes = fs::read(path).await?;
    parse_csv(&bytes)
}

/// Decodes an uploaded blob: plain base64 or a `data:<mime>;base64,<payload>` URL.
pub fn decode_upload(filename: &str, contents: &str) -> Result<Vec<u8>, DataError> {
    if !filename.trim().to_ascii_lowercase().ends_with(".csv") {
        return Err(DataError::UnsupportedFile(filename.to_string()));
    }

    let payload = match contents.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => contents,
    };

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|err| DataError::Parse(format!("upload is not valid base64: {err}")))
}

pub fn to_csv(dataset: &ActivityDataset) -> Result<Vec<u8>, DataError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REQUIRED_COLUMNS)?;
    for record in dataset.records() {
        writer.write_record([
            record.day.label().to_string(),
            record.steps.to_string(),
            format_calories(record.calories),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| DataError::Io(err.into_error()))
}

fn format_calories(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK_CSV: &str = "Day,Steps,Calories\n\
        Monday,8500,340\n\
        Tuesday,9200,368\n\
        Wednesday,7800,312\n\
        Thursday,10500,420\n\
        Friday,12300,492\n\
        Saturday,15200,608\n\
        Sunday,9500,380\n";

    #[test]
    fn parses_week_in_row_order() {
        let dataset = parse_csv(WEEK_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 7);
        let first = &dataset.records()[0];
        assert_eq!(first.day.label(), "Monday");
        assert_eq!(first.steps, 8500);
        assert_eq!(first.calories, 340.0);
        assert_eq!(dataset.records()[6].day.rank(), Some(6));
    }

    #[test]
    fn missing_calories_column_is_schema_error() {
        let err = parse_csv(b"Day,Steps\nMonday,8500\n").unwrap_err();
        match err {
            DataError::Schema(missing) => assert_eq!(missing, "Calories"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let err = parse_csv(b"day,steps,calories\nMonday,1,2\n").unwrap_err();
        assert!(matches!(err, DataError::Schema(_)));
    }

    #[test]
    fn extra_columns_and_whitespace_are_tolerated() {
        let csv = "Date, Day ,Steps,Calories,Notes\n2024-01-01, Monday , 8500 , 340.5 ,easy\n";
        let dataset = parse_csv(csv.as_bytes()).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.day.label(), "Monday");
        assert_eq!(record.steps, 8500);
        assert_eq!(record.calories, 340.5);
    }

    #[test]
    fn non_numeric_steps_is_parse_error_with_row() {
        let err = parse_csv(b"Day,Steps,Calories\nMonday,8500,340\nTuesday,lots,368\n").unwrap_err();
        match err {
            DataError::Parse(msg) => {
                assert!(msg.contains("row 3"), "{msg}");
                assert!(msg.contains("Steps"), "{msg}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(matches!(
            parse_csv(b"Day,Steps,Calories\nMonday,-5,340\n"),
            Err(DataError::Parse(_))
        ));
        assert!(matches!(
            parse_csv(b"Day,Steps,Calories\nMonday,5,-340\n"),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn steps_above_daily_cap_are_rejected() {
        let at_cap = format!("Day,Steps,Calories\nMonday,{MAX_DAILY_STEPS},10\n");
        assert_eq!(parse_csv(at_cap.as_bytes()).unwrap().records()[0].steps, MAX_DAILY_STEPS);

        for huge in ["1000001", "9223372036854775808", "18446744073709551615"] {
            let csv = format!("Day,Steps,Calories\nMonday,1,10\nTuesday,{huge},20\n");
            match parse_csv(csv.as_bytes()).unwrap_err() {
                DataError::Parse(msg) => assert!(msg.contains("row 3"), "{msg}"),
                other => panic!("expected parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn ragged_rows_are_parse_errors() {
        let err = parse_csv(b"Day,Steps,Calories\nMonday,8500\n").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let dataset = parse_csv(b"Day,Steps,Calories\n").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn csv_round_trip_preserves_records() {
        let mut dataset = parse_csv(WEEK_CSV.as_bytes()).unwrap();
        dataset.push(ActivityRecord::new("Holiday", 4000, 160.25));

        let bytes = to_csv(&dataset).unwrap();
        assert!(bytes.starts_with(b"Day,Steps,Calories\nMonday,8500,340\n"));
        assert_eq!(parse_csv(&bytes).unwrap(), dataset);
    }

    #[test]
    fn decode_upload_accepts_data_url_and_plain_base64() {
        let encoded = general_purpose::STANDARD.encode(WEEK_CSV);
        let from_url =
            decode_upload("week.csv", &format!("data:text/csv;base64,{encoded}")).unwrap();
        let plain = decode_upload("WEEK.CSV", &encoded).unwrap();
        assert_eq!(from_url, WEEK_CSV.as_bytes());
        assert_eq!(plain, from_url);
    }

    #[test]
    fn decode_upload_rejects_other_extensions() {
        let err = decode_upload("week.xlsx", "AAAA").unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFile(name) if name == "week.xlsx"));
    }

    #[tokio::test]
    async fn load_file_missing_path_is_io_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("fittrack_missing_{}.csv", std::process::id()));
        let err = load_file(&path).await.unwrap_err();
        assert!(matches!(err, DataError::Io(io) if io.kind() == std::io::ErrorKind::NotFound));
    }
}
