use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the load → compute → advise pipeline.
///
/// Every variant is recoverable: the caller keeps the previously held
/// dataset and shows the message instead of the normal content.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing required columns: {0}")]
    Schema(String),

    #[error("{0}")]
    Parse(String),

    #[error("need at least {required} days of data, found {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("no activity data loaded")]
    EmptyDataset,

    #[error("please upload a CSV file (got '{0}')")]
    UnsupportedFile(String),

    #[error("{0}")]
    InvalidEntry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(format!("could not read CSV: {err}"))
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Schema(_)
            | DataError::Parse(_)
            | DataError::UnsupportedFile(_)
            | DataError::InvalidEntry(_) => Self::bad_request(err.to_string()),
            DataError::InsufficientData { .. } | DataError::EmptyDataset => {
                Self::unprocessable(err.to_string())
            }
            DataError::Io(io) => Self::internal(io),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
