use crate::config::Config;
use crate::errors::DataError;
use crate::loader;
use crate::models::{ActivityDataset, ActivityRecord};
use crate::storage::persist_dataset;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Routes the app can render. Unknown paths fall back to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Insights,
    Upload,
    About,
    AddEntry,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Insights,
        Page::Upload,
        Page::AddEntry,
        Page::About,
    ];

    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/insights" => Page::Insights,
            "/upload" => Page::Upload,
            "/about" => Page::About,
            "/add" => Page::AddEntry,
            _ => Page::Dashboard,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Insights => "/insights",
            Page::Upload => "/upload",
            Page::About => "/about",
            Page::AddEntry => "/add",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Insights => "Insights",
            Page::Upload => "Upload",
            Page::About => "About",
            Page::AddEntry => "Add entry",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<ActivityDataset>>,
}

impl AppState {
    pub fn new(config: Config, data: ActivityDataset) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Copy of the current dataset for rendering outside the lock.
    pub async fn snapshot(&self) -> ActivityDataset {
        self.data.lock().await.clone()
    }

    pub async fn replace(&self, dataset: ActivityDataset) -> usize {
        let mut data = self.data.lock().await;
        *data = dataset;
        data.len()
    }

    /// Parses an upload fully before swapping it in; a failure leaves the store untouched.
    pub async fn apply_upload(&self, filename: &str, contents: &str) -> Result<usize, DataError> {
        let bytes = loader::decode_upload(filename, contents)?;
        let dataset = loader::parse_csv(&bytes)?;
        let rows = self.replace(dataset).await;
        info!(filename, rows, "replaced dataset from upload");
        Ok(rows)
    }

    pub async fn reload_from_source(&self) -> Result<usize, DataError> {
        let mut data = self.data.lock().await;
        let dataset = loader::load_file(&self.config.data_path).await?;
        *data = dataset;
        info!(path = %self.config.data_path.display(), rows = data.len(), "reloaded dataset");
        Ok(data.len())
    }

    pub async fn append(&self, record: ActivityRecord) -> usize {
        let mut data = self.data.lock().await;
        data.push(record);
        data.len()
    }

    pub async fn save(&self) -> Result<usize, DataError> {
        let data = self.data.lock().await;
        persist_dataset(&self.config.data_path, &data).await?;
        info!(path = %self.config.data_path.display(), rows = data.len(), "saved dataset");
        Ok(data.len())
    }
}
