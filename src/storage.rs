use crate::errors::DataError;
use crate::loader::{load_file, to_csv};
use crate::models::ActivityDataset;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Loads the startup dataset. Any failure degrades to an empty dataset so the
/// server still comes up and the user can upload or add data.
pub async fn load_initial(path: &Path) -> ActivityDataset {
    match load_file(path).await {
        Ok(data) => {
            info!(path = %path.display(), rows = data.len(), "loaded dataset");
            data
        }
        Err(DataError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "no data file yet, starting empty");
            ActivityDataset::default()
        }
        Err(err) => {
            error!(path = %path.display(), "failed to load data file: {err}");
            ActivityDataset::default()
        }
    }
}

/// Writes through a sibling temp file so a failed write never truncates the
/// previous save.
pub async fn persist_dataset(path: &Path, data: &ActivityDataset) -> Result<(), DataError> {
    let payload = to_csv(data)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, payload).await?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}
