use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::error;

/// Read and deserialize a JSON file. A missing file yields `Ok(None)`.
pub async fn load_json<T>(path: &Path) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(source).with_context(|| format!("failed to read `{}`", path.display()));
        }
    };

    let parsed = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse `{}`", path.display()))?;
    Ok(Some(parsed))
}

/// Serialize `value` as pretty JSON and replace `path` with it.
///
/// The payload is written to a sibling `.tmp` file, then renamed over `path`.
pub async fn write_json<T>(path: &Path, value: &T) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize `{}`", path.display()))?;

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    tokio::fs::write(&temp_path, payload)
        .await
        .with_context(|| format!("failed to write `{}`", temp_path.display()))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .with_context(|| format!("failed to replace `{}`", path.display()))?;

    Ok(())
}

/// An in-memory list of records mirrored to one JSON file.
///
/// Every mutation rewrites the whole file while the write lock is held.
#[derive(Debug)]
pub struct JsonCollection<T> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Load the collection, falling back to an empty list when the file is
    /// missing or unreadable.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match load_json::<Vec<T>>(&path).await {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(source) => {
                error!(?source, path = %path.display(), "failed to load collection, starting empty");
                Vec::new()
            }
        };

        Self {
            path,
            records: RwLock::new(records),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against a read-only view of the records.
    pub async fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let records = self.records.read().await;
        f(&records)
    }

    /// Mutate the records and persist the result.
    ///
    /// The change is applied to a copy; memory only moves forward once the
    /// file has been written.
    pub async fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> anyhow::Result<R>
    where
        T: Clone,
    {
        let mut records = self.records.write().await;
        let mut staged = records.clone();
        let result = f(&mut staged);
        write_json(&self.path, &staged).await?;
        *records = staged;
        Ok(result)
    }
}
