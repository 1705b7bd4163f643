use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use tracing::{debug, error};

use crate::model::bans::BanRecord;
use crate::model::quotes::Quote;
use crate::model::warnings::WarningRecord;
use crate::store::{JsonCollection, load_json};

pub const BANS_FILE: &str = "bans.json";
pub const WARNINGS_FILE: &str = "warnings.json";
pub const QUOTES_FILE: &str = "quotes.json";
pub const PLAYING_STATUSES_FILE: &str = "playing_statuses.json";

/// Shared handle to the JSON collections, passed across crates.
#[derive(Clone, Debug)]
pub struct Database {
    inner: Arc<Collections>,
}

#[derive(Debug)]
struct Collections {
    data_dir: PathBuf,
    bans: JsonCollection<BanRecord>,
    warnings: JsonCollection<WarningRecord>,
    quotes: JsonCollection<Quote>,
    playing_statuses: Vec<String>,
}

impl Database {
    /// Create the data directory if needed and load every collection.
    pub async fn open(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory `{}`", data_dir.display()))?;

        debug!("Reading warnings.");
        let warnings = JsonCollection::load(data_dir.join(WARNINGS_FILE)).await;
        debug!("Reading bans.");
        let bans = JsonCollection::load(data_dir.join(BANS_FILE)).await;
        debug!("Reading quotes.");
        let quotes = JsonCollection::load(data_dir.join(QUOTES_FILE)).await;

        debug!("Reading custom playing statuses.");
        let playing_statuses =
            match load_json::<Vec<String>>(&data_dir.join(PLAYING_STATUSES_FILE)).await {
                Ok(statuses) => statuses.unwrap_or_default(),
                Err(source) => {
                    error!(?source, "failed to read playing statuses");
                    Vec::new()
                }
            };

        Ok(Self {
            inner: Arc::new(Collections {
                data_dir,
                bans,
                warnings,
                quotes,
                playing_statuses,
            }),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    pub fn bans(&self) -> &JsonCollection<BanRecord> {
        &self.inner.bans
    }

    pub fn warnings(&self) -> &JsonCollection<WarningRecord> {
        &self.inner.warnings
    }

    pub fn quotes(&self) -> &JsonCollection<Quote> {
        &self.inner.quotes
    }

    pub fn playing_statuses(&self) -> &[String] {
        &self.inner.playing_statuses
    }

    /// Files included in the weekly backup, paired with their display label.
    pub fn backup_files(&self) -> [(&'static str, &Path); 3] {
        [
            (":hammer: Bans :hammer:", self.inner.bans.path()),
            (":warning: Warnings :warning:", self.inner.warnings.path()),
            (":speech_balloon: Quotes :speech_balloon:", self.inner.quotes.path()),
        ]
    }
}
