use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{Stream, StreamExt, TryStreamExt};
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::naming;
use crate::scanner::{self, ScanError};

/// One-shot sync of new daily flat files from a bucket prefix into a
/// local directory.
pub struct Syncer {
    store: Arc<dyn ObjectStore>,
    prefix: Path,
    local_dir: PathBuf,
}

#[derive(Error, Debug)]
enum FetchError {
    #[error("storage error: {0}")]
    Storage(#[from] object_store::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Syncer {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: &str, local_dir: PathBuf) -> Self {
        Syncer {
            store,
            prefix: Path::from(prefix),
            local_dir,
        }
    }

    /// Scans the local directory for the newest date already present,
    /// then walks the bucket listing and downloads every object stamped
    /// with a strictly newer date. Returns the number of files
    /// downloaded. Only a local directory failure is fatal; service
    /// errors end or skip parts of the walk after being logged.
    pub async fn run(&self) -> Result<u64, ScanError> {
        let watermark = scanner::latest_local_date(&self.local_dir)?;
        match watermark {
            Some(date) => log::info!("most recent local file date: {}", date),
            None => log::info!(
                "no dated files in {} yet, fetching everything",
                self.local_dir.display()
            ),
        }

        log::info!("listing objects with prefix: {}", self.prefix);
        let entries = self.store.list(Some(&self.prefix));
        Ok(self.walk(watermark, entries).await)
    }

    /// Consumes the listing in the order the service returns it, one
    /// entry at a time, downloading each candidate before the next
    /// entry is pulled. A listing error ends the walk; files already
    /// downloaded stay on disk.
    async fn walk<S>(&self, watermark: Option<NaiveDate>, mut entries: S) -> u64
    where
        S: Stream<Item = object_store::Result<ObjectMeta>> + Unpin,
    {
        let mut downloaded: u64 = 0;

        while let Some(entry) = entries.next().await {
            let meta = match entry {
                Ok(meta) => meta,
                Err(e) => {
                    log::error!("listing failed, stopping this run: {}", e);
                    break;
                }
            };

            let file_name = match meta.location.filename() {
                Some(name) => name,
                None => {
                    log::warn!("skipping {}: no file name", meta.location);
                    continue;
                }
            };

            match naming::date_stamp(file_name) {
                Some(date) if watermark.map_or(true, |w| date > w) => {
                    log::info!("downloading newer file: {}", meta.location);
                    match self.fetch(&meta.location, file_name).await {
                        Ok(()) => downloaded += 1,
                        Err(e) => log::error!("failed to download {}: {}", meta.location, e),
                    }
                }
                Some(_) => log::debug!("skipping {}: not newer than local files", meta.location),
                None => log::warn!("skipping {}: no parseable date stamp", meta.location),
            }
        }

        log::info!("total files downloaded: {}", downloaded);
        downloaded
    }

    /// Streams one object into `local_dir`, replacing any file of the
    /// same name. An interrupted stream leaves the partial file behind,
    /// where the next run will read its date stamp as already synced.
    async fn fetch(&self, location: &Path, file_name: &str) -> Result<(), FetchError> {
        let dest = self.local_dir.join(file_name);
        let result = self.store.get(location).await?;
        let mut body = result.into_stream();

        let mut file = tokio::fs::File::create(&dest).await?;
        while let Some(chunk) = body.try_next().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        log::info!("downloaded {} to {}", location, dest.display());
        Ok(())
    }
}
