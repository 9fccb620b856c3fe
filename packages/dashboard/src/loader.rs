//! Sources of the one-shot dataset load.

use std::future::Future;
use std::sync::Arc;

use mortality_dash_ingest::progress::ProgressCallback;
use mortality_dash_ingest::{DatasetSources, IngestError, LoadedDatasets, load_datasets};

/// Produces the datasets the controller is initialized from.
pub trait DatasetLoader {
    /// Loads every input. Either all of it or an error.
    fn load(&self) -> impl Future<Output = Result<LoadedDatasets, IngestError>> + Send;
}

/// Loads the datasets from files on disk.
pub struct FileLoader {
    sources: DatasetSources,
    progress: Arc<dyn ProgressCallback>,
}

impl FileLoader {
    /// Creates a loader reporting to `progress`.
    #[must_use]
    pub fn new(sources: DatasetSources, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { sources, progress }
    }

    /// The files this loader reads.
    #[must_use]
    pub const fn sources(&self) -> &DatasetSources {
        &self.sources
    }
}

impl DatasetLoader for FileLoader {
    async fn load(&self) -> Result<LoadedDatasets, IngestError> {
        load_datasets(&self.sources, &self.progress).await
    }
}
