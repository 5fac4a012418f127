//! Writer stage: number rendered units and persist them.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::descriptor::RenderedUnit;
use crate::error::GenerateError;

/// Output location and id counter of one run.
///
/// Ids start at 1 and are taken once per write attempt, so a failed write leaves a gap but two units never
/// share a file.
#[derive(Debug)]
pub(crate) struct OutputFiles {
    output_dir: PathBuf,
    extension: String,
    next_id: AtomicU64,
}

impl OutputFiles {
    pub(crate) fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.output_dir.join(format!("{}.{}", id, self.extension))
    }

    pub(crate) fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist `unit` under the next free id, replacing any file already there.
    ///
    /// ## Errors
    /// [`GenerateError::Write`] on any I/O failure.
    #[tracing::instrument(skip_all, fields(type_name = %unit.type_name))]
    pub(crate) async fn write(&self, unit: &RenderedUnit) -> Result<PathBuf, GenerateError> {
        let path = self.path_for(self.next_id());
        let wrap = |source| GenerateError::Write {
            path: path.clone(),
            type_name: unit.type_name.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&path).await.map_err(wrap)?;
        file.write_all(unit.source_text.as_bytes()).await.map_err(wrap)?;
        file.flush().await.map_err(wrap)?;

        debug!(path = %path.display(), "Wrote test unit");
        Ok(path)
    }
}
