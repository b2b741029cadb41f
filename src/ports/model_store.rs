use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Port for model resolution and caching.
///
/// Implementations guarantee a usable local model file exists for a
/// requested model name before transcription proceeds.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Resolve `name` to its canonical local path, downloading and
    /// caching the model first if it is absent.
    ///
    /// Fails with `UnknownModel` for names outside the registered set,
    /// before touching the network or filesystem. Fails with
    /// `DownloadFailed` if the fetch does not complete; a failed
    /// download never leaves a partial file at the canonical path.
    async fn model_path(&self, name: &str) -> Result<PathBuf, DomainError>;

    /// Whether the model file already exists at its canonical path.
    /// Never triggers a download.
    fn model_exists(&self, name: &str) -> bool;

    /// The directory model files are cached under.
    fn models_dir(&self) -> PathBuf;
}
