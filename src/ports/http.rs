use std::path::Path;

use async_trait::async_trait;

use crate::domain::DomainError;

/// HTTP client port. The model store is the only network consumer; all
/// traffic goes through this interface so tests never hit the wire.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Stream a remote file to `path`.
    ///
    /// The body must be written incrementally, never buffered whole in
    /// memory, and no file may remain at `path` if the download fails
    /// partway. The progress callback receives (downloaded, total)
    /// byte counts; total is 0 when the response carries no length.
    async fn download_file(
        &self,
        url: &str,
        path: &Path,
        progress_callback: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
    ) -> Result<(), DomainError>;
}
