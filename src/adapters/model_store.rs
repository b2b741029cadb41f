use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{DomainError, ModelKind};
use crate::ports::{HttpClient, ModelStore, StatusSink, StatusStyle};

/// Filesystem-backed model store.
///
/// Resolves a model name to `<models_dir>/ggml-<name>.en.bin`, fetching
/// it from its registered source on first use. A present file is
/// treated as valid forever; nothing here re-downloads or checksums it.
pub struct DiskModelStore {
    models_dir: PathBuf,
    http: Arc<dyn HttpClient>,
    status: Arc<dyn StatusSink>,
    /// Per-model download locks so concurrent requests for the same
    /// uncached model share one fetch instead of corrupting each other.
    in_flight: parking_lot::Mutex<HashMap<ModelKind, Arc<tokio::sync::Mutex<()>>>>,
}

impl DiskModelStore {
    pub fn new(
        data_dir: PathBuf,
        http: Arc<dyn HttpClient>,
        status: Arc<dyn StatusSink>,
    ) -> Result<Self, DomainError> {
        let models_dir = data_dir.join("models");
        std::fs::create_dir_all(&models_dir)?;

        info!(models_dir = ?models_dir, "Model store initialized");

        Ok(Self {
            models_dir,
            http,
            status,
            in_flight: parking_lot::Mutex::new(HashMap::new()),
        })
    }

    fn download_lock(&self, kind: ModelKind) -> Arc<tokio::sync::Mutex<()>> {
        self.in_flight
            .lock()
            .entry(kind)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    async fn download(&self, kind: ModelKind, target: &Path) -> Result<(), DomainError> {
        let url = kind.source_url();

        info!(model = %kind, url = %url, target = ?target, "Starting model download");
        self.status.notify(
            StatusStyle::InProgress,
            &format!("Downloading {} model...", kind),
            Some("This may take a few minutes"),
        );

        let model_name = kind.as_str();
        let last_decile = AtomicU64::new(0);
        let progress: Box<dyn Fn(u64, u64) + Send + Sync> = Box::new(move |downloaded, total| {
            if total == 0 {
                return;
            }
            let decile = downloaded * 10 / total;
            if last_decile.swap(decile, Ordering::Relaxed) != decile {
                debug!(
                    model = model_name,
                    percent = decile * 10,
                    "Model download progress"
                );
            }
        });

        let result = self
            .http
            .download_file(url.as_str(), target, Some(progress))
            .await
            .map_err(|e| match e {
                DomainError::HttpRequest(msg) | DomainError::Io(msg) => {
                    DomainError::DownloadFailed(msg)
                }
                other => other,
            });

        match &result {
            Ok(()) => {
                info!(model = %kind, "Model downloaded");
                self.status.notify(
                    StatusStyle::Success,
                    "Model downloaded",
                    Some(&format!("{} model ready to use", kind)),
                );
            }
            Err(e) => {
                warn!(model = %kind, error = %e, "Model download failed");
                self.status
                    .notify(StatusStyle::Failure, "Download failed", Some(&e.to_string()));
            }
        }

        result
    }
}

#[async_trait]
impl ModelStore for DiskModelStore {
    async fn model_path(&self, name: &str) -> Result<PathBuf, DomainError> {
        let kind =
            ModelKind::from_name(name).ok_or_else(|| DomainError::UnknownModel(name.to_string()))?;

        let path = kind.local_path(&self.models_dir);
        if path.exists() {
            return Ok(path);
        }

        let lock = self.download_lock(kind);
        let _guard = lock.lock().await;

        // Another caller may have finished the download while we waited.
        if path.exists() {
            return Ok(path);
        }

        self.download(kind, &path).await?;
        Ok(path)
    }

    fn model_exists(&self, name: &str) -> bool {
        ModelKind::from_name(name)
            .map(|kind| kind.local_path(&self.models_dir).exists())
            .unwrap_or(false)
    }

    fn models_dir(&self) -> PathBuf {
        self.models_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::AtomicUsize;

    struct NullStatusSink;

    impl StatusSink for NullStatusSink {
        fn notify(&self, _style: StatusStyle, _title: &str, _message: Option<&str>) {}
    }

    struct RecordingStatusSink {
        events: parking_lot::Mutex<Vec<(StatusStyle, String)>>,
    }

    impl RecordingStatusSink {
        fn new() -> Self {
            Self {
                events: parking_lot::Mutex::new(Vec::new()),
            }
        }
    }

    impl StatusSink for RecordingStatusSink {
        fn notify(&self, style: StatusStyle, title: &str, _message: Option<&str>) {
            self.events.lock().push((style, title.to_string()));
        }
    }

    /// Mock HTTP client that writes a marker file, counting calls.
    struct ServingHttp {
        calls: AtomicUsize,
        delay_ms: u64,
    }

    #[async_trait]
    impl HttpClient for ServingHttp {
        async fn download_file(
            &self,
            _url: &str,
            path: &Path,
            _progress: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
        ) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            tokio::fs::write(path, b"model-bytes").await?;
            Ok(())
        }
    }

    /// Mock HTTP client that always fails, counting calls.
    struct FailingHttp {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpClient for FailingHttp {
        async fn download_file(
            &self,
            url: &str,
            _path: &Path,
            _progress: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
        ) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::HttpRequest(format!("HTTP 404 for {}", url)))
        }
    }

    fn store_with(
        dir: &tempfile::TempDir,
        http: Arc<dyn HttpClient>,
        status: Arc<dyn StatusSink>,
    ) -> DiskModelStore {
        DiskModelStore::new(dir.path().to_path_buf(), http, status).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_model_fails_without_network_or_write() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(FailingHttp {
            calls: AtomicUsize::new(0),
        });
        let store = store_with(&dir, http.clone(), Arc::new(NullStatusSink));

        let err = store.model_path("gigantic").await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownModel(name) if name == "gigantic"));
        assert_eq!(http.calls.load(Ordering::SeqCst), 0);

        let entries: Vec<_> = std::fs::read_dir(store.models_dir()).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_existing_model_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(FailingHttp {
            calls: AtomicUsize::new(0),
        });
        let store = store_with(&dir, http.clone(), Arc::new(NullStatusSink));

        let canonical = store.models_dir().join("ggml-tiny.en.bin");
        std::fs::write(&canonical, b"cached").unwrap();

        let path = store.model_path("tiny").await.unwrap();
        assert_eq!(path, canonical);
        assert_eq!(http.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_download_on_first_request_notifies_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let status = Arc::new(RecordingStatusSink::new());
        let store = store_with(
            &dir,
            Arc::new(ServingHttp {
                calls: AtomicUsize::new(0),
                delay_ms: 0,
            }),
            status.clone(),
        );

        assert!(!store.model_exists("base"));
        let path = store.model_path("base").await.unwrap();
        assert!(path.ends_with("ggml-base.en.bin"));
        assert!(path.exists());
        assert!(store.model_exists("base"));

        let events = status.events.lock();
        assert_eq!(events[0].0, StatusStyle::InProgress);
        assert_eq!(events[1].0, StatusStyle::Success);
    }

    #[tokio::test]
    async fn test_failed_download_reports_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let status = Arc::new(RecordingStatusSink::new());
        let store = store_with(
            &dir,
            Arc::new(FailingHttp {
                calls: AtomicUsize::new(0),
            }),
            status.clone(),
        );

        let err = store.model_path("tiny").await.unwrap_err();
        assert!(matches!(err, DomainError::DownloadFailed(_)));
        assert!(!store.model_exists("tiny"));

        let events = status.events.lock();
        assert_eq!(events.last().unwrap().0, StatusStyle::Failure);
        assert_eq!(events.last().unwrap().1, "Download failed");
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_download() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(ServingHttp {
            calls: AtomicUsize::new(0),
            delay_ms: 50,
        });
        let store = Arc::new(store_with(&dir, http.clone(), Arc::new(NullStatusSink)));

        let (a, b) = tokio::join!(store.model_path("tiny"), store.model_path("tiny"));
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(http.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_model_exists_is_pure() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(FailingHttp {
            calls: AtomicUsize::new(0),
        });
        let store = store_with(&dir, http.clone(), Arc::new(NullStatusSink));

        assert!(!store.model_exists("tiny"));
        assert!(!store.model_exists("no-such-model"));
        assert_eq!(http.calls.load(Ordering::SeqCst), 0);
    }
}
