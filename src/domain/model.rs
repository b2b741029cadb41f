use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

/// The fixed set of whisper models Murmur knows how to fetch.
///
/// Declared statically; each kind is resolved lazily to a file on first
/// request and cached on disk indefinitely. Once a model file exists at
/// its canonical path it is treated as valid and never re-downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Smallest and fastest, lowest accuracy.
    Tiny,
    /// Better accuracy, a few hundred MB.
    Base,
}

impl ModelKind {
    /// Parse a user-facing model name. Returns None for anything outside
    /// the registered set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tiny" => Some(ModelKind::Tiny),
            "base" => Some(ModelKind::Base),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Tiny => "tiny",
            ModelKind::Base => "base",
        }
    }

    /// Canonical file name under the models directory.
    pub fn file_name(&self) -> String {
        format!("ggml-{}.en.bin", self.as_str())
    }

    /// Registered remote source for this model.
    pub fn source_url(&self) -> Url {
        let url = match self {
            ModelKind::Tiny => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin"
            }
            ModelKind::Base => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin"
            }
        };
        // Both entries are compile-time constants and parse unconditionally.
        Url::parse(url).expect("registered model URL is valid")
    }

    /// Canonical local path under the given models directory.
    pub fn local_path(&self, models_dir: &Path) -> PathBuf {
        models_dir.join(self.file_name())
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_registered_set() {
        assert_eq!(ModelKind::from_name("tiny"), Some(ModelKind::Tiny));
        assert_eq!(ModelKind::from_name("base"), Some(ModelKind::Base));
        assert_eq!(ModelKind::from_name("large"), None);
        assert_eq!(ModelKind::from_name(""), None);
        assert_eq!(ModelKind::from_name("Tiny"), None);
    }

    #[test]
    fn test_file_name_and_path() {
        assert_eq!(ModelKind::Tiny.file_name(), "ggml-tiny.en.bin");
        let path = ModelKind::Base.local_path(Path::new("/tmp/models"));
        assert_eq!(path, PathBuf::from("/tmp/models/ggml-base.en.bin"));
    }

    #[test]
    fn test_source_urls_point_at_model_host() {
        for kind in [ModelKind::Tiny, ModelKind::Base] {
            let url = kind.source_url();
            assert_eq!(url.scheme(), "https");
            assert_eq!(url.host_str(), Some("huggingface.co"));
            assert!(url.path().ends_with(&kind.file_name()));
        }
    }
}
