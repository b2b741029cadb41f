use thiserror::Error;

/// Domain-level errors for Murmur.
///
/// Every variant is terminal for the current pipeline run; nothing here
/// triggers an automatic retry. Conditions the user can fix themselves
/// (missing recorder binary, missing accessibility permission) get their
/// own variants so callers can offer targeted remediation.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Already recording")]
    AlreadyActive,

    #[error("Not currently recording")]
    NotActive,

    #[error("Could not find the `rec` binary. Install SoX (e.g. `brew install sox`) or set REC_PATH to its location")]
    RecorderNotFound,

    #[error("Recorder process failed: {0}")]
    RecorderProcessError(String),

    #[error("No audio captured. Try speaking again")]
    NoAudioCaptured,

    #[error("Corrupted audio buffer received from recorder")]
    CorruptedAudio,

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Model download failed: {0}")]
    DownloadFailed(String),

    #[error("Transcription engine returned no result")]
    EmptyResult,

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Failed to paste text. Ensure accessibility permissions are granted: {0}")]
    PasteFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    HttpRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl DomainError {
    /// True when the user can resolve the failure without code changes,
    /// e.g. by installing a dependency or granting a permission.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::RecorderNotFound | DomainError::PasteFailed(_)
        )
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_recoverable_classification() {
        assert!(DomainError::RecorderNotFound.is_user_recoverable());
        assert!(DomainError::PasteFailed("denied".into()).is_user_recoverable());
        assert!(!DomainError::AlreadyActive.is_user_recoverable());
        assert!(!DomainError::DownloadFailed("404".into()).is_user_recoverable());
    }

    #[test]
    fn test_recorder_not_found_names_remediation() {
        let msg = DomainError::RecorderNotFound.to_string();
        assert!(msg.contains("SoX"));
        assert!(msg.contains("REC_PATH"));
    }
}
