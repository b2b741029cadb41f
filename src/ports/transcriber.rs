use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{DomainError, SampleBuffer};

/// Options for one transcription call. Constructed fresh per pipeline
/// run, never reused.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    /// Path to the model file on disk.
    pub model_path: PathBuf,
    /// Target language (ISO 639-1 code, e.g. "en").
    pub language: String,
    /// Prefer hardware-accelerated inference when available.
    pub use_gpu: bool,
}

/// Port for the speech-to-text engine.
///
/// Modeled as an opaque capability: a function from (model path,
/// samples, options) to text or error, so the concrete engine can be
/// swapped without touching the orchestrator.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the sample buffer to text.
    ///
    /// On success the returned text is the engine's segments joined in
    /// order with single-space separation and trimmed of surrounding
    /// whitespace. It may be empty, which means "no speech detected",
    /// not an error. Fails with `EmptyResult` only when the engine
    /// produced no transcription content at all. No retries; engine
    /// errors propagate unchanged.
    async fn transcribe(
        &self,
        audio: &SampleBuffer,
        options: &TranscribeOptions,
    ) -> Result<String, DomainError>;
}
