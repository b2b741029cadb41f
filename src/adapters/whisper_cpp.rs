use async_trait::async_trait;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::domain::{DomainError, SampleBuffer, SAMPLE_RATE};
use crate::ports::{TranscribeOptions, Transcriber};

/// Transcriber implementation using whisper.cpp via whisper-rs.
///
/// The model context is loaded from the request's path for each call;
/// requests are constructed fresh per pipeline run and never reused.
pub struct WhisperTranscriber {
    threads: u32,
}

impl WhisperTranscriber {
    pub fn new() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|p| std::cmp::max(1, p.get() as u32 - 1))
            .unwrap_or(1);

        debug!(threads, "WhisperTranscriber created");

        Self { threads }
    }
}

impl Default for WhisperTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(
        &self,
        audio: &SampleBuffer,
        options: &TranscribeOptions,
    ) -> Result<String, DomainError> {
        if audio.sample_rate() != SAMPLE_RATE {
            return Err(DomainError::Transcription(format!(
                "Expected {}Hz audio, got {}Hz",
                SAMPLE_RATE,
                audio.sample_rate()
            )));
        }

        if !options.model_path.exists() {
            return Err(DomainError::Transcription(format!(
                "Model file not found: {}",
                options.model_path.display()
            )));
        }

        let samples = audio.samples().to_vec();
        let model_path = options.model_path.to_string_lossy().to_string();
        let language = options.language.clone();
        let use_gpu = options.use_gpu;
        let threads = self.threads;

        debug!(
            samples = samples.len(),
            duration_secs = audio.duration_secs(),
            model = %options.model_path.display(),
            "Starting transcription"
        );

        let start = std::time::Instant::now();

        // Inference is CPU-bound; run it off the async executor.
        let segments = tokio::task::spawn_blocking(move || {
            let mut ctx_params = WhisperContextParameters::default();
            ctx_params.use_gpu(use_gpu);

            let ctx = WhisperContext::new_with_params(&model_path, ctx_params)
                .map_err(|e| DomainError::Transcription(format!("Failed to load model: {}", e)))?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_n_threads(threads as i32);
            params.set_language(Some(&language));
            params.set_translate(false);
            // Keep the engine quiet: no timestamps, no internal logging.
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);

            let mut state = ctx.create_state().map_err(|e| {
                DomainError::Transcription(format!("Failed to create whisper state: {}", e))
            })?;

            state
                .full(params, &samples)
                .map_err(|e| DomainError::Transcription(format!("Transcription failed: {}", e)))?;

            // No enumerable transcription content at all is the engine
            // coming back empty-handed, distinct from zero segments.
            let num_segments = state.full_n_segments().map_err(|_| DomainError::EmptyResult)?;

            let mut segments = Vec::with_capacity(num_segments as usize);
            for i in 0..num_segments {
                let text = state.full_get_segment_text(i).map_err(|e| {
                    DomainError::Transcription(format!("Failed to read segment {}: {}", i, e))
                })?;
                segments.push(text);
            }

            Ok::<Vec<String>, DomainError>(segments)
        })
        .await
        .map_err(|e| DomainError::Transcription(format!("Task join error: {}", e)))??;

        let text = join_segments(&segments);

        info!(
            text_len = text.len(),
            segments = segments.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Transcription complete"
        );

        Ok(text)
    }
}

/// Concatenate segments in order with single-space separation and trim
/// surrounding whitespace. Whisper segments usually carry a leading
/// space of their own.
fn join_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_segments_single_space_and_trim() {
        let segments = vec![
            " hello".to_string(),
            " world".to_string(),
            "  again ".to_string(),
        ];
        assert_eq!(join_segments(&segments), "hello world again");
    }

    #[test]
    fn test_join_segments_empty_input() {
        assert_eq!(join_segments(&[]), "");
        assert_eq!(join_segments(&[" ".to_string(), "".to_string()]), "");
    }

    #[test]
    fn test_transcriber_picks_threads() {
        let transcriber = WhisperTranscriber::new();
        assert!(transcriber.threads >= 1);
    }

    #[tokio::test]
    async fn test_missing_model_file_fails_before_inference() {
        let transcriber = WhisperTranscriber::new();
        let audio = SampleBuffer::from_samples(vec![0.0; 160]);
        let options = TranscribeOptions {
            model_path: "/nonexistent/ggml-tiny.en.bin".into(),
            language: "en".to_string(),
            use_gpu: false,
        };

        let err = transcriber.transcribe(&audio, &options).await.unwrap_err();
        assert!(matches!(err, DomainError::Transcription(_)));
    }
}
