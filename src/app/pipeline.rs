use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::{AppConfig, DomainError, OutputMode};
use crate::ports::{
    ModelStore, Recorder, StatusSink, StatusStyle, TextOutput, TranscribeOptions, Transcriber,
};

/// Success notifications show at most this many characters of the text.
const PREVIEW_LEN: usize = 50;

/// The capture -> convert -> transcribe -> dispatch state machine.
///
/// One invocation runs the stages in order; any stage failure
/// short-circuits the rest and surfaces a single failure notification
/// carrying the triggering error's message. No stage is retried. A
/// second invocation while one is recording fails fast inside the
/// recorder with `AlreadyActive`.
pub struct Pipeline {
    recorder: Arc<dyn Recorder>,
    models: Arc<dyn ModelStore>,
    transcriber: Arc<dyn Transcriber>,
    output: Arc<dyn TextOutput>,
    status: Arc<dyn StatusSink>,
    config: AppConfig,
}

impl Pipeline {
    pub fn new(
        recorder: Arc<dyn Recorder>,
        models: Arc<dyn ModelStore>,
        transcriber: Arc<dyn Transcriber>,
        output: Arc<dyn TextOutput>,
        status: Arc<dyn StatusSink>,
        config: AppConfig,
    ) -> Self {
        Self {
            recorder,
            models,
            transcriber,
            output,
            status,
            config,
        }
    }

    /// Run one full invocation, reporting the terminal outcome through
    /// the status sink either way.
    pub async fn run(&self) -> Result<(), DomainError> {
        match self.run_stages().await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.status
                    .notify(StatusStyle::Failure, "Voice-to-text failed", Some(&e.to_string()));
                Err(e)
            }
        }
    }

    async fn run_stages(&self) -> Result<(), DomainError> {
        self.status.notify(StatusStyle::InProgress, "Recording...", None);
        self.recorder.start().await?;

        // Fixed-length capture window; no voice-activity detection and
        // no abort path once recording has started.
        tokio::time::sleep(Duration::from_secs(self.config.capture.window_secs)).await;

        let audio = self.recorder.stop().await?;

        self.status
            .notify(StatusStyle::InProgress, "Transcribing...", None);

        let model_path = self
            .models
            .model_path(&self.config.transcription.model)
            .await?;

        let options = TranscribeOptions {
            model_path,
            language: self.config.transcription.language.clone(),
            use_gpu: self.config.transcription.use_gpu,
        };
        let text = self.transcriber.transcribe(&audio, &options).await?;

        if text.trim().is_empty() {
            info!("Transcription empty, nothing to dispatch");
            self.status
                .notify(StatusStyle::Success, "No speech detected", None);
            return Ok(());
        }

        let preview = preview(&text);
        match self.config.output.mode {
            OutputMode::Paste => {
                self.output.paste(&text).await?;
                self.status
                    .notify(StatusStyle::Success, "Pasted", Some(&preview));
            }
            OutputMode::Copy => {
                self.output.copy(&text).await?;
                self.status
                    .notify(StatusStyle::Success, "Copied", Some(&preview));
            }
        }

        Ok(())
    }
}

/// First 50 characters of the text, with an ellipsis marker when
/// something was cut off. Counts characters, not bytes, so multi-byte
/// text never splits.
fn preview(text: &str) -> String {
    let mut shortened: String = text.chars().take(PREVIEW_LEN).collect();
    if text.chars().count() > PREVIEW_LEN {
        shortened.push_str("...");
    }
    shortened
}
