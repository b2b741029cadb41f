use serde::{Deserialize, Serialize};

/// Where the transcribed text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Inject via simulated paste into the focused application.
    Paste,
    /// Place on the system clipboard only.
    Copy,
}

/// Transcription configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Selected model name ("tiny" or "base").
    pub model: String,
    /// Language code (ISO 639-1, e.g. "en").
    pub language: String,
    /// Prefer hardware-accelerated inference when available.
    pub use_gpu: bool,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "tiny".to_string(),
            language: "en".to_string(),
            use_gpu: true,
        }
    }
}

/// Capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Fixed capture window in seconds. The recording always runs this
    /// long; there is no voice-activity detection and no mid-capture
    /// abort.
    pub window_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { window_secs: 5 }
    }
}

/// Output/text injection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// paste | copy
    pub mode: OutputMode,
    /// Delay in ms between clipboard write and simulated paste
    /// (clipboard sync).
    pub paste_delay_ms: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Paste,
            paste_delay_ms: 100,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with daily rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub transcription: TranscriptionConfig,
    pub capture: CaptureConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.transcription.model, "tiny");
        assert_eq!(config.transcription.language, "en");
        assert!(config.transcription.use_gpu);
        assert_eq!(config.capture.window_secs, 5);
        assert_eq!(config.output.mode, OutputMode::Paste);
        assert_eq!(config.output.paste_delay_ms, 100);
    }

    #[test]
    fn test_output_mode_parses_lowercase() {
        let config: AppConfig = toml::from_str(
            r#"
            [output]
            mode = "copy"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.mode, OutputMode::Copy);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [transcription]
            model = "base"
            "#,
        )
        .unwrap();
        assert_eq!(config.transcription.model, "base");
        assert_eq!(config.transcription.language, "en");
        assert_eq!(config.capture.window_secs, 5);
    }
}
