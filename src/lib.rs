//! Push-to-talk voice transcription.
//!
//! One invocation records a fixed-length utterance through an external
//! SoX `rec` subprocess, converts the WAV/PCM16 stream to normalized
//! samples, transcribes them with a locally cached whisper model and
//! delivers the text to the clipboard or the focused application.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use app::{AppController, Pipeline};
pub use domain::{AppConfig, DomainError};
