pub mod audio;
pub mod config;
pub mod error;
pub mod model;

pub use audio::{decode_wav_pcm16, RecorderState, SampleBuffer, SAMPLE_RATE, WAV_HEADER_LEN};
pub use config::{AppConfig, OutputMode};
pub use error::DomainError;
pub use model::ModelKind;
