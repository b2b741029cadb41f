pub mod config;
pub mod http;
pub mod model_store;
pub mod output;
pub mod recorder;
pub mod status;
pub mod transcriber;

pub use config::ConfigStore;
pub use http::HttpClient;
pub use model_store::ModelStore;
pub use output::TextOutput;
pub use recorder::Recorder;
pub use status::{StatusSink, StatusStyle};
pub use transcriber::{TranscribeOptions, Transcriber};
