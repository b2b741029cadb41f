pub mod config_store;
pub mod http_client;
pub mod model_store;
pub mod notifier;
pub mod output_manager;
pub mod sox_recorder;
pub mod whisper_cpp;

pub use config_store::TomlConfigStore;
pub use http_client::ReqwestDownloader;
pub use model_store::DiskModelStore;
pub use notifier::TracingStatusSink;
pub use output_manager::ClipboardOutput;
pub use sox_recorder::SoxRecorder;
pub use whisper_cpp::WhisperTranscriber;
