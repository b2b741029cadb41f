use std::sync::Arc;

use anyhow::Context;

use murmur::adapters::{
    ClipboardOutput, DiskModelStore, ReqwestDownloader, SoxRecorder, TracingStatusSink,
    WhisperTranscriber,
};
use murmur::ports::{HttpClient, StatusSink};
use murmur::{AppController, Pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let controller = AppController::new().context("failed to initialize application")?;
    let config = controller.config().clone();

    let status: Arc<dyn StatusSink> = Arc::new(TracingStatusSink);
    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestDownloader::new().context("failed to create HTTP client")?);

    let models = Arc::new(
        DiskModelStore::new(controller.data_dir(), http, status.clone())
            .context("failed to initialize model store")?,
    );
    let output = Arc::new(
        ClipboardOutput::new(config.output.paste_delay_ms)
            .context("failed to initialize output")?,
    );

    let pipeline = Pipeline::new(
        Arc::new(SoxRecorder::new()),
        models,
        Arc::new(WhisperTranscriber::new()),
        output,
        status,
        config,
    );

    // The pipeline already surfaced the failure through the status
    // sink; the exit code is for scripts and launchers.
    match pipeline.run().await {
        Ok(()) => Ok(()),
        Err(_) => std::process::exit(1),
    }
}
