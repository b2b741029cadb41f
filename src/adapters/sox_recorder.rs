use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{decode_wav_pcm16, DomainError, RecorderState, SampleBuffer, WAV_HEADER_LEN};
use crate::ports::Recorder;

/// Environment variable overriding the recorder executable path.
const ENV_OVERRIDE: &str = "REC_PATH";

/// Well-known install locations checked before falling back to PATH.
const WELL_KNOWN_PATHS: &[&str] = &["/opt/homebrew/bin/rec", "/usr/local/bin/rec", "/usr/bin/rec"];

/// Name used for the PATH lookup.
const RECORDER_NAME: &str = "rec";

/// Fixed recorder arguments: quiet mode, 16 kHz, mono, 16-bit, WAV
/// container, output to stdout.
const RECORDER_ARGS: &[&str] = &["-q", "-r", "16000", "-c", "1", "-b", "16", "-t", "wav", "-"];

/// One recording attempt: the spawned process plus the tasks draining
/// its output pipes. The raw audio buffer lives inside the stdout task
/// and is only handed over when that task is joined, so nothing reads
/// it while the subprocess is still writing.
struct RecorderSession {
    child: Child,
    stdout_task: JoinHandle<std::io::Result<Vec<u8>>>,
    stderr_task: JoinHandle<String>,
}

/// Recorder adapter that manages a SoX `rec` subprocess.
///
/// Holds at most one [`RecorderSession`]; concurrent starts fail fast
/// with `AlreadyActive` rather than interleaving.
pub struct SoxRecorder {
    session: Mutex<Option<RecorderSession>>,
    state: RwLock<RecorderState>,
    command_override: Option<(PathBuf, Vec<String>)>,
}

impl SoxRecorder {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
            state: RwLock::new(RecorderState::Idle),
            command_override: None,
        }
    }

    /// Run an arbitrary command in place of the resolved recorder.
    #[cfg(test)]
    fn with_command(program: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            session: Mutex::new(None),
            state: RwLock::new(RecorderState::Idle),
            command_override: Some((
                program.into(),
                args.iter().map(|a| a.to_string()).collect(),
            )),
        }
    }

    fn recorder_command(&self) -> Result<(PathBuf, Vec<String>), DomainError> {
        if let Some((program, args)) = &self.command_override {
            return Ok((program.clone(), args.clone()));
        }

        let well_known: Vec<PathBuf> = WELL_KNOWN_PATHS.iter().map(PathBuf::from).collect();
        let program = resolve_executable(
            std::env::var_os(ENV_OVERRIDE).map(PathBuf::from),
            &well_known,
            RECORDER_NAME,
        )?;
        let args = RECORDER_ARGS.iter().map(|a| a.to_string()).collect();
        Ok((program, args))
    }

    /// Terminate, wait for full exit, join the accumulator and convert.
    async fn finish(mut session: RecorderSession) -> Result<SampleBuffer, DomainError> {
        terminate(&mut session.child);

        let status = session.child.wait().await.map_err(DomainError::from)?;

        let raw = session
            .stdout_task
            .await
            .map_err(|e| DomainError::RecorderProcessError(format!("output task failed: {}", e)))?
            .map_err(|e| DomainError::RecorderProcessError(format!("output stream error: {}", e)))?;

        let stderr = session.stderr_task.await.unwrap_or_default();

        debug!(
            raw_bytes = raw.len(),
            exit_status = %status,
            "Recorder process exited"
        );

        // A process that died on its own (bad device, missing driver)
        // shows up here as an abnormal exit with no usable payload. The
        // exit status was recorded when it died, so a pre-stop failure
        // rejects immediately instead of hanging.
        if raw.len() <= WAV_HEADER_LEN && !exited_cleanly(&status) {
            let detail = if stderr.trim().is_empty() {
                status.to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(DomainError::RecorderProcessError(detail));
        }

        decode_wav_pcm16(&raw)
    }
}

impl Default for SoxRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recorder for SoxRecorder {
    async fn start(&self) -> Result<(), DomainError> {
        let mut slot = self.session.lock().await;
        if slot.is_some() {
            return Err(DomainError::AlreadyActive);
        }

        let (program, args) = self.recorder_command()?;
        info!(program = %program.display(), "Starting recorder");

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DomainError::RecorderNotFound,
                _ => DomainError::RecorderProcessError(e.to_string()),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DomainError::RecorderProcessError("recorder stdout was not captured".to_string())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            DomainError::RecorderProcessError("recorder stderr was not captured".to_string())
        })?;

        // Accumulator task: appends every stdout chunk in arrival order
        // and owns the buffer until joined in stop().
        let stdout_task = tokio::spawn(async move {
            let mut reader = stdout;
            let mut raw = Vec::new();
            reader.read_to_end(&mut raw).await.map(|_| raw)
        });

        let stderr_task = tokio::spawn(async move {
            let mut reader = stderr;
            let mut text = String::new();
            let _ = reader.read_to_string(&mut text).await;
            text
        });

        *slot = Some(RecorderSession {
            child,
            stdout_task,
            stderr_task,
        });
        *self.state.write() = RecorderState::Recording;

        Ok(())
    }

    async fn stop(&self) -> Result<SampleBuffer, DomainError> {
        let mut slot = self.session.lock().await;
        let session = slot.take().ok_or(DomainError::NotActive)?;
        *self.state.write() = RecorderState::Stopping;

        let result = Self::finish(session).await;

        // State resets as part of resolving the call, success or not.
        *self.state.write() = RecorderState::Idle;

        match &result {
            Ok(buffer) => info!(
                samples = buffer.len(),
                duration_secs = buffer.duration_secs(),
                "Recording captured"
            ),
            Err(e) => warn!(error = %e, "Recording failed"),
        }

        result
    }

    fn is_active(&self) -> bool {
        *self.state.read() != RecorderState::Idle
    }

    fn state(&self) -> RecorderState {
        *self.state.read()
    }
}

/// Resolve the recorder executable: env override first, then well-known
/// install paths, then a PATH scan by name.
fn resolve_executable(
    override_path: Option<PathBuf>,
    well_known: &[PathBuf],
    name: &str,
) -> Result<PathBuf, DomainError> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        warn!(path = %path.display(), "Recorder override path does not exist, ignoring");
    }

    for candidate in well_known {
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    if let Some(path_var) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(DomainError::RecorderNotFound)
}

/// SIGTERM so the recorder flushes its output before exiting; a plain
/// kill would cut the stream mid-sample.
#[cfg(unix)]
fn terminate(child: &mut Child) {
    if let Some(pid) = child.id() {
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        }
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) {
    let _ = child.start_kill();
}

#[cfg(unix)]
fn exited_cleanly(status: &std::process::ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.success() || status.signal() == Some(libc::SIGTERM)
}

#[cfg(not(unix))]
fn exited_cleanly(status: &std::process::ExitStatus) -> bool {
    status.success()
}
