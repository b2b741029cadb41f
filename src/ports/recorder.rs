use async_trait::async_trait;

use crate::domain::{DomainError, RecorderState, SampleBuffer};

/// Port for the recording subprocess manager.
///
/// Implementations own one external recorder process at a time and the
/// raw audio it emits. Exactly one session may be active per instance;
/// a second `start` fails fast instead of interleaving.
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Resolve the recorder executable, spawn it and begin accumulating
    /// its stdout stream.
    ///
    /// Fails with `AlreadyActive` if a session is running and with
    /// `RecorderNotFound` if no executable resolves. The state only
    /// leaves Idle once the subprocess has actually spawned.
    async fn start(&self) -> Result<(), DomainError>;

    /// Terminate the subprocess, wait for it to exit fully, then convert
    /// the accumulated raw bytes into a normalized sample buffer.
    ///
    /// Fails with `NotActive` if nothing is recording. Internal state is
    /// cleared as part of resolving this call, whether conversion
    /// succeeds or not.
    async fn stop(&self) -> Result<SampleBuffer, DomainError>;

    /// Whether a session is currently held. Pure read, no side effects.
    fn is_active(&self) -> bool;

    /// Current position in the Idle -> Recording -> Stopping -> Idle
    /// cycle.
    fn state(&self) -> RecorderState;
}
