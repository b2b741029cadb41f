use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Port for delivering transcribed text to the user.
///
/// Two modes: inject into the focused application via simulated paste,
/// or place on the system clipboard only. The orchestrator picks one
/// per run from configuration.
#[async_trait]
pub trait TextOutput: Send + Sync {
    /// Put `text` on the clipboard and simulate a paste command into
    /// the active application.
    async fn paste(&self, text: &str) -> Result<(), DomainError>;

    /// Put `text` on the clipboard without pasting.
    async fn copy(&self, text: &str) -> Result<(), DomainError>;
}
