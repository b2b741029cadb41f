use std::time::Duration;

use arboard::Clipboard;
use async_trait::async_trait;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::ports::TextOutput;

/// Text output via the system clipboard, with optional simulated paste.
///
/// Paste mode replaces the user's clipboard content with the transcribed
/// text and does not restore the original, to avoid races where the
/// user pastes before restoration completes.
pub struct ClipboardOutput {
    clipboard: Mutex<Clipboard>,
    paste_delay: Duration,
}

impl ClipboardOutput {
    pub fn new(paste_delay_ms: u64) -> Result<Self, DomainError> {
        let clipboard = Clipboard::new()
            .map_err(|e| DomainError::Clipboard(format!("Failed to initialize clipboard: {}", e)))?;

        Ok(Self {
            clipboard: Mutex::new(clipboard),
            paste_delay: Duration::from_millis(paste_delay_ms),
        })
    }

    fn set_clipboard_text(&self, text: &str) -> Result<(), DomainError> {
        let mut clipboard = self.clipboard.lock();
        clipboard
            .set_text(text)
            .map_err(|e| DomainError::Clipboard(format!("Failed to set clipboard text: {}", e)))?;
        debug!(chars = text.len(), "Set clipboard text");
        Ok(())
    }

    /// Simulate Cmd+V (macOS) / Ctrl+V (elsewhere). Failing to create
    /// the input simulator or deliver the keystrokes usually means the
    /// accessibility permission is missing, so these map to PasteFailed.
    fn simulate_paste(&self) -> Result<(), DomainError> {
        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| DomainError::PasteFailed(format!("input simulator unavailable: {}", e)))?;

        #[cfg(target_os = "macos")]
        let modifier = Key::Meta;
        #[cfg(not(target_os = "macos"))]
        let modifier = Key::Control;

        enigo
            .key(modifier, Direction::Press)
            .map_err(|e| DomainError::PasteFailed(format!("modifier press failed: {}", e)))?;

        let result = enigo
            .key(Key::Unicode('v'), Direction::Click)
            .map_err(|e| DomainError::PasteFailed(format!("keystroke failed: {}", e)));

        // Always release the modifier, even if the keystroke failed.
        let release = enigo
            .key(modifier, Direction::Release)
            .map_err(|e| DomainError::PasteFailed(format!("modifier release failed: {}", e)));

        result.and(release)?;

        debug!("Simulated paste keystroke");
        Ok(())
    }
}

#[async_trait]
impl TextOutput for ClipboardOutput {
    async fn paste(&self, text: &str) -> Result<(), DomainError> {
        info!(chars = text.len(), "Pasting transcribed text");

        self.set_clipboard_text(text)?;

        // Give the clipboard time to sync before the paste keystroke.
        tokio::time::sleep(self.paste_delay).await;

        self.simulate_paste()
    }

    async fn copy(&self, text: &str) -> Result<(), DomainError> {
        info!(chars = text.len(), "Copying transcribed text");
        self.set_clipboard_text(text)
    }
}
