/// Visual style of a status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    InProgress,
    Success,
    Failure,
}

/// Port for transient user-facing status notifications (the HUD/toast
/// surface of the host environment).
///
/// Used for recording-started, transcribing, download progress and the
/// terminal success/failure feedback. These notifications are the only
/// way terminal states are exposed in the interactive flow.
pub trait StatusSink: Send + Sync {
    fn notify(&self, style: StatusStyle, title: &str, message: Option<&str>);
}
