#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn class(self) -> &'static str {
        match self {
            StatusKind::Success => "form-message form-message--success",
            StatusKind::Error => "form-message form-message--error",
        }
    }
}

/// Outcome banner shown under the form after a submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    /// `None` keeps the message until something replaces it.
    pub auto_dismiss_ms: Option<u32>,
}

/// Receives the UI instructions the submission controller emits.
pub trait RenderSink {
    fn set_field_error(&self, field: &str, message: Option<&str>);
    fn set_submit_control(&self, label: &str, enabled: bool);
    fn show_status(&self, message: StatusMessage);
    fn clear_fields(&self);
}
