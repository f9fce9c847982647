//! Transient user notifications ("toasts").

use std::time::Duration;

/// How long the view keeps a notice on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSS modifier of the toast element.
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "toast-success",
            NoticeLevel::Warning => "toast-warning",
            NoticeLevel::Error => "toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}
