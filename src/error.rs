use thiserror::Error;

use crate::api::types::ServerRejection;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, TodoError>;

/// Failure details that travel back from a spawned call.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInfo {
    Api { status: u16, body: String },
    Network(String),
    Delete { id: i64, reason: String },
}

impl ErrorInfo {
    pub fn from_todo_error(e: &TodoError) -> Self {
        match e {
            TodoError::Api { status, message } => ErrorInfo::Api {
                status: *status,
                body: message.clone(),
            },
            _ => ErrorInfo::Network(e.to_string()),
        }
    }
}

/// Title, body and hint of the modal shown when a call fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPopup {
    pub title: String,
    pub message: String,
    pub hint: String,
}

const POPUP_MESSAGE_LEN: usize = 80;

impl ErrorPopup {
    fn new(title: impl Into<String>, message: &str, hint: &str) -> Self {
        Self {
            title: title.into(),
            message: clip(message, POPUP_MESSAGE_LEN),
            hint: hint.to_string(),
        }
    }

    pub fn from_error_info(info: &ErrorInfo) -> Self {
        match info {
            ErrorInfo::Api { status, body } => Self::from_status(*status, body),
            ErrorInfo::Network(msg) => {
                Self::new("Network Error", msg, "Is the todo server running?")
            }
            ErrorInfo::Delete { id, reason } => Self::new(
                "Delete Failed",
                &format!("Todo #{}: {}", id, reason),
                "Refresh to see what the server still has",
            ),
        }
    }

    fn from_status(status: u16, body: &str) -> Self {
        let reason = rejection_message(body);
        match status {
            404 => Self::new(
                "Not Found",
                "That item no longer exists on the server",
                "Refresh to reload the list",
            ),
            422 => Self::new(
                "Rejected",
                reason.as_deref().unwrap_or("The server rejected the change"),
                "Check the title and tag names",
            ),
            500..=599 => Self::new(
                "Server Error",
                &reason.unwrap_or_else(|| format!("The server answered {}", status)),
                "Try again in a moment",
            ),
            _ => Self::new(
                format!("HTTP {}", status),
                reason.as_deref().unwrap_or(body),
                "Try again in a moment",
            ),
        }
    }
}

/// The `message` of a `{"error": true, "message": ...}` body, if that is what `body` is.
fn rejection_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServerRejection>(body)
        .ok()
        .and_then(|r| r.message)
}

fn clip(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
