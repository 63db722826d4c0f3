//! User-facing notifications around API actions.

use std::future::Future;

use serde_json::Value;

use crate::error::ClientError;

/// Used when nothing more specific can be extracted and no fallback is given.
pub const DEFAULT_ERROR: &str = "An unexpected error occurred";
/// Used when the error carries no information at all.
pub const EMPTY_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Toast-style sink for success and error messages.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message, "Action succeeded");
    }

    fn error(&self, message: &str) {
        tracing::warn!(message, "Action failed");
    }
}

/// Messages shown around an action. Either may be omitted.
#[derive(Debug, Default, Clone)]
pub struct FeedbackMessages {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl FeedbackMessages {
    pub fn new(success: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: Some(success.into()),
            error: Some(error.into()),
        }
    }
}

/// Pick the most specific message from a loosely typed error value.
///
/// In order: `data.message`, `message`, the value itself if it is a string,
/// a generic retry text for an empty object, `Request failed with status N`,
/// then `fallback` or [`DEFAULT_ERROR`].
pub fn error_message(err: &Value, fallback: Option<&str>) -> String {
    let text = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(msg) = text(err.pointer("/data/message")) {
        return msg;
    }
    if let Some(msg) = text(err.get("message")) {
        return msg;
    }
    if let Some(msg) = text(Some(err)) {
        return msg;
    }
    if err.as_object().is_some_and(|o| o.is_empty()) {
        return EMPTY_ERROR.to_string();
    }
    if let Some(status) = err.get("status").filter(|s| !s.is_null()) {
        let status = status.as_str().map_or_else(|| status.to_string(), str::to_string);
        return format!("Request failed with status {status}");
    }
    fallback.unwrap_or(DEFAULT_ERROR).to_string()
}

/// Await `action`, notifying on both outcomes.
///
/// On failure the error notification carries [`error_message`] of the error
/// and the returned [`ClientError::Feedback`] carries the same text.
pub async fn with_feedback<T, F>(
    action: F,
    messages: &FeedbackMessages,
    notifier: &dyn Notifier,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match action.await {
        Ok(value) => {
            if let Some(success) = &messages.success {
                notifier.success(success);
            }
            Ok(value)
        }
        Err(err) => {
            tracing::error!(error = %err, "Action failed");
            let message = error_message(&err.to_value(), messages.error.as_deref());
            notifier.error(&message);
            Err(ClientError::Feedback(message))
        }
    }
}
