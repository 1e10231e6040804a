//! Response handling shared by the Toggl and Tracker clients.
//!
//! Both services signal failure through the status code, but they word the
//! body differently:
//! - Tracker sends `{"code": "...", "kind": "error", "error": "..."}`
//! - Toggl v8 sends either a JSON list of messages or plain text
//!
//! [`api_error`] reduces either form to one readable message.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SourceError;

/// Wait assumed when a 429 carries no usable `Retry-After`. Toggl documents
/// a one-request-per-second leaky bucket, so a short default is enough to
/// report.
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Check the status, then decode the body as `T`.
///
/// - 429 becomes [`SourceError::RateLimited`]; it is reported, never retried
/// - any other non-2xx becomes [`SourceError::Api`] via [`api_error`]
/// - a body that does not decode becomes [`SourceError::Parse`] naming `what`
pub async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, SourceError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after(&resp),
        });
    }

    let body = resp.text().await?;
    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| SourceError::Parse(format!("{what}: {e}")))
}

/// Build the error for a failed request from its status and body.
pub fn api_error(status: StatusCode, body: &str) -> SourceError {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => tracker_message(&fields),
        Ok(Value::Array(items)) => {
            let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!lines.is_empty()).then(|| lines.join("; "))
        }
        Ok(Value::String(text)) => Some(text),
        _ => Some(body.trim().to_string()).filter(|text| !text.is_empty()),
    };

    SourceError::Api {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        }),
    }
}

/// `error` text, suffixed with the machine `code` when present.
fn tracker_message(fields: &serde_json::Map<String, Value>) -> Option<String> {
    let error = fields.get("error").and_then(Value::as_str)?;
    Some(match fields.get("code").and_then(Value::as_str) {
        Some(code) => format!("{error} ({code})"),
        None => error.to_string(),
    })
}

fn retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
