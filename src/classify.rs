//! Classification of failed responses into [`ApiError`]s.
//!
//! | status  | kind              | retryable |
//! |---------|-------------------|-----------|
//! | 401     | `Auth`            | no        |
//! | 404     | `NotFound`        | no        |
//! | 413     | `PayloadTooLarge` | no        |
//! | 429     | `RateLimited`     | yes       |
//! | 5xx     | `Recoverable`     | yes       |
//! | other   | `Other`           | no        |
//!
//! The classifier only labels errors. Deciding whether to retry is left to
//! the caller, see [`crate::retry`].

use crate::envelope::Envelope;
use crate::error::{ApiError, ApiErrorKind};
use http::{HeaderMap, StatusCode};
use std::time::{Duration, SystemTime};

/// The wait applied to a 429 response without a usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Classifies a failed response: any status other than 200 or 201, or any
/// non-2xx status for a DELETE.
///
/// `envelope` is `None` when the body could not be parsed; the error is then
/// labelled `unknown` and described by the status text alone.
///
/// # Examples
///
/// ```
/// use asana_client::classify::classify;
/// use http::StatusCode;
/// use std::time::Duration;
///
/// let err = classify(StatusCode::TOO_MANY_REQUESTS, None, Some("30"), "req-1");
/// assert_eq!(err.retry_after, Some(Duration::from_secs(30)));
/// assert_eq!(err.error_type, "unknown");
/// ```
pub fn classify(
    status: StatusCode,
    envelope: Option<&Envelope>,
    retry_after_header: Option<&str>,
    request_id: &str,
) -> ApiError {
    let kind = ApiErrorKind::from_status(status);
    let status_text = status.canonical_reason().unwrap_or("Unknown error");

    let (error_type, message, phrase, help) = match envelope {
        Some(envelope) => {
            let error_type = error_type_for(status).to_string();
            match envelope.first_error() {
                Some(detail) if !detail.message.is_empty() => (
                    error_type,
                    detail.message.clone(),
                    detail.phrase.clone(),
                    detail.help.clone(),
                ),
                Some(detail) => (
                    error_type,
                    status_text.to_string(),
                    detail.phrase.clone(),
                    detail.help.clone(),
                ),
                None => (error_type, status_text.to_string(), None, None),
            }
        }
        None => ("unknown".to_string(), status_text.to_string(), None, None),
    };

    let parsed = retry_after_header.and_then(parse_retry_after);
    let retry_after = match kind {
        ApiErrorKind::RateLimited => Some(parsed.unwrap_or(DEFAULT_RETRY_AFTER)),
        ApiErrorKind::Recoverable => parsed,
        _ => None,
    };

    ApiError {
        status,
        kind,
        error_type,
        message,
        phrase,
        help,
        retry_after,
        request_id: request_id.to_string(),
    }
}

/// Classifies a response using its headers for the retry hint.
pub(crate) fn classify_response(
    status: StatusCode,
    headers: &HeaderMap,
    envelope: Option<&Envelope>,
    request_id: &str,
) -> ApiError {
    let retry_after = headers
        .get(http::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok());
    classify(status, envelope, retry_after, request_id)
}

fn error_type_for(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "invalid_request",
        401 => "not_authorized",
        402 => "payment_required",
        403 => "forbidden",
        404 => "not_found",
        413 => "payload_too_large",
        429 => "rate_limit_enforced",
        500..=599 => "server_error",
        _ => "api_error",
    }
}

/// Parses a `Retry-After` value.
///
/// Supports both delay-seconds and HTTP-date formats. A date in the past
/// yields a zero wait.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date_time = httpdate::parse_http_date(value).ok()?;
    Some(
        date_time
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO),
    )
}
