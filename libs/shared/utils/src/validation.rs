// =====================================================================================
// FIELD VALIDATION - REQUEST PAYLOAD CHECKS SHARED BY ALL CELLS
// =====================================================================================

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{de, Deserialize, Deserializer};
use tracing::debug;

use shared_models::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-(). ]+$").expect("phone pattern compiles"));

const MIN_PHONE_DIGITS: usize = 7;

/// Trims the value and treats blank strings as absent. Forms post `""` for empty inputs.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required_text(field: &str, value: Option<String>) -> Result<String, AppError> {
    optional_text(value).ok_or_else(|| missing(field))
}

pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| missing(field))
}

pub fn optional_email(value: Option<String>) -> Result<Option<String>, AppError> {
    match optional_text(value) {
        Some(email) if email.len() > 254 || !EMAIL_RE.is_match(&email) => {
            debug!("Rejected email: {}", email);
            Err(AppError::ValidationError(format!("Invalid email address: {}", email)))
        }
        other => Ok(other),
    }
}

pub fn optional_phone(value: Option<String>) -> Result<Option<String>, AppError> {
    match optional_text(value) {
        Some(phone) => {
            let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
            if PHONE_RE.is_match(&phone) && digits >= MIN_PHONE_DIGITS {
                Ok(Some(phone))
            } else {
                debug!("Rejected phone number: {}", phone);
                Err(AppError::ValidationError(format!("Invalid phone number: {}", phone)))
            }
        }
        None => Ok(None),
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (whose date part is kept).
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::ValidationError(format!("{} must be a date (YYYY-MM-DD)", field)))
}

/// Accepts RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM[:SS]` which is read as UTC.
pub fn parse_date_time(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::ValidationError(format!("{} must be an ISO 8601 date-time", field))
        })
}

fn missing(field: &str) -> AppError {
    AppError::ValidationError(format!("{} is required", field))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Serde helper for id fields: accepts `1`, `"1"`, `""` (absent) or null.
/// Use together with `#[serde(default)]`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(n)) => i32::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("id {} is out of range", n))),
        Some(RawId::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawId::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id '{}'", s))),
    }
}
