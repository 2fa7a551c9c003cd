use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;

use crate::types::apply::{ApplyRequest, FieldErrors};

const OFFER_ID_MSG: &str = "offer_id is required and must be an integer";
const EMAIL_MSG: &str = "A valid email is required";
const CV_URL_REQUIRED_MSG: &str = "cv_url is required";
const CV_URL_INVALID_MSG: &str = "cv_url must be a valid URL";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email regex must compile")
});

/// Check an apply payload. Every failing field gets one message; an empty map means valid.
pub fn validate_apply_payload(data: &Map<String, Value>) -> FieldErrors {
    parse_apply_payload(data).err().unwrap_or_default()
}

/// Validate and normalize an apply payload: the email is lowercased for storage.
/// Values are checked as sent; surrounding whitespace makes an email or URL invalid.
pub fn parse_apply_payload(data: &Map<String, Value>) -> Result<ApplyRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    let offer_id = data.get("offer_id").and_then(parse_offer_id);
    if offer_id.is_none() {
        errors.insert("offer_id".to_string(), OFFER_ID_MSG.to_string());
    }

    let email = data
        .get("email")
        .and_then(Value::as_str)
        .filter(|s| is_valid_email(s));
    if email.is_none() {
        errors.insert("email".to_string(), EMAIL_MSG.to_string());
    }

    let cv_url = match data.get("cv_url") {
        None | Some(Value::Null) => Err(CV_URL_REQUIRED_MSG),
        Some(Value::String(s)) if s.is_empty() => Err(CV_URL_REQUIRED_MSG),
        Some(Value::String(s)) if is_valid_url(s) => Ok(s.as_str()),
        Some(_) => Err(CV_URL_INVALID_MSG),
    };
    if let Err(msg) = cv_url {
        errors.insert("cv_url".to_string(), msg.to_string());
    }

    match (offer_id, email, cv_url) {
        (Some(offer_id), Some(email), Ok(cv_url)) if errors.is_empty() => Ok(ApplyRequest {
            offer_id,
            email: email.to_lowercase(),
            cv_url: cv_url.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Integers, integral floats (`10.0`), or strings holding a decimal integer without
/// leading zeros. Surrounding whitespace in strings is ignored. Booleans are rejected.
fn parse_offer_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => parse_int_str(s.trim()),
        _ => None,
    }
}

fn parse_int_str(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if well_formed { s.parse::<i64>().ok() } else { None }
}

fn is_valid_email(s: &str) -> bool {
    s.len() <= 254 && EMAIL_RE.is_match(s)
}

fn is_valid_url(s: &str) -> bool {
    // Url::parse strips surrounding whitespace itself
    s.trim() == s && Url::parse(s).map(|u| u.has_host()).unwrap_or(false)
}
