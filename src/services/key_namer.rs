use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::Value;

/// Logical folder for archived submissions within the bucket.
pub const KEY_PREFIX: &str = "FormSubmissions/";

const NAME_MAX_LEN: usize = 30;
const SHORT_ID_LEN: usize = 8;
const SHORT_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FALLBACK_NAME: &str = "Unknown";

/// Derive the object key for a submission, e.g.
/// `FormSubmissions/2026/08/2026-08-06_Jane-Doe_k3j9x2ab.json`.
///
/// Date components are UTC. The short id carries no uniqueness guarantee;
/// a colliding key overwrites the previous object. Time and randomness are
/// parameters so callers can pin both.
pub fn make_key(submission: &Value, now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    format!(
        "{}{}/{}_{}_{}.json",
        KEY_PREFIX,
        now.format("%Y/%m"),
        now.format("%Y-%m-%d"),
        sanitize_name(candidate_name(submission)),
        short_id(rng),
    )
}

/// First non-empty name field, covering both intake form layouts.
fn candidate_name(submission: &Value) -> &str {
    string_field(submission, "/payload/First Name")
        .or_else(|| string_field(submission, "/rawData/firstname"))
        .unwrap_or(FALLBACK_NAME)
}

fn string_field<'a>(submission: &'a Value, pointer: &str) -> Option<&'a str> {
    submission
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Keep `[A-Za-z0-9-]`, collapse internal whitespace runs to single hyphens,
/// cap the length. Falls back to `Unknown` when nothing survives.
fn sanitize_name(raw: &str) -> String {
    let mut name = String::new();
    let mut pending_gap = false;
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            if pending_gap {
                name.push('-');
            }
            name.push(c);
            pending_gap = false;
        } else if c.is_whitespace() && !name.is_empty() {
            pending_gap = true;
        }
    }
    name.truncate(NAME_MAX_LEN);
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

fn short_id(rng: &mut impl Rng) -> String {
    (0..SHORT_ID_LEN)
        .map(|_| SHORT_ID_ALPHABET[rng.gen_range(0..SHORT_ID_ALPHABET.len())] as char)
        .collect()
}
