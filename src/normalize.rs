//! Display-value normalization for loosely-typed profile fields.
//!
//! Everything in this module is a total function: absent or malformed
//! input degrades to an empty result, it never errors. The page
//! composer renders placeholders for empty values instead.

use crate::models::CompanyProfile;
use serde_json::Value;

/// Upper bound on labels returned by [`normalize_list`]. Keeps a
/// pathological tag column from flooding a rendered page.
pub const MAX_LIST_ITEMS: usize = 40;

/// Coerces to a string, trims and collapses internal whitespace runs.
/// Absent input yields an empty string, never panics.
pub fn clean_text(v: Option<&str>) -> String {
    match v {
        Some(s) => s.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    }
}

/// Like [`clean_text`], then caps the result at `max_len` characters.
/// When cut, the result is exactly `max_len` chars ending in an
/// ellipsis; the ellipsis counts toward the cap. Char-based, so
/// multi-byte text is never split mid-codepoint.
pub fn truncate(v: Option<&str>, max_len: usize) -> String {
    let s = clean_text(v);
    if s.chars().count() <= max_len {
        return s;
    }
    let mut out: String = s.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Text form of a scalar json value, for fields like `founded_year`
/// that arrive as either a number or a string.
pub fn value_text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => clean_text(Some(s)),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Normalizes a label-set field into a trimmed, non-empty, ordered list.
///
/// Accepts either a structured json array or a delimiter-joined string;
/// strings split on runs of `,` `;` newline, tab or `|`, with
/// consecutive delimiters collapsing to one split point. Output is
/// capped at [`MAX_LIST_ITEMS`]; excess labels are silently dropped.
pub fn normalize_list(v: Option<&Value>) -> Vec<String> {
    let mut out = Vec::new();
    match v {
        Some(Value::Array(items)) => {
            for item in items {
                let label = match item {
                    Value::String(s) => clean_text(Some(s)),
                    other => value_text(Some(other)),
                };
                if !label.is_empty() {
                    out.push(label);
                }
                if out.len() == MAX_LIST_ITEMS {
                    break;
                }
            }
        }
        Some(Value::String(s)) => split_labels(s, &mut out),
        Some(Value::Null) | None => {}
        Some(other) => split_labels(&other.to_string(), &mut out),
    }
    out
}

fn split_labels(s: &str, out: &mut Vec<String>) {
    for part in s.split(|c| matches!(c, ',' | ';' | '\n' | '\t' | '|')) {
        let label = clean_text(Some(part));
        if !label.is_empty() {
            out.push(label);
        }
        if out.len() == MAX_LIST_ITEMS {
            break;
        }
    }
}

/// Canonicalizes a website value into a linkable URL. Empty input is
/// `None`; an existing `http://` / `https://` scheme is preserved,
/// anything else gets an `https://` prefix.
pub fn normalize_website(v: Option<&str>) -> Option<String> {
    let s = clean_text(v);
    if s.is_empty() {
        return None;
    }
    if s.starts_with("http://") || s.starts_with("https://") {
        Some(s)
    } else {
        Some(format!("https://{}", s))
    }
}

/// Boolean-ish coercion for verification flags stored with drifting
/// types: json bool as-is, numbers by non-zero, strings by non-empty
/// unless they spell a negative.
fn truthy(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => {
            let t = s.trim();
            !t.is_empty()
                && !t.eq_ignore_ascii_case("false")
                && !t.eq_ignore_ascii_case("no")
                && t != "0"
        }
        _ => false,
    }
}

/// Canonical verification predicate. The derived flag is the OR of the
/// three boolean-ish columns plus a case-insensitive status match; no
/// single stored column is authoritative on its own.
pub fn is_verified(profile: &CompanyProfile) -> bool {
    if truthy(profile.verified.as_ref())
        || truthy(profile.is_verified.as_ref())
        || truthy(profile.blue_tick.as_ref())
    {
        return true;
    }
    let status = profile
        .verification_status
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    status == "verified" || status == "approved"
}

/// Joins non-empty city and country with ", ". Both empty yields an
/// empty string; the caller renders the placeholder.
pub fn location_label(city: Option<&str>, country: Option<&str>) -> String {
    let city = clean_text(city);
    let country = clean_text(country);
    match (city.is_empty(), country.is_empty()) {
        (false, false) => format!("{}, {}", city, country),
        (false, true) => city,
        (true, false) => country,
        (true, true) => String::new(),
    }
}
