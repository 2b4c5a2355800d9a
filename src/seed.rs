//! Initial panel text from a URL query string
//!
//! The query may be given as a full URL, as `?left=..&right=..`, or without the
//! leading `?`. Values are form-urlencoded (`+` decodes to a space) and each one
//! must hold a JSON document, which is stored pretty-printed with a two space
//! indent. A side whose value is missing, empty or not valid JSON stays empty.

use crate::stringify;
use thiserror::Error;
use tracing::{error, info};
use url::{Url, form_urlencoded};

pub const LEFT_PARAM: &str = "left";
pub const RIGHT_PARAM: &str = "right";

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pretty-printed initial text for each side
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Seed {
    pub left: Option<String>,
    pub right: Option<String>,
}

/// Re-indent a JSON document with two spaces, printing it the way a browser's
/// `JSON.stringify(value, null, 2)` would
pub fn pretty_json(raw: &str) -> Result<String, SeedError> {
    let value = stringify::parse(raw)?;
    Ok(stringify::to_pretty(&value))
}

/// Read the `left`/`right` parameters out of `input`
///
/// Never fails: parse errors are logged and the affected side is left unset.
pub fn parse_query(input: &str) -> Seed {
    let query = query_part(input);

    let mut left_raw = None;
    let mut right_raw = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            LEFT_PARAM if left_raw.is_none() => left_raw = Some(value.into_owned()),
            RIGHT_PARAM if right_raw.is_none() => right_raw = Some(value.into_owned()),
            _ => {}
        }
    }

    Seed {
        left: decode_side(LEFT_PARAM, left_raw),
        right: decode_side(RIGHT_PARAM, right_raw),
    }
}

fn query_part(input: &str) -> String {
    let input = input.trim();
    if let Ok(url) = Url::parse(input) {
        return url.query().unwrap_or_default().to_string();
    }
    input.strip_prefix('?').unwrap_or(input).to_string()
}

fn decode_side(name: &str, raw: Option<String>) -> Option<String> {
    let raw = raw.filter(|value| !value.is_empty())?;
    match pretty_json(&raw) {
        Ok(pretty) => {
            info!("Seeded {} panel from query ({} bytes)", name, pretty.len());
            Some(pretty)
        }
        Err(e) => {
            error!("Error parsing JSON from '{}' query parameter: {}", name, e);
            None
        }
    }
}
