//! `JSON.stringify(JSON.parse(raw), null, 2)` on top of `serde_json`
//!
//! Numbers are read as IEEE doubles and written with ECMAScript
//! `Number::toString` rules (`ryu-js`), so `1.0` prints as `1` and values that
//! overflow a double print as `null`. Object keys that are array indices come
//! first in ascending order, then the rest in insertion order. Strings may hold
//! lone UTF-16 surrogates, which are written back as lowercase `\uXXXX` escapes.

use serde_json::{Map, Number, Value};
use std::fmt::Write;

/// Stands in for an escape that a Rust `String` cannot hold. It is followed by
/// the four lowercase hex digits of the escaped code unit.
const SHIELD: char = '\u{FDD0}';
const INDENT: &str = "  ";

/// Parse JSON the way `JSON.parse` accepts it
pub fn parse(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&shield_surrogates(raw))
}

/// Pretty-print with a two space indent, matching `JSON.stringify(value, null, 2)`
pub fn to_pretty(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(n)),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, depth + 1);
                write_value(out, item, depth + 1);
            }
            newline(out, depth);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in ordered_entries(map).into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, depth + 1);
                write_string(out, key);
                out.push_str(": ");
                write_value(out, item, depth + 1);
            }
            newline(out, depth);
            out.push('}');
        }
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn format_number(n: &Number) -> String {
    // Parsing the literal text rounds to the nearest double, like JSON.parse
    let value = n.to_string().parse::<f64>().unwrap_or(f64::NAN);
    if !value.is_finite() {
        "null".to_string()
    } else if value == 0.0 {
        // Covers -0, which JavaScript prints as 0
        "0".to_string()
    } else {
        ryu_js::Buffer::new().format_finite(value).to_string()
    }
}

/// Integer-index keys ascending, then the remaining keys in insertion order
fn ordered_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut indexed: Vec<(u32, (&String, &Value))> = Vec::new();
    let mut named = Vec::new();
    for entry in map {
        match array_index(entry.0) {
            Some(index) => indexed.push((index, entry)),
            None => named.push(entry),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, entry)| entry).chain(named).collect()
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index < u32::MAX)
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            SHIELD => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex == "fdd0" {
                    out.push(SHIELD);
                } else {
                    let _ = write!(out, "\\u{}", hex);
                }
            }
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Rewrite `\uXXXX` escapes of unpaired surrogates, and every U+FDD0, into
/// `SHIELD` + hex so `serde_json` accepts the document and `write_string` can
/// restore them. Everything outside string literals is copied unchanged.
fn shield_surrogates(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if !in_string {
            in_string = c == '"';
            out.push(c);
            continue;
        }

        match c {
            '"' => {
                in_string = false;
                out.push(c);
            }
            SHIELD => push_shielded(&mut out, 0xFDD0),
            '\\' if chars.peek() == Some(&'u') => {
                chars.next();
                let hex: String = chars.by_ref().take(4).collect();
                let unit = (hex.len() == 4)
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten();
                let Some(unit) = unit else {
                    // Malformed escape; leave it for serde_json to reject
                    out.push_str("\\u");
                    out.push_str(&hex);
                    continue;
                };

                match unit {
                    0xD800..=0xDBFF => {
                        let low = low_surrogate_ahead(&chars);
                        match low {
                            Some(low) => {
                                for _ in 0..6 {
                                    chars.next();
                                }
                                let _ = write!(out, "\\u{:04x}\\u{:04x}", unit, low);
                            }
                            None => push_shielded(&mut out, unit),
                        }
                    }
                    0xDC00..=0xDFFF | 0xFDD0 => push_shielded(&mut out, unit),
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            c => out.push(c),
        }
    }

    out
}

fn push_shielded(out: &mut String, unit: u16) {
    // Written as an escape so the output stays plain JSON text
    let _ = write!(out, "\\ufdd0{:04x}", unit);
}

/// The low surrogate of a `\uXXXX` escape immediately ahead, if there is one
fn low_surrogate_ahead<I: Iterator<Item = char> + Clone>(
    chars: &std::iter::Peekable<I>,
) -> Option<u16> {
    let ahead: String = chars.clone().take(6).collect();
    let hex = ahead.strip_prefix("\\u")?;
    if hex.len() != 4 {
        return None;
    }
    u16::from_str_radix(hex, 16)
        .ok()
        .filter(|unit| (0xDC00..=0xDFFF).contains(unit))
}
