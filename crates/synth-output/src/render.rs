//! Text rendering of values and records.
//!
//! Every function here is pure: the same record always renders to the
//! same bytes.

use synth_core::{format_iso, FieldValue, Record};

/// Render a value for the entity dump (`"key"=value` lines).
///
/// Strings, timestamps and UUIDs are JSON-quoted.
pub fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(i) => i.to_string(),
        FieldValue::Float(f) => render_float(*f),
        FieldValue::Text(s) => json_quote(s),
        FieldValue::DateTime(ts) => json_quote(&format_iso(ts)),
        FieldValue::Uuid(u) => json_quote(&u.to_string()),
        FieldValue::Null => "null".to_string(),
    }
}

/// Render a value inside an inline record (`{'k': v}`).
///
/// Follows Python `repr` conventions: strings are single-quoted unless
/// they contain a `'` and no `"`, and a missing value prints as `None`.
pub fn render_inline_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(i) => i.to_string(),
        FieldValue::Float(f) => render_float(*f),
        FieldValue::Text(s) => repr_quote(s),
        FieldValue::DateTime(ts) => repr_quote(&format_iso(ts)),
        FieldValue::Uuid(u) => repr_quote(&u.to_string()),
        FieldValue::Null => "None".to_string(),
    }
}

/// Render the field lines of one record block, without header.
///
/// Every line but the last ends with a comma.
pub fn render_record_lines(record: &Record) -> Vec<String> {
    let last = record.len().saturating_sub(1);
    record
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let sep = if i < last { "," } else { "" };
            format!("{}={}{}", json_quote(name), render_value(value), sep)
        })
        .collect()
}

/// Render a record as `{'k': v, ...}`.
pub fn render_inline_record(record: &Record) -> String {
    let fields: Vec<String> = record
        .iter()
        .map(|(name, value)| format!("{}: {}", repr_quote(name), render_inline_value(value)))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

fn render_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

fn json_quote(s: &str) -> String {
    // serializing a &str cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

fn repr_quote(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
