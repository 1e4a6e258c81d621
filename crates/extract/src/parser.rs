//! Recover a record array from untrusted backend output.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::schema::RawRecord;

/// First `[` to last `]`, across newlines.
static ARRAY_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Vec<RawRecord>),
    Unparseable { raw: String, reason: String },
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

/// Two strategies, in order: parse the greedy array-looking span if there is
/// one, otherwise parse the whole trimmed output. A span that fails to parse
/// is final; the whole-output attempt only runs when no span exists.
pub fn recover_records(raw_output: &str) -> ParseOutcome {
    let trimmed = raw_output.trim();

    let (candidate, strategy) = match ARRAY_SPAN.find(trimmed) {
        Some(span) => (span.as_str(), "array span"),
        None => (trimmed, "whole output"),
    };

    let unparseable = |reason: String| ParseOutcome::Unparseable {
        raw: trimmed.to_string(),
        reason,
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(items)) => ParseOutcome::Parsed(items),
        Ok(other) => unparseable(format!(
            "{} parsed as JSON {} instead of an array",
            strategy,
            json_kind(&other)
        )),
        Err(e) => unparseable(format!("{} is not valid JSON: {}", strategy, e)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
