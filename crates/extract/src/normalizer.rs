use serde_json::Value;

use crate::schema::{CompanyRecord, RawRecord};

const DEFAULT_PARENT: &str = "";
const DEFAULT_EQUITY: &str = "100%";

/// Coerces raw backend records into the canonical schema.
///
/// Total over any sequence of JSON values: missing fields get defaults,
/// wrong-typed fields are stringified, nothing is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &[RawRecord]) -> Vec<CompanyRecord> {
        raw.iter()
            .enumerate()
            .map(|(i, record)| Self::normalize_one(i + 1, record))
            .collect()
    }

    /// `position` is 1-based
    fn normalize_one(position: usize, record: &RawRecord) -> CompanyRecord {
        let field = |key: &str| record.get(key).filter(|v| !v.is_null());

        let id = field("id")
            .and_then(Value::as_i64)
            .unwrap_or(position as i64);

        let name = field("name")
            .map(stringify)
            .unwrap_or_else(|| format!("Company {}", position));

        let parent = field("parent")
            .map(stringify)
            .unwrap_or_else(|| DEFAULT_PARENT.to_string());

        let equity = field("equity")
            .map(stringify)
            .unwrap_or_else(|| DEFAULT_EQUITY.to_string());

        CompanyRecord::new(id, name, parent, equity)
    }
}

/// String contents for JSON strings, compact JSON text for everything else.
/// The result is trimmed.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}
