use serde::{Deserialize, Serialize};

/// One element of the array returned by the extraction backend, untyped.
pub type RawRecord = serde_json::Value;

fn default_equity() -> String {
    "100%".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: i64,
    pub name: String,
    /// Name of the owning company; empty for a root
    #[serde(default)]
    pub parent: String,
    /// Free-text percentage, e.g. "33.12%"
    #[serde(default = "default_equity")]
    pub equity: String,
    /// Depth in the ownership tree, computed by the hierarchy builder
    #[serde(default)]
    pub level: u32,
}

impl CompanyRecord {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        parent: impl Into<String>,
        equity: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent: parent.into(),
            equity: equity.into(),
            level: 0,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn has_parent(&self) -> bool {
        !self.parent.is_empty()
    }
}

/// What the semantic extraction step produced for one document.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The backend answered and its output held a JSON array
    Records(Vec<CompanyRecord>),
    /// The backend answered but nothing usable could be recovered
    Unparseable { raw: String, reason: String },
    /// The backend call itself failed
    BackendFailed { error: String },
}
