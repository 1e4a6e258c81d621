pub mod levels;
pub mod stats;
pub mod tree;

pub use levels::{compute_levels, name_index};
pub use stats::StructureStats;
pub use tree::{OwnershipNode, build_forest};

use extract::CompanyRecord;
use tracing::debug;

/// Compute levels in place and hand the records back.
pub fn build_hierarchy(mut records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    compute_levels(&mut records);
    debug!(
        records = records.len(),
        max_level = records.iter().map(|r| r.level).max().unwrap_or(0),
        "Computed ownership levels"
    );
    records
}
