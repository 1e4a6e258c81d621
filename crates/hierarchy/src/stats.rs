use extract::CompanyRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    pub total_companies: usize,
    /// Records at level 0
    pub root_companies: usize,
    /// Records naming any parent, resolved or not
    pub subsidiaries: usize,
    /// Number of distinct depths, i.e. deepest level + 1
    pub levels: u32,
}

impl StructureStats {
    /// Expects levels to have been computed already.
    pub fn from_records(records: &[CompanyRecord]) -> Self {
        Self {
            total_companies: records.len(),
            root_companies: records.iter().filter(|r| r.level == 0).count(),
            subsidiaries: records.iter().filter(|r| r.has_parent()).count(),
            levels: records.iter().map(|r| r.level + 1).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_levels;

    #[test]
    fn test_stats() {
        let mut records = vec![
            CompanyRecord::new(1, "Holding", "", "100%"),
            CompanyRecord::new(2, "Sub", "Holding", "51%"),
            CompanyRecord::new(3, "Sub Sub", "Sub", "99%"),
            CompanyRecord::new(4, "Orphan", "Missing", "20%"),
        ];
        compute_levels(&mut records);

        assert_eq!(
            StructureStats::from_records(&records),
            StructureStats {
                total_companies: 4,
                root_companies: 2,
                subsidiaries: 3,
                levels: 3,
            }
        );
    }

    #[test]
    fn test_empty() {
        let stats = StructureStats::from_records(&[]);
        assert_eq!(stats.total_companies, 0);
        assert_eq!(stats.levels, 0);
    }
}
