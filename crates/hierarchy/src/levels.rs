use extract::CompanyRecord;
use std::collections::{HashMap, HashSet};

/// Name → position of the record that owns that name. On duplicate names the
/// later record wins.
pub fn name_index(records: &[CompanyRecord]) -> HashMap<&str, usize> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| (record.name.as_str(), i))
        .collect()
}

/// Depth of `records[start]`: the number of distinct ancestor records reached
/// by following parent links. Stops at an empty or unresolved parent, or before
/// stepping onto a record already on the walk. Records are tracked by position,
/// so an ancestor that merely shares a name with a visited record is still counted.
fn walk_depth(records: &[CompanyRecord], index: &HashMap<&str, usize>, start: usize) -> u32 {
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(start);

    let mut current = start;
    let mut level = 0;

    loop {
        let parent = records[current].parent.as_str();
        if parent.is_empty() {
            break;
        }
        let Some(&next) = index.get(parent) else {
            break;
        };
        if !visited.insert(next) {
            // cycle
            break;
        }
        current = next;
        level += 1;
    }

    level
}

/// Assign `level` to every record.
///
/// Each record is walked independently, so the cost is O(n·d) where `d` is
/// the chain depth. A walk visits each record at most once, so parent cycles
/// always terminate and no level exceeds `records.len() - 1`.
pub fn compute_levels(records: &mut [CompanyRecord]) {
    let levels: Vec<u32> = {
        let index = name_index(records);
        (0..records.len())
            .map(|i| walk_depth(records, &index, i))
            .collect()
    };

    for (record, level) in records.iter_mut().zip(levels) {
        record.level = level;
    }
}
