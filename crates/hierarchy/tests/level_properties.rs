use extract::CompanyRecord;
use hierarchy::{OwnershipNode, build_forest, compute_levels};
use proptest::prelude::*;

/// Small name alphabet so parent references often resolve and cycles are common.
fn arb_records() -> impl Strategy<Value = Vec<CompanyRecord>> {
    let name = prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]);
    let parent = prop::sample::select(vec!["", "A", "B", "C", "D", "E", "F", "Ghost"]);
    prop::collection::vec((name, parent), 0..24).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (name, parent))| CompanyRecord::new(i as i64 + 1, name, parent, "100%"))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_unresolvable_parent_means_root(mut records in arb_records()) {
        compute_levels(&mut records);

        for (i, record) in records.iter().enumerate() {
            let resolvable = records
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && !record.parent.is_empty() && other.name == record.parent);
            if !resolvable {
                prop_assert_eq!(record.level, 0, "record {:?}", record);
            }
        }
    }

    #[test]
    fn prop_level_bounded_by_record_count(mut records in arb_records()) {
        compute_levels(&mut records);

        for record in &records {
            prop_assert!((record.level as usize) < records.len());
        }
    }

    #[test]
    fn prop_levels_are_deterministic(records in arb_records()) {
        let mut first = records.clone();
        let mut second = records;
        compute_levels(&mut first);
        compute_levels(&mut second);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_forest_covers_every_record_once(records in arb_records()) {
        let forest = build_forest(&records);
        let total: usize = forest.iter().map(OwnershipNode::size).sum();
        prop_assert_eq!(total, records.len());
    }
}

#[test]
fn chain_levels() {
    let mut records = vec![
        CompanyRecord::new(1, "A", "", "100%"),
        CompanyRecord::new(2, "B", "A", "100%"),
        CompanyRecord::new(3, "C", "B", "100%"),
    ];
    compute_levels(&mut records);
    assert_eq!(records.iter().map(|r| r.level).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn two_cycle_terminates_at_one_hop() {
    let mut records = vec![
        CompanyRecord::new(1, "A", "B", "100%"),
        CompanyRecord::new(2, "B", "A", "100%"),
    ];
    compute_levels(&mut records);
    assert_eq!(records[0].level, 1);
    assert_eq!(records[1].level, 1);
}

#[test]
fn null_parent_from_model_output_stays_root() {
    let raw = vec![
        serde_json::json!({"id": 1, "name": "Holding", "parent": null}),
        serde_json::json!({"id": 2, "name": "Sub", "parent": "Holding"}),
        serde_json::json!({"id": 3, "name": "None", "parent": ""}),
    ];
    let mut records = extract::RecordNormalizer::new().normalize(&raw);
    compute_levels(&mut records);

    assert_eq!(records[0].parent, "");
    assert_eq!(records.iter().map(|r| r.level).collect::<Vec<_>>(), vec![0, 1, 0]);
}
