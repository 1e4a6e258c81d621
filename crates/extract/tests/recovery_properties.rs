use extract::{ParseOutcome, RecordNormalizer, recover_records};
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 %]{0,12}".prop_map(Value::String),
    ]
}

fn arb_raw_record() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_json_leaf(),
        (
            prop::option::of(arb_json_leaf()),
            prop::option::of(arb_json_leaf()),
            prop::option::of(arb_json_leaf()),
            prop::option::of(arb_json_leaf()),
        )
            .prop_map(|(id, name, parent, equity)| {
                let mut object = serde_json::Map::new();
                for (key, value) in [("id", id), ("name", name), ("parent", parent), ("equity", equity)] {
                    if let Some(value) = value {
                        object.insert(key.to_string(), value);
                    }
                }
                Value::Object(object)
            }),
    ]
}

proptest! {
    #[test]
    fn recovery_never_panics(raw in ".*") {
        let _ = recover_records(&raw);
    }

    #[test]
    fn array_in_prose_is_recovered(
        records in prop::collection::vec(arb_raw_record(), 0..8),
        prefix in "[a-zA-Z :\n]{0,20}",
        suffix in "[a-zA-Z !\n]{0,20}",
    ) {
        let raw = format!("{}{}{}", prefix, Value::Array(records.clone()), suffix);
        match recover_records(&raw) {
            ParseOutcome::Parsed(items) => prop_assert_eq!(items, records),
            ParseOutcome::Unparseable { reason, .. } => prop_assert!(false, "failed: {}", reason),
        }
    }

    #[test]
    fn normalization_is_total(records in prop::collection::vec(arb_raw_record(), 0..16)) {
        let normalized = RecordNormalizer::new().normalize(&records);
        prop_assert_eq!(normalized.len(), records.len());

        for (i, record) in normalized.iter().enumerate() {
            prop_assert_eq!(record.level, 0);
            prop_assert_eq!(record.name.trim(), record.name.as_str());
            prop_assert_eq!(record.parent.trim(), record.parent.as_str());
            prop_assert_eq!(record.equity.trim(), record.equity.as_str());
            let raw_id = records[i].get("id").and_then(Value::as_i64);
            prop_assert_eq!(record.id, raw_id.unwrap_or(i as i64 + 1));
        }
    }
}
