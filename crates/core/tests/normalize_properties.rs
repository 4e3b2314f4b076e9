#![forbid(unsafe_code)]

use kf_core::taxonomy::{CostType, normalize};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::{Map, Value, json};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[A-Za-z0-9 .]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(
                (
                    prop_oneof![
                        Just("DIRECT".to_string()),
                        Just("INDIRECT".to_string()),
                        Just("label".to_string()),
                        Just("groups".to_string()),
                        Just("items".to_string()),
                        Just("id".to_string()),
                        "[A-Z]{1,6}",
                    ],
                    inner,
                ),
                0..6,
            )
            .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_item() -> impl Strategy<Value = Value> {
    ("[A-Z0-9.]{1,4}", "[a-zA-Z ]{0,12}").prop_map(|(id, label)| json!({ "id": id, "label": label }))
}

fn arb_legacy() -> impl Strategy<Value = Value> {
    (
        "[A-Z ]{1,10}",
        prop::collection::vec(arb_item(), 0..5),
        prop::collection::vec(arb_item(), 0..5),
    )
        .prop_map(|(label, direct_items, legacy_items)| {
            json!({
                "DIRECT": { "label": "D", "groups": { "WYNAGRODZENIA": direct_items } },
                "INDIRECT": { "label": label, "items": legacy_items }
            })
        })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn normalization_is_idempotent(raw in prop_oneof![arb_json(), arb_legacy()]) {
        let once = normalize(Some(&raw));
        let persisted = serde_json::to_value(&once).expect("serialize taxonomy");
        let twice = normalize(Some(&persisted));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn normalized_output_is_always_canonical(raw in arb_json()) {
        let taxonomy = normalize(Some(&raw));
        let persisted = serde_json::to_value(&taxonomy).expect("serialize taxonomy");
        for cost_type in CostType::ALL {
            let section = &persisted[cost_type.as_str()];
            prop_assert!(section["groups"].is_object());
            prop_assert!(section.get("items").is_none());
            prop_assert!(section["label"].is_string());
            for group in section["groups"].as_object().expect("groups").values() {
                prop_assert!(group.is_array());
            }
        }
    }

    #[test]
    fn legacy_items_land_in_fallback_group(raw in arb_legacy()) {
        let taxonomy = normalize(Some(&raw));
        let expected = raw["INDIRECT"]["items"].as_array().expect("items").len();
        prop_assert_eq!(taxonomy.indirect.groups.len(), 1);
        prop_assert_eq!(
            taxonomy.indirect.group("PODSTAWOWE").map(Vec::len),
            Some(expected)
        );
    }
}
