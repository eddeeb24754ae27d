//! Integration tests for dot-notation access and record field helpers

use cerl::path::{by_dot_with, resolve};
use cerl::{
    by_dot, identifier_of, inferred_type_of, one, Cardinality, CerlError, FalsyPolicy, RecordType,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn thesaurus_record() -> Value {
    json!({
        "_id": "cnp00123",
        "data": {
            "type": "person",
            "nameVariants": [
                {"name": "Manutius, Aldus", "language": "lat"},
                {"name": "Manuzio, Aldo", "language": "ita"},
                {"name": "", "language": "und"},
            ],
            "places": [
                {"activity": [{"place": "Venezia"}, {"place": "Carpi"}]},
                {"activity": {"place": "Roma"}},
            ],
            "biography": {"years": 0},
        }
    })
}

#[test]
fn test_identifier_and_type() {
    let record = json!({"_id": "cnp00123"});
    assert_eq!(identifier_of(&record).unwrap(), "cnp00123");
    assert_eq!(inferred_type_of(&record), RecordType::Person);
    assert_eq!(inferred_type_of(&record).to_string(), "person");
}

#[test]
fn test_names_across_list() {
    let record = thesaurus_record();
    let names: Vec<&str> = by_dot(&record, "data.nameVariants.name")
        .into_iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(names, vec!["Manutius, Aldus", "Manuzio, Aldo"]);
}

#[test]
fn test_nested_lists_preserve_discovery_order() {
    let record = thesaurus_record();
    assert_eq!(
        by_dot(&record, "data.places.activity.place"),
        vec![&json!("Venezia"), &json!("Carpi"), &json!("Roma")]
    );
}

#[test]
fn test_zero_valued_field_depends_on_policy() {
    let record = thesaurus_record();
    assert!(by_dot(&record, "data.biography.years").is_empty());
    assert_eq!(
        by_dot_with(&record, "data.biography.years", FalsyPolicy::KeepPresent),
        vec![&json!(0)]
    );
}

#[test]
fn test_one_on_resolved_path() {
    let record = thesaurus_record();
    assert_eq!(one(by_dot(&record, "data.type")).unwrap(), "person");
    assert!(matches!(
        one(by_dot(&record, "data.missing")),
        Err(CerlError::Cardinality(Cardinality::Empty))
    ));
    assert!(matches!(
        one(by_dot(&record, "data.nameVariants.language")),
        Err(CerlError::Cardinality(Cardinality::Multiple(3)))
    ));
}

#[test]
fn test_identifier_duplicated_across_list_is_error() {
    let rows = json!([{"_id": "cnp1"}, {"_id": "cnp2"}]);
    assert!(matches!(
        identifier_of(&rows),
        Err(CerlError::Cardinality(Cardinality::Multiple(2)))
    ));
}

fn truthy_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Value::from),
        (1i64..1000).prop_map(Value::from),
        Just(Value::Bool(true)),
    ]
}

proptest! {
    #[test]
    fn prop_truthy_key_resolves_to_value(key in "[a-z_]{1,6}", value in truthy_scalar()) {
        let mut map = Map::new();
        map.insert(key.clone(), value.clone());
        let node = Value::Object(map);
        prop_assert_eq!(resolve(&node, &[key.as_str()]), vec![&value]);
    }

    #[test]
    fn prop_absent_key_resolves_to_nothing(key in "[a-z]{1,6}") {
        let node = json!({"_": 1});
        prop_assert!(resolve(&node, &[key.as_str()]).is_empty());
    }

    #[test]
    fn prop_sequence_concatenates_in_order(values in prop::collection::vec(truthy_scalar(), 0..10)) {
        let node = Value::Array(values.iter().map(|v| json!({ "k": v })).collect());
        let expected: Vec<&Value> = values.iter().collect();
        prop_assert_eq!(resolve(&node, &["k"]), expected);
    }
}
