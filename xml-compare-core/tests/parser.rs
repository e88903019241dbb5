use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::table::records_from_xml;
use xml_compare_core::{parse_file, Document};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_attributes_text_and_nested_elements() {
    let root = parse_file(&fixture("fixtures/preferences_a.xml")).expect("parse should succeed");
    assert_eq!(root.tag, "Preference");
    assert_eq!(root.count_children("Airport"), 3);
    assert_eq!(root.children[0].attributes.get("code"), Some(&"LHR".to_string()));

    let meal = &root.children[3];
    assert_eq!(meal.tag, "Meal");
    assert_eq!(meal.children[0].attributes.len(), 2);
}

#[test]
fn path_table_follows_document_order() {
    let xml = std::fs::read(fixture("fixtures/preferences_a.xml")).expect("fixture");
    let records = records_from_xml(&xml, true).expect("records");

    let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        &paths[..4],
        &[
            "/Preference",
            "/Preference/Airport[1]",
            "/Preference/Airport[1]",
            "/Preference/Airport[2]",
        ]
    );
    assert!(paths.contains(&"/Preference/Loyalty/Number"));
}

#[test]
fn folds_prefixed_documents_without_prefixes() {
    let xml = std::fs::read_to_string(fixture("fixtures/orders_prefixed.xml")).expect("fixture");

    let cleaned = Document::from_xml(&xml, true).expect("document");
    assert_eq!(cleaned.root().path(), "/orders");
    assert_eq!(cleaned.root().children_of("/orders/order").len(), 2);
    assert_eq!(cleaned.root().attribute("xmlns"), Some("urn:example:orders"));

    let kept = Document::from_xml(&xml, false).expect("document");
    assert_eq!(kept.root().path(), "/ord:orders");
    assert_eq!(kept.root().attribute("xmlns:li"), Some("urn:example:lines"));
    assert_eq!(kept.node_count(), 6);
}
