//! End-to-end behaviour of the semantic model over real templates

mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use template_model::{
    context_at, context_at_path, property_path, Document, DocumentFormat, DocumentStore,
    Position, SectionCache, TopLevelSection, ValueParser,
};

fn cache(format: DocumentFormat, text: &str) -> SectionCache {
    SectionCache::new(
        Document::new("file:///t", format, 1, text),
        ValueParser::default(),
    )
}

#[test]
fn minimal_template_yields_one_resource() {
    for (format, text) in [
        (DocumentFormat::Yaml, MINIMAL_YAML),
        (DocumentFormat::Json, MINIMAL_JSON),
    ] {
        let tree = parse(format, text);
        let sections = tree.find_top_level_sections(&[TopLevelSection::Resources]);
        assert_eq!(sections.len(), 1, "{format}");

        let cache = cache(format, text);
        let resources = cache
            .get_entities_from_section(TopLevelSection::Resources)
            .unwrap();
        assert_eq!(resources.len(), 1);
        let resource = resources.get("B").unwrap().as_resource().unwrap().clone();
        assert_eq!(resource.logical_id, "B");
        assert_eq!(resource.resource_type.as_deref(), Some("X::Y::Z"));
    }
}

#[test]
fn section_key_matches_lexical_text() {
    let tree = parse(DocumentFormat::Yaml, FULL_YAML);
    let found = tree.find_top_level_sections(&TopLevelSection::ALL);
    assert_eq!(found.len(), 8);

    let dialect = tree.dialect();
    for (section, pair) in found {
        let key = dialect.key_of(pair).unwrap();
        assert_eq!(tree.node_text(&key), section.key());
    }
}

#[test]
fn parameter_defaults_are_normalized() {
    for (format, text, ids) in [
        (DocumentFormat::Yaml, FULL_YAML, ["Env", "Port", "Suffix"]),
        (DocumentFormat::Json, PARAMETERS_JSON, ["Flag", "Port", "Name"]),
    ] {
        let cache = cache(format, text);
        let defaults: Vec<_> = ids
            .iter()
            .map(|id| {
                cache
                    .get_entity(TopLevelSection::Parameters, id)
                    .and_then(|e| e.as_parameter().and_then(|p| p.default.clone()))
            })
            .collect();
        assert_eq!(
            defaults,
            vec![Some(json!(true)), Some(json!(8080)), Some(json!("123abc"))]
        );
    }
}

#[test]
fn bad_indentation_gives_no_section_names() {
    let cache = cache(DocumentFormat::Yaml, BAD_INDENT_YAML);
    assert!(cache.get_top_level_section_names().is_empty());

    // The tree still answers position queries
    let tree = parse(DocumentFormat::Yaml, BAD_INDENT_YAML);
    let _ = context_at(&tree, Position::new(3, 8));
}

#[test]
fn missing_resource_path_resolves_partially() {
    let tree = parse(DocumentFormat::Yaml, MINIMAL_YAML);
    let lookup = tree.node_by_path(&property_path!["Resources", "MissingResource"]);
    assert!(!lookup.fully_resolved);

    let node = lookup.node.unwrap();
    assert_eq!(
        tree.path_and_entity_info(node).property_path,
        property_path!["Resources"]
    );
    assert!(tree.node_text(&node).contains("B:"));
}

#[test]
fn full_template_entities() {
    let cache = cache(DocumentFormat::Yaml, FULL_YAML);
    assert_eq!(
        cache.get_top_level_section_names(),
        vec![
            TopLevelSection::Transform,
            TopLevelSection::Parameters,
            TopLevelSection::Mappings,
            TopLevelSection::Conditions,
            TopLevelSection::Rules,
            TopLevelSection::Resources,
            TopLevelSection::Outputs,
            TopLevelSection::Metadata,
        ]
    );

    let bucket = cache.get_entity(TopLevelSection::Resources, "Bucket").unwrap();
    let bucket = bucket.as_resource().unwrap();
    assert_eq!(bucket.depends_on, vec!["Role".to_string()]);
    assert_eq!(
        bucket.properties.as_ref().unwrap()["BucketName"],
        json!({"!Sub": "${AWS::StackName}-bucket"})
    );

    let condition = cache.get_entity(TopLevelSection::Conditions, "IsProd").unwrap();
    assert_eq!(
        condition.as_condition().unwrap().expression,
        json!({"!Equals": [{"!Ref": "Env"}, "prod"]})
    );

    let output = cache.get_entity(TopLevelSection::Outputs, "BucketArn").unwrap();
    assert_eq!(
        output.as_output().unwrap().value,
        Some(json!({"!GetAtt": "Bucket.Arn"}))
    );

    let mapping = cache.get_entity(TopLevelSection::Mappings, "RegionMap").unwrap();
    assert_eq!(
        mapping.as_mapping().unwrap().lookup("us-east-1", "Ami"),
        Some(&json!("ami-1"))
    );

    let rule = cache.get_entity(TopLevelSection::Rules, "ProdOnly").unwrap();
    assert_eq!(rule.as_rule().unwrap().assertions.len(), 1);

    let transform = cache.get_entity(TopLevelSection::Transform, "0").unwrap();
    assert_eq!(
        transform.as_transform().unwrap().name.as_deref(),
        Some("AWS::Serverless-2016-10-31")
    );

    let owner = cache.get_entity(TopLevelSection::Metadata, "Owner").unwrap();
    assert_eq!(owner.as_metadata().unwrap().value, json!("platform"));
}

#[test]
fn repeated_lookups_are_reference_equal() {
    let cache = cache(DocumentFormat::Yaml, FULL_YAML);
    for section in TopLevelSection::ALL {
        let a = cache.get_entities_from_section(section).unwrap();
        let b = cache.get_entities_from_section(section).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(
            &cache.get_section(section).unwrap(),
            &cache.get_section(section).unwrap()
        ));
    }
    assert_eq!(cache.get_all_sections().len(), 8);
}

#[test]
fn context_for_nested_list_value() {
    let tree = parse(DocumentFormat::Yaml, FULL_YAML);
    let path = property_path!["Resources", "Bucket", "Properties", "Tags", 0usize, "Value"];
    let found = context_at_path(&tree, &path);
    assert!(found.fully_resolved);

    let context = found.context.unwrap();
    assert_eq!(context.text(), "core");
    assert_eq!(context.logical_id().as_deref(), Some("Bucket"));
    assert_eq!(context.section(), Some(TopLevelSection::Resources));

    let entity = context.entity_root().unwrap();
    assert!(tree.node_text(&entity).starts_with("Bucket:"));

    // Position query lands on the same path
    let start = context.range().start;
    let again = context_at(&tree, start).unwrap();
    assert_eq!(again.property_path(), &path);
}

#[test]
fn half_typed_key_keeps_other_sections() {
    let text = "Resources:\n  B:\n    Type: X::Y::Z\n  Pro\nOutputs:\n  O:\n    Value: 1\n";
    let cache = cache(DocumentFormat::Yaml, text);
    assert_eq!(
        cache.get_top_level_section_names(),
        vec![TopLevelSection::Resources, TopLevelSection::Outputs]
    );

    // The tree keeps the half-typed line
    let tree = parse(DocumentFormat::Yaml, text);
    assert!(context_at(&tree, Position::new(3, 3)).is_some());
}

#[test]
fn truncated_json_keeps_complete_entities() {
    let text = r#"{"Resources": {"A": {"Type": "T1"}, "B": {"Type": "T2", "Properties": {"#;
    let cache = cache(DocumentFormat::Json, text);
    let resources = cache
        .get_entities_from_section(TopLevelSection::Resources)
        .unwrap();
    let ids: Vec<String> = resources.logical_ids().collect();
    assert_eq!(ids, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(
        resources.get("B").unwrap().as_resource().unwrap().resource_type.as_deref(),
        Some("T2")
    );
}

#[test]
fn store_discards_derived_data_on_change() {
    let store = DocumentStore::new(Arc::new(provider()), ValueParser::default());
    let v1 = store.open(Document::detect("file:///a.yaml", 1, MINIMAL_YAML));
    let v1_entity = v1
        .sections()
        .get_entity(TopLevelSection::Resources, "B")
        .unwrap();

    let v2 = store
        .change(Document::detect("file:///a.yaml", 2, "Resources:\n  C:\n    Type: T\n"))
        .unwrap();
    assert!(v2
        .sections()
        .get_entity(TopLevelSection::Resources, "B")
        .is_none());
    assert!(v2
        .syntax_tree()
        .unwrap()
        .node_by_path(&property_path!["Resources", "C"])
        .fully_resolved);

    // Old snapshot is untouched
    assert!(Arc::ptr_eq(
        &v1_entity,
        &v1.sections()
            .get_entity(TopLevelSection::Resources, "B")
            .unwrap()
    ));
}

#[test]
fn many_resources_round_trip_through_cache_and_tree() {
    let text = fixture_n_resources(50);
    let cache = cache(DocumentFormat::Yaml, &text);
    let resources = cache
        .get_entities_from_section(TopLevelSection::Resources)
        .unwrap();
    assert_eq!(resources.len(), 50);

    let tree = parse(DocumentFormat::Yaml, &text);
    for id in resources.logical_ids() {
        let lookup = tree.node_by_path(&property_path!["Resources", id.as_str(), "Type"]);
        assert!(lookup.fully_resolved, "{id}");
    }
}
