//! Entity Builder
//!
//! `build` normalizes the raw value and dispatches on the section.
//! `build_section` expands a whole section value into its entries; the
//! transform directive becomes one entity per list element.

use super::entity::{
    Assertion, Condition, Entity, Mapping, Metadata, Output, Parameter, Resource, Rule, Transform,
};
use super::normalize::normalize_value;
use super::section::{SectionShape, TopLevelSection};
use serde_json::Value;

/// Typed entity for one section entry
pub fn build(section: TopLevelSection, logical_id: &str, raw: &Value) -> Entity {
    let value = normalize_value(raw.clone());
    let id = logical_id.to_string();
    match section {
        TopLevelSection::Resources => Entity::Resource(resource(id, &value)),
        TopLevelSection::Parameters => Entity::Parameter(parameter(id, &value)),
        TopLevelSection::Mappings => Entity::Mapping(Mapping {
            logical_id: id,
            entries: value.as_object().cloned().unwrap_or_default(),
        }),
        TopLevelSection::Conditions => Entity::Condition(Condition {
            logical_id: id,
            expression: value,
        }),
        TopLevelSection::Outputs => Entity::Output(output(id, &value)),
        TopLevelSection::Rules => Entity::Rule(rule(id, &value)),
        TopLevelSection::Metadata => Entity::Metadata(Metadata {
            logical_id: id,
            value,
        }),
        TopLevelSection::Transform => Entity::Transform(Transform {
            index: transform_index(logical_id),
            name: value.as_str().map(str::to_string),
            value,
        }),
    }
}

/// All entries of a section value, keyed by logical id
///
/// Entry-map sections that are not maps yield nothing. The transform
/// directive yields `"0"`, `"1"`, … for a list and `"0"` for a bare value.
pub fn build_section(section: TopLevelSection, raw: &Value) -> Vec<(String, Entity)> {
    match section.shape() {
        SectionShape::EntryMap => match raw {
            Value::Object(entries) => entries
                .iter()
                .map(|(logical_id, value)| {
                    (logical_id.clone(), build(section, logical_id, value))
                })
                .collect(),
            _ => Vec::new(),
        },
        SectionShape::Indexed => {
            let items: Vec<&Value> = match raw {
                Value::Array(items) => items.iter().collect(),
                Value::Null => Vec::new(),
                other => vec![other],
            };
            items
                .into_iter()
                .enumerate()
                .map(|(index, value)| {
                    let id = index.to_string();
                    let entity = build(section, &id, value);
                    (id, entity)
                })
                .collect()
        }
    }
}

fn transform_index(logical_id: &str) -> usize {
    match logical_id.parse() {
        Ok(index) => index,
        Err(_) => {
            tracing::debug!(logical_id, "transform id is not an index, using 0");
            0
        }
    }
}

fn resource(logical_id: String, value: &Value) -> Resource {
    Resource {
        logical_id,
        resource_type: text(value.get("Type")),
        properties: value.get("Properties").cloned(),
        depends_on: string_list(value.get("DependsOn")),
        condition: text(value.get("Condition")),
        metadata: value.get("Metadata").cloned(),
        deletion_policy: text(value.get("DeletionPolicy")),
        update_replace_policy: text(value.get("UpdateReplacePolicy")),
        creation_policy: value.get("CreationPolicy").cloned(),
        update_policy: value.get("UpdatePolicy").cloned(),
    }
}

fn parameter(logical_id: String, value: &Value) -> Parameter {
    Parameter {
        logical_id,
        parameter_type: text(value.get("Type")),
        default: value.get("Default").cloned(),
        allowed_values: value
            .get("AllowedValues")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        allowed_pattern: text(value.get("AllowedPattern")),
        constraint_description: text(value.get("ConstraintDescription")),
        description: text(value.get("Description")),
        no_echo: value.get("NoEcho").and_then(Value::as_bool),
        min_length: value.get("MinLength").and_then(Value::as_u64),
        max_length: value.get("MaxLength").and_then(Value::as_u64),
        min_value: value.get("MinValue").and_then(Value::as_f64),
        max_value: value.get("MaxValue").and_then(Value::as_f64),
    }
}

fn output(logical_id: String, value: &Value) -> Output {
    Output {
        logical_id,
        value: value.get("Value").cloned(),
        description: text(value.get("Description")),
        export_name: value
            .get("Export")
            .and_then(|export| export.get("Name"))
            .cloned(),
        condition: text(value.get("Condition")),
    }
}

fn rule(logical_id: String, value: &Value) -> Rule {
    let assertions = value
        .get("Assertions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(Assertion {
                        assert: item.get("Assert")?.clone(),
                        description: text(item.get("AssertDescription")),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Rule {
        logical_id,
        rule_condition: value.get("RuleCondition").cloned(),
        assertions,
    }
}

/// Scalar rendered as text; normalization may have turned it into a number
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|item| text(Some(item))).collect(),
        Some(single) => text(Some(single)).into_iter().collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resource() {
        let raw = json!({
            "Type": "X::Y::Z",
            "DependsOn": "Other",
            "Condition": "IsProd",
            "DeletionPolicy": "Retain",
            "Properties": {"Port": "8080", "Enabled": "true", "Name": "123abc"}
        });
        let entity = build(TopLevelSection::Resources, "B", &raw);
        let resource = entity.as_resource().unwrap();

        assert_eq!(resource.logical_id, "B");
        assert_eq!(resource.resource_type.as_deref(), Some("X::Y::Z"));
        assert_eq!(resource.depends_on, vec!["Other".to_string()]);
        assert_eq!(resource.condition.as_deref(), Some("IsProd"));
        assert_eq!(resource.deletion_policy.as_deref(), Some("Retain"));
        assert_eq!(
            resource.properties,
            Some(json!({"Port": 8080, "Enabled": true, "Name": "123abc"}))
        );
        assert_eq!(entity.section(), TopLevelSection::Resources);
    }

    #[test]
    fn test_parameter_defaults_are_normalized() {
        let cases = [
            (json!("true"), json!(true)),
            (json!("8080"), json!(8080)),
            (json!("123abc"), json!("123abc")),
        ];
        for (raw_default, expected) in cases {
            let raw = json!({"Type": "String", "Default": raw_default, "NoEcho": "true", "MinLength": "3"});
            let entity = build(TopLevelSection::Parameters, "P", &raw);
            let parameter = entity.as_parameter().unwrap();
            assert_eq!(parameter.default, Some(expected));
            assert_eq!(parameter.no_echo, Some(true));
            assert_eq!(parameter.min_length, Some(3));
        }
    }

    #[test]
    fn test_mapping_lookup() {
        let raw = json!({"us-east-1": {"Ami": "ami-1"}, "eu-west-1": {"Ami": "ami-2"}});
        let entity = build(TopLevelSection::Mappings, "RegionMap", &raw);
        let mapping = entity.as_mapping().unwrap();
        assert_eq!(mapping.lookup("eu-west-1", "Ami"), Some(&json!("ami-2")));
        assert_eq!(mapping.lookup("ap-south-1", "Ami"), None);
        assert_eq!(mapping.top_level_keys().count(), 2);
    }

    #[test]
    fn test_output_and_rule() {
        let output = build(
            TopLevelSection::Outputs,
            "Arn",
            &json!({"Value": {"!GetAtt": "B.Arn"}, "Export": {"Name": "shared-arn"}}),
        );
        assert_eq!(
            output.as_output().unwrap().export_name,
            Some(json!("shared-arn"))
        );

        let rule = build(
            TopLevelSection::Rules,
            "ProdOnly",
            &json!({
                "RuleCondition": {"Fn::Equals": [{"Ref": "Env"}, "prod"]},
                "Assertions": [{"Assert": {"Fn::Contains": [["a"], "a"]}, "AssertDescription": "must"}, {"Other": 1}]
            }),
        );
        let rule = rule.as_rule().unwrap();
        assert_eq!(rule.assertions.len(), 1);
        assert_eq!(rule.assertions[0].description.as_deref(), Some("must"));
    }

    #[test]
    fn test_transform_section_is_indexed() {
        let list = build_section(
            TopLevelSection::Transform,
            &json!(["AWS::Serverless-2016-10-31", {"Name": "Include"}]),
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].0, "0");
        assert_eq!(
            list[0].1.as_transform().unwrap().name.as_deref(),
            Some("AWS::Serverless-2016-10-31")
        );
        assert_eq!(list[1].1.logical_id(), "1");

        let single = build_section(TopLevelSection::Transform, &json!("AWS::Serverless-2016-10-31"));
        assert_eq!(single.len(), 1);
        assert!(build_section(TopLevelSection::Transform, &Value::Null).is_empty());
    }

    #[test]
    fn test_transform_index_from_id() {
        let raw = json!("AWS::Include");
        let third = build(TopLevelSection::Transform, "2", &raw);
        assert_eq!(third.as_transform().unwrap().index, 2);

        assert_eq!(transform_index("2"), 2);
        assert_eq!(transform_index("Include"), 0);
        assert_eq!(transform_index("-1"), 0);
    }

    #[test]
    fn test_entry_map_section_of_wrong_shape() {
        assert!(build_section(TopLevelSection::Resources, &json!(["a"])).is_empty());
        assert!(build_section(TopLevelSection::Resources, &json!("x")).is_empty());
    }

    #[test]
    fn test_structurally_equal_on_rebuild() {
        let raw = json!({"Type": "T", "Properties": {"A": "1"}});
        assert_eq!(
            build(TopLevelSection::Resources, "R", &raw),
            build(TopLevelSection::Resources, "R", &raw)
        );
    }
}
