//! Typed section entries
//!
//! Entities are read-only snapshots of the value tree at build time. Fields
//! that are missing or of the wrong shape are `None`/empty rather than
//! errors; the document is usually mid-edit.

use super::section::TopLevelSection;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub logical_id: String,
    pub resource_type: Option<String>,
    pub properties: Option<Value>,
    pub depends_on: Vec<String>,
    pub condition: Option<String>,
    pub metadata: Option<Value>,
    pub deletion_policy: Option<String>,
    pub update_replace_policy: Option<String>,
    pub creation_policy: Option<Value>,
    pub update_policy: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub logical_id: String,
    pub parameter_type: Option<String>,
    pub default: Option<Value>,
    pub allowed_values: Vec<Value>,
    pub allowed_pattern: Option<String>,
    pub constraint_description: Option<String>,
    pub description: Option<String>,
    pub no_echo: Option<bool>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapping {
    pub logical_id: String,
    /// Top-level key → second-level key → value
    pub entries: Map<String, Value>,
}

impl Mapping {
    /// `Fn::FindInMap`-style two-level lookup
    pub fn lookup(&self, top_level_key: &str, second_level_key: &str) -> Option<&Value> {
        self.entries.get(top_level_key)?.get(second_level_key)
    }

    pub fn top_level_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub logical_id: String,
    pub expression: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub logical_id: String,
    pub value: Option<Value>,
    pub description: Option<String>,
    /// `Export.Name`
    pub export_name: Option<Value>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assertion {
    pub assert: Value,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub logical_id: String,
    pub rule_condition: Option<Value>,
    pub assertions: Vec<Assertion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub logical_id: String,
    pub value: Value,
}

/// One element of the transform directive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub index: usize,
    /// Macro name, when the element is a plain string
    pub name: Option<String>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Entity {
    Resource(Resource),
    Parameter(Parameter),
    Mapping(Mapping),
    Condition(Condition),
    Output(Output),
    Rule(Rule),
    Metadata(Metadata),
    Transform(Transform),
}

impl Entity {
    pub fn section(&self) -> TopLevelSection {
        match self {
            Entity::Resource(_) => TopLevelSection::Resources,
            Entity::Parameter(_) => TopLevelSection::Parameters,
            Entity::Mapping(_) => TopLevelSection::Mappings,
            Entity::Condition(_) => TopLevelSection::Conditions,
            Entity::Output(_) => TopLevelSection::Outputs,
            Entity::Rule(_) => TopLevelSection::Rules,
            Entity::Metadata(_) => TopLevelSection::Metadata,
            Entity::Transform(_) => TopLevelSection::Transform,
        }
    }

    /// Key of the entry within its section; transforms use their index
    pub fn logical_id(&self) -> String {
        match self {
            Entity::Resource(e) => e.logical_id.clone(),
            Entity::Parameter(e) => e.logical_id.clone(),
            Entity::Mapping(e) => e.logical_id.clone(),
            Entity::Condition(e) => e.logical_id.clone(),
            Entity::Output(e) => e.logical_id.clone(),
            Entity::Rule(e) => e.logical_id.clone(),
            Entity::Metadata(e) => e.logical_id.clone(),
            Entity::Transform(e) => e.index.to_string(),
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Entity::Resource(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Entity::Parameter(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Entity::Mapping(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Entity::Condition(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_output(&self) -> Option<&Output> {
        match self {
            Entity::Output(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Entity::Rule(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_metadata(&self) -> Option<&Metadata> {
        match self {
            Entity::Metadata(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<&Transform> {
        match self {
            Entity::Transform(e) => Some(e),
            _ => None,
        }
    }
}
