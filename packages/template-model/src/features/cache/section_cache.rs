//! Section/Entity Cache: one per document version
//!
//! The first lookup parses the whole document once and fills every present
//! section together with its entities. Later lookups hand out the same
//! `Arc`s, so callers may memoize on pointer identity.

use crate::features::entities::{build_section, Entity, TopLevelSection};
use crate::features::values::ValueParser;
use crate::shared::models::Document;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Entities of one section, in document order
#[derive(Debug, Default)]
pub struct EntityMap {
    entries: Vec<Arc<Entity>>,
    index: FxHashMap<String, usize>,
}

impl EntityMap {
    fn from_entries(entries: Vec<(String, Entity)>) -> Self {
        let mut map = EntityMap::default();
        for (logical_id, entity) in entries {
            map.index.insert(logical_id, map.entries.len());
            map.entries.push(Arc::new(entity));
        }
        map
    }

    pub fn get(&self, logical_id: &str) -> Option<&Arc<Entity>> {
        self.index.get(logical_id).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Entity>> {
        self.entries.iter()
    }

    pub fn logical_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|entity| entity.logical_id())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
struct CacheState {
    /// Present sections in document order
    order: Vec<TopLevelSection>,
    sections: BTreeMap<TopLevelSection, Arc<Value>>,
    entities: BTreeMap<TopLevelSection, Arc<EntityMap>>,
}

pub struct SectionCache {
    document: Document,
    parser: ValueParser,
    state: OnceCell<CacheState>,
}

impl SectionCache {
    pub fn new(document: Document, parser: ValueParser) -> Self {
        Self {
            document,
            parser,
            state: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Raw value of a section, if present
    pub fn get_section(&self, section: TopLevelSection) -> Option<Arc<Value>> {
        self.state().sections.get(&section).cloned()
    }

    pub fn get_entities_from_section(&self, section: TopLevelSection) -> Option<Arc<EntityMap>> {
        self.state().entities.get(&section).cloned()
    }

    pub fn get_entity(&self, section: TopLevelSection, logical_id: &str) -> Option<Arc<Entity>> {
        self.state().entities.get(&section)?.get(logical_id).cloned()
    }

    pub fn get_all_sections(&self) -> &BTreeMap<TopLevelSection, Arc<Value>> {
        &self.state().sections
    }

    /// Present sections in document order; empty when the text cannot be parsed
    pub fn get_top_level_section_names(&self) -> Vec<TopLevelSection> {
        self.state().order.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.state().sections.is_empty()
    }

    /// Whether the one-time fill has happened
    pub fn is_populated(&self) -> bool {
        self.state.get().is_some()
    }

    fn state(&self) -> &CacheState {
        self.state.get_or_init(|| self.fill())
    }

    fn fill(&self) -> CacheState {
        let root = match self
            .parser
            .parse(self.document.text(), self.document.format())
        {
            Some(Value::Object(root)) => root,
            Some(_) | None => {
                tracing::debug!(
                    uri = self.document.uri(),
                    version = self.document.version(),
                    "no section map in document, caching empty"
                );
                return CacheState::default();
            }
        };

        let mut state = CacheState::default();
        for (key, value) in root {
            let Some(section) = TopLevelSection::from_key(&key) else {
                continue;
            };
            let entities = EntityMap::from_entries(build_section(section, &value));
            state.order.push(section);
            state.sections.insert(section, Arc::new(value));
            state.entities.insert(section, Arc::new(entities));
        }

        tracing::debug!(
            uri = self.document.uri(),
            version = self.document.version(),
            sections = state.order.len(),
            entities = state.entities.values().map(|e| e.len()).sum::<usize>(),
            "section cache filled"
        );
        state
    }
}

impl std::fmt::Debug for SectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionCache")
            .field("uri", &self.document.uri())
            .field("version", &self.document.version())
            .field("populated", &self.is_populated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::DocumentFormat;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cache(format: DocumentFormat, text: &str) -> SectionCache {
        SectionCache::new(
            Document::new("file:///s", format, 1, text),
            ValueParser::default(),
        )
    }

    #[test]
    fn test_lazy_single_fill() {
        let c = cache(
            DocumentFormat::Yaml,
            "Parameters:\n  P:\n    Type: Number\n    Default: '8080'\nResources:\n  B:\n    Type: X::Y::Z\n",
        );
        assert!(!c.is_populated());

        let resources = c.get_entities_from_section(TopLevelSection::Resources).unwrap();
        assert!(c.is_populated());
        assert_eq!(resources.len(), 1);

        // Filled together with Resources
        let param = c.get_entity(TopLevelSection::Parameters, "P").unwrap();
        assert_eq!(param.as_parameter().unwrap().default, Some(json!(8080)));
        assert_eq!(
            c.get_top_level_section_names(),
            vec![TopLevelSection::Parameters, TopLevelSection::Resources]
        );
    }

    #[test]
    fn test_pointer_identity() {
        let c = cache(DocumentFormat::Json, r#"{"Resources": {"B": {"Type": "T"}}}"#);
        let a = c.get_section(TopLevelSection::Resources).unwrap();
        let b = c.get_section(TopLevelSection::Resources).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let first = c.get_entities_from_section(TopLevelSection::Resources).unwrap();
        let second = c.get_entities_from_section(TopLevelSection::Resources).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let e1 = c.get_entity(TopLevelSection::Resources, "B").unwrap();
        let e2 = first.get("B").unwrap();
        assert!(Arc::ptr_eq(&e1, e2));
    }

    #[test]
    fn test_parse_failure_caches_empty() {
        let c = cache(
            DocumentFormat::Yaml,
            "Resources:\n  B:\n    Type: X::Y::Z\n      Properties:\n    Name: v",
        );
        assert!(c.get_top_level_section_names().is_empty());
        assert!(c.is_empty());
        assert!(c.is_populated());
        assert!(c.get_section(TopLevelSection::Resources).is_none());
    }

    #[test]
    fn test_non_map_root() {
        let c = cache(DocumentFormat::Json, "[1, 2]");
        assert!(c.is_empty());
        assert!(c.get_all_sections().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let c = cache(
            DocumentFormat::Yaml,
            "AWSTemplateFormatVersion: '2010-09-09'\nDescription: d\nTransform: AWS::Serverless-2016-10-31\n",
        );
        assert_eq!(c.get_top_level_section_names(), vec![TopLevelSection::Transform]);
        let transform = c.get_entity(TopLevelSection::Transform, "0").unwrap();
        assert_eq!(
            transform.as_transform().unwrap().name.as_deref(),
            Some("AWS::Serverless-2016-10-31")
        );
    }
}
