//! Logical property paths
//!
//! A path addresses a location from the document root, one map key or
//! sequence index at a time: `Resources/Bucket/Properties/Tags/0`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(index) => Some(*index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Ordered sequence of segments from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(Vec<PathSegment>);

impl PropertyPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathSegment> {
        self.0.get(index)
    }

    pub fn first_key(&self) -> Option<&str> {
        self.0.first().and_then(PathSegment::as_key)
    }

    pub fn starts_with(&self, prefix: &PropertyPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Prefix made of the first `len` segments
    pub fn prefix(&self, len: usize) -> PropertyPath {
        PropertyPath(self.0[..len.min(self.0.len())].to_vec())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.0.iter()
    }
}

impl From<Vec<PathSegment>> for PropertyPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for PropertyPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PropertyPath {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Build a [`PropertyPath`] from string keys and integer indices
///
/// ```rust,ignore
/// let path = property_path!["Resources", "Bucket", "Properties", "Tags", 0usize];
/// ```
#[macro_export]
macro_rules! property_path {
    () => {
        $crate::shared::models::PropertyPath::new()
    };
    ($($segment:expr),+ $(,)?) => {{
        let mut path = $crate::shared::models::PropertyPath::new();
        $(path.push($segment);)+
        path
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let path = property_path!["Resources", "B", "Properties", 2usize];
        assert_eq!(path.to_string(), "Resources/B/Properties/2");
        assert_eq!(path.len(), 4);
        assert_eq!(path.first_key(), Some("Resources"));
    }

    #[test]
    fn test_prefix() {
        let path = property_path!["Outputs", "Url", "Value"];
        assert_eq!(path.prefix(2), property_path!["Outputs", "Url"]);
        assert_eq!(path.prefix(10), path);
        assert!(path.starts_with(&property_path!["Outputs"]));
    }

    #[test]
    fn test_serde_untagged_segments() {
        let path = property_path!["Resources", 1usize];
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["Resources",1]"#);
    }
}
