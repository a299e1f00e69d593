//! Top-level section vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed top-level keys of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TopLevelSection {
    Resources,
    Parameters,
    Mappings,
    Conditions,
    Outputs,
    Rules,
    Metadata,
    Transform,
}

/// How a section's value is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// Logical id → entry
    EntryMap,
    /// A bare value or a list, addressed by index
    Indexed,
}

impl TopLevelSection {
    pub const ALL: [TopLevelSection; 8] = [
        TopLevelSection::Resources,
        TopLevelSection::Parameters,
        TopLevelSection::Mappings,
        TopLevelSection::Conditions,
        TopLevelSection::Outputs,
        TopLevelSection::Rules,
        TopLevelSection::Metadata,
        TopLevelSection::Transform,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TopLevelSection::Resources => "Resources",
            TopLevelSection::Parameters => "Parameters",
            TopLevelSection::Mappings => "Mappings",
            TopLevelSection::Conditions => "Conditions",
            TopLevelSection::Outputs => "Outputs",
            TopLevelSection::Rules => "Rules",
            TopLevelSection::Metadata => "Metadata",
            TopLevelSection::Transform => "Transform",
        }
    }

    /// Case-sensitive match on the document key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.key() == key)
    }

    pub fn shape(&self) -> SectionShape {
        match self {
            TopLevelSection::Transform => SectionShape::Indexed,
            _ => SectionShape::EntryMap,
        }
    }
}

impl fmt::Display for TopLevelSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TopLevelSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("unknown top-level section '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_is_case_sensitive() {
        assert_eq!(
            TopLevelSection::from_key("Resources"),
            Some(TopLevelSection::Resources)
        );
        assert_eq!(TopLevelSection::from_key("resources"), None);
        assert!("Outputs".parse::<TopLevelSection>().is_ok());
    }

    #[test]
    fn test_only_transform_is_indexed() {
        let indexed: Vec<_> = TopLevelSection::ALL
            .into_iter()
            .filter(|s| s.shape() == SectionShape::Indexed)
            .collect();
        assert_eq!(indexed, vec![TopLevelSection::Transform]);
    }
}
