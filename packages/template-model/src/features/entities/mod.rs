//! Entities: section vocabulary, typed entries, normalization, builder

mod builder;
mod entity;
mod normalize;
mod section;

pub use builder::{build, build_section};
pub use entity::{
    Assertion, Condition, Entity, Mapping, Metadata, Output, Parameter, Resource, Rule, Transform,
};
pub use normalize::normalize_value;
pub use section::{SectionShape, TopLevelSection};
