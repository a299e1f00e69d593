//! Section/Entity Cache

mod section_cache;

pub use section_cache::{EntityMap, SectionCache};
