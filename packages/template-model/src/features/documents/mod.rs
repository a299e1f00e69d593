//! Document lifecycle: open, change, close

mod store;

pub use store::{DocumentSnapshot, DocumentStore};
