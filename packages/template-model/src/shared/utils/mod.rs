//! Shared utilities

pub mod tree_sitter;

pub use self::tree_sitter::{
    content_children, content_index, extract_node_text,
    find_child_by_kind, find_error_nodes, node_contains_point, node_to_range, point_to_position,
    position_to_point,
};
