//! # Result Serialization
//!
//! Converts driver result values into JSON-safe form:
//! - value: single-value serializer with exhaustive type dispatch
//! - projector: record-level projection with the path special case

pub mod projector;
pub mod value;

pub use projector::{project_record, project_records};
pub use value::{node_to_json, path_to_json, relationship_to_json, to_json};
