//! Common types shared by all listable records

pub mod entity_metadata;
pub mod status;
pub mod validation;

// Re-exports
pub use entity_metadata::EntityMetadata;
pub use status::EntityStatus;
pub use validation::{require_email, require_non_empty, ValidationError};
