//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod entity_metadata;
pub mod object_ref;

pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
pub use object_ref::ObjectRef;
