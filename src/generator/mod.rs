/// Breadth-first closure over cascading relations.
pub mod aggregate;
/// Assembles every generated file of an aggregate.
pub mod artifacts;
/// Transfer-object classes.
pub mod dto;
/// JPA entity classes.
pub mod entity;
mod java_source;
/// Semantic type to Java type lookup.
pub mod java_types;
/// JSON dump of the classified aggregate.
pub mod json_model;
/// Spring Data repository interfaces.
pub mod repository;
/// REST service classes.
pub mod rest_service;

pub use aggregate::{collect_aggregate, Aggregate};
pub use artifacts::{generate_artifacts, Artifact};
