//! Core validation engine: shared primitives and the contract/artifact
//! validators.

pub mod artifact;
pub mod assets;
pub mod contract;
pub mod error;
pub mod gitmeta;
pub mod graph;
pub mod observability;
pub mod output;
pub mod report;
pub mod resolver;
pub mod schema;
pub mod temporal;
pub mod version;
