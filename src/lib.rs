//! Bookgraph - REST service over a Neo4j graph of companies, users,
//! authors, books and schools.
//!
//! Every entity type shares one generic repository parameterized by its
//! [`EntitySchema`](models::EntitySchema); edges between them go through a
//! generic [`RelationshipLinker`](repositories::RelationshipLinker).

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod models;
pub mod repositories;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
