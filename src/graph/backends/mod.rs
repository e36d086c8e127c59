//! Store backends implementing [`CypherExecutor`](crate::graph::CypherExecutor).
//!
//! | Backend | Module | Driver |
//! |---------|--------|--------|
//! | Neo4j 4.4+/5.x | [`neo4j`] | `neo4rs` (Bolt) |
//!
//! A backend only has to turn `(statement, params)` into JSON rows and map
//! its driver failures onto `StoreUnavailable`, `ConstraintViolation` or
//! `Query`; retries live in [`Graph`](crate::graph::Graph).

pub mod neo4j;
