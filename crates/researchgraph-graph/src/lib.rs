//! researchgraph-graph: the graph merge & import engine.
//!
//! This crate is the single mutation point for the persistent graph. It
//! merges node and relationship deltas idempotently by key, defers
//! relationships whose endpoints have not arrived yet, coordinates
//! index/constraint creation, and batches writes into bounded transactions.
//!
//! The engine is generic over [`store::GraphStore`]; [`neo4j::Neo4jStore`]
//! is the production backend and [`memory::MemoryStore`] backs the test
//! suite.

pub mod import;
pub mod memory;
pub mod neo4j;
pub mod store;

pub use import::{
    BatchImporter, ImportError, ImportStats, Importer, MergeOutcome, DEFAULT_BATCH_THRESHOLD,
};
pub use memory::MemoryStore;
pub use neo4j::{GraphConfig, Neo4jStore};
pub use store::{GraphStore, NodeRef, PropertyHit, RelRef, StoreError, StoreTxn};
