//! researchgraph-core: graph model types for the Research Graph importer.
//!
//! This crate defines the delta model an extraction layer produces and the
//! merge engine consumes:
//! - `GraphKey` — composite node identity `(label, property, value)`
//! - `GraphNode` / `GraphRelationship` — node and edge deltas
//! - `GraphSchema` — index/constraint declarations
//! - `Graph` — one accumulated batch of the above
//!
//! No I/O happens here; batches are staged in memory and handed to the
//! importer in `researchgraph-graph`.

pub mod types;

pub use types::{
    Graph, GraphKey, GraphNode, GraphRelationship, GraphSchema, GraphValue,
};
