//! researchgraph-connector: Crossref resolution connector for Research Graph.
//!
//! Scans existing graph nodes for DOIs, looks each DOI up in the resolution
//! database, and merges the resolved works, their authors, and the linking
//! relationships back into the graph.

pub mod config;
pub mod doi;
pub mod error;
pub mod process;
pub mod source;
pub mod work;
