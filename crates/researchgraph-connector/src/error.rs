//! Error types for the researchgraph-connector crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("import error: {0}")]
    Import(#[from] researchgraph_graph::ImportError),

    #[error("graph store error: {0}")]
    Store(#[from] researchgraph_graph::StoreError),

    #[error("resolution database error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConnectorError>;
