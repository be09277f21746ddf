//! The store abstraction the import engine runs against.
//!
//! The persistent graph is an interface boundary: the engine only needs
//! key-indexed node lookup, node/relationship creation, and two-phase
//! flushes (schema committed before data). Schema operations live on the
//! store itself because the backend cannot create schema objects inside a
//! data transaction; each one is committed before the call returns.

use researchgraph_core::{GraphKey, GraphValue};
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("store row error: {0}")]
    Deserialization(String),
}

/// Handle to a physical node inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub i64);

/// Handle to a physical relationship inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelRef(pub i64);

/// One row from [`GraphStore::nodes_with_property`]: the node's key value
/// and the value of the queried property.
#[derive(Debug, Clone)]
pub struct PropertyHit {
    pub key: String,
    pub value: GraphValue,
}

/// A persistent labeled property graph the importer can merge into.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
    type Txn: StoreTxn;

    /// Create an index on `(label, property)` in its own transaction,
    /// committed on return. Must tolerate the index already existing.
    async fn create_index(&self, label: &str, property: &str) -> Result<(), StoreError>;

    /// Create a uniqueness constraint on `(label, property)` in its own
    /// transaction, committed on return. Must tolerate the constraint
    /// already existing.
    async fn create_constraint(&self, label: &str, property: &str) -> Result<(), StoreError>;

    /// Begin a data transaction. Dropping the transaction without calling
    /// [`StoreTxn::commit`] rolls it back.
    async fn begin(&self) -> Result<Self::Txn, StoreError>;

    /// Enumerate nodes of `label` that carry both `key_property` and
    /// `property`, returning the key value and the property value of each.
    async fn nodes_with_property(
        &self,
        label: &str,
        key_property: &str,
        property: &str,
    ) -> Result<Vec<PropertyHit>, StoreError>;
}

/// A data transaction. Reads observe the transaction's own writes: a node
/// created earlier in the transaction is findable by key later in it.
#[allow(async_fn_in_trait)]
pub trait StoreTxn {
    /// All physical nodes matching a key. The store does not enforce key
    /// uniqueness, so this can legitimately return more than one match.
    async fn find_nodes(&mut self, key: &GraphKey) -> Result<Vec<NodeRef>, StoreError>;

    async fn create_node(&mut self) -> Result<NodeRef, StoreError>;

    async fn add_label(&mut self, node: NodeRef, label: &str) -> Result<(), StoreError>;

    async fn set_node_property(
        &mut self,
        node: NodeRef,
        name: &str,
        value: &GraphValue,
    ) -> Result<(), StoreError>;

    /// An existing relationship of `rel_type` directed `start -> end`
    /// between the exact pair, if any.
    async fn find_relationship(
        &mut self,
        start: NodeRef,
        end: NodeRef,
        rel_type: &str,
    ) -> Result<Option<RelRef>, StoreError>;

    async fn create_relationship(
        &mut self,
        start: NodeRef,
        end: NodeRef,
        rel_type: &str,
    ) -> Result<RelRef, StoreError>;

    async fn set_relationship_property(
        &mut self,
        relationship: RelRef,
        name: &str,
        value: &GraphValue,
    ) -> Result<(), StoreError>;

    async fn commit(self) -> Result<(), StoreError>;
}
