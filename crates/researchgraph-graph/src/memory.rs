//! In-process store used by the test suite.
//!
//! Implements the store traits over plain maps. A transaction stages a copy
//! of the whole dataset and swaps it in on commit; dropping the transaction
//! discards the staged copy, which mirrors the backend's rollback-on-drop
//! behavior. Schema creation calls are recorded so tests can assert how
//! many times they were issued.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use researchgraph_core::{GraphKey, GraphValue};

use crate::store::{GraphStore, NodeRef, PropertyHit, RelRef, StoreError, StoreTxn};

#[derive(Debug, Clone, Default)]
struct MemNode {
    labels: BTreeSet<String>,
    properties: BTreeMap<String, GraphValue>,
}

#[derive(Debug, Clone)]
struct MemRel {
    start: i64,
    end: i64,
    rel_type: String,
    properties: BTreeMap<String, GraphValue>,
}

/// A recorded index/constraint creation call: `(label, property, unique)`.
pub type SchemaOp = (String, String, bool);

#[derive(Debug, Clone, Default)]
struct MemData {
    next_node_id: i64,
    next_rel_id: i64,
    nodes: BTreeMap<i64, MemNode>,
    relationships: BTreeMap<i64, MemRel>,
    schema_ops: Vec<SchemaOp>,
}

impl MemData {
    fn matching_nodes(&self, key: &GraphKey) -> Vec<NodeRef> {
        self.nodes
            .iter()
            .filter(|(_, node)| {
                node.labels.contains(&key.label)
                    && node.properties.get(&key.property) == Some(&key.value)
            })
            .map(|(&id, _)| NodeRef(id))
            .collect()
    }
}

/// An in-memory labeled property graph. Clone is cheap (shared inner state).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<MemData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, MemData> {
        self.data.lock().expect("memory store lock poisoned")
    }

    // Inspection helpers for tests; these read committed state only.

    pub fn node_count(&self) -> usize {
        self.locked().nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.locked().relationships.len()
    }

    /// Every index/constraint creation call issued so far.
    pub fn schema_ops(&self) -> Vec<SchemaOp> {
        self.locked().schema_ops.clone()
    }

    /// Committed nodes matching a key.
    pub fn find_node_ids(&self, key: &GraphKey) -> Vec<NodeRef> {
        self.locked().matching_nodes(key)
    }

    pub fn node_labels(&self, node: NodeRef) -> Vec<String> {
        self.locked()
            .nodes
            .get(&node.0)
            .map(|n| n.labels.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn node_property(&self, node: NodeRef, name: &str) -> Option<GraphValue> {
        self.locked()
            .nodes
            .get(&node.0)
            .and_then(|n| n.properties.get(name).cloned())
    }

    /// Committed relationships of `rel_type` directed `start -> end`.
    pub fn relationships_between(&self, start: NodeRef, end: NodeRef, rel_type: &str) -> usize {
        self.locked()
            .relationships
            .values()
            .filter(|r| r.start == start.0 && r.end == end.0 && r.rel_type == rel_type)
            .count()
    }

    pub fn relationship_property(&self, relationship: RelRef, name: &str) -> Option<GraphValue> {
        self.locked()
            .relationships
            .get(&relationship.0)
            .and_then(|r| r.properties.get(name).cloned())
    }
}

impl GraphStore for MemoryStore {
    type Txn = MemoryTxn;

    async fn create_index(&self, label: &str, property: &str) -> Result<(), StoreError> {
        self.locked()
            .schema_ops
            .push((label.to_string(), property.to_string(), false));
        Ok(())
    }

    async fn create_constraint(&self, label: &str, property: &str) -> Result<(), StoreError> {
        self.locked()
            .schema_ops
            .push((label.to_string(), property.to_string(), true));
        Ok(())
    }

    async fn begin(&self) -> Result<MemoryTxn, StoreError> {
        let staged = self.locked().clone();
        Ok(MemoryTxn {
            data: Arc::clone(&self.data),
            staged,
        })
    }

    async fn nodes_with_property(
        &self,
        label: &str,
        key_property: &str,
        property: &str,
    ) -> Result<Vec<PropertyHit>, StoreError> {
        let data = self.locked();
        let mut hits = Vec::new();
        for node in data.nodes.values() {
            if !node.labels.contains(label) {
                continue;
            }
            let (Some(key), Some(value)) = (
                node.properties.get(key_property),
                node.properties.get(property),
            ) else {
                continue;
            };
            hits.push(PropertyHit {
                key: key.to_string(),
                value: value.clone(),
            });
        }
        Ok(hits)
    }
}

/// A staged-copy transaction: reads and writes operate on the copy,
/// commit swaps it in atomically.
#[derive(Debug)]
pub struct MemoryTxn {
    data: Arc<Mutex<MemData>>,
    staged: MemData,
}

impl MemoryTxn {
    fn node_mut(&mut self, node: NodeRef) -> Result<&mut MemNode, StoreError> {
        self.staged
            .nodes
            .get_mut(&node.0)
            .ok_or_else(|| StoreError::Deserialization(format!("no node with id {}", node.0)))
    }
}

impl StoreTxn for MemoryTxn {
    async fn find_nodes(&mut self, key: &GraphKey) -> Result<Vec<NodeRef>, StoreError> {
        Ok(self.staged.matching_nodes(key))
    }

    async fn create_node(&mut self) -> Result<NodeRef, StoreError> {
        let id = self.staged.next_node_id;
        self.staged.next_node_id += 1;
        self.staged.nodes.insert(id, MemNode::default());
        Ok(NodeRef(id))
    }

    async fn add_label(&mut self, node: NodeRef, label: &str) -> Result<(), StoreError> {
        self.node_mut(node)?.labels.insert(label.to_string());
        Ok(())
    }

    async fn set_node_property(
        &mut self,
        node: NodeRef,
        name: &str,
        value: &GraphValue,
    ) -> Result<(), StoreError> {
        self.node_mut(node)?
            .properties
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    async fn find_relationship(
        &mut self,
        start: NodeRef,
        end: NodeRef,
        rel_type: &str,
    ) -> Result<Option<RelRef>, StoreError> {
        Ok(self
            .staged
            .relationships
            .iter()
            .find(|(_, r)| r.start == start.0 && r.end == end.0 && r.rel_type == rel_type)
            .map(|(&id, _)| RelRef(id)))
    }

    async fn create_relationship(
        &mut self,
        start: NodeRef,
        end: NodeRef,
        rel_type: &str,
    ) -> Result<RelRef, StoreError> {
        let id = self.staged.next_rel_id;
        self.staged.next_rel_id += 1;
        self.staged.relationships.insert(
            id,
            MemRel {
                start: start.0,
                end: end.0,
                rel_type: rel_type.to_string(),
                properties: BTreeMap::new(),
            },
        );
        Ok(RelRef(id))
    }

    async fn set_relationship_property(
        &mut self,
        relationship: RelRef,
        name: &str,
        value: &GraphValue,
    ) -> Result<(), StoreError> {
        let rel = self
            .staged
            .relationships
            .get_mut(&relationship.0)
            .ok_or_else(|| {
                StoreError::Deserialization(format!("no relationship with id {}", relationship.0))
            })?;
        rel.properties.insert(name.to_string(), value.clone());
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        *self.data.lock().expect("memory store lock poisoned") = self.staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uncommitted_changes_are_invisible() {
        let store = MemoryStore::new();
        let mut txn = store.begin().await.unwrap();
        let node = txn.create_node().await.unwrap();
        txn.add_label(node, "crossref").await.unwrap();
        assert_eq!(store.node_count(), 0);

        txn.commit().await.unwrap();
        assert_eq!(store.node_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let store = MemoryStore::new();
        {
            let mut txn = store.begin().await.unwrap();
            txn.create_node().await.unwrap();
        }
        assert_eq!(store.node_count(), 0);
    }

    #[tokio::test]
    async fn test_transaction_reads_own_writes() {
        let store = MemoryStore::new();
        let key = GraphKey::new("crossref", "key", "u1");

        let mut txn = store.begin().await.unwrap();
        assert!(txn.find_nodes(&key).await.unwrap().is_empty());

        let node = txn.create_node().await.unwrap();
        txn.add_label(node, "crossref").await.unwrap();
        txn.set_node_property(node, "key", &GraphValue::from("u1"))
            .await
            .unwrap();

        assert_eq!(txn.find_nodes(&key).await.unwrap(), vec![node]);
    }

    #[tokio::test]
    async fn test_nodes_with_property() {
        let store = MemoryStore::new();
        let mut txn = store.begin().await.unwrap();
        let node = txn.create_node().await.unwrap();
        txn.add_label(node, "dataset").await.unwrap();
        txn.set_node_property(node, "key", &GraphValue::from("d1"))
            .await
            .unwrap();
        txn.set_node_property(node, "doi", &GraphValue::from("10.1/x"))
            .await
            .unwrap();
        txn.commit().await.unwrap();

        let hits = store
            .nodes_with_property("dataset", "key", "doi")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "d1");
        assert_eq!(hits[0].value, GraphValue::from("10.1/x"));

        assert!(store
            .nodes_with_property("dataset", "key", "url")
            .await
            .unwrap()
            .is_empty());
    }
}
