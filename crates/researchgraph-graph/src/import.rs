//! The merge engine: find-or-create nodes by key, resolve or defer
//! relationships, coordinate schema creation, and flush batches through the
//! two-phase transaction protocol.
//!
//! All merges are idempotent: re-importing the same batch converges on the
//! same persisted state, which is also the recovery story — a flush that
//! fails partway is simply re-run in full.

use std::collections::{HashMap, HashSet};

use researchgraph_core::{Graph, GraphKey, GraphNode, GraphRelationship, GraphSchema};
use thiserror::Error;

use crate::store::{GraphStore, NodeRef, StoreError, StoreTxn};

/// Default number of accumulated objects that triggers a batch flush.
pub const DEFAULT_BATCH_THRESHOLD: usize = 1000;

/// Errors from import operations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Malformed node key. Recoverable: during a batch import the affected
    /// node is logged and skipped.
    #[error("invalid node key: {0}")]
    Validation(String),

    /// Index or constraint creation failed. Fatal to the run.
    #[error("schema creation failed for {schema}: {source}")]
    Schema {
        schema: GraphSchema,
        source: StoreError,
    },

    /// The store rejected a data operation. The enclosing transaction rolls
    /// back; the batch must be retried in full.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of merging a single relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both endpoints resolved; the relationship was created or updated.
    Resolved,
    /// At least one endpoint is missing; the relationship waits for it.
    Deferred,
}

/// Counters exposed at the end of a run.
///
/// `pending_keys` counts registry entries (a relationship deferred on both
/// endpoints is registered under both); `pending_relationships` counts the
/// distinct relationships still waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub nodes_created: u64,
    pub nodes_updated: u64,
    pub relationships_created: u64,
    pub relationships_updated: u64,
    pub pending_keys: usize,
    pub pending_relationships: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes created, {} nodes updated, {} relationships created, \
             {} relationships updated, {} relationships unresolved",
            self.nodes_created,
            self.nodes_updated,
            self.relationships_created,
            self.relationships_updated,
            self.pending_relationships,
        )
    }
}

/// The import engine. One instance per run owns all process-lifetime state:
/// the set of already-applied schema declarations, the deferred-relationship
/// registry, and the merge counters.
pub struct Importer<S: GraphStore> {
    store: S,
    imported_schemas: HashSet<GraphSchema>,
    pending: HashMap<GraphKey, Vec<GraphRelationship>>,
    nodes_created: u64,
    nodes_updated: u64,
    relationships_created: u64,
    relationships_updated: u64,
}

impl<S: GraphStore> Importer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            imported_schemas: HashSet::new(),
            pending: HashMap::new(),
            nodes_created: 0,
            nodes_updated: 0,
            relationships_created: 0,
            relationships_updated: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn stats(&self) -> ImportStats {
        let distinct: HashSet<&GraphRelationship> = self.pending.values().flatten().collect();
        ImportStats {
            nodes_created: self.nodes_created,
            nodes_updated: self.nodes_updated,
            relationships_created: self.relationships_created,
            relationships_updated: self.relationships_updated,
            pending_keys: self.pending.len(),
            pending_relationships: distinct.len(),
        }
    }

    pub fn reset_counters(&mut self) {
        self.nodes_created = 0;
        self.nodes_updated = 0;
        self.relationships_created = 0;
        self.relationships_updated = 0;
    }

    /// Flush one batch: schema phase first, then one data transaction
    /// merging all nodes and then all relationships.
    ///
    /// The store cannot create schema objects and mutate data in the same
    /// transaction, and node lookups depend on the index existing, so every
    /// schema declaration is committed before the data transaction opens.
    /// Nodes with invalid keys are logged and skipped; any other error
    /// aborts the flush and the data transaction rolls back on drop.
    pub async fn import(&mut self, graph: &Graph) -> Result<(), ImportError> {
        for schema in &graph.schemas {
            self.apply_schema(schema).await?;
        }

        let mut txn = self.store.begin().await?;

        for node in &graph.nodes {
            match self.merge_node_in(&mut txn, node).await {
                Err(ImportError::Validation(reason)) => {
                    tracing::warn!(key = %node.key, %reason, "Skipping node with invalid key");
                }
                other => {
                    other?;
                }
            }
        }

        for relationship in &graph.relationships {
            self.merge_relationship_in(&mut txn, relationship, true)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Apply a schema declaration unless this engine already applied it.
    /// The store call itself also tolerates pre-existing schema objects,
    /// since the applied set does not survive a restart.
    pub async fn apply_schema(&mut self, schema: &GraphSchema) -> Result<(), ImportError> {
        if self.imported_schemas.contains(schema) {
            return Ok(());
        }

        let result = if schema.unique {
            tracing::debug!(%schema, "Creating uniqueness constraint");
            self.store
                .create_constraint(&schema.label, &schema.property)
                .await
        } else {
            tracing::debug!(%schema, "Creating index");
            self.store.create_index(&schema.label, &schema.property).await
        };

        result.map_err(|source| ImportError::Schema {
            schema: schema.clone(),
            source,
        })?;

        self.imported_schemas.insert(schema.clone());
        Ok(())
    }

    pub async fn apply_schemas<'a, I>(&mut self, schemas: I) -> Result<(), ImportError>
    where
        I: IntoIterator<Item = &'a GraphSchema>,
    {
        for schema in schemas {
            self.apply_schema(schema).await?;
        }
        Ok(())
    }

    /// Merge a single node in its own transaction.
    pub async fn merge_node(&mut self, node: &GraphNode) -> Result<(), ImportError> {
        let mut txn = self.store.begin().await?;
        self.merge_node_in(&mut txn, node).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Merge nodes in one transaction, skipping invalid keys.
    pub async fn merge_nodes(&mut self, nodes: &[GraphNode]) -> Result<(), ImportError> {
        let mut txn = self.store.begin().await?;
        for node in nodes {
            match self.merge_node_in(&mut txn, node).await {
                Err(ImportError::Validation(reason)) => {
                    tracing::warn!(key = %node.key, %reason, "Skipping node with invalid key");
                }
                other => {
                    other?;
                }
            }
        }
        txn.commit().await?;
        Ok(())
    }

    /// Merge a single relationship in its own transaction, deferring it if
    /// an endpoint is missing.
    pub async fn merge_relationship(
        &mut self,
        relationship: &GraphRelationship,
    ) -> Result<MergeOutcome, ImportError> {
        let mut txn = self.store.begin().await?;
        let outcome = self
            .merge_relationship_in(&mut txn, relationship, true)
            .await?;
        txn.commit().await?;
        Ok(outcome)
    }

    /// Merge relationships in one transaction.
    pub async fn merge_relationships(
        &mut self,
        relationships: &[GraphRelationship],
    ) -> Result<(), ImportError> {
        let mut txn = self.store.begin().await?;
        for relationship in relationships {
            self.merge_relationship_in(&mut txn, relationship, true)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn merge_node_in(
        &mut self,
        txn: &mut S::Txn,
        node: &GraphNode,
    ) -> Result<Option<NodeRef>, ImportError> {
        if node.broken || node.deleted {
            return Ok(None);
        }

        validate_key(&node.key)?;
        tracing::debug!(key = %node.key, "Merging node");

        let matches = txn.find_nodes(&node.key).await?;
        let handle = match matches.first() {
            Some(&existing) => {
                self.nodes_updated += 1;
                existing
            }
            None => {
                let created = txn.create_node().await?;
                self.nodes_created += 1;
                self.index_node(txn, created, &node.key).await?;
                for key in &node.extra_keys {
                    self.index_node(txn, created, key).await?;
                }
                created
            }
        };

        // Labels are unioned, properties overwritten by name; properties
        // absent from the delta stay untouched.
        for label in &node.labels {
            txn.add_label(handle, label).await?;
        }
        for (name, value) in &node.properties {
            txn.set_node_property(handle, name, value).await?;
        }

        Ok(Some(handle))
    }

    /// Index a node under one of its keys, then replay every relationship
    /// waiting on that key. Replayed relationships are not re-deferred: one
    /// that is still unresolved here remains registered under its other
    /// endpoint key, which is what prevents a double replay when both
    /// endpoints arrive in the same flush.
    async fn index_node(
        &mut self,
        txn: &mut S::Txn,
        node: NodeRef,
        key: &GraphKey,
    ) -> Result<(), ImportError> {
        txn.add_label(node, &key.label).await?;
        txn.set_node_property(node, &key.property, &key.value).await?;

        if let Some(waiting) = self.pending.remove(key) {
            tracing::debug!(key = %key, count = waiting.len(), "Replaying deferred relationships");
            for relationship in waiting {
                self.merge_relationship_in(txn, &relationship, false).await?;
            }
        }

        Ok(())
    }

    async fn merge_relationship_in(
        &mut self,
        txn: &mut S::Txn,
        relationship: &GraphRelationship,
        defer_unresolved: bool,
    ) -> Result<MergeOutcome, ImportError> {
        let start_nodes = txn.find_nodes(&relationship.start).await?;
        if start_nodes.is_empty() && defer_unresolved {
            tracing::debug!(key = %relationship.start, "Start key not present, deferring");
            self.pending
                .entry(relationship.start.clone())
                .or_default()
                .push(relationship.clone());
        }

        let end_nodes = txn.find_nodes(&relationship.end).await?;
        if end_nodes.is_empty() && defer_unresolved {
            tracing::debug!(key = %relationship.end, "End key not present, deferring");
            self.pending
                .entry(relationship.end.clone())
                .or_default()
                .push(relationship.clone());
        }

        if start_nodes.is_empty() || end_nodes.is_empty() {
            return Ok(MergeOutcome::Deferred);
        }

        tracing::debug!(
            start = %relationship.start,
            end = %relationship.end,
            rel_type = %relationship.rel_type,
            "Merging relationship"
        );

        // Keys are not guaranteed unique in the store; the merge fans out
        // across every matching start/end pair.
        for &start in &start_nodes {
            for &end in &end_nodes {
                let handle = match txn
                    .find_relationship(start, end, &relationship.rel_type)
                    .await?
                {
                    Some(existing) => {
                        self.relationships_updated += 1;
                        existing
                    }
                    None => {
                        let created = txn
                            .create_relationship(start, end, &relationship.rel_type)
                            .await?;
                        self.relationships_created += 1;
                        created
                    }
                };
                for (name, value) in &relationship.properties {
                    txn.set_relationship_property(handle, name, value).await?;
                }
            }
        }

        Ok(MergeOutcome::Resolved)
    }
}

fn validate_key(key: &GraphKey) -> Result<(), ImportError> {
    if key.label.is_empty() {
        return Err(ImportError::Validation(
            "key label cannot be empty".to_string(),
        ));
    }
    if key.property.is_empty() {
        return Err(ImportError::Validation(
            "key property cannot be empty".to_string(),
        ));
    }
    if key.value.is_empty() {
        return Err(ImportError::Validation(format!(
            "key value cannot be empty for {}.{}",
            key.label, key.property
        )));
    }
    Ok(())
}

/// Threshold-driven accumulator in front of an [`Importer`].
///
/// Deltas are staged into an in-memory [`Graph`]; the moment the staged
/// object count reaches the threshold the batch is flushed and replaced
/// with a fresh empty one. On a failed flush the batch is kept so the
/// caller can retry it in full — merges are idempotent, so a retry after a
/// partial failure is safe.
pub struct BatchImporter<S: GraphStore> {
    importer: Importer<S>,
    graph: Graph,
    threshold: usize,
    flushes: u64,
}

impl<S: GraphStore> BatchImporter<S> {
    pub fn new(importer: Importer<S>, threshold: usize) -> Self {
        Self {
            importer,
            graph: Graph::new(),
            threshold: threshold.max(1),
            flushes: 0,
        }
    }

    pub fn with_default_threshold(importer: Importer<S>) -> Self {
        Self::new(importer, DEFAULT_BATCH_THRESHOLD)
    }

    pub async fn add_node(&mut self, node: GraphNode) -> Result<(), ImportError> {
        self.graph.add_node(node);
        self.flush_if_full().await
    }

    pub async fn add_relationship(
        &mut self,
        relationship: GraphRelationship,
    ) -> Result<(), ImportError> {
        self.graph.add_relationship(relationship);
        self.flush_if_full().await
    }

    pub async fn add_schema(&mut self, schema: GraphSchema) -> Result<(), ImportError> {
        self.graph.add_schema(schema);
        self.flush_if_full().await
    }

    /// Flush the staged batch now, if it holds anything.
    pub async fn flush(&mut self) -> Result<(), ImportError> {
        if self.graph.is_empty() {
            return Ok(());
        }

        let batch = std::mem::take(&mut self.graph);
        tracing::info!(
            chunk = self.flushes + 1,
            objects = batch.object_count(),
            "Importing chunk"
        );

        match self.importer.import(&batch).await {
            Ok(()) => {
                self.flushes += 1;
                Ok(())
            }
            Err(e) => {
                // Keep the batch so the caller can retry it in full.
                self.graph = batch;
                Err(e)
            }
        }
    }

    /// Flush the remainder and hand back the engine.
    pub async fn finish(mut self) -> Result<Importer<S>, ImportError> {
        self.flush().await?;
        Ok(self.importer)
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    pub fn staged_count(&self) -> usize {
        self.graph.object_count()
    }

    pub fn stats(&self) -> ImportStats {
        self.importer.stats()
    }

    async fn flush_if_full(&mut self) -> Result<(), ImportError> {
        if self.graph.object_count() >= self.threshold {
            self.flush().await
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use researchgraph_core::GraphValue;

    fn key(value: &str) -> GraphKey {
        GraphKey::new("crossref", "key", value)
    }

    fn node(value: &str) -> GraphNode {
        GraphNode::builder(key(value))
            .source("crossref.org")
            .node_type("publication")
            .label("crossref")
            .label("publication")
            .build()
    }

    fn related(start: &str, end: &str) -> GraphRelationship {
        GraphRelationship::new("RELATED_TO", key(start), key(end))
    }

    fn importer() -> Importer<MemoryStore> {
        Importer::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_node_merge_is_idempotent() {
        let mut importer = importer();

        let first = GraphNode::builder(key("u1"))
            .label("crossref")
            .property("title", GraphValue::from("old title"))
            .property("year", GraphValue::from(2001i64))
            .build();
        let second = GraphNode::builder(key("u1"))
            .label("publication")
            .property("title", GraphValue::from("new title"))
            .build();

        importer.merge_node(&first).await.unwrap();
        importer.merge_node(&second).await.unwrap();

        let store = importer.store();
        assert_eq!(store.node_count(), 1);

        let stats = importer.stats();
        assert_eq!(stats.nodes_created, 1);
        assert_eq!(stats.nodes_updated, 1);

        // Property-level merge: "title" overwritten, "year" untouched,
        // labels unioned.
        let ids = store.find_node_ids(&key("u1"));
        assert_eq!(ids.len(), 1);
        assert_eq!(
            store.node_property(ids[0], "title"),
            Some(GraphValue::from("new title"))
        );
        assert_eq!(
            store.node_property(ids[0], "year"),
            Some(GraphValue::from(2001i64))
        );
        let labels = store.node_labels(ids[0]);
        assert!(labels.contains(&"crossref".to_string()));
        assert!(labels.contains(&"publication".to_string()));
    }

    #[tokio::test]
    async fn test_relationship_deferred_then_resolved() {
        let mut importer = importer();

        let outcome = importer.merge_relationship(&related("u1", "u2")).await.unwrap();
        assert_eq!(outcome, MergeOutcome::Deferred);

        // One relationship waiting, registered under both endpoint keys.
        let stats = importer.stats();
        assert_eq!(stats.pending_relationships, 1);
        assert_eq!(stats.pending_keys, 2);

        importer.merge_node(&node("u1")).await.unwrap();
        importer.merge_node(&node("u2")).await.unwrap();

        let stats = importer.stats();
        assert_eq!(stats.pending_relationships, 0);
        assert_eq!(stats.pending_keys, 0);
        assert_eq!(stats.relationships_created, 1);
        assert_eq!(stats.relationships_updated, 0);

        // Exactly one edge, not two: the replay when u1 arrived could not
        // resolve u2 and must not have fired a second time when u2 arrived.
        let store = importer.store();
        let start = store.find_node_ids(&key("u1"))[0];
        let end = store.find_node_ids(&key("u2"))[0];
        assert_eq!(store.relationships_between(start, end, "RELATED_TO"), 1);
        assert_eq!(store.relationship_count(), 1);
    }

    #[tokio::test]
    async fn test_deferred_relationship_resolves_within_one_flush() {
        let mut importer = importer();

        // Relationships are staged before the nodes they mention; the flush
        // merges nodes first, so replay happens inside the same data
        // transaction.
        let mut graph = Graph::new();
        graph.add_relationship(related("u1", "u2"));
        graph.add_node(node("u1"));
        graph.add_node(node("u2"));

        importer.import(&graph).await.unwrap();

        let stats = importer.stats();
        assert_eq!(stats.pending_relationships, 0);
        assert_eq!(stats.relationships_created, 1);
        assert_eq!(importer.store().relationship_count(), 1);
    }

    #[tokio::test]
    async fn test_relationship_with_one_missing_endpoint_stays_pending() {
        let mut importer = importer();

        importer.merge_node(&node("u1")).await.unwrap();
        let outcome = importer.merge_relationship(&related("u1", "u2")).await.unwrap();
        assert_eq!(outcome, MergeOutcome::Deferred);

        // Registered under the missing key only.
        let stats = importer.stats();
        assert_eq!(stats.pending_keys, 1);
        assert_eq!(stats.pending_relationships, 1);
        assert_eq!(importer.store().relationship_count(), 0);
    }

    #[tokio::test]
    async fn test_relationship_merge_is_idempotent() {
        let mut importer = importer();
        importer.merge_node(&node("u1")).await.unwrap();
        importer.merge_node(&node("u2")).await.unwrap();

        let rel = related("u1", "u2").property("source", "crossref.org");
        assert_eq!(
            importer.merge_relationship(&rel).await.unwrap(),
            MergeOutcome::Resolved
        );
        assert_eq!(
            importer.merge_relationship(&rel).await.unwrap(),
            MergeOutcome::Resolved
        );

        let stats = importer.stats();
        assert_eq!(stats.relationships_created, 1);
        assert_eq!(stats.relationships_updated, 1);
        assert_eq!(importer.store().relationship_count(), 1);
    }

    #[tokio::test]
    async fn test_extra_keys_trigger_replay() {
        let mut importer = importer();

        let rel = GraphRelationship::new(
            "KNOWN_AS",
            key("u1"),
            GraphKey::new("crossref", "doi", "10.1/a"),
        );
        importer.merge_node(&node("u1")).await.unwrap();
        assert_eq!(
            importer.merge_relationship(&rel).await.unwrap(),
            MergeOutcome::Deferred
        );

        // The node arrives keyed by url, carrying the doi as a secondary
        // identity; indexing the secondary key replays the relationship.
        let with_doi = GraphNode::builder(key("u2"))
            .label("crossref")
            .extra_key(GraphKey::new("crossref", "doi", "10.1/a"))
            .build();
        importer.merge_node(&with_doi).await.unwrap();

        let stats = importer.stats();
        assert_eq!(stats.pending_relationships, 0);
        assert_eq!(stats.relationships_created, 1);
    }

    #[tokio::test]
    async fn test_schema_applied_once_across_batches() {
        let mut importer = importer();

        for _ in 0..3 {
            let mut graph = Graph::new();
            graph.add_schema(GraphSchema::new("crossref", "key", true));
            graph.add_node(node("u1"));
            importer.import(&graph).await.unwrap();
        }

        let ops = importer.store().schema_ops();
        assert_eq!(ops, vec![("crossref".to_string(), "key".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_schema_unique_and_index_are_distinct_declarations() {
        let mut importer = importer();
        importer
            .apply_schema(&GraphSchema::new("crossref", "doi", false))
            .await
            .unwrap();
        importer
            .apply_schema(&GraphSchema::new("crossref", "doi", true))
            .await
            .unwrap();
        importer
            .apply_schema(&GraphSchema::new("crossref", "doi", false))
            .await
            .unwrap();

        let ops = importer.store().schema_ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].2, false);
        assert_eq!(ops[1].2, true);
    }

    #[tokio::test]
    async fn test_batch_flushes_exactly_at_threshold() {
        let store = MemoryStore::new();
        let mut batcher = BatchImporter::new(Importer::new(store.clone()), 1000);

        for i in 0..999 {
            batcher.add_node(node(&format!("u{i}"))).await.unwrap();
        }
        assert_eq!(batcher.flush_count(), 0);
        assert_eq!(batcher.staged_count(), 999);
        assert_eq!(store.node_count(), 0);

        batcher.add_node(node("u999")).await.unwrap();
        assert_eq!(batcher.flush_count(), 1);
        assert_eq!(batcher.staged_count(), 0);
        assert_eq!(store.node_count(), 1000);

        let importer = batcher.finish().await.unwrap();
        assert_eq!(importer.stats().nodes_created, 1000);
    }

    #[tokio::test]
    async fn test_fan_out_across_duplicate_keys() {
        let store = MemoryStore::new();

        // Duplicate-by-key data can exist if the store was populated by
        // another path; seed two physical nodes carrying the same key.
        let mut txn = store.begin().await.unwrap();
        for _ in 0..2 {
            let n = txn.create_node().await.unwrap();
            txn.add_label(n, "crossref").await.unwrap();
            txn.set_node_property(n, "key", &GraphValue::from("dup"))
                .await
                .unwrap();
        }
        txn.commit().await.unwrap();

        let mut importer = Importer::new(store.clone());
        importer.merge_node(&node("u1")).await.unwrap();
        importer
            .merge_relationship(&related("u1", "dup"))
            .await
            .unwrap();

        // One logical edge lands on both physical matches.
        assert_eq!(importer.stats().relationships_created, 2);
        assert_eq!(store.relationship_count(), 2);

        importer
            .merge_relationship(&related("u1", "dup"))
            .await
            .unwrap();
        assert_eq!(importer.stats().relationships_updated, 2);
        assert_eq!(store.relationship_count(), 2);
    }

    #[tokio::test]
    async fn test_broken_and_deleted_nodes_are_skipped() {
        let mut importer = importer();

        let deleted = GraphNode::builder(key("u1")).deleted(true).build();
        let broken = GraphNode::builder(key("u2")).broken(true).build();
        importer.merge_node(&deleted).await.unwrap();
        importer.merge_node(&broken).await.unwrap();

        assert_eq!(importer.store().node_count(), 0);
        assert_eq!(importer.stats(), ImportStats::default());
    }

    #[tokio::test]
    async fn test_invalid_key_is_skipped_during_batch_import() {
        let mut importer = importer();

        let mut graph = Graph::new();
        graph.add_node(GraphNode::builder(GraphKey::new("", "key", "u1")).build());
        graph.add_node(GraphNode::builder(GraphKey::new("crossref", "key", "")).build());
        graph.add_node(node("u2"));

        importer.import(&graph).await.unwrap();

        assert_eq!(importer.store().node_count(), 1);
        assert_eq!(importer.stats().nodes_created, 1);
    }

    #[tokio::test]
    async fn test_single_merge_surfaces_validation_error() {
        let mut importer = importer();
        let bad = GraphNode::builder(GraphKey::new("crossref", "", "u1")).build();

        let err = importer.merge_node(&bad).await.unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));
    }

    #[tokio::test]
    async fn test_stats_display() {
        let importer = importer();
        let rendered = importer.stats().to_string();
        assert!(rendered.contains("0 nodes created"));
        assert!(rendered.contains("0 relationships unresolved"));
    }
}
