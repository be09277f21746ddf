//! Neo4j backend: connection management and the Bolt implementation of the
//! store traits.
//!
//! Cypher cannot parameterize labels, relationship types, or property
//! names, so those are interpolated (backtick-quoted); values always travel
//! as Bolt parameters.

use neo4rs::{
    query, BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltString, BoltType, ConfigBuilder,
    Graph, Txn,
};

use researchgraph_core::{GraphKey, GraphValue};

use crate::store::{GraphStore, NodeRef, PropertyHit, RelRef, StoreError, StoreTxn};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "researchgraph-dev".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

/// Thread-safe Neo4j store with connection pooling. Clone is cheap.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, StoreError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph for direct queries.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

impl GraphStore for Neo4jStore {
    type Txn = Neo4jTxn;

    async fn create_index(&self, label: &str, property: &str) -> Result<(), StoreError> {
        // Schema DDL auto-commits; Neo4j refuses it inside a data transaction.
        let cypher = format!(
            "CREATE INDEX IF NOT EXISTS FOR (n:`{label}`) ON (n.`{property}`)"
        );
        self.graph.run(query(&cypher)).await?;
        Ok(())
    }

    async fn create_constraint(&self, label: &str, property: &str) -> Result<(), StoreError> {
        let cypher = format!(
            "CREATE CONSTRAINT IF NOT EXISTS FOR (n:`{label}`) REQUIRE n.`{property}` IS UNIQUE"
        );
        self.graph.run(query(&cypher)).await?;
        Ok(())
    }

    async fn begin(&self) -> Result<Neo4jTxn, StoreError> {
        let txn = self.graph.start_txn().await?;
        Ok(Neo4jTxn { txn })
    }

    async fn nodes_with_property(
        &self,
        label: &str,
        key_property: &str,
        property: &str,
    ) -> Result<Vec<PropertyHit>, StoreError> {
        let cypher = format!(
            "MATCH (n:`{label}`)
             WHERE n.`{key_property}` IS NOT NULL AND n.`{property}` IS NOT NULL
             RETURN n.`{key_property}` AS key, n.`{property}` AS value"
        );

        let mut stream = self.graph.execute(query(&cypher)).await?;
        let mut hits = Vec::new();
        while let Some(row) = stream.next().await? {
            let key: String = row
                .get("key")
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            let value: serde_json::Value = row
                .get("value")
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            if let Some(value) = GraphValue::from_json(&value) {
                hits.push(PropertyHit { key, value });
            }
        }
        Ok(hits)
    }
}

/// One Bolt transaction against Neo4j.
pub struct Neo4jTxn {
    txn: Txn,
}

impl Neo4jTxn {
    async fn single_id(&mut self, q: neo4rs::Query) -> Result<Option<i64>, StoreError> {
        let mut stream = self.txn.execute(q).await?;
        match stream.next(self.txn.handle()).await? {
            Some(row) => {
                let id: i64 = row
                    .get("id")
                    .map_err(|e| StoreError::Deserialization(e.to_string()))?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }
}

impl StoreTxn for Neo4jTxn {
    async fn find_nodes(&mut self, key: &GraphKey) -> Result<Vec<NodeRef>, StoreError> {
        let cypher = format!(
            "MATCH (n:`{}`) WHERE n.`{}` = $value RETURN id(n) AS id",
            key.label, key.property
        );
        let q = query(&cypher).param("value", bolt_value(&key.value));

        let mut stream = self.txn.execute(q).await?;
        let mut nodes = Vec::new();
        while let Some(row) = stream.next(self.txn.handle()).await? {
            let id: i64 = row
                .get("id")
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            nodes.push(NodeRef(id));
        }
        Ok(nodes)
    }

    async fn create_node(&mut self) -> Result<NodeRef, StoreError> {
        let id = self
            .single_id(query("CREATE (n) RETURN id(n) AS id"))
            .await?
            .ok_or_else(|| StoreError::Deserialization("CREATE returned no row".to_string()))?;
        Ok(NodeRef(id))
    }

    async fn add_label(&mut self, node: NodeRef, label: &str) -> Result<(), StoreError> {
        let cypher = format!("MATCH (n) WHERE id(n) = $id SET n:`{label}`");
        self.txn.run(query(&cypher).param("id", node.0)).await?;
        Ok(())
    }

    async fn set_node_property(
        &mut self,
        node: NodeRef,
        name: &str,
        value: &GraphValue,
    ) -> Result<(), StoreError> {
        let cypher = format!("MATCH (n) WHERE id(n) = $id SET n.`{name}` = $value");
        self.txn
            .run(
                query(&cypher)
                    .param("id", node.0)
                    .param("value", bolt_value(value)),
            )
            .await?;
        Ok(())
    }

    async fn find_relationship(
        &mut self,
        start: NodeRef,
        end: NodeRef,
        rel_type: &str,
    ) -> Result<Option<RelRef>, StoreError> {
        let cypher = format!(
            "MATCH (a)-[r:`{rel_type}`]->(b)
             WHERE id(a) = $start AND id(b) = $end
             RETURN id(r) AS id LIMIT 1"
        );
        let q = query(&cypher).param("start", start.0).param("end", end.0);
        Ok(self.single_id(q).await?.map(RelRef))
    }

    async fn create_relationship(
        &mut self,
        start: NodeRef,
        end: NodeRef,
        rel_type: &str,
    ) -> Result<RelRef, StoreError> {
        let cypher = format!(
            "MATCH (a), (b)
             WHERE id(a) = $start AND id(b) = $end
             CREATE (a)-[r:`{rel_type}`]->(b)
             RETURN id(r) AS id"
        );
        let q = query(&cypher).param("start", start.0).param("end", end.0);
        let id = self
            .single_id(q)
            .await?
            .ok_or_else(|| StoreError::Deserialization("CREATE returned no row".to_string()))?;
        Ok(RelRef(id))
    }

    async fn set_relationship_property(
        &mut self,
        relationship: RelRef,
        name: &str,
        value: &GraphValue,
    ) -> Result<(), StoreError> {
        let cypher = format!("MATCH ()-[r]->() WHERE id(r) = $id SET r.`{name}` = $value");
        self.txn
            .run(
                query(&cypher)
                    .param("id", relationship.0)
                    .param("value", bolt_value(value)),
            )
            .await?;
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().await?;
        Ok(())
    }
}

fn bolt_value(value: &GraphValue) -> BoltType {
    match value {
        GraphValue::Str(s) => BoltType::String(BoltString::new(s)),
        GraphValue::Int(i) => BoltType::Integer(BoltInteger::new(*i)),
        GraphValue::Float(f) => BoltType::Float(BoltFloat::new(*f)),
        GraphValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        GraphValue::List(items) => BoltType::List(BoltList {
            value: items.iter().map(bolt_value).collect(),
        }),
    }
}
