//! The connector's run loop: scan, resolve, merge.
//!
//! One run scans the configured source nodes for DOIs, asks the resolution
//! database about each one, stages the resolved works and authors, and
//! links every work back to the nodes that referenced its DOI. Unknown DOIs
//! are queued for resolution so a later run can pick them up.

use std::collections::{HashMap, HashSet};

use researchgraph_core::{GraphKey, GraphNode, GraphRelationship, GraphSchema, GraphValue};
use researchgraph_graph::{
    BatchImporter, GraphStore, ImportStats, Importer, DEFAULT_BATCH_THRESHOLD,
};

use crate::doi;
use crate::error::Result;
use crate::source::WorkProvider;
use crate::work::{self, Work};

/// What to scan and how to link the results.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Label of the nodes to scan for DOIs.
    pub source: String,
    /// Property on those nodes that may carry DOIs.
    pub property: String,
    /// Relationship type for the author->work and work->referrer links.
    pub relationship: String,
    /// Flush threshold for the staged batch.
    pub chunk_size: usize,
}

impl ProcessOptions {
    pub fn new(source: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            property: property.into(),
            relationship: work::RELATIONSHIP_RELATED_TO.to_string(),
            chunk_size: DEFAULT_BATCH_THRESHOLD,
        }
    }
}

/// Counters from one run.
#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    /// Source nodes that carried the scanned property.
    pub scanned: usize,
    /// Distinct DOIs found across them.
    pub dois: usize,
    /// DOIs whose resolved work was merged this run.
    pub imported: usize,
    /// DOIs already queued but not yet resolved.
    pub awaiting: usize,
    /// DOIs newly queued for resolution.
    pub requested: usize,
    pub stats: ImportStats,
}

/// Run the connector once against `store`, answering DOI lookups from
/// `provider`.
pub async fn run<S, P>(store: S, provider: &P, options: &ProcessOptions) -> Result<ProcessReport>
where
    S: GraphStore,
    P: WorkProvider,
{
    let mut importer = Importer::new(store);
    importer
        .apply_schema(&GraphSchema::new(
            options.source.as_str(),
            work::PROPERTY_KEY,
            true,
        ))
        .await?;
    // Index the scanned property so the enumeration below is not a label scan.
    importer
        .apply_schema(&GraphSchema::new(
            options.source.as_str(),
            options.property.as_str(),
            false,
        ))
        .await?;

    let hits = importer
        .store()
        .nodes_with_property(&options.source, work::PROPERTY_KEY, &options.property)
        .await?;
    tracing::info!(
        source = %options.source,
        property = %options.property,
        nodes = hits.len(),
        "Scanned source nodes"
    );

    // Each DOI remembers every node key that referenced it, so one resolved
    // work links back to all of its referrers.
    let mut referrers: HashMap<String, HashSet<GraphKey>> = HashMap::new();
    for hit in &hits {
        for text in doi_candidates(&hit.value) {
            if let Some(doi) = doi::extract_doi(text) {
                referrers.entry(doi).or_default().insert(GraphKey::new(
                    options.source.as_str(),
                    work::PROPERTY_KEY,
                    hit.key.clone(),
                ));
            }
        }
    }

    let mut batcher = BatchImporter::new(importer, options.chunk_size);
    batcher
        .add_schema(GraphSchema::new(
            work::LABEL_CROSSREF,
            work::PROPERTY_KEY,
            true,
        ))
        .await?;
    batcher
        .add_schema(GraphSchema::new(
            work::LABEL_CROSSREF,
            work::PROPERTY_DOI,
            false,
        ))
        .await?;
    batcher
        .add_schema(GraphSchema::new(
            work::LABEL_CROSSREF,
            work::PROPERTY_URL,
            false,
        ))
        .await?;

    let mut report = ProcessReport {
        scanned: hits.len(),
        dois: referrers.len(),
        ..ProcessReport::default()
    };

    for (doi, keys) in &referrers {
        match provider.fetch(doi).await? {
            Some(resolved) => match resolved.to_node() {
                Some(node) => {
                    stage_work(&mut batcher, &resolved, node, keys, &options.relationship).await?;
                    report.imported += 1;
                }
                None => {
                    tracing::debug!(%doi, "Resolution still in progress");
                    report.awaiting += 1;
                }
            },
            None => {
                provider.request(doi).await?;
                report.requested += 1;
            }
        }
    }

    let importer = batcher.finish().await?;
    report.stats = importer.stats();
    if report.stats.pending_relationships > 0 {
        tracing::warn!(
            count = report.stats.pending_relationships,
            "Relationships left unresolved at end of run"
        );
    }

    Ok(report)
}

async fn stage_work<S: GraphStore>(
    batcher: &mut BatchImporter<S>,
    resolved: &Work,
    node: GraphNode,
    referrers: &HashSet<GraphKey>,
    relationship: &str,
) -> Result<()> {
    let work_key = node.key.clone();
    batcher.add_node(node).await?;

    for author in &resolved.authors {
        let author_node = author.to_node(resolved);
        let author_key = author_node.key.clone();
        batcher.add_node(author_node).await?;
        batcher
            .add_relationship(GraphRelationship::new(
                relationship,
                author_key,
                work_key.clone(),
            ))
            .await?;
    }

    for referrer in referrers {
        batcher
            .add_relationship(GraphRelationship::new(
                relationship,
                work_key.clone(),
                referrer.clone(),
            ))
            .await?;
    }

    Ok(())
}

/// String values that may contain a DOI: the value itself, or each element
/// of a list value.
fn doi_candidates(value: &GraphValue) -> Vec<&str> {
    match value {
        GraphValue::List(items) => items.iter().filter_map(GraphValue::as_str).collect(),
        other => other.as_str().into_iter().collect(),
    }
}
