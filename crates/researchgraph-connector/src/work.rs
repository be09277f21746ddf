//! Resolved Crossref works and authors, and their mapping onto graph deltas.

use chrono::NaiveDateTime;
use researchgraph_core::{GraphKey, GraphNode, GraphValue};

pub const SOURCE_CROSSREF: &str = "crossref.org";
pub const LABEL_CROSSREF: &str = "crossref";
pub const TYPE_PUBLICATION: &str = "publication";
pub const TYPE_RESEARCHER: &str = "researcher";

pub const PROPERTY_KEY: &str = "key";
pub const PROPERTY_DOI: &str = "doi";
pub const PROPERTY_URL: &str = "url";
pub const PROPERTY_TITLE: &str = "title";
pub const PROPERTY_PUBLISHED_YEAR: &str = "published_year";
pub const PROPERTY_FIRST_NAME: &str = "first_name";
pub const PROPERTY_LAST_NAME: &str = "last_name";
pub const PROPERTY_FULL_NAME: &str = "full_name";
pub const PROPERTY_ORCID_ID: &str = "orcid";

pub const RELATIONSHIP_RELATED_TO: &str = "RELATED_TO";

/// One row of the resolution table, plus its authors.
///
/// A row exists as soon as resolution is requested; `url` and `resolved`
/// are filled in once the resolver has processed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Work {
    pub doi: String,
    pub resolution_id: Option<i64>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub created: Option<NaiveDateTime>,
    pub resolved: Option<NaiveDateTime>,
    pub authors: Vec<Author>,
}

impl Work {
    /// True once the resolver filled in the landing URL for this DOI.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some() && self.url.is_some()
    }

    /// The publication's graph key: the resolved landing URL.
    pub fn key(&self) -> Option<GraphKey> {
        self.url
            .as_deref()
            .map(|url| GraphKey::new(LABEL_CROSSREF, PROPERTY_KEY, url))
    }

    /// The publication node delta, keyed by URL with the DOI as a secondary
    /// identity so relationships addressed by either resolve to it.
    /// `None` until the work is resolved.
    pub fn to_node(&self) -> Option<GraphNode> {
        if !self.is_resolved() {
            return None;
        }
        let key = self.key()?;
        Some(
            GraphNode::builder(key)
                .source(SOURCE_CROSSREF)
                .node_type(TYPE_PUBLICATION)
                .label(LABEL_CROSSREF)
                .label(TYPE_PUBLICATION)
                .property(PROPERTY_DOI, GraphValue::from(self.doi.as_str()))
                .property(PROPERTY_URL, self.url.as_deref().map(GraphValue::from))
                .property(PROPERTY_TITLE, self.title.as_deref().map(GraphValue::from))
                .property(PROPERTY_PUBLISHED_YEAR, self.year.map(GraphValue::from))
                .extra_key(GraphKey::new(
                    LABEL_CROSSREF,
                    PROPERTY_DOI,
                    self.doi.as_str(),
                ))
                .build(),
        )
    }
}

/// One author of a resolved work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: String,
    pub orcid: Option<String>,
}

impl Author {
    /// The researcher's graph key. Crossref does not identify authors, so
    /// the key is scoped to the work: `<doi>:<full name>`.
    pub fn key(&self, work: &Work) -> GraphKey {
        GraphKey::new(
            LABEL_CROSSREF,
            PROPERTY_KEY,
            format!("{}:{}", work.doi, self.full_name),
        )
    }

    pub fn to_node(&self, work: &Work) -> GraphNode {
        GraphNode::builder(self.key(work))
            .source(SOURCE_CROSSREF)
            .node_type(TYPE_RESEARCHER)
            .label(LABEL_CROSSREF)
            .label(TYPE_RESEARCHER)
            .property(
                PROPERTY_FIRST_NAME,
                self.first_name.as_deref().map(GraphValue::from),
            )
            .property(
                PROPERTY_LAST_NAME,
                self.last_name.as_deref().map(GraphValue::from),
            )
            .property(
                PROPERTY_FULL_NAME,
                GraphValue::from(self.full_name.as_str()),
            )
            .property(
                PROPERTY_ORCID_ID,
                self.orcid.as_deref().map(GraphValue::from),
            )
            .build()
    }
}
