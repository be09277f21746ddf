//! The resolution database: where DOI lookups are answered and new
//! resolution requests are queued.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Row;

use crate::config::MysqlConfig;
use crate::error::Result;
use crate::work::{Author, Work};

/// Source of resolved works for the connector.
///
/// `fetch` answers from what has already been resolved; `request` queues a
/// DOI so an out-of-band resolver picks it up before the next run.
#[allow(async_fn_in_trait)]
pub trait WorkProvider {
    /// The resolution row for `doi`, if one exists. A row may exist but not
    /// yet be resolved.
    async fn fetch(&self, doi: &str) -> Result<Option<Work>>;

    /// Queue `doi` for resolution.
    async fn request(&self, doi: &str) -> Result<()>;
}

/// MySQL-backed resolution database.
#[derive(Debug, Clone)]
pub struct MySqlWorkSource {
    pool: MySqlPool,
}

impl MySqlWorkSource {
    pub async fn connect(config: &MysqlConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await?;
        Ok(Self { pool })
    }

    async fn fetch_authors(&self, resolution_id: i64) -> Result<Vec<Author>> {
        let rows = sqlx::query(
            "SELECT first_name, last_name, full_name, orcid \
             FROM doi_author WHERE resolution_id = ?",
        )
        .bind(resolution_id)
        .fetch_all(&self.pool)
        .await?;

        let mut authors = Vec::with_capacity(rows.len());
        for row in rows {
            authors.push(Author {
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                full_name: row
                    .try_get::<Option<String>, _>("full_name")?
                    .unwrap_or_default(),
                orcid: row.try_get("orcid")?,
            });
        }
        Ok(authors)
    }
}

impl WorkProvider for MySqlWorkSource {
    async fn fetch(&self, doi: &str) -> Result<Option<Work>> {
        // LIKE rather than = so lookup matches the table's case-insensitive
        // collation regardless of how the DOI was stored.
        let row = sqlx::query(
            "SELECT resolution_id, source, source_url, url, title, year, created, resolved \
             FROM doi_resolution WHERE doi LIKE ?",
        )
        .bind(doi)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let resolution_id: Option<i64> = row.try_get("resolution_id")?;
        let authors = match resolution_id {
            Some(id) => self.fetch_authors(id).await?,
            None => Vec::new(),
        };

        Ok(Some(Work {
            doi: doi.to_string(),
            resolution_id,
            source: row.try_get("source")?,
            source_url: row.try_get("source_url")?,
            url: row.try_get("url")?,
            title: row.try_get("title")?,
            year: row.try_get("year")?,
            created: row.try_get("created")?,
            resolved: row.try_get("resolved")?,
            authors,
        }))
    }

    async fn request(&self, doi: &str) -> Result<()> {
        tracing::info!(%doi, "Requesting resolution");
        sqlx::query("INSERT INTO doi_resolution SET doi = ?, created = NOW()")
            .bind(doi)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
