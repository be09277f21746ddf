//! CLI entry point for the researchgraph-connector.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use researchgraph_graph::{GraphConfig, Neo4jStore};

use researchgraph_connector::config::MysqlConfig;
use researchgraph_connector::process::{self, ProcessOptions};
use researchgraph_connector::source::MySqlWorkSource;

#[derive(Parser)]
#[command(name = "researchgraph-connector")]
#[command(about = "Crossref DOI resolution connector for Research Graph")]
struct Cli {
    /// Label of the nodes to scan for DOIs (e.g., dryad).
    #[arg(short, long)]
    source: String,

    /// Property on those nodes that may carry DOIs (e.g., url).
    #[arg(short, long)]
    property: String,

    /// Relationship type for the created links.
    #[arg(short, long, default_value = "RELATED_TO")]
    relationship: String,

    /// Objects per import transaction.
    #[arg(long, default_value_t = researchgraph_graph::DEFAULT_BATCH_THRESHOLD)]
    chunk_size: usize,

    /// Bolt URI override (otherwise read from config).
    #[arg(short, long)]
    neo4j: Option<String>,

    /// Config file prefix (default: researchgraph).
    #[arg(short, long, default_value = "researchgraph")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut graph_config = load_graph_config(&cli.config);
    if let Some(uri) = cli.neo4j.clone() {
        graph_config.uri = uri;
    }
    let store = Neo4jStore::connect(&graph_config).await?;
    tracing::info!(uri = %graph_config.uri, "Connected to graph store");

    let mysql_config = load_mysql_config(&cli.config)?;
    let provider = MySqlWorkSource::connect(&mysql_config).await?;
    tracing::info!(
        host = %mysql_config.host,
        database = %mysql_config.database,
        "Connected to resolution database"
    );

    let mut options = ProcessOptions::new(cli.source, cli.property);
    options.relationship = cli.relationship;
    options.chunk_size = cli.chunk_size;

    let report = process::run(store, &provider, &options).await?;
    tracing::info!(
        scanned = report.scanned,
        dois = report.dois,
        imported = report.imported,
        awaiting = report.awaiting,
        requested = report.requested,
        stats = %report.stats,
        "Run complete"
    );

    Ok(())
}

fn load_mysql_config(file_prefix: &str) -> anyhow::Result<MysqlConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("RESEARCHGRAPH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<MysqlConfig>("mysql") {
        Ok(c) => Ok(c),
        Err(_) => Ok(MysqlConfig::default()),
    }
}

fn load_graph_config(file_prefix: &str) -> GraphConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("RESEARCHGRAPH")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => GraphConfig {
            uri: c
                .get_string("neo4j.uri")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            user: c
                .get_string("neo4j.user")
                .unwrap_or_else(|_| "neo4j".to_string()),
            password: c
                .get_string("neo4j.password")
                .unwrap_or_else(|_| "researchgraph-dev".to_string()),
            ..Default::default()
        },
        Err(_) => GraphConfig::default(),
    }
}
