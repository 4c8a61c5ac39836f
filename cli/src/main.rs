//! Protsim CLI — runs the protein similarity batch against a graph server
//!
//! Uses the protsim-sdk RemoteClient to connect to a running server.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use protsim::annotation::CombinedTable;
use protsim::config::{validate_threshold, PipelineConfig};
use protsim_sdk::{
    GraphAdapter, GraphClient, LoadSummary, Pipeline, RemoteClient, RunReport, ScoreSummary,
    SimilarProtein,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protsim", version, about = "Protein annotation similarity batch")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Graph server HTTP URL
    #[arg(long, global = true, env = "PROTSIM_GRAPH_URI")]
    uri: Option<String>,

    /// Graph user
    #[arg(long, global = true)]
    user: Option<String>,

    /// Graph password
    #[arg(long, global = true, env = "PROTSIM_GRAPH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every enabled stage: truncate, naive load, scores, example lookup
    Run {
        /// Override the configured similarity threshold
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Regenerate the truncated annotation table
    Truncate,
    /// Load the naive graph from the truncated table
    Naive,
    /// Score all protein pairs and persist those above the threshold
    Scores {
        /// Pairs must score strictly above this (0-100)
        #[arg(long)]
        threshold: f64,
    },
    /// Show the proteins most similar to NAME
    Similar {
        name: String,

        /// Number of neighbours to return
        #[arg(short, long, default_value_t = 10)]
        k: usize,
    },
    /// Get graph status
    Status,
    /// Ping the graph server
    Ping,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Run { threshold } => {
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            config.validate()?;
            let adapter = GraphAdapter::connect(&config.graph).await?;
            let report = Pipeline::new(config).run(&adapter).await?;
            print_report(&report, &cli.format)?;
            adapter.close();
        }
        Commands::Truncate => {
            let path = config.inputs.truncated.clone();
            let rows = Pipeline::new(config).regenerate_truncated()?;
            println!("Wrote {} rows to {}", rows, path.display());
        }
        Commands::Naive => {
            let adapter = GraphAdapter::connect(&config.graph).await?;
            let summary = adapter.initialize_naive(&config.inputs.truncated).await?;
            print_load(&summary);
            adapter.close();
        }
        Commands::Scores { threshold } => {
            validate_threshold(threshold)?;
            let adapter = GraphAdapter::connect(&config.graph).await?;
            let table = Pipeline::new(config).prepare_tables()?;
            let combined = CombinedTable::from_table(&table);
            let summary = adapter.initialize_scores(&combined, threshold).await?;
            print_scores(&summary);
            adapter.close();
        }
        Commands::Similar { name, k } => {
            let adapter = GraphAdapter::connect(&config.graph).await?;
            let similar = adapter.most_similar(&name, k).await?;
            print_similar(&name, &similar, &cli.format)?;
            adapter.close();
        }
        Commands::Status => {
            let adapter = GraphAdapter::connect(&config.graph).await?;
            let status = adapter.status().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
                _ => {
                    println!("Status:  {}", status.status);
                    println!("Version: {}", status.version);
                    println!("Nodes:   {}", status.storage.nodes);
                    println!("Edges:   {}", status.storage.edges);
                }
            }
            adapter.close();
        }
        Commands::Ping => {
            let client = RemoteClient::from_config(&config.graph);
            println!("{}", client.ping().await?);
        }
    }

    Ok(())
}

/// Config file (or defaults), then command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(uri) = &cli.uri {
        config.graph.uri = uri.clone();
    }
    if let Some(user) = &cli.user {
        config.graph.user = user.clone();
    }
    if let Some(password) = &cli.password {
        config.graph.password = password.clone();
    }
    info!(uri = %config.graph.uri, threshold = config.threshold, "configuration loaded");
    Ok(config)
}

fn print_report(report: &RunReport, format: &OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if let Some(rows) = report.truncated_rows {
        println!("Truncated table: {} rows", rows);
    }
    if let Some(summary) = &report.naive {
        print_load(summary);
    }
    if let Some(summary) = &report.scores {
        print_scores(summary);
    }
    if let Some(similar) = &report.similar {
        print_similar_table(similar);
    }
    Ok(())
}

fn print_load(summary: &LoadSummary) {
    println!("Naive graph: {} rows in {:.2?}", summary.rows, summary.elapsed);
}

fn print_scores(summary: &ScoreSummary) {
    println!(
        "Similarity (threshold {}): {} proteins, {} pairs compared, {} qualifying, {} written, {} failed in {:.2?}",
        summary.threshold,
        summary.proteins,
        summary.pairs_compared,
        summary.qualifying,
        summary.written,
        summary.failed,
        summary.elapsed
    );
}

fn print_similar(
    name: &str,
    similar: &[SimilarProtein],
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(similar)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["name", "score", "sysname", "description"])?;
            for protein in similar {
                let score = protein.score.to_string();
                writer.write_record([
                    protein.name.as_str(),
                    score.as_str(),
                    protein.sysname.as_deref().unwrap_or_default(),
                    protein.description.as_deref().unwrap_or_default(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if similar.is_empty() {
                println!("(no proteins similar to {})", name);
                return Ok(());
            }
            print_similar_table(similar);
        }
    }
    Ok(())
}

fn print_similar_table(similar: &[SimilarProtein]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["name", "score", "sysname", "description"]);

    for protein in similar {
        table.add_row(vec![
            protein.name.clone(),
            format!("{:.2}", protein.score),
            protein.sysname.clone().unwrap_or_default(),
            protein.description.clone().unwrap_or_default(),
        ]);
    }

    println!("{}", table);
    println!("{} row(s)", similar.len());
}
