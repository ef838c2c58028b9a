use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lineage_graph::{
    artifacts::DocumentParser,
    config::Config,
    fixtures,
    lineage::{earliest_ancestor, AncestorResolver, GraphTraversal, LineageGraph, TraversalOrder},
    reports::ReportGenerator,
    types::*,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "Directed graph traversal and earliest-ancestor lookup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (json, markdown, text)
    #[arg(short, long)]
    output: Option<String>,

    /// Output file path (defaults to stdout)
    #[arg(short = 'f', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print traversals of the built-in sample graph and family tree
    Demo,

    /// Enumerate every vertex reachable from a start vertex
    Traverse {
        /// Graph document (.json, .yaml or .yml)
        #[arg(short, long)]
        graph: PathBuf,

        /// Start vertex
        #[arg(short, long)]
        start: i64,

        /// Traversal order (bfs, dfs, dfs-recursive)
        #[arg(long)]
        order: Option<TraversalOrder>,
    },

    /// Find a path between two vertices
    Path {
        /// Graph document (.json, .yaml or .yml)
        #[arg(short, long)]
        graph: PathBuf,

        /// Start vertex
        #[arg(short, long)]
        start: i64,

        /// Goal vertex
        #[arg(long)]
        goal: i64,

        /// Search order (bfs, dfs, dfs-recursive)
        #[arg(long)]
        order: Option<TraversalOrder>,
    },

    /// Find the earliest ancestor in a family tree
    Ancestor {
        /// Ancestry document of (parent, child) pairs
        #[arg(short, long)]
        pairs: PathBuf,

        /// Individual to start from
        #[arg(short, long)]
        start: i64,
    },

    /// Show graph statistics
    Stats {
        /// Graph document (.json, .yaml or .yml)
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(short, long, default_value = "lineage.yml")]
        config_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref()).await?;

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&log_level)?;

    let format = cli.output.clone().unwrap_or_else(|| config.output.format.clone());
    let default_order = config.traversal.default_order;

    match cli.command {
        Commands::Demo => {
            run_demo()?;
        }

        Commands::Traverse { graph, start, order } => {
            let report = traverse(graph, start, order.unwrap_or(default_order))?;
            output_report(&report, &format, cli.output_file.as_ref()).await?;
        }

        Commands::Path {
            graph,
            start,
            goal,
            order,
        } => {
            let report = find_path(graph, start, goal, order.unwrap_or(default_order))?;
            output_report(&report, &format, cli.output_file.as_ref()).await?;
        }

        Commands::Ancestor { pairs, start } => {
            let report = resolve_ancestor(pairs, start)?;
            output_report(&report, &format, cli.output_file.as_ref()).await?;
        }

        Commands::Stats { graph } => {
            let graph = load_graph(&graph)?;
            let report = TraversalReport::new(ReportKind::Statistics, graph.statistics());
            output_report(&report, &format, cli.output_file.as_ref()).await?;
        }

        Commands::Init { config_file } => {
            init_config(config_file).await?;
        }
    }

    Ok(())
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

/// Defaults, then the configuration file, then `LINEAGE_*` environment variables
async fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) if path.exists() => Config::load_from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration file: {:?}", path))?,
        Some(path) => {
            eprintln!("Configuration file not found: {:?}. Using defaults.", path);
            Config::default()
        }
        None => Config::default(),
    };

    config
        .apply_env()
        .context("Invalid LINEAGE_* environment variable")?;

    config.validate()?;
    Ok(config)
}

fn load_graph(path: &PathBuf) -> Result<LineageGraph<i64>> {
    let document = DocumentParser::new(path)?
        .load_graph()
        .with_context(|| format!("Failed to read graph document: {:?}", path))?;
    Ok(document.into_graph()?)
}

fn traverse(path: PathBuf, start: i64, order: TraversalOrder) -> Result<TraversalReport> {
    let graph = load_graph(&path)?;
    info!("Traversing from {} in {} order", start, order);

    let visited = GraphTraversal::enumerate(&graph, start, order)
        .with_context(|| format!("Cannot traverse from vertex {}", start))?;

    let mut report = TraversalReport::new(ReportKind::Traversal, graph.statistics());
    report.start = Some(start);
    report.order = Some(order.to_string());
    report.visited = visited;
    Ok(report)
}

fn find_path(path: PathBuf, start: i64, goal: i64, order: TraversalOrder) -> Result<TraversalReport> {
    let graph = load_graph(&path)?;
    info!("Searching for a path {} -> {} in {} order", start, goal, order);

    let found = GraphTraversal::find_path(&graph, start, goal, order)
        .with_context(|| format!("Cannot search from vertex {}", start))?;
    if found.is_none() {
        warn!("Vertex {} is not reachable from {}", goal, start);
    }

    let mut report = TraversalReport::new(ReportKind::Path, graph.statistics());
    report.start = Some(start);
    report.goal = Some(goal);
    report.order = Some(order.to_string());
    report.path = found;
    Ok(report)
}

fn resolve_ancestor(path: PathBuf, start: i64) -> Result<TraversalReport> {
    let document = DocumentParser::new(&path)?
        .load_ancestry()
        .with_context(|| format!("Failed to read ancestry document: {:?}", path))?;

    let resolver = AncestorResolver::from_pairs(&document.pairs);
    if !resolver.graph().contains_vertex(start) {
        warn!("Individual {} does not appear in any pair", start);
    }

    let mut report = TraversalReport::new(ReportKind::Ancestor, resolver.graph().statistics());
    report.start = Some(start);
    let (ancestor, generations) = resolver.resolve(start);
    report.ancestor = ancestor;
    report.generations = generations;
    Ok(report)
}

/// Print traversals of the sample fixtures to stdout
fn run_demo() -> Result<()> {
    let graph = fixtures::sample_graph()?;

    println!("Adjacency: {:?}", graph.adjacency());
    println!();

    println!("Breadth-first traversal from 1:");
    println!("  {}", format_sequence(&GraphTraversal::breadth_first_enumerate(&graph, 1)?, ", "));
    println!("Depth-first traversal from 1:");
    println!("  {}", format_sequence(&GraphTraversal::depth_first_enumerate(&graph, 1)?, ", "));
    println!("Depth-first traversal from 1 (recursive):");
    println!(
        "  {}",
        format_sequence(&GraphTraversal::depth_first_enumerate_recursive(&graph, 1)?, ", ")
    );
    println!();

    for order in [
        TraversalOrder::BreadthFirst,
        TraversalOrder::DepthFirst,
        TraversalOrder::DepthFirstRecursive,
    ] {
        let path = GraphTraversal::find_path(&graph, 1, 6, order)?;
        println!("{} path 1 -> 6: {:?}", order, path);
    }
    println!();

    println!(
        "Earliest ancestor of 3: {}",
        earliest_ancestor(&fixtures::SAMPLE_ANCESTORS, 3)
    );

    Ok(())
}

/// Initialize configuration file
async fn init_config(config_file: PathBuf) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() {
        warn!("Configuration file already exists: {:?}", config_file);
        print!("Overwrite existing file? (y/N): ");
        use std::io::{self, Write};
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().to_lowercase().starts_with('y') {
            info!("Configuration initialization cancelled");
            return Ok(());
        }
    }

    Config::default()
        .save_to_file(&config_file)
        .await
        .with_context(|| format!("Failed to write configuration file: {:?}", config_file))?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);

    Ok(())
}

/// Output the report in the specified format
async fn output_report(
    report: &TraversalReport,
    format: &str,
    output_file: Option<&PathBuf>,
) -> Result<()> {
    let generator = ReportGenerator::new();
    let content = match generator.generate(report, format) {
        Ok(content) => content,
        Err(_) => {
            warn!("Unknown output format '{}', using text", format);
            generator.generate(report, "text")?
        }
    };

    if let Some(file_path) = output_file {
        tokio::fs::write(file_path, &content)
            .await
            .with_context(|| format!("Failed to write output to: {:?}", file_path))?;
        info!("Report written to: {:?}", file_path);
    } else {
        println!("{}", content);
    }

    Ok(())
}
