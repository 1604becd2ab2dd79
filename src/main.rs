use bfff::catalog::{Catalog, CatalogPreset};
use bfff::ir::Case;
use bfff::search::config::{DEFAULT_BATCH_SIZE, DEFAULT_FAILURE_SAMPLE_RATE, DEFAULT_MAX_DEPTH};
use bfff::search::worker::{Request, Response, serve, spawn_worker};
use bfff::search::{Ranking, SearchConfig, SearchStatistics, count_trees};
use bfff::validation::load_cases;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "bfff")]
#[command(about = "bfff - brute-force function finder")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// CLI primitive menu selection
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CliCatalog {
    /// Constants 1 and 2, E and PI, all operators and functions
    #[default]
    Standard,
    /// Standard menu plus 3, 4, 5 and the remaining math constants
    Extended,
}

impl From<CliCatalog> for CatalogPreset {
    fn from(cli: CliCatalog) -> Self {
        match cli {
            CliCatalog::Standard => CatalogPreset::Standard,
            CliCatalog::Extended => CatalogPreset::Extended,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for expressions that reproduce every case
    Search {
        /// A case as comma-separated inputs, '=', then the output (e.g. 1,2=3)
        #[arg(long = "case", value_name = "INPUTS=OUTPUT", allow_hyphen_values = true)]
        cases: Vec<Case>,
        /// JSON file with an array of {"inputs": [...], "output": n} cases
        #[arg(long = "cases", value_name = "FILE")]
        case_file: Option<PathBuf>,
        /// Maximum expression depth
        #[arg(long, short, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
        /// Candidates pulled per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
        /// Stop after this many batches even if the space is not exhausted
        #[arg(long)]
        max_batches: Option<u64>,
        /// Number of ranked results to print
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Primitive menu to enumerate over
        #[arg(long, value_enum, default_value = "standard")]
        catalog: CliCatalog,
        /// Probability of logging each failing candidate
        #[arg(long, default_value_t = DEFAULT_FAILURE_SAMPLE_RATE)]
        sample_rate: f64,
        /// Random seed for failure sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Enable verbose output
        #[arg(long, short)]
        verbose: bool,
    },
    /// Answer JSON-lines requests on stdin with responses on stdout
    Serve {
        /// Primitive menu to enumerate over
        #[arg(long, value_enum, default_value = "standard")]
        catalog: CliCatalog,
        /// Probability of sampling each failing candidate
        #[arg(long, default_value_t = DEFAULT_FAILURE_SAMPLE_RATE)]
        sample_rate: f64,
        /// Random seed for failure sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Enable verbose output
        #[arg(long, short)]
        verbose: bool,
    },
    /// Print the number of candidates a search would enumerate
    Count {
        /// Number of input variables
        #[arg(long, short)]
        arity: usize,
        /// Maximum expression depth
        #[arg(long, short, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
        /// Primitive menu to enumerate over
        #[arg(long, value_enum, default_value = "standard")]
        catalog: CliCatalog,
    },
}

/// Options for a command-line search
struct SearchOptions {
    config: SearchConfig,
    max_batches: Option<u64>,
    limit: usize,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

// --- Search ---

fn run_search(cases: Vec<Case>, options: &SearchOptions) -> Result<(), Box<dyn std::error::Error>> {
    let handle = spawn_worker(options.config.clone());

    match handle.call(Request::Init {
        cases,
        max_depth: options.config.max_depth,
    })? {
        Response::Ready => {}
        Response::Error { error } => return Err(error.into()),
        other => return Err(format!("Unexpected response to init: {:?}", other).into()),
    }

    let mut ranking = Ranking::new();
    let mut statistics = SearchStatistics::default();
    let mut exhausted = false;

    while !exhausted && options.max_batches.is_none_or(|max| statistics.batches < max) {
        let batch_start = Instant::now();
        let report = match handle.call(Request::Batch {
            count: options.config.batch_size,
        })? {
            Response::Result(report) => report,
            Response::Error { error } => return Err(error.into()),
            other => return Err(format!("Unexpected response to batch: {:?}", other).into()),
        };
        statistics.record_counts(
            report.pulled,
            report.skipped,
            report.failure_count,
            report.passes.len() as u64,
            batch_start.elapsed(),
        );
        exhausted = report.exhausted;

        let new = report
            .passes
            .iter()
            .filter(|p| ranking.insert(&p.rendered_text, p.cost))
            .count();
        for sample in &report.failure_samples {
            debug!("Sampled failure: {}", sample);
        }
        info!(
            "Batch {}: {} passes ({} new), {} failures",
            statistics.batches,
            report.passes.len(),
            new,
            report.failure_count
        );
    }

    handle.shutdown()?;

    if ranking.is_empty() {
        println!("No function found.");
    } else {
        println!("Found {} distinct functions:", ranking.len());
        for entry in ranking.iter().take(options.limit) {
            println!("  [cost {:>3}] {}", entry.cost, entry.rendered_text);
        }
        if ranking.len() > options.limit {
            println!("  ... and {} more", ranking.len() - options.limit);
        }
    }

    println!("\nSearch Statistics:");
    for line in statistics.format_summary().lines() {
        println!("  {}", line);
    }
    println!(
        "  Search space: {}",
        if exhausted { "exhausted" } else { "not exhausted" }
    );

    Ok(())
}

fn collect_cases(
    mut cases: Vec<Case>,
    case_file: Option<PathBuf>,
) -> Result<Vec<Case>, Box<dyn std::error::Error>> {
    if let Some(path) = case_file {
        let loaded = load_cases(&path)?;
        info!("Loaded {} cases from {}", loaded.len(), path.display());
        cases.extend(loaded);
    }
    Ok(cases)
}

// --- Serve ---

fn run_serve(config: SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let handle = spawn_worker(config);
    serve(&handle, io::stdin().lock(), io::stdout().lock())?;
    handle.shutdown()?;
    Ok(())
}

// --- Count ---

fn run_count(
    arity: usize,
    depth: usize,
    preset: CatalogPreset,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::with_preset(preset, arity);
    let (nullary, unary, binary) = catalog.arity_counts();
    println!(
        "Catalog: {} ({} nullary, {} unary, {} binary)",
        preset, nullary, unary, binary
    );
    match count_trees(&catalog, depth) {
        Some(total) => println!("Candidates up to depth {}: {}", depth, total),
        None => return Err(format!("Candidate count at depth {} overflows", depth).into()),
    }
    Ok(())
}

// --- Main Function ---
fn main() {
    let args = Args::parse();

    match args.command {
        Commands::Search {
            cases,
            case_file,
            depth,
            batch_size,
            max_batches,
            limit,
            catalog,
            sample_rate,
            seed,
            verbose,
        } => {
            init_logging(verbose);

            let cases = match collect_cases(cases, case_file) {
                Ok(cases) => cases,
                Err(e) => {
                    eprintln!("Error loading cases: {}", e);
                    std::process::exit(1);
                }
            };

            let options = SearchOptions {
                config: SearchConfig::default()
                    .with_max_depth(depth)
                    .with_batch_size(batch_size)
                    .with_failure_sample_rate(sample_rate)
                    .with_seed_option(seed)
                    .with_catalog(catalog.into()),
                max_batches,
                limit,
            };

            if let Err(e) = run_search(cases, &options) {
                eprintln!("Error during search: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Serve {
            catalog,
            sample_rate,
            seed,
            verbose,
        } => {
            init_logging(verbose);

            let config = SearchConfig::default()
                .with_failure_sample_rate(sample_rate)
                .with_seed_option(seed)
                .with_catalog(catalog.into());

            if let Err(e) = run_serve(config) {
                eprintln!("Error while serving: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Count {
            arity,
            depth,
            catalog,
        } => {
            init_logging(false);

            if let Err(e) = run_count(arity, depth, catalog.into()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
