//! VibeScout CLI
//!
//! Discover builders who ship with modern AI tooling, resolve them across
//! sources and rank them against the recruiting rubric.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use scout_core::RawRecord;
use scout_llm::{AnthropicBackend, EnhancerConfig, OpenAiBackend, PitchEnhancer, SharedBackend};
use scout_resolve::ResolveConfig;
use scout_score::{run_pipeline, ScoreConfig, Scorer};
use scout_sources::{
    crawl_all, CandidateSource, DevToConfig, DevToSource, GithubConfig, GithubSource,
    HackerNewsSource, HnConfig,
};

mod output;

#[derive(Parser)]
#[command(name = "vibescout")]
#[command(author, version, about = "Find vibe coders across public sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl sources for raw candidate records
    Search {
        /// Comma-separated sources (github,hn,devto) or "all"
        #[arg(short, long, default_value = "all")]
        sources: String,

        /// Total record budget across all sources
        #[arg(short, long, default_value = "300")]
        limit: usize,

        /// Where to write the raw records
        #[arg(short, long, default_value = "results/raw.json")]
        output: PathBuf,

        /// Resolve, score and rank straight away
        #[arg(long)]
        score: bool,
    },

    /// Resolve, score and rank records from a raw JSON file
    Score {
        /// Raw records produced by `search`
        #[arg(short, long, default_value = "results/raw.json")]
        input: PathBuf,

        /// Output path; `.csv` gets a JSON sibling as well
        #[arg(short, long, default_value = "results/scored.csv")]
        output: PathBuf,

        /// Rewrite pitches through an LLM
        #[arg(long)]
        llm: bool,

        /// Use OpenAI instead of Anthropic for --llm
        #[arg(long)]
        openai: bool,

        /// Model override for --llm
        #[arg(long)]
        model: Option<String>,

        /// How many top candidates get an LLM call
        #[arg(long, default_value = "50")]
        llm_limit: usize,
    },

    /// Print the top of a scored JSON file
    Report {
        /// Scored candidates produced by `score`
        #[arg(short, long, default_value = "results/scored.json")]
        input: PathBuf,

        /// How many candidates to print
        #[arg(short, long, default_value = "10")]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Search {
            sources,
            limit,
            output,
            score,
        } => run_search(&sources, limit, output, score).await,
        Commands::Score {
            input,
            output,
            llm,
            openai,
            model,
            llm_limit,
        } => run_score(input, output, llm, openai, model.as_deref(), llm_limit).await,
        Commands::Report { input, top } => run_report(input, top),
    }
}

fn build_sources(selection: &str) -> Vec<Box<dyn CandidateSource>> {
    let wanted: Vec<&str> = selection.split(',').map(str::trim).collect();
    let all = wanted.contains(&"all");
    let mut sources: Vec<Box<dyn CandidateSource>> = Vec::new();

    if all || wanted.contains(&"github") {
        let config = GithubConfig::default();
        if config.token.is_some() {
            sources.push(Box::new(GithubSource::new(config)));
        } else {
            warn!("skipping github: GITHUB_TOKEN not set");
        }
    }
    if all || wanted.contains(&"hn") {
        sources.push(Box::new(HackerNewsSource::new(HnConfig::default())));
    }
    if all || wanted.contains(&"devto") {
        sources.push(Box::new(DevToSource::new(DevToConfig::default())));
    }

    sources
}

async fn run_search(selection: &str, limit: usize, output: PathBuf, score: bool) -> Result<()> {
    let mut sources = build_sources(selection);
    if sources.is_empty() {
        bail!("no sources selected, expected a combination of github, hn, devto");
    }

    let per_source = (limit / sources.len()).max(1);
    info!(sources = sources.len(), per_source, "starting search");

    let records = crawl_all(&mut sources, per_source).await;
    info!(records = records.len(), "search complete");

    let raw_json = serde_json::to_string_pretty(&records)?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, raw_json)?;
    println!("Saved {} raw records to {}", records.len(), output.display());

    if score {
        let ranked = score_records(&records);
        let scored_json = output.with_file_name("scored.json");
        let scored_csv = output.with_file_name("scored.csv");
        output::save_json(&ranked, &scored_json)?;
        output::save_csv(&ranked, &scored_csv)?;
        println!(
            "Saved {} ranked candidates to {} and {}",
            ranked.len(),
            scored_json.display(),
            scored_csv.display()
        );
        print_top(&ranked, 5);
    }

    Ok(())
}

fn score_records(records: &[RawRecord]) -> Vec<scout_core::MergedCandidate> {
    let scorer = Scorer::new(ScoreConfig::default());
    run_pipeline(records, &ResolveConfig::default(), &scorer)
}

async fn run_score(
    input: PathBuf,
    output: PathBuf,
    llm: bool,
    use_openai: bool,
    model: Option<&str>,
    llm_limit: usize,
) -> Result<()> {
    let raw = std::fs::read_to_string(&input)?;
    let records: Vec<RawRecord> = serde_json::from_str(&raw)?;
    info!(records = records.len(), "loaded raw records");

    let mut ranked = score_records(&records);
    info!(ranked = ranked.len(), "scoring complete");

    if llm {
        let backend: SharedBackend = if use_openai {
            Arc::new(OpenAiBackend::from_env(model)?)
        } else {
            Arc::new(AnthropicBackend::from_env(model)?)
        };
        let enhancer = PitchEnhancer::new(
            backend,
            EnhancerConfig {
                max_candidates: llm_limit,
                ..EnhancerConfig::default()
            },
        );
        ranked = enhancer.enhance(ranked).await;
    }

    if output.extension().is_some_and(|ext| ext == "csv") {
        output::save_csv(&ranked, &output)?;
        let json_path = output.with_extension("json");
        output::save_json(&ranked, &json_path)?;
        println!(
            "Saved {} candidates to {} and {}",
            ranked.len(),
            output.display(),
            json_path.display()
        );
    } else {
        output::save_json(&ranked, &output)?;
        println!("Saved {} candidates to {}", ranked.len(), output.display());
    }

    print_top(&ranked, 10);
    Ok(())
}

fn run_report(input: PathBuf, top: usize) -> Result<()> {
    let candidates = output::load_json(&input)?;
    print_top(&candidates, top);
    Ok(())
}

fn print_top(candidates: &[scout_core::MergedCandidate], top: usize) {
    println!("\nTop {} candidates:", top.min(candidates.len()));
    for c in candidates.iter().take(top) {
        println!(
            "  {}. {:.1} - {} ({})",
            c.rank.unwrap_or(0),
            c.total_score,
            c.display_name(),
            c.location_bucket
        );
        if let Some(pitch) = &c.recruiter_pitch {
            println!("     {pitch}");
        }
    }
}
