//! TripBench - multi-agent trip planning benchmark CLI
//!
//! ## Commands
//!
//! - `gen`: Write synthetic flight and hotel stores
//! - `sample`: Print a random matching flight and hotel
//! - `scenario`: Sample a scenario and show its orchestrator prompt
//! - `run`: One orchestrator invocation, recorded to the run log
//! - `parse`: Run the task protocol parser over a file
//! - `itinerary`: Generate a day plan for a city

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};

use tripbench_core::metrics::METRICS;
use tripbench_core::model::fakes::{CatalogEchoModel, LegEchoModel};
use tripbench_core::{
    build_orchestrator_prompt, parse_tasks, record_outcome, AgentRegistry, GenerationOptions,
    HarnessPaths, ItineraryWriter, ModelAdapter, Orchestrator, RunLogEntry, Scenario,
};
use tripbench_datagen::{
    generate_flight_store, generate_hotel_store, sample_flight_from, sample_hotel_from,
    sample_scenario,
};
use tripbench_models::{
    AnthropicClient, AnthropicConfig, OpenAiCompatClient, OpenAiCompatConfig, WebSearchTool,
};

#[derive(Parser)]
#[command(name = "tripbench")]
#[command(author = "TripBench Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-agent trip planning benchmark harness", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Path overrides; unset flags fall back to `HarnessPaths::from_env`.
#[derive(Args, Debug, Clone, Default)]
struct PathArgs {
    /// Flight candidate store (JSONL) [env: TRIPBENCH_FLIGHTS]
    #[arg(long, global = true)]
    flights_path: Option<PathBuf>,

    /// Hotel candidate store (JSONL) [env: TRIPBENCH_HOTELS]
    #[arg(long, global = true)]
    hotels_path: Option<PathBuf>,

    /// Run log (JSONL) [env: TRIPBENCH_RUN_LOG]
    #[arg(long, global = true)]
    run_log: Option<PathBuf>,

    /// Itinerary log (JSONL) [env: TRIPBENCH_ITINERARY_LOG]
    #[arg(long, global = true)]
    itinerary_log: Option<PathBuf>,
}

impl PathArgs {
    /// Apply explicit flags on top of `base`.
    fn resolve(self, base: HarnessPaths) -> HarnessPaths {
        HarnessPaths {
            flights: self.flights_path.unwrap_or(base.flights),
            hotels: self.hotels_path.unwrap_or(base.hotels),
            run_log: self.run_log.unwrap_or(base.run_log),
            itinerary_log: self.itinerary_log.unwrap_or(base.itinerary_log),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Deterministic offline models (no network)
    Echo,
    /// OpenAI-compatible chat completions (TRIPBENCH_OPENAI_*)
    Openai,
    /// Anthropic Messages (ANTHROPIC_API_KEY, TRIPBENCH_ANTHROPIC_*)
    Anthropic,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic flight and hotel stores
    Gen {
        /// Number of flight records
        #[arg(long, default_value = "100")]
        flights: usize,

        /// Number of hotel records
        #[arg(long, default_value = "100")]
        hotels: usize,

        /// Append to existing stores instead of replacing them
        #[arg(long)]
        append: bool,

        /// RNG seed for reproducible stores
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a random flight for a leg and a random hotel at its destination
    Sample {
        #[arg(long)]
        origin: String,

        #[arg(long)]
        dest: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Sample a scenario and print it with its orchestrator prompt
    Scenario {
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run one orchestrator invocation and record it
    Run {
        /// Model backend
        #[arg(long, value_enum, default_value = "echo")]
        backend: Backend,

        /// Scenario file (JSON); sampled when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// RNG seed for the sampled scenario
        #[arg(long)]
        seed: Option<u64>,

        /// Token budget for every model call
        #[arg(long, default_value = "512")]
        max_new_tokens: u32,

        /// Decode greedily (temperature 0)
        #[arg(long)]
        greedy: bool,
    },

    /// Parse orchestrator output from a file and print the tasks
    Parse {
        /// File holding raw orchestrator output
        file: PathBuf,
    },

    /// Generate a day-by-day itinerary for a city
    Itinerary {
        #[arg(long)]
        city: String,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Departure day (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Model backend; anthropic enables web search
        #[arg(long, value_enum, default_value = "anthropic")]
        backend: Backend,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tripbench_core::init_tracing(cli.json, level);

    let paths = cli.paths.resolve(HarnessPaths::from_env());

    let result = match cli.command {
        Commands::Gen {
            flights,
            hotels,
            append,
            seed,
        } => cmd_gen(&paths, flights, hotels, append, seed),
        Commands::Sample { origin, dest, seed } => cmd_sample(&paths, &origin, &dest, seed),
        Commands::Scenario { seed } => cmd_scenario(seed),
        Commands::Run {
            backend,
            scenario,
            seed,
            max_new_tokens,
            greedy,
        } => {
            let options = generation_options(max_new_tokens, greedy);
            cmd_run(&paths, backend, scenario.as_deref(), seed, options).await
        }
        Commands::Parse { file } => cmd_parse(&file),
        Commands::Itinerary {
            city,
            start,
            end,
            backend,
        } => cmd_itinerary(&paths, backend, &city, &start, &end).await,
    };

    METRICS.flush();
    result
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn generation_options(max_new_tokens: u32, greedy: bool) -> GenerationOptions {
    let base = if greedy {
        GenerationOptions::greedy()
    } else {
        GenerationOptions::default()
    };
    base.with_max_new_tokens(max_new_tokens)
}

/// Orchestrator model and sub-agent model for `backend`.
fn backend_models(backend: Backend) -> Result<(Arc<dyn ModelAdapter>, Arc<dyn ModelAdapter>)> {
    match backend {
        Backend::Echo => Ok((Arc::new(LegEchoModel), Arc::new(CatalogEchoModel))),
        Backend::Openai => {
            let config = OpenAiCompatConfig::from_env().context("OpenAI-compatible backend config")?;
            let client: Arc<dyn ModelAdapter> = Arc::new(
                OpenAiCompatClient::new(config).context("Failed to build OpenAI-compatible client")?,
            );
            Ok((Arc::clone(&client), client))
        }
        Backend::Anthropic => {
            let config = AnthropicConfig::from_env().context("Anthropic backend config")?;
            let client: Arc<dyn ModelAdapter> = Arc::new(
                AnthropicClient::new(config).context("Failed to build Anthropic client")?,
            );
            Ok((Arc::clone(&client), client))
        }
    }
}

fn cmd_gen(
    paths: &HarnessPaths,
    flights: usize,
    hotels: usize,
    append: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = rng_from(seed);
    let today = chrono::Local::now().date_naive();

    let n_flights = generate_flight_store(&mut rng, today, &paths.flights, flights, append)
        .context(format!("Failed to write flight store: {:?}", paths.flights))?;
    let n_hotels = generate_hotel_store(&mut rng, today, &paths.hotels, hotels, append)
        .context(format!("Failed to write hotel store: {:?}", paths.hotels))?;

    println!("Flights: {} -> {}", n_flights, paths.flights.display());
    println!("Hotels:  {} -> {}", n_hotels, paths.hotels.display());
    Ok(())
}

fn cmd_sample(paths: &HarnessPaths, origin: &str, dest: &str, seed: Option<u64>) -> Result<()> {
    let mut rng = rng_from(seed);
    let flight = sample_flight_from(&mut rng, &paths.flights, origin, dest)
        .context("Failed to read flight store")?;
    let hotel =
        sample_hotel_from(&mut rng, &paths.hotels, dest).context("Failed to read hotel store")?;

    let out = serde_json::json!({ "flight": flight, "hotel": hotel });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_scenario(seed: Option<u64>) -> Result<()> {
    let mut rng = rng_from(seed);
    let sampled = sample_scenario(&mut rng).context("Failed to sample scenario")?;

    println!("{}", serde_json::to_string_pretty(&sampled)?);
    println!("\n{}\n", "=".repeat(80));
    println!("{}", build_orchestrator_prompt(&sampled.scenario));
    Ok(())
}

fn load_scenario(path: Option<&Path>, seed: Option<u64>) -> Result<Scenario> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .context(format!("Failed to read scenario file: {:?}", p))?;
            serde_json::from_str(&content).context("Failed to parse scenario")
        }
        None => {
            let sampled = sample_scenario(&mut rng_from(seed)).context("Failed to sample scenario")?;
            Ok(sampled.scenario)
        }
    }
}

async fn cmd_run(
    paths: &HarnessPaths,
    backend: Backend,
    scenario_path: Option<&Path>,
    seed: Option<u64>,
    options: GenerationOptions,
) -> Result<()> {
    let scenario = load_scenario(scenario_path, seed)?;
    let (orchestrator_model, agent_model) = backend_models(backend)?;

    let registry = AgentRegistry::standard(agent_model, &paths.flights, &paths.hotels);
    let orchestrator = Orchestrator::new(orchestrator_model, registry).with_options(options);

    let run_id = uuid::Uuid::new_v4().to_string();
    info!(run_id = %run_id, route = %scenario.route(), backend = ?backend, "starting run");

    let outcome = orchestrator.invoke_as(&run_id, &scenario).await;
    let entry = record_outcome(&paths.run_log, &run_id, &outcome)
        .context(format!("Failed to append run log: {:?}", paths.run_log))?;

    match entry {
        RunLogEntry::Completed(record) => {
            println!("{}", serde_json::to_string_pretty(&record.bundle)?);
            println!("Run:     {}", record.run_id);
            println!("Digest:  {}", record.prompt_digest);
            Ok(())
        }
        RunLogEntry::Failed(failure) => {
            if let Some(raw) = &failure.raw_output {
                eprintln!("--- orchestrator output ---\n{raw}\n---");
            }
            anyhow::bail!("run {} failed: {}", failure.run_id, failure.error)
        }
    }
}

fn cmd_parse(file: &Path) -> Result<()> {
    let text =
        std::fs::read_to_string(file).context(format!("Failed to read file: {:?}", file))?;
    let tasks = parse_tasks(&text).context("Failed to parse orchestrator output")?;

    for task in &tasks {
        println!(
            "{:>4}  {:<14} {}",
            task.line(),
            task.role(),
            serde_json::Value::Object(task.payload().clone())
        );
    }
    println!("{} task(s)", tasks.len());
    Ok(())
}

fn itinerary_model(backend: Backend) -> Result<Arc<dyn ModelAdapter>> {
    match backend {
        Backend::Anthropic => {
            let config = AnthropicConfig::from_env()
                .context("Anthropic backend config")?
                .with_web_search(WebSearchTool::default());
            Ok(Arc::new(
                AnthropicClient::new(config).context("Failed to build Anthropic client")?,
            ))
        }
        other => backend_models(other).map(|(_, agent)| agent),
    }
}

async fn cmd_itinerary(
    paths: &HarnessPaths,
    backend: Backend,
    city: &str,
    start: &str,
    end: &str,
) -> Result<()> {
    let writer = ItineraryWriter::new(itinerary_model(backend)?);
    let entry = writer
        .write_itinerary(city, start, end, &paths.itinerary_log)
        .await
        .context(format!("Failed to append itinerary log: {:?}", paths.itinerary_log))?;

    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}
