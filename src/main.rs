/// lambdata - law checker and workflow demo CLI
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use lambdata::laws::{check_all, standard_laws};
use lambdata::workflow::{self, allowed_events, workflow_state};
use lambdata::{CheckConfig, Error, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lambdata", version, about = "Dispatch environments, tagged data and property checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the algebraic laws of the standard environment
    Check {
        /// TOML file with a [check] table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Trials per law (overrides the file and LAMBDATA_GOAL)
        #[arg(long)]
        goal: Option<i64>,

        /// Random seed (overrides the file and LAMBDATA_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Drive a document through workflow events
    Workflow {
        /// Starting state
        #[arg(long, default_value = "Draft")]
        from: String,

        /// Events applied in order, e.g. submit approve publish
        events: Vec<String>,
    },
}

fn check(config: Option<PathBuf>, goal: Option<i64>, seed: Option<u64>) -> Result<bool, Error> {
    let mut settings = match config {
        Some(path) => CheckConfig::load_from_path(&path)?,
        None => CheckConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(goal) = goal {
        settings.goal = goal;
    }
    if seed.is_some() {
        settings.seed = seed;
    }

    let env = settings.apply(&lambdata::standard()?)?;
    let outcomes = check_all(&env, &standard_laws())?;
    for outcome in &outcomes {
        println!("{}", outcome);
    }
    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    println!();
    println!("{} laws, {} failed", outcomes.len(), failed);
    Ok(failed == 0)
}

fn state_name(value: &Value) -> &str {
    value.as_variant().map_or("?", |v| v.name())
}

fn run_workflow(from: &str, events: &[String]) -> Result<bool, Error> {
    let env = workflow::register(&lambdata::standard()?)?;
    let events: Vec<&str> = events.iter().map(String::as_str).collect();
    let visited = workflow::run(&env, workflow_state(from)?, &events)?;

    println!("{}", state_name(&visited[0]));
    for (event, pair) in events.iter().zip(visited.windows(2)) {
        let (before, after) = (state_name(&pair[0]), state_name(&pair[1]));
        if before == after && !allowed_events(before).iter().any(|e| e == event) {
            println!("  {:<8} ignored in {} (allowed: {})", event, before, allowed_events(before).join(", "));
        } else {
            println!("  {:<8} -> {}", event, after);
        }
    }
    Ok(true)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Check { config, goal, seed } => check(config, goal, seed),
        Command::Workflow { from, events } => run_workflow(&from, &events),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}
