// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use adamai::utils::logging::{format_error, format_info, format_success, format_warning};
use adamai::{Config, Engine, HealthStatus, Validator};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "adamai")]
#[command(version)]
#[command(about = "Answer questions from a themed verse store and a document index", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Also print where the answer came from
        #[arg(long)]
        explain: bool,
    },

    /// Answer questions read line by line from stdin
    Chat,

    /// Rank documents against a query
    Search {
        query: String,

        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Show which theme a question routes to
    Classify {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Report verse memory and document index health
    Health {
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the verse store from its source
    Rebuild,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    adamai::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    let show_progress = cli.color && io::stderr().is_terminal();
    let mut engine = build_engine(&config, show_progress)?;

    match cli.command {
        Commands::Ask { question, explain } => cmd_ask(&engine, &question.join(" "), explain),
        Commands::Chat => cmd_chat(&engine)?,
        Commands::Search { query, limit } => cmd_search(&engine, &query, limit),
        Commands::Classify { question } => cmd_classify(&engine, &question.join(" ")),
        Commands::Health { json } => cmd_health(&engine, json)?,
        Commands::Rebuild => cmd_rebuild(&mut engine)?,
    }

    Ok(())
}

fn build_engine(config: &Config, show_progress: bool) -> Result<Engine> {
    let spinner = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Failed to create spinner template"),
    );
    spinner.set_message("Loading verses and indexing documents");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let engine = Engine::from_config(config).context("Failed to initialize knowledge engine");
    spinner.finish_and_clear();
    engine
}

fn cmd_ask(engine: &Engine, question: &str, explain: bool) {
    let answer = engine.respond(question);
    println!("{}", answer.text);

    if explain {
        println!("{}", format_info(&format!("source: {}", answer.source)));
    }
}

fn cmd_chat(engine: &Engine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Ask a question (exit or quit to leave).");

    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?
            == 0
        {
            break;
        }

        let question = line.trim();
        if Validator::validate_question(question).is_err() {
            continue;
        }

        if matches!(question.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        println!("{}", engine.answer(question));
    }

    Ok(())
}

fn cmd_search(engine: &Engine, query: &str, limit: usize) {
    let results = engine.search(query, limit);

    if results.is_empty() {
        println!("\nNo results found for query: \"{}\"\n", query);
        return;
    }

    println!("\nSearch Results for: \"{}\"\n", query);
    println!("Found {} result(s)\n", results.len());
    println!("{}", "=".repeat(80));

    for (idx, result) in results.iter().enumerate() {
        println!("\n{}. {}", idx + 1, result.format_summary(300).trim_end());
    }

    println!("\n{}", "=".repeat(80));
}

fn cmd_classify(engine: &Engine, question: &str) {
    match engine.classify(question) {
        Some(theme) => println!("{}", theme),
        None => println!("none"),
    }
}

fn cmd_health(engine: &Engine, json: bool) -> Result<()> {
    let report = engine.health_report();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize health report")?
        );
        return Ok(());
    }

    print!("{}", report.format());

    let summary = match report.overall_status {
        HealthStatus::Healthy => format_success("Knowledge is intact"),
        HealthStatus::Degraded => format_warning("Knowledge is partially available"),
        HealthStatus::Unhealthy => format_error("Verse memory lies empty"),
    };
    println!("\n{}", summary);

    Ok(())
}

fn cmd_rebuild(engine: &mut Engine) -> Result<()> {
    if !engine.emergency_rebuild() {
        println!("{}", format_error("Emergency rebuild recovered no verses"));
        return Err(anyhow::anyhow!("Verse store rebuild failed"));
    }

    println!("{}", format_success("Verse store rebuilt"));
    for (theme, count) in engine.verse_count_by_theme() {
        println!("  {:<10} {}", theme, count);
    }

    Ok(())
}
