use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sonkal_acquire::roster::CrawlOptions;
use sonkal_acquire::{achievements, client, roster};
use sonkal_model::directory;

#[derive(Parser)]
#[command(name = "sonkal")]
#[command(about = "Sonkal club competitor roster scraper and achievement lookup")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl profile pages over an id range and build the competitor directory
    Roster {
        /// First profile id to probe (inclusive)
        #[arg(long, default_value_t = 1)]
        start_id: u32,

        /// Last profile id to probe (inclusive)
        #[arg(long, default_value_t = 750)]
        end_id: u32,

        /// Maximum number of simultaneous fetches
        #[arg(short = 'j', long, default_value_t = 10)]
        max_concurrency: usize,

        /// Politeness pause after each probe, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// Output path for the competitor directory JSON
        #[arg(short, long, default_value = "competitors.json")]
        output: String,
    },

    /// Look up a competitor by name and report their medal counts
    Achievements {
        /// Path to the competitor directory produced by `roster`
        #[arg(short, long, default_value = "competitors.json")]
        directory: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Roster {
            start_id,
            end_id,
            max_concurrency,
            delay_ms,
            output,
        } => {
            let options = CrawlOptions {
                start_id,
                end_id,
                max_concurrency,
                delay: Duration::from_millis(delay_ms),
            };
            tracing::info!(start_id, end_id, max_concurrency, "Crawling competitor roster");

            let dir = roster::crawl(&options).await?;
            directory::save(&dir, Path::new(&output))?;
            tracing::info!(
                competitors = dir.len(),
                path = %output,
                "Wrote competitor directory"
            );
        }

        Commands::Achievements { directory: path } => {
            let dir = directory::load(Path::new(&path))?;
            if dir.is_empty() {
                println!("No competitor data found. Run `sonkal roster` first.");
                return Ok(());
            }

            let first_name = prompt("Enter competitor first name: ")?;
            let last_name = prompt("Enter competitor last name: ")?;

            let Some(id) = sonkal_model::resolve(&first_name, &last_name, &dir) else {
                println!("Competitor not found.");
                return Ok(());
            };
            println!("Competitor ID for {first_name} {last_name}: {id}");

            let client = client::build_client()?;
            match achievements::fetch_achievements(&client, id).await {
                Some(summary) => {
                    println!("\n--- Achievements ---");
                    println!("Total Medals: {}", summary.total_medals);
                    println!("Gold Medals: {}", summary.gold);
                    println!("Silver Medals: {}", summary.silver);
                    println!("Bronze Medals: {}", summary.bronze);
                    println!("MVP Awards: {}", summary.mvp);
                }
                None => println!("Could not read achievements for ID {id}."),
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
