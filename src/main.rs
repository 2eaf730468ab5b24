use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use season_stats::api::{build_router, state::AppState};
use season_stats::calculate::magic::magic_numbers;
use season_stats::calculate::{analyze_season, SeasonReport, SeasonSettings};
use season_stats::config::AppConfig;
use season_stats::models::{MagicNumberEntry, StandingsEntry};
use season_stats::parse_date;
use season_stats::storage::{load_game_log, write_season_outputs, StorageConfig};

#[derive(Parser)]
#[command(name = "season-stats")]
#[command(about = "Series, streak and magic number tracker for a round-robin season")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full season analysis and write derived outputs
    Analyze {
        /// Season to analyze (defaults to the configured season)
        #[arg(long)]
        season: Option<String>,

        /// Analyze as of this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Compute and print, but don't write outputs
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the standings table
    Standings {
        #[arg(long)]
        season: Option<String>,

        #[arg(long)]
        as_of: Option<String>,
    },

    /// Print magic and tragic numbers for a target rank
    Magic {
        #[arg(long)]
        season: Option<String>,

        #[arg(long)]
        as_of: Option<String>,

        /// Target rank (defaults to the playoff cutoff)
        #[arg(long)]
        rank: Option<u32>,
    },

    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting season-stats v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_or_default(Path::new(&cli.config))
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Analyze {
            season,
            as_of,
            dry_run,
        } => {
            let season = season.unwrap_or_else(|| config.season.name.clone());
            let report = run_analysis(&config, &storage, &season, as_of.as_deref())?;

            println!("\n=== Season {} as of {} ===", season, report.as_of);
            println!("Snapshot:         {}", report.snapshot);
            println!("Teams:            {}", report.teams.len());
            if let Some(last) = report.last_game_date {
                println!("Last game:        {}", last);
            }
            print_standings(&report.standings);

            println!("\nCurrent series streaks:");
            for entry in &report.standings {
                if let Some(record) = report.team(&entry.team) {
                    println!("  {:<8} {}", entry.team, record.current_streak());
                }
            }
            print_magic_numbers("Championship", &report.championship);
            print_magic_numbers("Playoff", &report.playoff);

            if let Some(sweep) = report.sweeps.recent_sweeps.first() {
                println!(
                    "\nLatest sweep: {} vs {} ({}, {} games, {} to {})",
                    sweep.team,
                    sweep.opponent,
                    sweep.sweep_type,
                    sweep.game_count,
                    sweep.start_date,
                    sweep.end_date
                );
            }

            if dry_run {
                println!("\n(dry run - no data written to disk)");
            } else {
                let outputs = write_season_outputs(&storage, &season, &report)?;
                println!(
                    "\nWrote {} standings, {} series, {} magic numbers to {}",
                    outputs.standings,
                    outputs.series,
                    outputs.magic_numbers,
                    outputs.dir.display()
                );
            }
        }
        Commands::Standings { season, as_of } => {
            let season = season.unwrap_or_else(|| config.season.name.clone());
            let report = run_analysis(&config, &storage, &season, as_of.as_deref())?;
            println!("\n=== Standings {} as of {} ===", season, report.as_of);
            print_standings(&report.standings);
        }
        Commands::Magic {
            season,
            as_of,
            rank,
        } => {
            let season = season.unwrap_or_else(|| config.season.name.clone());
            let rank = rank.unwrap_or(config.season.playoff_cutoff);
            if rank == 0 {
                bail!("--rank must be at least 1");
            }
            let report = run_analysis(&config, &storage, &season, as_of.as_deref())?;
            let tie_breaker = config.season.tie_break.tie_breaker();
            let entries = magic_numbers(&report.standings, rank, tie_breaker.as_ref());
            print_magic_numbers(&format!("Rank {}", rank), &entries);
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(
                storage,
                config.season.clone(),
                config.server.cors_origin.clone(),
                config.server.cache_capacity,
            );
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        None => Ok(chrono::Utc::now().date_naive()),
        Some(s) => parse_date(s)
            .with_context(|| format!("Invalid --as-of date (expected YYYY-MM-DD): {}", s)),
    }
}

fn run_analysis(
    config: &AppConfig,
    storage: &StorageConfig,
    season: &str,
    as_of: Option<&str>,
) -> Result<SeasonReport> {
    let as_of = resolve_as_of(as_of)?;
    let ingest = load_game_log(storage, season, &config.season.teams)
        .with_context(|| format!("Failed to load game log for season {}", season))?;

    if !ingest.skipped.is_empty() {
        println!("Skipped {} invalid game records:", ingest.skipped.len());
        for skipped in &ingest.skipped {
            println!("  - #{} {}: {}", skipped.index, skipped.team, skipped.reason);
        }
    }

    let settings = SeasonSettings {
        as_of,
        total_games_per_team: config.season.total_games_per_team,
        playoff_cutoff: config.season.playoff_cutoff,
    };
    let tie_breaker = config.season.tie_break.tie_breaker();
    Ok(analyze_season(&ingest.log, &settings, tie_breaker.as_ref()))
}

fn print_standings(standings: &[StandingsEntry]) {
    println!(
        "\n{:>4}  {:<8} {:>4} {:>4} {:>4} {:>6} {:>5} {:>5} {:>5}",
        "Rank", "Team", "W", "L", "D", "PCT", "GB", "Left", "RD"
    );
    for e in standings {
        println!(
            "{:>4}  {:<8} {:>4} {:>4} {:>4} {:>6.3} {:>5.1} {:>5} {:>+5}",
            e.rank,
            e.team,
            e.wins,
            e.losses,
            e.draws,
            e.win_pct,
            e.games_behind,
            e.remaining_games,
            e.run_differential
        );
    }
}

fn print_magic_numbers(label: &str, entries: &[MagicNumberEntry]) {
    println!("\n{} magic numbers:", label);
    for e in entries {
        let magic = match (e.eliminated, e.magic_number) {
            (true, _) => "x".to_string(),
            (false, _) if e.is_clinched() => "clinched".to_string(),
            (false, Some(n)) => n.to_string(),
            (false, None) => "-".to_string(),
        };
        let tragic = e
            .tragic_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<8} magic {:>4}  tragic {:>4}  {:?}",
            e.team, magic, tragic, e.status
        );
    }
}
