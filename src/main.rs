use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warstats::archive::{ArchiveQuery, MemoryArchive, RecordWindow, WarArchive};
use warstats::calculate::{
    analyze, AnalysisRequest, AnalysisResult, Attempt, CompareFilter, Mode, StarThreshold,
    WarTypeFilter,
};
use warstats::config::AppConfig;
use warstats::normalize_tag;

#[derive(Parser)]
#[command(name = "warstats")]
#[command(about = "Combat performance analytics for clan-war history")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank members by attack success or defense failures
    Analyze {
        /// JSON file holding archived war records (newest-first)
        #[arg(long)]
        wars: PathBuf,

        /// Subject player tags, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        tags: Vec<String>,

        /// Query mode: attacks or defense
        #[arg(long, default_value = "attacks")]
        mode: String,

        /// Town-hall matchup filter (e.g. "13vs14", "equal", "*vs9")
        #[arg(long)]
        compare: Option<String>,

        /// Star threshold (1, 2, 3, >=1, >=2)
        #[arg(long)]
        stars: Option<String>,

        /// War types to include (e.g. "regular,cwl", "!friendly", "all")
        #[arg(long)]
        war_types: Option<String>,

        /// Restrict to fresh or cleanup attempts
        #[arg(long)]
        attempt: Option<String>,

        /// Discard farm hits (1 star, <50% destruction)
        #[arg(long)]
        filter_farm_hits: bool,

        /// Only wars prepared on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Only the most recent N wars (takes precedence over --since)
        #[arg(long)]
        last: Option<usize>,

        /// Only wars involving this clan tag
        #[arg(long)]
        clan: Option<String>,

        /// Print the leaderboard as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
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

    let config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("loading config from {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    match cli.command {
        Commands::Analyze {
            wars,
            tags,
            mode,
            compare,
            stars,
            war_types,
            attempt,
            filter_farm_hits,
            since,
            last,
            clan,
            json,
        } => {
            let archive = MemoryArchive::from_json_file(&wars)
                .with_context(|| format!("loading war records from {}", wars.display()))?;

            let since = since
                .map(|s| parse_since(&s))
                .transpose()
                .context("parsing --since")?;

            let query = ArchiveQuery {
                war_types: war_types
                    .as_deref()
                    .map(WarTypeFilter::parse)
                    .unwrap_or_else(|| WarTypeFilter::parse(&config.engine.war_types)),
                window: RecordWindow::from_parts(since, last),
                clan_only: clan.map(|tag| normalize_tag(&tag)),
            };
            let records = archive.fetch(&query)?;

            let Some(mode) = Mode::parse(&mode) else {
                bail!("unknown mode '{}' (expected attacks or defense)", mode);
            };
            let attempt = match attempt {
                Some(raw) => match Attempt::parse(&raw) {
                    Some(attempt) => Some(attempt),
                    None => bail!("unknown attempt '{}' (expected fresh or cleanup)", raw),
                },
                None => None,
            };

            let request = AnalysisRequest::new(
                tags.iter().map(|t| normalize_tag(t)).collect(),
                mode,
            )
            .with_compare(CompareFilter::parse(compare.as_deref().unwrap_or("")))
            .with_stars(StarThreshold::parse(
                stars.as_deref().unwrap_or(&config.engine.stars),
            ))
            .with_attempt(attempt)
            .with_filter_farm_hits(filter_farm_hits || config.engine.filter_farm_hits);

            let result = analyze(&records, &request);

            if json || config.output.format == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_table(&result, config.output.limit);
            }
        }
    }

    Ok(())
}

/// Parse a `--since` date (start of day, UTC).
fn parse_since(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}' (expected YYYY-MM-DD)", raw))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("invalid start of day")?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

fn print_table(result: &AnalysisResult, limit: usize) {
    if result.stats.is_empty() {
        println!("No qualifying attacks in {} wars.", result.wars_considered);
        return;
    }

    println!(
        "{:<4} {:<18} {:>3} {:>7} {:>9} {:>6}",
        "#", "NAME", "TH", "RATE", "HITS", "STARS"
    );
    let rows = if limit == 0 {
        result.stats.len()
    } else {
        limit.min(result.stats.len())
    };
    for (i, stat) in result.stats[..rows].iter().enumerate() {
        println!(
            "{:<4} {:<18} {:>3} {:>6.1}% {:>4}/{:<4} {:>6}",
            i + 1,
            stat.name,
            stat.town_hall_level,
            stat.rate().unwrap_or(0.0) * 100.0,
            stat.successful_attempts,
            stat.total_attempts,
            stat.raw_stars_earned,
        );
    }
    println!("{} wars considered.", result.wars_considered);
}
