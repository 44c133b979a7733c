//! haven-report - print progress stats and activity suggestions for a user
//!
//! Reads the configured store directly; the server does not need to be running.

use anyhow::{Context, Result};
use clap::Parser;
use haven::bootstrap;
use haven_core::config::StorageBackend;
use haven_core::{Config, RecommendationReport, User, UserId, UserStatsSnapshot};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "haven-report")]
#[command(about = "Print progress stats and activity suggestions for a user")]
#[command(version)]
struct Args {
    /// User to report on
    #[arg(short, long, default_value = "default-user")]
    user: String,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Config file (defaults to $XDG_CONFIG_HOME/haven/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    user: User,
    stats: UserStatsSnapshot,
    suggestions: RecommendationReport,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.format != "text" && args.format != "json" {
        anyhow::bail!("Unknown format '{}', expected text or json", args.format);
    }

    // Load configuration
    let config = match args.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    if config.storage.backend == StorageBackend::Memory {
        anyhow::bail!(
            "haven-report reads saved data and cannot use the memory backend; \
             set storage.backend = \"sqlite\""
        );
    }

    // Initialize logging
    let _log_guard =
        haven_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let store = bootstrap::open_store(&config)?;
    let engine = bootstrap::load_engine(&config)?;

    let user_id = UserId::new(args.user);
    let user = store
        .get_user(&user_id)?
        .with_context(|| format!("No user found with id '{}'", user_id))?;

    let stats = engine
        .stats_for_user(store.as_ref(), &user_id)
        .context("failed to compute stats")?;
    let suggestions = engine
        .recommend_for_user(store.as_ref(), &user_id)
        .context("failed to build suggestions")?;

    let report = Report {
        user,
        stats,
        suggestions,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}

fn print_text(report: &Report) {
    let Report {
        user,
        stats,
        suggestions,
    } = report;

    println!("Haven report for {} ({})", user.name, user.id);

    println!("\nProgress");
    println!("  Current streak:  {} day(s)", stats.current_streak);
    println!(
        "  Total sessions:  {} (mood {}, journal {}, breathing {})",
        stats.total_sessions, stats.mood_total, stats.journal_total, stats.breathing_total
    );
    println!("  Adopted hobbies: {}", stats.hobby_total);

    println!("\nEmotional state");
    println!("  Mood context:    {}", suggestions.mood_context);
    println!("  Average mood:    {:.2}", suggestions.average_mood);
    if !suggestions.emotional_patterns.is_empty() {
        let patterns = suggestions
            .emotional_patterns
            .iter()
            .map(|(tag, count)| format!("{} x{}", tag, count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  Patterns:        {}", patterns);
    }

    println!("\nSuggestions");
    if suggestions.suggestions.is_empty() {
        println!("  (none)");
    }
    for (i, entry) in suggestions.suggestions.iter().enumerate() {
        println!(
            "  {}. {} [{}] boost {}, {}",
            i + 1,
            entry.name,
            entry.category,
            entry.mood_boost,
            entry.time_commitment
        );
    }

    for line in &suggestions.recommendations {
        println!("\n{}", line);
    }

    if !suggestions.support_resources.is_empty() {
        println!("\nSupport");
        for resource in &suggestions.support_resources {
            println!(
                "  - {}: {} ({})",
                resource.name, resource.contact, resource.description
            );
        }
    }
}
