//! Visitor Analytics - Report Entry Point
//!
//! Prints visitor statistics from the analytics data directory.

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use visitor_analytics::types::{display_name, StoreStats};
use visitor_analytics::utils::time::format_display;
use visitor_analytics::{AnalyticsConfig, AnalyticsTracker, FeedbackCollector, StoreResult};

#[derive(Parser)]
#[command(name = "analytics-report")]
#[command(about = "Show visitor statistics for the analytics data directory")]
#[command(version)]
struct Cli {
    /// Data directory (defaults to ./analytics)
    #[arg(long, env = "ANALYTICS_DIR")]
    data_dir: Option<PathBuf>,

    /// Window for the recent sessions count, in days
    #[arg(long, default_value = "7")]
    days: i64,

    /// Number of latest sessions to list
    #[arg(long, default_value = "5")]
    latest: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> StoreResult<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.data_dir {
        Some(dir) => AnalyticsConfig::new(dir),
        None => AnalyticsConfig::from_env(),
    }
    .with_summary_window(cli.days);
    debug!(data_dir = %config.data_dir().display(), "Reading analytics");

    let tracker = AnalyticsTracker::open_read_only(config.clone());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tracker.summarize())?);
        return Ok(());
    }

    let doc = tracker.load();
    let stats = tracker.store_stats();

    println!("Visitor statistics ({})", config.usage_path().display());
    println!("File size: {}", StoreStats::format_size(stats.file_size));
    println!();
    println!("Total sessions: {}", doc.session_count());
    println!("Sessions in the last {} days: {}", cli.days, tracker.sessions_in_last_days(cli.days));
    println!("Sessions today: {}", tracker.sessions_today());
    println!("Active in the last hour: {}", tracker.active_in_last_hour());

    let daily = tracker.daily_visits();
    if !daily.is_empty() {
        println!();
        println!("Daily visits:");
        for (day, count) in &daily {
            println!("  {}: {}", day, count);
        }
    }

    let hourly = tracker.hourly_distribution();
    if hourly.iter().any(|count| *count > 0) {
        println!();
        println!("Visits by hour (UTC):");
        for (hour, count) in hourly.iter().enumerate().filter(|(_, count)| **count > 0) {
            println!("  {:02}:00: {}", hour, count);
        }
    }

    let browsers = tracker.browser_breakdown();
    if !browsers.is_empty() {
        println!();
        println!("Browsers:");
        for (browser, count) in &browsers {
            println!("  {}: {}", browser, count);
        }
    }

    if !doc.features.is_empty() {
        println!();
        println!("Feature usage:");
        for (feature, count) in doc.features.by_usage() {
            println!("  {}: {} uses", display_name(feature), count);
        }
    }

    let latest = tracker.latest_sessions(cli.latest);
    if !latest.is_empty() {
        println!();
        println!("Latest sessions:");
        for session in &latest {
            println!("  {} - {}", format_display(&session.timestamp), session.short_id());
        }
    }

    let collector = FeedbackCollector::open_read_only(&config);
    let feedback = collector.feedback_stats();
    let contacts = collector.contact_stats();

    println!();
    println!(
        "Feedback: {} responses, average rating {:.1}",
        feedback.total_feedback, feedback.average_rating
    );
    println!(
        "Contacts: {} registered, {} newsletter subscribers",
        contacts.total_contacts, contacts.newsletter_subscribers
    );

    Ok(())
}
