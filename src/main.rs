use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tracing::info;

use lead_sift::cli::Args;
use lead_sift::dedup::{DedupConfig, Deduplicator};
use lead_sift::utils::io::{load_leads, to_json_pretty, write_all_or_nothing};
use lead_sift::utils::{format_duration, setup_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let start_time = Instant::now();

    let mut config = match &args.config {
        Some(path) => DedupConfig::from_file(path)?,
        None => DedupConfig::default(),
    };

    if args.verbose {
        config.verbosity = "verbose".to_string();
    }

    setup_logging(&config.verbosity)?;

    println!("🧙 Lead Sift");
    println!("🔍 Input: {}", args.input.display());
    println!("📝 Output: {}", args.output.display());
    println!("📜 Change log: {}", args.change_log.display());

    let leads = load_leads(&args.input).await?;
    info!("Loaded {} leads from {}", leads.len(), args.input.display());

    let deduplicator = Deduplicator::new(config);
    let outcome = deduplicator.run(leads)?;
    let indent = deduplicator.config().json_indent;

    let records_json = to_json_pretty(&outcome.records, indent)?;
    let change_log_json = to_json_pretty(&outcome.change_log, indent)?;
    write_all_or_nothing(&[
        (args.output.as_path(), records_json),
        (args.change_log.as_path(), change_log_json),
    ])
    .await?;

    let stats = &outcome.stats;
    let total_time = start_time.elapsed();

    println!("\n🎉 Deduplication completed successfully! 🎉");
    println!("=======================================");
    println!("📊 Total records: {}", stats.total_records);
    println!("✨ Unique records: {}", stats.unique_records);
    println!("🗑️ Duplicates removed: {} ({:.2}%)",
        stats.duplicates_removed,
        100.0 * stats.duplicates_removed as f64 / stats.total_records.max(1) as f64
    );
    println!("🔁 Overwrites: {} ({} without field changes)", stats.overwrites, stats.unchanged_overwrites);
    println!("🚮 Discarded as older: {}", stats.records_discarded);
    println!("📜 Change log entries: {}", outcome.change_log.len());
    println!("⏱️ Total time: {}", format_duration(total_time));

    Ok(())
}
