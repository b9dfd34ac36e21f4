use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use nugget_core::{InputJournal, ReplayResult, replay_to_end};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input journal JSON file to replay
    #[arg(short, long)]
    journal: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal))?;
    let journal: InputJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;

    let result: ReplayResult =
        replay_to_end(&journal).map_err(|e| anyhow::anyhow!("Replay failed: {e}"))?;

    println!("Replay complete.");
    println!("Final Level: {}", result.final_level);
    println!("Final Score: {}", result.final_score);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
