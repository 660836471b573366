mod cli_main;

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use bruijn::stats::calculate_stats;
use cli_main::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Setting tracing default failed")?;

    if let Some(config) = cli.command.assembly_config() {
        let start = Instant::now();
        let summary = bruijn::run(&config)
            .with_context(|| format!("Assembly of {} failed", config.input))?;
        info!(
            "Assembly completed in {:.2}s: {} contigs ({} bubbles, {} entry tips, {} exit tips resolved)",
            start.elapsed().as_secs_f32(),
            summary.contigs,
            summary.report.bubbles_resolved,
            summary.report.entry_tips_resolved,
            summary.report.exit_tips_resolved
        );
        return Ok(());
    }

    if let Commands::Stats { input, format } = &cli.command {
        info!("Calculating assembly statistics for: {}", input);
        let stats = calculate_stats(input)
            .with_context(|| format!("Could not read {}", input))?;

        match format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
            "tsv" => {
                println!("contigs\ttotal_len\tavg_len\tn50\tlongest");
                println!(
                    "{}\t{}\t{:.2}\t{}\t{}",
                    stats.total_contigs,
                    stats.total_length,
                    stats.average_length,
                    stats.n50,
                    stats.longest
                );
            }
            other => bail!("Unsupported format: {}", other),
        }
    }

    Ok(())
}
