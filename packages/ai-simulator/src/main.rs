//! AI Simulator CLI - plays AI-only Shithead matches in memory.
//!
//! Useful for comparing tiers: every match is dealt from a seed, driven by
//! the local coordinator to the end, and reported per seat.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::Parser;
use metrics::build_game_metrics;
use output::OutputWriter;
use shithead_backend::ai::{AiConfig, Difficulty};
use shithead_backend::services::local_match::MatchRules;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{AiTier, OutputFormat};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "In-memory AI-vs-AI Shithead simulator")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seats at the table (2-8)
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(2..=8))]
    players: u8,

    /// AI tier for every seat
    #[arg(long, conflicts_with = "seat_tiers")]
    seats: Option<AiTier>,

    /// Comma-separated tier per seat, e.g. `hard,easy,medium`; missing seats
    /// use the `--ai-config` tier, else medium
    #[arg(long, value_delimiter = ',')]
    seat_tiers: Vec<AiTier>,

    /// Base seed; match `n` uses `seed + n` for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Default AI config as JSON, e.g. `{"difficulty": "hard", "seed": 7}`;
    /// `--seed` takes precedence over its seed
    #[arg(long, value_parser = parse_ai_config)]
    ai_config: Option<AiConfig>,

    /// Jacks reverse the direction of play
    #[arg(long)]
    reverse_on_jack: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit structured JSON logs filtered by `RUST_LOG` instead of plain text
    #[arg(long)]
    json_logs: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn parse_ai_config(raw: &str) -> Result<AiConfig, String> {
    let json: serde_json::Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if !json.is_object() {
        return Err("AI config must be a JSON object".into());
    }
    Ok(AiConfig::from_json(Some(&json)))
}

impl Args {
    fn tiers(&self) -> Vec<Difficulty> {
        let fallback = self
            .ai_config
            .as_ref()
            .map_or(Difficulty::Medium, AiConfig::difficulty);
        (0..usize::from(self.players))
            .map(|seat| {
                self.seats
                    .or_else(|| self.seat_tiers.get(seat).copied())
                    .map_or(fallback, Difficulty::from)
            })
            .collect()
    }

    fn base_seed(&self) -> Option<u64> {
        self.seed.or_else(|| self.ai_config.as_ref().and_then(AiConfig::seed))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        shithead_backend::telemetry::init_tracing();
    } else {
        // Silent by default, only warnings and errors
        let filter = if args.verbose {
            "debug"
        } else if args.show_output {
            "info"
        } else {
            "warn"
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let tiers = args.tiers();
    let ai_types: Vec<String> = tiers.iter().map(|t| t.ai_name().to_string()).collect();
    let rules = MatchRules {
        reverse_on_jack: args.reverse_on_jack,
    };
    if args.show_output {
        info!(games = args.games, seats = ?ai_types, "Starting AI simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = match args.base_seed() {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        match Simulator::new(seed, tiers.clone(), rules).simulate_game() {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    seed,
                    ai_types.clone(),
                    args.games,
                    rules.reverse_on_jack,
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game_num, seed, loser = ?result.loser, "Match completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game_num, seed, "Match failed: {e}");
            }
        }
    }

    let elapsed = start.elapsed();
    let (detail_path, summary_path) = output_writer.output_paths();
    let detail_path = detail_path.to_path_buf();
    let summary_path = summary_path.to_path_buf();
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", detail_path.display());
        info!("Summary CSV written to: {}", summary_path.display());
        print_summary(&results, &ai_types, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(
    results: &[GameResult],
    ai_types: &[String],
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!("Average time per match: {:?}", elapsed / results.len() as u32);

    let mut losses = vec![0u32; ai_types.len()];
    let mut firsts = vec![0u32; ai_types.len()];
    let mut turns = 0u64;
    for result in results {
        if let Some(seat) = result.loser {
            losses[seat] += 1;
        }
        if let Some(&seat) = result.finish_order.first() {
            firsts[seat] += 1;
        }
        turns += u64::from(result.counts.turns);
    }
    println!("Average turns: {:.1}", turns as f64 / results.len() as f64);

    println!("\n=== Results by Seat ===");
    for (seat, ai_type) in ai_types.iter().enumerate() {
        let loss_rate = f64::from(losses[seat]) / results.len() as f64 * 100.0;
        println!(
            "Seat {seat} ({ai_type}): lost={} ({loss_rate:.1}%), first out={}",
            losses[seat], firsts[seat]
        );
    }
}
