use anyhow::ensure;
use clap::Parser;
use tempotris_engine::{BoardConfig, BoardSnapshot, Cell};
use tempotris_pilot::Simulation;

/// Headless autoplay driver. Runs the simulation for a fixed stretch of
/// simulated time at a fixed frame rate and periodically prints board
/// snapshots, as text or as JSON.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct CommandArgs {
    /// Board height in rows
    #[arg(long, default_value_t = 20)]
    rows: usize,
    /// Board width in columns
    #[arg(long, default_value_t = 10)]
    cols: usize,
    /// Full rows required before a clear happens
    #[arg(long, default_value_t = 1)]
    min_lines: usize,
    /// Disable line clearing (pure stacking mode)
    #[arg(long)]
    no_line_clear: bool,
    /// Tempo driving the decision pace, in beats per minute
    #[arg(long, default_value_t = 120.0)]
    tempo_bpm: f32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Simulated run time in seconds
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,
    /// Bag seed; omit for a random run
    #[arg(long)]
    seed: Option<u64>,
    /// Print a snapshot every N simulated seconds (0 disables)
    #[arg(long, default_value_t = 5.0)]
    snapshot_every: f32,
    /// Print snapshots as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    ensure!(args.rows >= 4 && args.cols >= 4, "the board must be at least 4x4");
    ensure!(args.fps > 0.0, "--fps must be positive");
    ensure!(args.seconds > 0.0, "--seconds must be positive");
    ensure!(args.snapshot_every >= 0.0, "--snapshot-every must not be negative");

    let config = BoardConfig {
        rows: args.rows,
        cols: args.cols,
        min_lines_to_clear: args.min_lines,
        line_clear_enabled: !args.no_line_clear,
    };
    let mut simulation = match args.seed {
        Some(seed) => Simulation::with_seed(config, seed),
        None => Simulation::new(config),
    };

    let dt = 1.0 / args.fps;
    let mut clock = 0.0_f32;
    let mut next_snapshot = args.snapshot_every;
    while clock < args.seconds {
        simulation.tick(dt, args.tempo_bpm);
        clock += dt;
        if args.snapshot_every > 0.0 && clock >= next_snapshot {
            next_snapshot += args.snapshot_every;
            print_snapshot(&simulation.snapshot(), clock, args.json)?;
        }
    }

    let stats = simulation.stats();
    eprintln!(
        "{clock:.1}s simulated: {} pieces locked, {} rows cleared, {} resets",
        stats.pieces_locked, stats.rows_cleared, stats.resets,
    );
    Ok(())
}

fn print_snapshot(snapshot: &BoardSnapshot, clock: f32, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }
    println!("t={clock:.1}s");
    for row in 0..snapshot.rows {
        let line: String = (0..snapshot.cols)
            .map(|col| match snapshot.cell(row, col) {
                Cell::Empty => '.',
                Cell::Piece(kind) => kind.as_char(),
            })
            .collect();
        println!("{line}");
    }
    println!();
    Ok(())
}
