use clap::Parser;
use forest_fire_core::{
    run_ensemble, AutomatonConfig, Cell, CellGrid, EnsembleSummary, FireAutomaton,
    StatisticsRecord,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Forest fire cellular automaton demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Probabilistic forest fire cellular automaton", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 120)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 120)]
    height: usize,

    /// Probability that a cell starts as forest
    #[arg(short = 'f', long, default_value_t = 0.55)]
    forest_density: f64,

    /// Probability that a forested cell starts burning
    #[arg(short = 'i', long, default_value_t = 0.0004)]
    ignition_density: f64,

    /// Spread probability from an orthogonal neighbor
    #[arg(long, default_value_t = 0.92)]
    direct: f64,

    /// Spread probability from a diagonal neighbor
    #[arg(long, default_value_t = 0.82)]
    diagonal: f64,

    /// Per-step spontaneous ignition probability for trees
    #[arg(long, default_value_t = 0.0)]
    spontaneous: f64,

    /// Per-step regrowth probability for empty cells
    #[arg(long, default_value_t = 0.0)]
    regrowth: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of steps to run (upper bound with --until-extinguished)
    #[arg(short = 'n', long, default_value_t = 100)]
    steps: u64,

    /// Stop as soon as nothing is burning
    #[arg(short, long)]
    until_extinguished: bool,

    /// Ignite the center cell (on top of random ignition)
    #[arg(long)]
    center_fire: bool,

    /// Draw the grid as text after every step
    #[arg(short, long)]
    render: bool,

    /// Write the statistics history as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Run an ensemble of this many seeds instead of a single automaton.
    /// Each member stops at extinction or after --steps steps.
    #[arg(long, conflicts_with_all = ["until_extinguished", "center_fire", "render"])]
    runs: Option<usize>,
}

impl Args {
    fn config(&self) -> AutomatonConfig {
        AutomatonConfig {
            width: self.width,
            height: self.height,
            forest_density: self.forest_density,
            ignition_density: self.ignition_density,
            direct_spread_probability: self.direct,
            diagonal_spread_probability: self.diagonal,
            spontaneous_ignition_probability: self.spontaneous,
            regrowth_probability: self.regrowth,
            seed: self.seed,
        }
    }
}

/// Text glyph for a cell; the presentation layer's only view of state.
fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Tree => '♣',
        Cell::Fire => '*',
        Cell::Empty => '.',
    }
}

fn render(grid: &CellGrid) {
    for row in grid.rows() {
        let line: String = row.iter().map(|&c| glyph(c)).collect();
        println!("{line}");
    }
    println!();
}

fn print_record(record: &StatisticsRecord) {
    println!(
        "{} trees, {} burning and {} empty in frame {} ({} burned so far)",
        record.trees, record.burning, record.empty, record.frame, record.burned
    );
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))
}

fn run_single(args: &Args) -> Result<(), String> {
    let config = args.config();
    let mut automaton = if args.center_fire {
        let mut rng = forest_fire_core::random::seeded_rng(config.seed);
        let mut grid = CellGrid::new(
            config.width,
            config.height,
            config.forest_density,
            config.ignition_density,
            &mut rng,
        )
        .map_err(|e| e.to_string())?;
        grid.set(config.width / 2, config.height / 2, Cell::Fire)
            .map_err(|e| e.to_string())?;
        FireAutomaton::from_grid(config, grid)
    } else {
        FireAutomaton::new(config)
    }
    .map_err(|e| e.to_string())?;

    println!("=== Forest Fire Automaton ===\n");
    print_record(&automaton.current_statistics());
    if args.render {
        render(automaton.grid());
    }

    for _ in 0..args.steps {
        if args.until_extinguished && automaton.is_extinguished() {
            break;
        }
        let record = automaton.step();
        print_record(&record);
        if args.render {
            render(automaton.grid());
        }
    }

    let last = automaton.current_statistics();
    println!(
        "\nFinished at frame {}: {} cells burned, peak {} burning at once",
        last.frame,
        last.burned,
        automaton.peak_burning()
    );

    if let Some(path) = &args.json {
        write_json(path, automaton.history())?;
        println!("History written to {}", path.display());
    }
    Ok(())
}

fn run_batch(args: &Args, runs: usize) -> Result<(), String> {
    let config = args.config();
    let results = run_ensemble(&config, runs, args.steps).map_err(|e| e.to_string())?;

    println!("=== Forest Fire Ensemble ({runs} runs) ===\n");
    for run in &results {
        if let Some(last) = run.final_record() {
            println!(
                "seed {:>6}: {:>6} burned over {:>4} frames (peak {})",
                run.seed,
                last.burned,
                last.frame,
                run.peak_burning()
            );
        }
    }

    if let Some(summary) = EnsembleSummary::from_runs(&results) {
        println!(
            "\nMean burned {:.1} (min {}, max {}), mean peak {:.1}, mean frames {:.1}, {}/{} extinguished",
            summary.mean_burned,
            summary.min_burned,
            summary.max_burned,
            summary.mean_peak_burning,
            summary.mean_frames,
            summary.extinguished_runs,
            summary.runs
        );
    }

    if let Some(path) = &args.json {
        write_json(path, &results)?;
        println!("Ensemble histories written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let outcome = match args.runs {
        Some(runs) => run_batch(&args, runs),
        None => run_single(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_runs_rejects_single_run_flags() {
        for flag in ["--until-extinguished", "--center-fire", "--render"] {
            let result = Args::try_parse_from(["forest-fire-demo", "--runs", "4", flag]);
            assert!(result.is_err(), "{flag} should conflict with --runs");
        }

        let args = Args::try_parse_from(["forest-fire-demo", "--runs", "4", "--steps", "50"]).unwrap();
        assert_eq!(args.runs, Some(4));
        assert_eq!(args.steps, 50);
    }
}
