#![deny(unsafe_code)]
//! Headless driver for the liquid-lab particle simulation.
//!
//! Subcommands:
//! - `run`: simulate N frames under a scripted pointer, write the last frame as PNG
//! - `params`: print the tuning schema and recognized field modes

mod error;
mod script;
mod summary;

use clap::{Parser, Subcommand};
use error::CliError;
use liquid_lab_core::DVec2;
use liquid_lab_field::{drive_with, FieldMode, FieldTuning, FrameQueue, Seed, Session};
use liquid_lab_raster::snapshot::write_png;
use liquid_lab_raster::Raster;
use log::info;
use script::{parse_point, PointerScript};
use std::fs;
use std::path::PathBuf;
use std::process;
use summary::RunSummary;

#[derive(Parser)]
#[command(name = "liquid-lab", about = "Pointer-driven particle field simulation")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a number of frames and write the final frame as PNG.
    Run(RunArgs),
    /// Print the tuning knobs and the recognized field modes.
    Params,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Surface width in display pixels.
    #[arg(short = 'W', long, default_value_t = 800.0)]
    width: f64,

    /// Surface height in display pixels.
    #[arg(short = 'H', long, default_value_t = 600.0)]
    height: f64,

    /// Number of particles.
    #[arg(short, long, default_value_t = liquid_lab_field::config::DEFAULT_PARTICLE_COUNT)]
    count: usize,

    /// Field mode: attract (magnet) or repel (fluid).
    #[arg(short, long, default_value = "repel")]
    mode: String,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 300)]
    ticks: usize,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Display density (device pixel ratio).
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Tuning overrides as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Pointer position "X,Y" in display pixels; omitted means no pointer.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<DVec2>,

    /// Circle the pointer around its position at this radius.
    #[arg(long, default_value_t = 0.0)]
    orbit: f64,

    /// Release the pointer before this tick.
    #[arg(long)]
    leave_at: Option<usize>,

    /// Pace frames in real time instead of running flat out.
    #[arg(long)]
    live: bool,

    /// Load the run description from a seed file; overrides the
    /// simulation flags above.
    #[arg(long)]
    seed_file: Option<PathBuf>,

    /// Save the run description to this path.
    #[arg(long)]
    save_seed: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short, long, default_value = "liquid-lab.png")]
    output: PathBuf,
}

impl RunArgs {
    fn to_seed(&self) -> Result<Seed, CliError> {
        if let Some(path) = &self.seed_file {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
            return serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())));
        }
        let tuning: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mode: FieldMode = self.mode.parse()?;
        Ok(Seed {
            density: self.density,
            particle_count: self.count,
            mode,
            tuning,
            ticks: self.ticks,
            frame_ms: self.frame_ms,
            ..Seed::new(self.width, self.height, self.seed)
        })
    }

    /// Pointer script in simulation space.
    fn pointer_script(&self, density: f64) -> Option<PointerScript> {
        self.pointer.map(|center| PointerScript {
            center: center * density,
            orbit: self.orbit * density,
            leave_at: self.leave_at,
        })
    }
}

fn run_simulation(args: RunArgs, json: bool) -> Result<(), CliError> {
    let seed = args.to_seed()?;
    seed.validate()?;

    if let Some(path) = &args.save_seed {
        let text = serde_json::to_string_pretty(&seed)?;
        fs::write(path, text)
            .map_err(|e| CliError::Io(format!("writing {}: {e}", path.display())))?;
    }

    let size = seed.surface_size()?;
    let raster = Raster::new(size.width().ceil() as usize, size.height().ceil() as usize)?;
    let mut session = Session::new(
        FrameQueue::new(seed.frame_ms),
        raster,
        size,
        seed.field_tuning(),
        seed.seed,
    );
    session.start(seed.config(), size)?;
    info!(
        "running {} particles in {} mode for {} ticks",
        seed.particle_count, seed.mode, seed.ticks
    );

    let script = args.pointer_script(seed.density);
    let report = drive_with(&mut session, seed.ticks, args.live, |tick, s| {
        match script.map(|sc| sc.position(tick)) {
            Some(Some(at)) => s.pointer_move(at.x, at.y),
            Some(None) => s.pointer_leave(),
            None => {}
        }
    });

    let summary = RunSummary::measure(&session);
    write_png(session.surface(), &args.output)?;
    session.stop();

    if json {
        let info = serde_json::json!({
            "seed": seed,
            "summary": summary,
            "ignored_frames": report.ignored,
            "output": args.output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "{} ticks ({} dropped), {} particles, mean displacement {:.3}, max speed {:.3}",
            summary.ticks,
            summary.dropped_frames,
            summary.particles,
            summary.mean_displacement,
            summary.max_speed
        );
        eprintln!(
            "{} mode, seed {} -> {}",
            seed.mode,
            seed.seed,
            args.output.display()
        );
    }
    Ok(())
}

fn print_params(json: bool) -> Result<(), CliError> {
    let schema = FieldTuning::param_schema();
    let modes: Vec<&str> = FieldMode::ALL.iter().map(|m| m.name()).collect();
    if json {
        let info = serde_json::json!({
            "modes": modes,
            "params": schema,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("Modes:");
    println!("  {}", modes.join(", "));
    println!("Params:");
    if let Some(knobs) = schema.as_object() {
        for (name, knob) in knobs {
            println!(
                "  {name:<22} default {:<8} {}",
                knob["default"].to_string(),
                knob["description"].as_str().unwrap_or_default()
            );
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run(args) => run_simulation(args, cli.json),
        Command::Params => print_params(cli.json),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
