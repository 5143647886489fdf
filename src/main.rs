use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use camera_shake::config::{Preset, ShakeConfig};
use camera_shake::controller::ShakeController;
use camera_shake::error::ShakeError;
use camera_shake::recorder::Recording;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play back a camera shake and export its offsets", long_about = None)]
struct Args {
    /// Built-in shake: light, medium, heavy or earthquake
    #[arg(long, default_value = "medium", conflicts_with = "config")]
    preset: Preset,

    /// JSON shake configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for phase randomization
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second to simulate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Where to write the per-frame CSV
    #[arg(long, default_value = "shake.csv")]
    output: PathBuf,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Also write the effective configuration to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ShakeError> {
    let (config, title) = match &args.config {
        Some(path) => (ShakeConfig::load(path)?, path.display().to_string()),
        None => (ShakeConfig::preset(args.preset), args.preset.to_string()),
    };
    config.validate()?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!("Saved config to {}", path.display());
    }
    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }
    let mut controller = match args.seed {
        Some(seed) => ShakeController::with_seed(config, seed),
        None => ShakeController::new(config),
    };
    let recording = Recording::capture(&mut controller, args.fps)?;
    recording.save_csv(&title, &args.output)?;
    let peak = recording.peak_offset();
    info!(
        "Wrote {} frames to {}, peak offset {:.3} {:.3} {:.3}",
        recording.samples.len(),
        args.output.display(),
        peak.x,
        peak.y,
        peak.z
    );
    Ok(())
}
