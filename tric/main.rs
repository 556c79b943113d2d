use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, trace};

use tri::clock::Accumulator;
use tri::prelude::*;
use tri::scenario::Scenario;

/// Headless host for the sphere simulator: runs a scene with a fixed
/// timestep and logs where everything is.
#[derive(Parser, Debug)]
struct Args {
	/// Scenario file; the built-in three-ball scene when omitted.
	#[arg(short, long)]
	file: Option<PathBuf>,

	/// Stop after this many frames even if nothing crossed the boundary.
	#[arg(long, default_value_t = 3600)]
	frames: u32,

	/// Frame length in seconds fed to the accumulator.
	#[arg(long, default_value_t = 1.0 / 60.0)]
	frame_time: f64,

	/// Force along +x applied to body 0 before the first tick.
	#[arg(long, default_value_t = 5.0)]
	kick: Scalar,

	/// Log at debug level.
	#[arg(short, long)]
	verbose: bool,
}

fn setup_logging(level: log::LevelFilter) -> Result<()> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"{}[{}][{}] {}",
				chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
				record.target(),
				record.level(),
				message
			))
		})
		.level(level)
		.chain(std::io::stdout())
		.apply()?;
	Ok(())
}

fn load(args: &Args) -> Result<Scenario> {
	match &args.file {
		Some(path) => Scenario::load(path).with_context(|| format!("loading scenario {}", path.display())),
		None => Ok(Scenario::three_body()),
	}
}

/// Stand-in for the renderer: reads the scene without touching it.
/// `alpha` is how far the frame sits between the last tick and the next.
fn draw(frame: u32, alpha: f64, system: &System) {
	let light = system.light_position();
	trace!(
		"frame {} alpha {:.3} light at ({:.2}, {:.2}, {:.2})",
		frame,
		alpha,
		light.x,
		light.y,
		light.z
	);
	for (i, b) in system.bodies().iter().enumerate() {
		if Some(i) == system.light() {
			continue;
		}
		debug!(
			"frame {} {} pos=({:.3}, {:.3}, {:.3}) |v|={:.3}",
			frame,
			b.name,
			b.pos.x,
			b.pos.y,
			b.pos.z,
			b.vel.norm()
		);
	}
}

fn main() -> Result<()> {
	let args = Args::parse();
	setup_logging(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })?;

	let scenario = load(&args)?;
	let mut system = scenario.build().context("building scene")?;
	info!("loaded {} bodies", system.bodies().len());

	if !system.bodies().is_empty() && args.kick != 0.0 {
		system.push(0, Vec3::new(args.kick, 0.0, 0.0))?;
	}

	let mut clock = Accumulator::from_config(system.physics().config(), 8);
	let mut frame = 0;
	while !system.should_close() && frame < args.frames {
		for _ in 0..clock.advance(args.frame_time) {
			let report = system.step()?;
			for (a, b) in &report.collisions {
				info!("collision between {} and {}", system.bodies()[*a].name, system.bodies()[*b].name);
			}
			if report.terminated() {
				break;
			}
		}
		draw(frame, clock.alpha(), &system);
		frame += 1;
	}

	info!(
		"finished after {} frames, {} ticks, kinetic energy {:.4}",
		frame,
		system.physics().ticks(),
		system.kinetic_energy()
	);
	Ok(())
}
