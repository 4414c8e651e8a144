use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use hl_project::Project;
use hl_sim::{LoopConstants, LoopSnapshot, RunOptions, run_with_progress};

mod compile;
mod error;
mod export;

use error::{AppError, AppResult};
use export::Format;

#[derive(Parser)]
#[command(name = "hydroloop")]
#[command(about = "HydroLoop CLI - solar water heating loop simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a project file describing the default loop
    Init {
        /// Destination (.yaml or .json)
        project_path: PathBuf,
        /// Project name
        #[arg(long, default_value = "solar loop")]
        name: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a project file
    Validate {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Print the discretisation derived from a project
    Info {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Run a simulation and export the recorded states
    Run {
        /// Path to the project file
        project_path: PathBuf,
        /// Number of ticks (overrides the project)
        #[arg(long)]
        ticks: Option<usize>,
        /// Record every K-th tick (overrides the project)
        #[arg(long)]
        record_every: Option<usize>,
        /// Start with the pump switched off
        #[arg(long)]
        pump_off: bool,
        /// Pace ticks in wall-clock time
        #[arg(long)]
        realtime: bool,
        /// Playback speed relative to real time; implies --realtime
        #[arg(long)]
        dilation: Option<f64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            project_path,
            name,
            force,
        } => cmd_init(&project_path, &name, force),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Info { project_path } => cmd_info(&project_path),
        Commands::Run {
            project_path,
            ticks,
            record_every,
            pump_off,
            realtime,
            dilation,
            format,
            output,
        } => {
            let overrides = RunOverrides {
                ticks,
                record_every,
                pump_off,
                realtime,
                dilation,
            };
            cmd_run(&project_path, &overrides, format, output.as_deref())
        }
    }
}

struct RunOverrides {
    ticks: Option<usize>,
    record_every: Option<usize>,
    pump_off: bool,
    realtime: bool,
    dilation: Option<f64>,
}

impl RunOverrides {
    fn apply(&self, project: &mut Project) {
        let run = &mut project.run;
        if let Some(ticks) = self.ticks {
            run.ticks = ticks;
        }
        if let Some(every) = self.record_every {
            run.record_every = every;
        }
        if self.pump_off {
            run.pump_on = false;
        }
        match self.dilation {
            Some(d) => run.time_dilation = Some(d),
            None if self.realtime && run.time_dilation.is_none() => run.time_dilation = Some(1.0),
            None => {}
        }
    }
}

fn cmd_init(project_path: &Path, name: &str, force: bool) -> AppResult<()> {
    if project_path.exists() && !force {
        return Err(AppError::Exists {
            path: project_path.to_path_buf(),
        });
    }
    let project = Project::new(name);
    hl_project::save(project_path, &project)?;
    println!("✓ Wrote {}", project_path.display());
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = hl_project::load(project_path)?;
    // Schema checks passed during load; the discretisation may still be unstable.
    LoopConstants::derive(&compile::loop_params(&project.loop_def))?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_info(project_path: &Path) -> AppResult<()> {
    let project = hl_project::load(project_path)?;
    let sim = compile::build(&project)?;
    let c = sim.constants();

    println!("Project: {}", project.name);
    println!(
        "  Nodes: collector={} pipes={}+{} tank={} (total {})",
        c.collector_nodes,
        c.pipe_nodes,
        c.pipe_nodes,
        c.tank_nodes,
        c.total_nodes()
    );
    println!("  Node volume: {:.6} m^3 ({:.3} kg)", c.node_volume_m3, c.node_mass_kg);
    println!("  Tick (transit time): {:.3} s", c.dt_s);
    println!("  Tank layer height: {:.4} m", c.node_height_m);
    println!("  Layer conductance (A/dz): {:.4} m", c.conductance);
    println!("  Stability ratio: {:.4}", c.stability_ratio);
    if let Some(dilation) = project.run.time_dilation {
        let interval = sim.playback_interval(dilation)?;
        println!(
            "  Playback: {:.1}x, {:.3} s per tick",
            dilation,
            interval.as_secs_f64()
        );
    }
    Ok(())
}

fn cmd_run(
    project_path: &Path,
    overrides: &RunOverrides,
    format: Format,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut project = hl_project::load(project_path)?;
    overrides.apply(&mut project);
    hl_project::validate_project(&project).map_err(hl_project::ProjectError::from)?;

    let mut sim = compile::build(&project)?;
    let opts = compile::run_options(&project.run);
    tracing::info!(
        project = %project.name,
        ticks = opts.ticks,
        record_every = opts.record_every,
        pump_on = project.run.pump_on,
        "starting run"
    );
    let dt = sim.constants().dt_s;
    let total_s = opts.ticks as f64 * dt;
    let show_progress = output.is_some();

    eprintln!(
        "Running {} ticks of {:.1} s ({:.1} h simulated)",
        opts.ticks,
        dt,
        total_s / 3600.0
    );

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let record = run_with_progress(
        &mut sim,
        &opts,
        Some(&mut |snap: &LoopSnapshot| {
            if show_progress && last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(snap, total_s, &opts);
                last_emit = Instant::now();
            }
        }),
    )?;
    if show_progress {
        clear_progress_line();
    }

    let rendered = export::render(&record, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| AppError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            eprintln!(
                "✓ Exported {} snapshots to {}",
                record.snapshots.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    eprintln!(
        "  Ticks run: {}  Solar energy: {:.1} kJ  Wall time: {:.2} s",
        record.ticks_run,
        record.solar_energy_j / 1e3,
        started.elapsed().as_secs_f64()
    );
    if let Some(last) = record.last() {
        eprintln!(
            "  Tank top {:.2} °C  mean {:.2} °C  bottom {:.2} °C",
            last.tank_top().unwrap_or(f64::NAN),
            last.tank_mean().unwrap_or(f64::NAN),
            last.tank_bottom().unwrap_or(f64::NAN)
        );
    }
    Ok(())
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(120));
    let _ = io::stderr().flush();
}

fn render_cli_progress(snap: &LoopSnapshot, total_s: f64, opts: &RunOptions) {
    let fraction = if total_s > 0.0 {
        (snap.elapsed_s / total_s).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let width = 28usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    eprint!(
        "\r[{}] {:>6.2}%  t={:.0}/{:.0}s  pump={}  top={:.2}°C  bottom={:.2}°C  every={}",
        bar,
        fraction * 100.0,
        snap.elapsed_s,
        total_s,
        if snap.pump_on { "on" } else { "off" },
        snap.tank_top().unwrap_or(f64::NAN),
        snap.tank_bottom().unwrap_or(f64::NAN),
        opts.record_every
    );
    let _ = io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides() -> RunOverrides {
        RunOverrides {
            ticks: None,
            record_every: None,
            pump_off: false,
            realtime: false,
            dilation: None,
        }
    }

    #[test]
    fn no_overrides_keep_project_run() {
        let mut project = Project::new("p");
        let before = project.run.clone();
        overrides().apply(&mut project);
        assert_eq!(project.run, before);
    }

    #[test]
    fn realtime_defaults_to_unit_dilation() {
        let mut project = Project::new("p");
        RunOverrides {
            realtime: true,
            ..overrides()
        }
        .apply(&mut project);
        assert_eq!(project.run.time_dilation, Some(1.0));
    }

    #[test]
    fn explicit_overrides_win() {
        let mut project = Project::new("p");
        project.run.time_dilation = Some(50.0);
        RunOverrides {
            ticks: Some(5),
            record_every: Some(2),
            pump_off: true,
            realtime: true,
            dilation: Some(200.0),
        }
        .apply(&mut project);
        assert_eq!(project.run.ticks, 5);
        assert_eq!(project.run.record_every, 2);
        assert!(!project.run.pump_on);
        assert_eq!(project.run.time_dilation, Some(200.0));
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "hydroloop", "run", "loop.yaml", "--ticks", "10", "--format", "json", "--pump-off",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                ticks,
                format,
                pump_off,
                ..
            } => {
                assert_eq!(ticks, Some(10));
                assert_eq!(format, Format::Json);
                assert!(pump_off);
            }
            _ => panic!("expected run"),
        }
    }
}
