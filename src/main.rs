use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use rs_arm4_kinematics::kinematic_traits::{Joints, Kinematics, Position};
use rs_arm4_kinematics::settings::ArmSettings;
use rs_arm4_kinematics::simulation::{simulated_arm, SimulatedEdge};
use rs_arm4_kinematics::utils::{dump_joints, dump_position};

/// Kinematics and motion routines of a four axis arm, run on simulated servos.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// YAML file with the arm geometry and servo calibration. The desk arm is used if absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the settings in use as YAML
    Settings,

    /// End effector position for the joint angles (base, shoulder, elbow, wrist), degrees
    Fk {
        #[arg(num_args = 4, required = true, allow_negative_numbers = true)]
        joints: Vec<f64>,
    },

    /// Joint angles for the end effector position
    Ik {
        #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
        position: Vec<f64>,
    },

    /// Step along a line from start towards end, heading in degrees
    Line {
        #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
        start: Vec<f64>,
        #[arg(long, num_args = 3, required = true, allow_negative_numbers = true)]
        end: Vec<f64>,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        heading: f64,
        /// Overrides the number of points from the settings
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Move to begin, then sweep the configured joint towards the target angle
    Sweep {
        #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
        begin: Vec<f64>,
        #[arg(long, allow_negative_numbers = true)]
        target: f64,
        /// Simulated sensor fires on this poll; never if absent
        #[arg(long)]
        detect_on: Option<usize>,
    },
}

fn position(values: &[f64]) -> anyhow::Result<Position> {
    match values {
        [x, y, z] => Ok(Position::new(*x, *y, *z)),
        _ => bail!("expected x, y and z, got {} values", values.len()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rs_arm4_kinematics=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => ArmSettings::from_yaml_file(path)
            .with_context(|| format!("reading settings from {}", path.display()))?,
        None => ArmSettings::default(),
    };

    match args.command {
        Command::Settings => print!("{}", settings.to_yaml()),
        Command::Fk { joints } => {
            let joints: Joints = joints
                .try_into()
                .map_err(|v: Vec<f64>| anyhow::anyhow!("expected 4 joint angles, got {}", v.len()))?;
            dump_position(&settings.kinematics().forward(&joints));
        }
        Command::Ik { position: target } => {
            let joints = settings.kinematics().inverse(&position(&target)?)?;
            dump_joints(&joints);
        }
        Command::Line { start, end, heading, steps } => {
            let mut arm = simulated_arm(&settings)?;
            if let Some(steps) = steps {
                arm.line.steps = steps;
            }
            let visited = arm.interpolate_line(&position(&start)?, &position(&end)?, heading)?;
            info!("visited {} points", visited.len());
            for point in &visited {
                dump_position(point);
            }
        }
        Command::Sweep { begin, target, detect_on } => {
            let mut arm = simulated_arm(&settings)?;
            let mut edge = match detect_on {
                Some(poll) => SimulatedEdge::detect_on(poll),
                None => SimulatedEdge::never(),
            };
            let outcome = arm.sweep(&position(&begin)?, target, &mut edge)?;
            println!("{}", if outcome.detected() { "detected" } else { "reached" });
            dump_position(&outcome.position());
        }
    }
    Ok(())
}
