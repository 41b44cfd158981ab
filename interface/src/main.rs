mod args;
mod config;
mod error;

use std::process::ExitCode;

use brain::ArmController;
use clap::Parser;
use kinematics::Dof6Kinematics;
use log::{error, info};

use crate::args::CliArgs;
use crate::config::ArmConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(angles) => {
            println!("{}", format_angles(&angles));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Solves one request and returns the chosen joint angles in degrees.
fn run(args: &CliArgs) -> Result<[f64; 6], CliError> {
    let request = args.request()?;
    let config = match &args.config {
        Some(path) => ArmConfig::load(path)?,
        None => ArmConfig::default(),
    };

    let solver = Dof6Kinematics::with_limits(config.geometry, config.joint_limits()?)?;
    let mut controller =
        ArmController::new(solver, request.last_joints).with_retreat(config.retreat());

    let joints = if args.retreat {
        let outcome = controller.command_with_retreat(&request.target)?;
        if outcome.steps > 0 {
            info!(
                "target retreated {} steps to ({:.3}, {:.3}, {:.3})",
                outcome.steps, outcome.target.x, outcome.target.y, outcome.target.z
            );
        }
        outcome.joints
    } else {
        controller.command(&request.target)?
    };
    Ok(joints.to_degrees())
}

fn format_angles(angles: &[f64; 6]) -> String {
    let values: Vec<String> = angles.iter().map(|a| format!("{a:.6}")).collect();
    format!("angles: {}", values.join(" "))
}
