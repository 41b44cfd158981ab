use std::path::PathBuf;

use clap::Parser;
use kinematics::{InputError, JOINT_COUNT, Joint6D, Pose6D};

/// Solve one target pose for a 6-DOF arm and print the joint angles closest
/// to the last ones.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(version, about)]
pub struct CliArgs {
    /// JSON arm description (geometry, joint limits, retreat settings).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pull an unreachable target toward the base until it can be reached.
    #[arg(long)]
    pub retreat: bool,

    /// pX pY pZ oA oB oC lastA1 .. lastA6, in mm and degrees.
    #[arg(
        value_name = "VALUE",
        required = true,
        num_args = JOINT_COUNT..,
        allow_negative_numbers = true
    )]
    pub values: Vec<f64>,
}

/// Target pose and last joint state, converted to radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    pub target: Pose6D,
    pub last_joints: Joint6D,
}

impl CliArgs {
    pub fn request(&self) -> Result<Request, InputError> {
        let Some((pose, joints)) = self.values.split_first_chunk::<6>() else {
            return Err(InputError::JointCount {
                expected: JOINT_COUNT,
                found: 0,
            });
        };
        let [x, y, z, roll, pitch, yaw] = *pose;
        let last_degrees = Joint6D::try_from(joints)?;
        Ok(Request {
            target: Pose6D::from_degrees(x, y, z, roll, pitch, yaw),
            last_joints: Joint6D::from_degrees(*last_degrees.as_array()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(line: &str) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("interface").chain(line.split_whitespace()))
    }

    #[test]
    fn test_parse_positional() {
        let args = parse("100 0 200 0 90 0 10 20 30 0 -45 0").unwrap();
        assert_eq!(args.config, None);
        assert!(!args.retreat);

        let request = args.request().unwrap();
        assert_eq!(request.target.x, 100.0);
        assert!((request.target.pitch - 90f64.to_radians()).abs() < 1e-12);
        assert!((request.last_joints[4] + 45f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_parse_flags() {
        let args = parse("--retreat --config arm.json 1 2 3 4 5 6 0 0 0 0 0 0").unwrap();
        assert!(args.retreat);
        assert_eq!(args.config, Some(PathBuf::from("arm.json")));
    }

    #[test]
    fn test_negative_leading_value() {
        let args = parse("-100 -5 200 -30 0 0 -10 0 0 0 0 0").unwrap();
        assert_eq!(args.values[0], -100.0);
        assert!((args.request().unwrap().last_joints[0] + 10f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_joint_count_mismatch_is_invalid_input() {
        let args = parse("1 2 3 4 5 6 0 0 0 0 0").unwrap();
        assert_eq!(
            args.request(),
            Err(InputError::JointCount {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn test_usage_errors() {
        for line in ["1 2 3", "--config", "--fast 1 2 3 4 5 6 0 0 0 0 0 0", ""] {
            let err = parse(line).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{line:?}");
        }
        assert_eq!(parse("--help").unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_non_numeric_argument() {
        let err = parse("1 2 abc 4 5 6 0 0 0 0 0 0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_nan_is_parsed_for_solver_to_reject() {
        let args = parse("NaN 0 200 0 0 0 0 0 0 0 0 0").unwrap();
        assert!(args.request().unwrap().target.x.is_nan());
    }
}
