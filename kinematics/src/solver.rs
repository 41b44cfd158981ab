use std::f64::consts::PI;

use log::{debug, trace};
use nalgebra::{Isometry3, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::error::{IkError, InputError};
use crate::geometry::LinkGeometry;
use crate::limits::JointLimits;
use crate::pose::{Joint6D, Pose6D};
use crate::selector::{Selection, select_best};
use crate::solution::{
    BRANCH_COUNT, BranchCode, Candidate, Elbow, Shoulder, SolutionSet, StageFlags, Wrist,
};
use crate::{ForwardKinematics, Position};

/// Cosines this far outside `[-1, 1]` are rounding error, not lack of reach.
const COS_TOLERANCE: f64 = 1e-9;
/// Scaled by the geometry span.
const LENGTH_TOLERANCE: f64 = 1e-9;
/// `|sin(q5)|` at or below this is a wrist singularity.
const WRIST_SINGULARITY: f64 = 1e-7;

#[derive(Debug, Clone, Copy)]
struct ArmAngles {
    q1: f64,
    q2: f64,
    q3: f64,
    singular: bool,
}

#[derive(Debug, Clone, Copy)]
struct WristAngles {
    q4: f64,
    q5: f64,
    q6: f64,
    singular: bool,
}

/// Closed-form inverse kinematics for an ortho-parallel 6-DOF arm with a
/// spherical wrist.
///
/// At all-zero joints the arm points straight up and the tool approach axis
/// is base +Z. Joint 1 turns about base Z, joints 2 and 3 about the arm-plane
/// Y axis, and the wrist is a Z-Y-Z chain.
///
/// The solver holds only immutable geometry and limits; it is `Send + Sync`
/// and may be shared between threads.
#[derive(Debug, Clone)]
pub struct Dof6Kinematics {
    geometry: LinkGeometry,
    limits: JointLimits,
    length_tolerance: f64,
}

impl Dof6Kinematics {
    pub fn new(geometry: LinkGeometry) -> Result<Self, IkError> {
        Self::with_limits(geometry, JointLimits::unlimited())
    }

    pub fn with_limits(geometry: LinkGeometry, limits: JointLimits) -> Result<Self, IkError> {
        geometry.validate()?;
        limits.validate()?;
        Ok(Self {
            geometry,
            limits,
            length_tolerance: LENGTH_TOLERANCE * geometry.span(),
        })
    }

    pub fn geometry(&self) -> &LinkGeometry {
        &self.geometry
    }

    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    /// Target position pulled back along the approach axis by the tool length.
    pub fn wrist_center(&self, target: &Isometry3<f64>) -> Position {
        target.translation.vector
            - target.rotation * Vector3::new(0.0, 0.0, self.geometry.tool_length)
    }

    /// Computes all eight branches for `target`.
    ///
    /// An unreachable target is not an error: the returned set simply has no
    /// valid candidate. `reference` only decides joint 1 at a shoulder
    /// singularity and joint 4 at a wrist singularity; it never changes which
    /// branches are valid.
    pub fn solve(&self, target: &Pose6D, reference: &Joint6D) -> Result<SolutionSet, IkError> {
        target.validate()?;
        reference.validate()?;
        Ok(self.solve_unchecked(&target.to_isometry(), reference))
    }

    pub fn solve_isometry(
        &self,
        target: &Isometry3<f64>,
        reference: &Joint6D,
    ) -> Result<SolutionSet, IkError> {
        validate_isometry(target)?;
        reference.validate()?;
        Ok(self.solve_unchecked(target, reference))
    }

    /// Solves and picks the candidate closest to `reference`.
    pub fn solve_best(&self, target: &Pose6D, reference: &Joint6D) -> Result<Selection, IkError> {
        let solutions = self.solve(target, reference)?;
        if !solutions.is_success() {
            debug!("no valid IK branch for {:?}", target);
            return Err(IkError::Unreachable);
        }
        select_best(&solutions, reference)
    }

    fn solve_unchecked(&self, target: &Isometry3<f64>, reference: &Joint6D) -> SolutionSet {
        let rotation = target.rotation.to_rotation_matrix();
        let center = self.wrist_center(target);
        let candidates = BranchCode::ALL
            .map(|branch| self.solve_branch(branch, &center, &rotation, reference));
        let solutions = SolutionSet::from_candidates(candidates);
        debug!(
            "wrist center {:?}: {} of {} branches valid",
            center.as_slice(),
            solutions.valid_count(),
            BRANCH_COUNT
        );
        solutions
    }

    fn solve_branch(
        &self,
        branch: BranchCode,
        center: &Position,
        rotation: &Rotation3<f64>,
        reference: &Joint6D,
    ) -> Candidate {
        let Some(arm) = self.solve_arm(center, branch.shoulder(), branch.elbow(), reference[0])
        else {
            trace!("branch {}: wrist center not reachable", branch.index());
            return Candidate::failed(branch);
        };

        let wrist = solve_wrist(rotation, &arm, branch.wrist(), reference[3]);
        let joints =
            Joint6D::new([arm.q1, arm.q2, arm.q3, wrist.q4, wrist.q5, wrist.q6]).normalized();
        if !joints.is_finite() {
            trace!("branch {}: wrist angles not finite", branch.index());
            return Candidate {
                flags: StageFlags {
                    arm: true,
                    ..StageFlags::FAILED
                },
                ..Candidate::failed(branch)
            };
        }

        let limits = self.limits.contains(&joints);
        if !limits {
            trace!("branch {}: outside joint limits {:?}", branch.index(), joints);
        }
        if arm.singular {
            trace!("branch {}: wrist center on base axis, joint 1 held", branch.index());
        }
        if wrist.singular {
            trace!("branch {}: wrist singular, joint 4 held", branch.index());
        }
        Candidate {
            branch,
            joints,
            flags: StageFlags {
                arm: true,
                wrist: true,
                limits,
            },
            singular: arm.singular || wrist.singular,
        }
    }

    /// Joints 1-3 from the wrist center. `None` when the wrist center is
    /// outside the elbow triangle or sits on the shoulder axis.
    ///
    /// A wrist center on the base axis leaves joint 1 free; it is held at
    /// `held_q1` for the front shoulder and turned half a revolution for the
    /// back one.
    fn solve_arm(
        &self,
        center: &Position,
        shoulder: Shoulder,
        elbow: Elbow,
        held_q1: f64,
    ) -> Option<ArmAngles> {
        let g = &self.geometry;
        let tolerance = self.length_tolerance;

        let planar = center.x.hypot(center.y);
        if planar < g.wrist_offset - tolerance {
            return None;
        }
        let singular = planar <= tolerance;
        let (q1, radial) = if singular {
            let q1 = match shoulder {
                Shoulder::Front => held_q1,
                Shoulder::Back => held_q1 + PI,
            };
            (q1, 0.0)
        } else {
            let radial = shoulder.sign()
                * (planar * planar - g.wrist_offset * g.wrist_offset).max(0.0).sqrt();
            (center.y.atan2(center.x) - g.wrist_offset.atan2(radial), radial)
        };

        let reach = radial - g.shoulder_offset;
        let height = center.z - g.base_height;
        let distance_sq = reach * reach + height * height;
        let distance = distance_sq.sqrt();
        if distance <= tolerance {
            return None;
        }

        let (upper, fore) = (g.upper_arm, g.forearm);
        let cos_elbow =
            unit_cos((distance_sq - upper * upper - fore * fore) / (2.0 * upper * fore))?;
        let cos_shoulder =
            unit_cos((distance_sq + upper * upper - fore * fore) / (2.0 * distance * upper))?;

        let q3 = elbow.sign() * cos_elbow.acos();
        let q2 = reach.atan2(height) - elbow.sign() * cos_shoulder.acos();
        Some(ArmAngles {
            q1,
            q2,
            q3,
            singular,
        })
    }
}

impl ForwardKinematics for Dof6Kinematics {
    fn forward_kinematics(&self, joints: &Joint6D) -> Isometry3<f64> {
        let g = &self.geometry;
        let [q1, q2, q3, q4, q5, q6] = joints.0;

        let reach = g.upper_arm * q2.sin() + g.forearm * (q2 + q3).sin() + g.shoulder_offset;
        let height = g.upper_arm * q2.cos() + g.forearm * (q2 + q3).cos() + g.base_height;
        let base = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), q1);
        let center =
            base * Vector3::new(reach, g.wrist_offset, 0.0) + Vector3::new(0.0, 0.0, height);

        let rotation = base
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), q2 + q3)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), q4)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), q5)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), q6);
        let tool = center + rotation * Vector3::new(0.0, 0.0, g.tool_length);

        Isometry3::from_parts(Translation3::from(tool), rotation)
    }
}

/// Joints 4-6 from the rotation left after joints 1-3.
///
/// When joint 5 is singular only `q4 + q6` (or `q6 - q4` with the wrist folded
/// over) is determined; joint 4 is then held at `held_q4` and joint 6 takes
/// the rest.
fn solve_wrist(
    rotation: &Rotation3<f64>,
    arm: &ArmAngles,
    wrist: Wrist,
    held_q4: f64,
) -> WristAngles {
    let arm_rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), arm.q1)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), arm.q2 + arm.q3);
    let local = arm_rotation.transpose() * rotation;
    let r = local.matrix();

    let sign = wrist.sign();
    let sin5 = r[(0, 2)].hypot(r[(1, 2)]);
    let cos5 = r[(2, 2)];
    let q5 = sign * sin5.atan2(cos5);

    if sin5 > WRIST_SINGULARITY {
        return WristAngles {
            q4: (sign * r[(1, 2)]).atan2(sign * r[(0, 2)]),
            q5,
            q6: (sign * r[(2, 1)]).atan2(-sign * r[(2, 0)]),
            singular: false,
        };
    }

    let q4 = held_q4;
    let q6 = if cos5 > 0.0 {
        r[(1, 0)].atan2(r[(0, 0)]) - q4
    } else {
        r[(1, 0)].atan2(-r[(0, 0)]) + q4
    };
    WristAngles {
        q4,
        q5,
        q6,
        singular: true,
    }
}

fn unit_cos(value: f64) -> Option<f64> {
    (value.abs() <= 1.0 + COS_TOLERANCE).then(|| value.clamp(-1.0, 1.0))
}

fn validate_isometry(target: &Isometry3<f64>) -> Result<(), InputError> {
    let t = &target.translation.vector;
    let q = &target.rotation.coords;
    let components = [
        ("x", t.x),
        ("y", t.y),
        ("z", t.z),
        ("qi", q.x),
        ("qj", q.y),
        ("qk", q.z),
        ("qw", q.w),
    ];
    for (component, value) in components {
        if !value.is_finite() {
            return Err(InputError::NonFinitePose { component, value });
        }
    }
    Ok(())
}
