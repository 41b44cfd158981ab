use kinematics::{Dof6Kinematics, ForwardKinematics, IkError, Joint6D, Pose6D, Position};
use log::{debug, warn};

/// How far a target is pulled toward the base origin while looking for a
/// reachable pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetreatConfig {
    pub step: f64,
    /// Solve attempts, the original target included.
    pub max_iterations: u32,
}

impl Default for RetreatConfig {
    fn default() -> Self {
        Self {
            step: 10.0,
            max_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetreatOutcome {
    pub joints: Joint6D,
    /// The target that was actually reached.
    pub target: Pose6D,
    /// Number of retreat steps taken; zero when the request was reachable.
    pub steps: u32,
}

/// Tracks the last commanded joint state so each new target resolves to the
/// IK branch with the least motion.
#[derive(Debug, Clone)]
pub struct ArmController {
    solver: Dof6Kinematics,
    last_joints: Joint6D,
    retreat: RetreatConfig,
}

impl ArmController {
    pub fn new(solver: Dof6Kinematics, initial: Joint6D) -> Self {
        Self {
            solver,
            last_joints: initial,
            retreat: RetreatConfig::default(),
        }
    }

    pub fn with_retreat(mut self, retreat: RetreatConfig) -> Self {
        self.retreat = retreat;
        self
    }

    pub fn solver(&self) -> &Dof6Kinematics {
        &self.solver
    }

    pub fn last_joints(&self) -> &Joint6D {
        &self.last_joints
    }

    /// Tool pose of the last commanded joints.
    pub fn current_pose(&self) -> Pose6D {
        self.solver.forward_pose(&self.last_joints)
    }

    /// Solves `target` against the last joints. The state only changes on
    /// success.
    pub fn command(&mut self, target: &Pose6D) -> Result<Joint6D, IkError> {
        match self.solver.solve_best(target, &self.last_joints) {
            Ok(selection) => {
                debug!(
                    "branch {} selected, displacement {:.6}",
                    selection.branch.index(),
                    selection.distance_sq.sqrt()
                );
                self.last_joints = selection.joints;
                Ok(selection.joints)
            }
            Err(err) => {
                warn!("rejected target {:?}: {}", target, err);
                Err(err)
            }
        }
    }

    /// Moves the tool by `delta`, keeping its orientation.
    pub fn jog(&mut self, delta: &Position) -> Result<Joint6D, IkError> {
        let pose = self.current_pose();
        let target = pose.with_position(&(pose.position() + delta));
        self.command(&target)
    }

    /// Like [`ArmController::command`], but an unreachable target is pulled
    /// toward the base origin one step at a time until it can be reached.
    pub fn command_with_retreat(&mut self, target: &Pose6D) -> Result<RetreatOutcome, IkError> {
        target.validate()?;
        let mut current = *target;
        for steps in 0..self.retreat.max_iterations {
            match self.solver.solve_best(&current, &self.last_joints) {
                Ok(selection) => {
                    if steps > 0 {
                        debug!("reached retreated target {:?} after {} steps", current, steps);
                    }
                    self.last_joints = selection.joints;
                    return Ok(RetreatOutcome {
                        joints: selection.joints,
                        target: current,
                        steps,
                    });
                }
                Err(IkError::Unreachable) => {}
                Err(err) => return Err(err),
            }

            let position = current.position();
            let distance = position.norm();
            if distance <= f64::EPSILON {
                break;
            }
            current = current.with_position(&(position - position / distance * self.retreat.step));
        }
        warn!("no reachable target found retreating from {:?}", target);
        Err(IkError::Unreachable)
    }
}
