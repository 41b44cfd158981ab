//! Closed-form inverse kinematics for 6-DOF arms with a spherical wrist.
//!
//! Angles are radians, lengths are whatever unit the [`LinkGeometry`] uses.
//! [`Dof6Kinematics::solve`] returns all eight branches of a target pose and
//! [`select_best`] picks the one nearest the previous joint state.

use nalgebra::{Isometry3, Vector3};

pub mod error;
pub mod geometry;
pub mod limits;
pub mod pose;
pub mod selector;
pub mod solution;
pub mod solver;

pub use error::{IkError, InputError};
pub use geometry::LinkGeometry;
pub use limits::JointLimits;
pub use pose::{JOINT_COUNT, Joint6D, Pose6D, normalize_angle};
pub use selector::{Selection, select_best};
pub use solution::{BranchCode, Candidate, Elbow, Shoulder, SolutionSet, StageFlags, Wrist};
pub use solver::Dof6Kinematics;

pub type Position = Vector3<f64>;

pub trait ForwardKinematics {
    fn forward_kinematics(&self, joints: &Joint6D) -> Isometry3<f64>;

    fn forward_pose(&self, joints: &Joint6D) -> Pose6D {
        Pose6D::from_isometry(&self.forward_kinematics(joints))
    }
}
