use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::pose::{JOINT_COUNT, Joint6D};

const LIMIT_TOLERANCE: f64 = 1e-9;

/// Per-joint angle range in radians, checked against normalized angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    pub min: [f64; JOINT_COUNT],
    pub max: [f64; JOINT_COUNT],
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl JointLimits {
    pub const fn unlimited() -> Self {
        Self {
            min: [-PI; JOINT_COUNT],
            max: [PI; JOINT_COUNT],
        }
    }

    pub fn new(min: [f64; JOINT_COUNT], max: [f64; JOINT_COUNT]) -> Result<Self, InputError> {
        let limits = Self { min, max };
        limits.validate()?;
        Ok(limits)
    }

    pub fn from_degrees(
        min: [f64; JOINT_COUNT],
        max: [f64; JOINT_COUNT],
    ) -> Result<Self, InputError> {
        Self::new(min.map(f64::to_radians), max.map(f64::to_radians))
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for axis in 0..JOINT_COUNT {
            let (min, max) = (self.min[axis], self.max[axis]);
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(InputError::InvalidLimits { axis, min, max });
            }
        }
        Ok(())
    }

    pub fn contains(&self, joints: &Joint6D) -> bool {
        joints.iter().enumerate().all(|(axis, &angle)| {
            angle >= self.min[axis] - LIMIT_TOLERANCE && angle <= self.max[axis] + LIMIT_TOLERANCE
        })
    }
}
