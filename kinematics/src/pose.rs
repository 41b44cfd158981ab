use std::f64::consts::{PI, TAU};
use std::ops::{Index, IndexMut};

use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::Position;
use crate::error::InputError;

pub const JOINT_COUNT: usize = 6;

/// Wraps an angle into `(-pi, pi]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Six joint angles in radians, joint 1 (base) first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Joint6D(pub [f64; JOINT_COUNT]);

impl Joint6D {
    pub const fn new(angles: [f64; JOINT_COUNT]) -> Self {
        Self(angles)
    }

    pub const fn zeros() -> Self {
        Self([0.0; JOINT_COUNT])
    }

    pub(crate) const fn placeholder() -> Self {
        Self([f64::NAN; JOINT_COUNT])
    }

    pub fn from_degrees(degrees: [f64; JOINT_COUNT]) -> Self {
        Self(degrees.map(f64::to_radians))
    }

    pub fn to_degrees(&self) -> [f64; JOINT_COUNT] {
        self.0.map(f64::to_degrees)
    }

    pub fn as_array(&self) -> &[f64; JOINT_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|a| a.is_finite())
    }

    pub fn validate(&self) -> Result<(), InputError> {
        match self.0.iter().position(|a| !a.is_finite()) {
            Some(axis) => Err(InputError::NonFiniteJoint {
                axis,
                value: self.0[axis],
            }),
            None => Ok(()),
        }
    }

    /// Every angle wrapped into `(-pi, pi]`.
    pub fn normalized(&self) -> Self {
        Self(self.0.map(normalize_angle))
    }

    /// Sum over the six axes of the squared angle difference. No wrap-around
    /// is applied: a joint at `-179` degrees is far from one at `179`.
    pub fn distance_sq(&self, other: &Joint6D) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl Index<usize> for Joint6D {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl IndexMut<usize> for Joint6D {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.0[axis]
    }
}

impl From<[f64; JOINT_COUNT]> for Joint6D {
    fn from(angles: [f64; JOINT_COUNT]) -> Self {
        Self(angles)
    }
}

impl TryFrom<&[f64]> for Joint6D {
    type Error = InputError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let angles: [f64; JOINT_COUNT] =
            values.try_into().map_err(|_| InputError::JointCount {
                expected: JOINT_COUNT,
                found: values.len(),
            })?;
        Ok(Self(angles))
    }
}

/// Target tool pose: position plus roll/pitch/yaw in radians.
///
/// The rotation is `Rz(yaw) * Ry(pitch) * Rx(roll)`, i.e. fixed-axis
/// rotations about X, then Y, then Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose6D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Pose6D {
    pub const fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }

    pub fn from_degrees(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::new(x, y, z, roll.to_radians(), pitch.to_radians(), yaw.to_radians())
    }

    pub fn from_isometry(isometry: &Isometry3<f64>) -> Self {
        let t = isometry.translation.vector;
        let (roll, pitch, yaw) = isometry.rotation.euler_angles();
        Self::new(t.x, t.y, t.z, roll, pitch, yaw)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    pub fn with_position(&self, position: &Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            ..*self
        }
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.roll, self.pitch, self.yaw)
    }

    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::new(self.x, self.y, self.z), self.rotation())
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let components = [
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
            ("roll", self.roll),
            ("pitch", self.pitch),
            ("yaw", self.yaw),
        ];
        for (component, value) in components {
            if !value.is_finite() {
                return Err(InputError::NonFinitePose { component, value });
            }
        }
        Ok(())
    }
}
