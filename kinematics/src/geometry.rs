use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Link lengths and offsets of a 6-DOF arm with a spherical wrist.
///
/// The order of [`LinkGeometry::new`] follows the usual
/// `(L_BS, D_BS, L_AM, L_FA, D_EW, L_WT)` parameter list:
///
/// * `base_height`: base plate to shoulder axis, along base Z.
/// * `shoulder_offset`: base axis to shoulder axis, inside the arm plane.
/// * `upper_arm`: shoulder axis to elbow axis.
/// * `forearm`: elbow axis to wrist center.
/// * `wrist_offset`: lateral offset of the arm plane from the base axis.
/// * `tool_length`: wrist center to tool point, along the approach axis.
///
/// A geometry with a zero `upper_arm` or `forearm` has no elbow triangle and
/// is rejected by [`LinkGeometry::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkGeometry {
    pub base_height: f64,
    pub shoulder_offset: f64,
    pub upper_arm: f64,
    pub forearm: f64,
    pub wrist_offset: f64,
    pub tool_length: f64,
}

impl LinkGeometry {
    pub const fn new(
        base_height: f64,
        shoulder_offset: f64,
        upper_arm: f64,
        forearm: f64,
        wrist_offset: f64,
        tool_length: f64,
    ) -> Self {
        Self {
            base_height,
            shoulder_offset,
            upper_arm,
            forearm,
            wrist_offset,
            tool_length,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for (name, value) in self.named_lengths() {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::InvalidLength { name, value });
            }
        }
        if self.upper_arm == 0.0 || self.forearm == 0.0 {
            return Err(InputError::DegenerateGeometry(
                "upper arm and forearm lengths must be positive",
            ));
        }
        Ok(())
    }

    /// Largest distance between shoulder axis and wrist center.
    pub fn arm_reach(&self) -> f64 {
        self.upper_arm + self.forearm
    }

    /// Sum of every length, used to scale numeric tolerances.
    pub fn span(&self) -> f64 {
        self.named_lengths().iter().map(|(_, v)| v).sum()
    }

    fn named_lengths(&self) -> [(&'static str, f64); 6] {
        [
            ("base_height", self.base_height),
            ("shoulder_offset", self.shoulder_offset),
            ("upper_arm", self.upper_arm),
            ("forearm", self.forearm),
            ("wrist_offset", self.wrist_offset),
            ("tool_length", self.tool_length),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geometry() {
        let geometry = LinkGeometry::new(35.0, 0.0, 105.0, 105.0, 0.0, 35.0);
        assert!(geometry.validate().is_ok());
        assert_eq!(geometry.arm_reach(), 210.0);
        assert_eq!(geometry.span(), 280.0);
    }

    #[test]
    fn test_negative_length_rejected() {
        let geometry = LinkGeometry::new(35.0, -1.0, 105.0, 105.0, 0.0, 35.0);
        assert_eq!(
            geometry.validate(),
            Err(InputError::InvalidLength {
                name: "shoulder_offset",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_non_finite_length_rejected() {
        let geometry = LinkGeometry::new(35.0, 0.0, f64::INFINITY, 105.0, 0.0, 35.0);
        assert!(matches!(
            geometry.validate(),
            Err(InputError::InvalidLength { name: "upper_arm", .. })
        ));
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let geometry = LinkGeometry::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            geometry.validate(),
            Err(InputError::DegenerateGeometry(_))
        ));
    }
}
