use std::fs;
use std::path::Path;

use brain::RetreatConfig;
use kinematics::{JOINT_COUNT, JointLimits, LinkGeometry};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Arm description loaded from JSON. Every field is optional; a missing
/// geometry falls back to the 35/105/105/35 mm desktop arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub geometry: LinkGeometry,
    /// Joint ranges in degrees, `[min, max]` per joint.
    pub joint_limits_deg: Option<[[f64; 2]; JOINT_COUNT]>,
    pub retreat_step: f64,
    pub retreat_max_iterations: u32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        let retreat = RetreatConfig::default();
        Self {
            geometry: LinkGeometry::new(35.0, 0.0, 105.0, 105.0, 0.0, 35.0),
            joint_limits_deg: None,
            retreat_step: retreat.step,
            retreat_max_iterations: retreat.max_iterations,
        }
    }
}

impl ArmConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn joint_limits(&self) -> Result<JointLimits, CliError> {
        match self.joint_limits_deg {
            Some(ranges) => Ok(JointLimits::from_degrees(
                ranges.map(|[min, _]| min),
                ranges.map(|[_, max]| max),
            )?),
            None => Ok(JointLimits::unlimited()),
        }
    }

    pub fn retreat(&self) -> RetreatConfig {
        RetreatConfig {
            step: self.retreat_step,
            max_iterations: self.retreat_max_iterations,
        }
    }
}
