use thiserror::Error;

/// Failure modes of an IK request.
///
/// `Unreachable` is an expected outcome a control loop branches on;
/// `InvalidInput` means the request was rejected before any geometry was
/// evaluated; `NoValidCandidate` is a sequencing bug in the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IkError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("target pose is unreachable")]
    Unreachable,

    #[error("no valid candidate in solution set")]
    NoValidCandidate,
}

impl IkError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, IkError::Unreachable)
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, IkError::InvalidInput(_))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("pose component `{component}` is not finite ({value})")]
    NonFinitePose { component: &'static str, value: f64 },

    #[error("joint {axis} is not finite ({value})")]
    NonFiniteJoint { axis: usize, value: f64 },

    #[error("expected {expected} joint values, got {found}")]
    JointCount { expected: usize, found: usize },

    #[error("link length `{name}` must be finite and non-negative, got {value}")]
    InvalidLength { name: &'static str, value: f64 },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("joint {axis} limits are invalid (min {min}, max {max})")]
    InvalidLimits { axis: usize, min: f64, max: f64 },
}
