//! Errors reported by the kinematics and motion layers

use crate::joint::Joint;
use crate::kinematic_traits::Position;

/// Failures of kinematic solving and of driving the arm.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArmError {
    /// The target lies outside the workspace: the elbow cosine is out of [-1, 1] or not finite.
    #[error("target ({:.3}, {:.3}, {:.3}) is unreachable, elbow cosine {cosine}",
        .target.x, .target.y, .target.z)]
    Unreachable { target: Position, cosine: f64 },

    /// Joint index that does not name any actuator.
    #[error("no actuator is assigned to joint index {0}")]
    InvalidJoint(usize),

    /// The solution exists but violates the configured joint limits.
    #[error("{joint} angle {angle:.2} deg is outside the joint limits")]
    OutOfLimits { joint: Joint, angle: f64 },

    /// A bounded poll loop ran out of iterations.
    #[error("gave up after {iterations} polls without reaching the target or a detection")]
    Timeout { iterations: usize },

    /// The actuator driver rejected the command or failed to report.
    #[error("{joint} actuator failed: {reason}")]
    Actuator { joint: Joint, reason: String },

    /// Link lengths must be finite and positive.
    #[error("invalid arm geometry: {0}")]
    InvalidParameters(String),
}
