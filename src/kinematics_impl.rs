use crate::arm_error::ArmError;
use crate::constraints::Constraints;
use crate::joint::Joint;
use crate::kinematic_traits::{Joints, Kinematics, Position, J_BASE, J_ELBOW, J_SHOULDER, J_WRIST};
use crate::parameters::arm_kinematics::Parameters;
use crate::utils::{d2r, normalize_degrees, r2d};
use tracing::debug;

/// Elbow cosines this far outside [-1, 1] are treated as rounding at the workspace boundary.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Closed form solver for an arm with an azimuthal base joint, a two link planar
/// shoulder-elbow chain and a wrist that keeps the end effector level.
#[derive(Debug, Clone)]
pub struct ArmKinematics {
    /// The parameters that were used to construct this solver.
    parameters: Parameters,
    constraints: Option<Constraints>,
}

impl ArmKinematics {
    /// Creates a new `ArmKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        ArmKinematics {
            parameters,
            constraints: None,
        }
    }

    /// Create a new instance that takes also Constraints.
    /// If constraints are set, inverse kinematics fails with `OutOfLimits`
    /// on solutions the joints cannot take.
    pub fn new_with_constraints(parameters: Parameters, constraints: Constraints) -> Self {
        ArmKinematics {
            parameters,
            constraints: Some(constraints),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }
}

impl Kinematics for ArmKinematics {
    fn inverse(&self, position: &Position) -> Result<Joints, ArmError> {
        let p = &self.parameters;

        // Project the target onto the vertical plane of the arm. r can be negative
        // if the target is closer to the base axis than the wrist offset.
        let r = position.x.hypot(position.y) - p.wrist_offset;
        let h = position.z - p.base_height;

        let cosine = (r * r + h * h - p.upper_arm * p.upper_arm - p.fore_arm * p.fore_arm)
            / (2.0 * p.upper_arm * p.fore_arm);
        if !cosine.is_finite() || cosine.abs() > 1.0 + DOMAIN_TOLERANCE {
            return Err(ArmError::Unreachable { target: *position, cosine });
        }

        // Negative branch only: the elbow bends the same way for every target.
        let q2 = -cosine.clamp(-1.0, 1.0).acos();
        let q1 = h.atan2(r) - (p.fore_arm * q2.sin()).atan2(p.upper_arm + p.fore_arm * q2.cos());
        let q0 = position.y.atan2(position.x);

        let mut joints = [0.0; 4];
        joints[J_BASE] = r2d(q0);
        joints[J_SHOULDER] = normalize_degrees(r2d(q1));
        joints[J_ELBOW] = r2d(q2);
        joints[J_WRIST] = -(joints[J_ELBOW] + joints[J_SHOULDER]);

        debug!("ik r={:.4} h={:.4} cos={:.6} -> {:?}", r, h, cosine, joints);

        if let Some(constraints) = &self.constraints {
            if let Some(index) = constraints.violation(&joints) {
                return Err(ArmError::OutOfLimits {
                    joint: joint_for_index(index),
                    angle: joints[index],
                });
            }
        }
        Ok(joints)
    }

    fn forward(&self, joints: &Joints) -> Position {
        let p = &self.parameters;
        let q0 = d2r(joints[J_BASE]);
        let q1 = d2r(joints[J_SHOULDER]);
        let q12 = d2r(joints[J_SHOULDER] + joints[J_ELBOW]);

        let gamma = p.upper_arm * q1.cos() + p.fore_arm * q12.cos() + p.wrist_offset;
        Position::new(
            gamma * q0.cos(),
            gamma * q0.sin(),
            p.base_height + p.upper_arm * q1.sin() + p.fore_arm * q12.sin(),
        )
    }
}

/// The actuator that carries the given logical joint. J3 has no servo of its own;
/// it follows from the elbow servo, so the elbow is reported for it too.
fn joint_for_index(index: usize) -> Joint {
    match index {
        J_BASE => Joint::Base,
        J_SHOULDER => Joint::Shoulder,
        _ => Joint::Elbow,
    }
}
