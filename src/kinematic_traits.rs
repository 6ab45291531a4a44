//! Defines the types shared by the kinematic solver and the arm controller

use nalgebra::Vector3;
use crate::arm_error::ArmError;

/// Cartesian position of the end effector in the base frame of the arm:
/// x forward, y to the left, z up. Same length units as the link lengths.
/// ```
/// extern crate nalgebra as na;
/// use na::Vector3;
///
/// type Position = Vector3<f64>;
///
/// let target = Position::new(9.06, -18.12, 5.98);
/// ```
pub type Position = Vector3<f64>;

/// Logical joint angles in degrees: base rotation (J1), shoulder (J2), elbow solve
/// angle (J3) and the wrist angle (J4) that keeps the end effector level.
pub type Joints = [f64; 4];

/// For providing joint values when the arm stands straight out with all angles zero.
pub const JOINTS_AT_ZERO: Joints = [0.0; 4];

/// Indices into [`Joints`].
pub const J_BASE: usize = 0;
pub const J_SHOULDER: usize = 1;
pub const J_ELBOW: usize = 2;
pub const J_WRIST: usize = 3;

pub trait Kinematics {
    /// Find the joint angles that place the end effector at the given position.
    /// There is exactly one solution per reachable target, as the elbow branch is fixed.
    fn inverse(&self, position: &Position) -> Result<Joints, ArmError>;

    /// Find the end effector position for the given joint angles. Always defined
    /// for finite input.
    fn forward(&self, joints: &Joints) -> Position;
}
