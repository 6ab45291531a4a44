//! Rust implementation of forward and inverse kinematics for four-axis hobby arms with a
//! rotating base, a planar shoulder and elbow, and a wrist that is kept level
//!
//! The arm is the common desktop kit layout: a base turning about the vertical axis, an upper
//! arm and a fore arm moving in one vertical plane, and a gripper at a fixed horizontal offset
//! from the wrist. Angles are in degrees throughout; lengths share whatever unit the
//! [parameters](parameters::arm_kinematics::Parameters) are given in.
//!
//! # Features
//!
//! - Closed form inverse kinematics with the elbow-up branch (the elbow above the line from
//!   shoulder to wrist), cross-checked with forward kinematics. Unreachable targets are
//!   reported as errors, never returned as NaN.
//! - Joint angles can be checked against the ranges the servos can physically take.
//! - Mapping between logical joint angles and the angles each servo is commanded, covering
//!   the mounting offset and direction of every servo.
//! - An [arm controller](arm::Arm) that keeps the joint angles and the end effector position
//!   consistent with every command sent to the servos.
//! - Stepping the end effector along a straight line in the horizontal plane.
//! - Sweeping one joint slowly until an edge sensor fires, for locating objects below the
//!   gripper.
//! - Simulated servos and sensors, so all of the above runs without hardware.
//! - Reading the arm geometry and servo calibration from YAML.
//!
//! # Joints
//!
//! Kinematic joints are indexed base (J1), shoulder (J2), elbow (J3) and wrist (J4). The
//! wrist angle is not free: `J4 = -(J2 + J3)` keeps the gripper level. The elbow servo
//! drives J4, so J3 only exists in the solution and in the controller state.
//!
//! ```
//! use rs_arm4_kinematics::kinematic_traits::{Kinematics, Position};
//! use rs_arm4_kinematics::kinematics_impl::ArmKinematics;
//! use rs_arm4_kinematics::parameters::arm_kinematics::Parameters;
//!
//! let kinematics = ArmKinematics::new(Parameters::desk_arm());
//! let joints = kinematics.inverse(&Position::new(9.06, -18.12, 5.98)).unwrap();
//! assert!((joints[0] + 63.43).abs() < 0.01);
//! let back = kinematics.forward(&joints);
//! assert!((back - Position::new(9.06, -18.12, 5.98)).norm() < 1e-9);
//! ```

pub mod arm_error;
pub mod joint;

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;

pub mod actuator;
pub mod actuator_mapping;

pub mod arm;
pub mod settings;

#[path = "path_plan/line.rs"]
pub mod line;
pub mod sweep;

pub mod simulation;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
