//! Translation between logical joint angles and physical servo angles
//!
//! Each servo is mounted with its own zero and direction. The mapping is the affine
//! transform `physical = logical + offset`, mirrored within the servo range when the
//! servo is mounted reversed, and finally clamped to the range the servo can take.

use tracing::warn;
use crate::constraints::Constraints;
use crate::joint::{Joint, PerJoint};

/// Mounting of one servo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoMapping {
    /// Signal pin the servo is attached to.
    pub pin: u8,

    /// Added to the logical angle before mirroring, degrees.
    pub offset: f64,

    /// The servo turns opposite to the logical joint: the range is mapped
    /// onto itself reversed, as `map(v, min, max, max, min)`.
    pub reversed: bool,

    /// Lowest physical angle, degrees.
    pub min: f64,

    /// Highest physical angle, degrees.
    pub max: f64,
}

impl ServoMapping {
    pub fn new(pin: u8, offset: f64, reversed: bool) -> Self {
        ServoMapping { pin, offset, reversed, min: 0.0, max: 180.0 }
    }

    /// Physical angle before clamping. Used to check monotonicity and range.
    pub fn to_physical_unclamped(&self, logical: f64) -> f64 {
        let shifted = logical + self.offset;
        if self.reversed {
            self.min + self.max - shifted
        } else {
            shifted
        }
    }

    /// Physical angle to command for the given logical angle.
    pub fn to_physical(&self, logical: f64) -> f64 {
        self.to_physical_unclamped(logical).clamp(self.min, self.max)
    }

    /// Logical angle for a physical reading, the inverse of [`ServoMapping::to_physical`]
    /// within the servo range.
    pub fn to_logical(&self, physical: f64) -> f64 {
        let unmirrored = if self.reversed {
            self.min + self.max - physical
        } else {
            physical
        };
        unmirrored - self.offset
    }

    /// Logical angles the servo can reach, lowest first.
    pub fn logical_range(&self) -> (f64, f64) {
        let a = self.to_logical(self.min);
        let b = self.to_logical(self.max);
        (a.min(b), a.max(b))
    }
}

/// Mounting of all servos of the arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorMap {
    pub servos: PerJoint<ServoMapping>,
}

impl Default for ActuatorMap {
    /// Calibration of the desk arm: shoulder mirrored, elbow and base mirrored
    /// around their 90 degree center, claw direct.
    fn default() -> Self {
        ActuatorMap {
            servos: PerJoint {
                base: ServoMapping::new(Joint::Base.default_pin(), 90.0, true),
                shoulder: ServoMapping::new(Joint::Shoulder.default_pin(), 0.0, true),
                elbow: ServoMapping::new(Joint::Elbow.default_pin(), 90.0, true),
                claw: ServoMapping::new(Joint::Claw.default_pin(), 0.0, false),
            },
        }
    }
}

impl ActuatorMap {
    pub fn servo(&self, joint: Joint) -> &ServoMapping {
        self.servos.get(joint)
    }

    /// Physical command for the logical angle of the joint. Angles the servo cannot
    /// take are clamped to its range.
    pub fn to_physical(&self, joint: Joint, logical: f64) -> f64 {
        let servo = self.servo(joint);
        let unclamped = servo.to_physical_unclamped(logical);
        let physical = unclamped.clamp(servo.min, servo.max);
        if physical != unclamped {
            warn!("{} command {:.2} clamped to {:.2} (logical {:.2})",
                joint, unclamped, physical, logical);
        }
        physical
    }

    pub fn to_logical(&self, joint: Joint, physical: f64) -> f64 {
        self.servo(joint).to_logical(physical)
    }

    /// Joint limits implied by the servo ranges. The elbow solve angle has no servo
    /// of its own and stays unconstrained.
    pub fn constraints(&self) -> Constraints {
        let (base_from, base_to) = self.servos.base.logical_range();
        let (shoulder_from, shoulder_to) = self.servos.shoulder.logical_range();
        let (wrist_from, wrist_to) = self.servos.elbow.logical_range();
        Constraints::new(
            [base_from, shoulder_from, 0.0, wrist_from],
            [base_to, shoulder_to, 0.0, wrist_to],
        )
    }
}
