//! Joint roles of the arm and the actuator handles attached to them

use std::fmt;
use crate::arm_error::ArmError;

/// Role of an actuator in the arm. Replaces positional indexing of the servo array
/// so that an unknown index is reported instead of silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Joint {
    Base,
    Shoulder,
    Elbow,
    Claw,
}

impl Joint {
    /// All roles, in the order the controller attaches them.
    pub const ALL: [Joint; 4] = [Joint::Shoulder, Joint::Claw, Joint::Base, Joint::Elbow];

    /// Default signal pin of the actuator in the reference wiring.
    pub fn default_pin(&self) -> u8 {
        match self {
            Joint::Shoulder => 11,
            Joint::Claw => 10,
            Joint::Base => 9,
            Joint::Elbow => 6,
        }
    }

    /// Index of the logical joint angle this actuator sets, if any. The elbow servo
    /// drives the level-keeping wrist angle (J4), not the elbow solve angle (J3).
    pub fn kinematic_index(&self) -> Option<usize> {
        match self {
            Joint::Base => Some(0),
            Joint::Shoulder => Some(1),
            Joint::Elbow => Some(3),
            Joint::Claw => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Joint::Base => "base",
            Joint::Shoulder => "shoulder",
            Joint::Elbow => "elbow",
            Joint::Claw => "claw",
        }
    }

    /// Parses the role from its lowercase name, as used in settings files.
    pub fn from_name(name: &str) -> Option<Joint> {
        Joint::ALL.into_iter().find(|j| j.name() == name)
    }
}

/// Actuator indices as the controller firmware numbers them: 0 claw,
/// 1 shoulder, 2 elbow, 3 base.
impl TryFrom<usize> for Joint {
    type Error = ArmError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Joint::Claw),
            1 => Ok(Joint::Shoulder),
            2 => Ok(Joint::Elbow),
            3 => Ok(Joint::Base),
            _ => Err(ArmError::InvalidJoint(index)),
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per joint role, looked up by role rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerJoint<T> {
    pub base: T,
    pub shoulder: T,
    pub elbow: T,
    pub claw: T,
}

impl<T> PerJoint<T> {
    pub fn get(&self, joint: Joint) -> &T {
        match joint {
            Joint::Base => &self.base,
            Joint::Shoulder => &self.shoulder,
            Joint::Elbow => &self.elbow,
            Joint::Claw => &self.claw,
        }
    }

    pub fn get_mut(&mut self, joint: Joint) -> &mut T {
        match joint {
            Joint::Base => &mut self.base,
            Joint::Shoulder => &mut self.shoulder,
            Joint::Elbow => &mut self.elbow,
            Joint::Claw => &mut self.claw,
        }
    }

    /// Builds the table by calling `f` once per role.
    pub fn from_fn(mut f: impl FnMut(Joint) -> T) -> Self {
        PerJoint {
            base: f(Joint::Base),
            shoulder: f(Joint::Shoulder),
            elbow: f(Joint::Elbow),
            claw: f(Joint::Claw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_indices() {
        assert_eq!(Joint::try_from(1), Ok(Joint::Shoulder));
        assert_eq!(Joint::try_from(2), Ok(Joint::Elbow));
        assert_eq!(Joint::try_from(3), Ok(Joint::Base));
        assert_eq!(Joint::try_from(0), Ok(Joint::Claw));
        assert_eq!(Joint::try_from(4), Err(ArmError::InvalidJoint(4)));
    }

    #[test]
    fn test_names_round_trip() {
        for joint in Joint::ALL {
            assert_eq!(Joint::from_name(joint.name()), Some(joint));
        }
        assert_eq!(Joint::from_name("wrist"), None);
    }

    #[test]
    fn test_per_joint_lookup() {
        let mut pins = PerJoint::from_fn(|j| j.default_pin());
        assert_eq!(*pins.get(Joint::Base), 9);
        *pins.get_mut(Joint::Claw) = 3;
        assert_eq!(pins.claw, 3);
        assert_eq!(pins.shoulder, 11);
    }
}
