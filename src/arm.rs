//! The arm controller: owns the servos and keeps the logical joint angles and the
//! end effector position consistent with every command sent to them.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::actuator::{Actuator, Delay};
use crate::actuator_mapping::ActuatorMap;
use crate::arm_error::ArmError;
use crate::joint::{Joint, PerJoint};
use crate::kinematic_traits::{
    Joints, Kinematics, Position, J_BASE, J_ELBOW, J_SHOULDER, J_WRIST, JOINTS_AT_ZERO,
};
use crate::line::LineConfig;
use crate::settings::ArmSettings;
use crate::sweep::SweepConfig;

/// Speed used by the reference firmware for positioning moves.
pub const DEFAULT_SPEED: u8 = 80;

/// Logical joint angles together with the end effector position they produce.
/// Both are always updated together; the position is never set on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmState {
    pub joints: Joints,
    pub position: Position,
}

impl ArmState {
    pub fn from_joints(kinematics: &dyn Kinematics, joints: Joints) -> Self {
        ArmState {
            joints,
            position: kinematics.forward(&joints),
        }
    }
}

/// What a reported coordinate stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordKind {
    Begin,
    End,
    EndEffector,
}

impl CoordKind {
    fn label(&self) -> &'static str {
        match self {
            CoordKind::Begin => "Begin Coord",
            CoordKind::End => "End Coord",
            CoordKind::EndEffector => "End Effector coord",
        }
    }
}

pub struct Arm {
    kinematics: Arc<dyn Kinematics>,
    mapping: ActuatorMap,
    actuators: PerJoint<Box<dyn Actuator>>,
    delay: Box<dyn Delay>,
    state: ArmState,

    /// Speed for positioning moves of the line and sweep routines.
    pub speed: u8,

    pub line: LineConfig,
    pub sweep: SweepConfig,
}

impl Arm {
    /// Attaches every actuator to the pin given by the mapping. The logical state starts
    /// at all joints zero; call [`Arm::sync_from_actuators`] to pick up the real pose.
    pub fn new(
        kinematics: Arc<dyn Kinematics>,
        mapping: ActuatorMap,
        mut actuators: PerJoint<Box<dyn Actuator>>,
        delay: Box<dyn Delay>,
    ) -> Result<Self, ArmError> {
        for joint in Joint::ALL {
            let pin = mapping.servo(joint).pin;
            actuators
                .get_mut(joint)
                .attach(pin)
                .map_err(|reason| ArmError::Actuator { joint, reason })?;
            debug!("{} attached to pin {}", joint, pin);
        }

        let state = ArmState::from_joints(kinematics.as_ref(), JOINTS_AT_ZERO);
        Ok(Arm {
            kinematics,
            mapping,
            actuators,
            delay,
            state,
            speed: DEFAULT_SPEED,
            line: LineConfig::default(),
            sweep: SweepConfig::default(),
        })
    }

    /// Builds the arm described by the settings on the given hardware.
    pub fn from_settings(
        settings: &ArmSettings,
        actuators: PerJoint<Box<dyn Actuator>>,
        delay: Box<dyn Delay>,
    ) -> Result<Self, ArmError> {
        let mut arm = Arm::new(Arc::new(settings.kinematics()), settings.servos, actuators, delay)?;
        arm.speed = settings.speed;
        arm.line = settings.line;
        arm.sweep = settings.sweep;
        Ok(arm)
    }

    pub fn state(&self) -> ArmState {
        self.state
    }

    pub fn joints(&self) -> Joints {
        self.state.joints
    }

    /// Last computed end effector position.
    pub fn end_effector(&self) -> Position {
        self.state.position
    }

    pub fn mapping(&self) -> &ActuatorMap {
        &self.mapping
    }

    /// End effector position for the given joints. Does not touch the arm state.
    pub fn compute_fk(&self, joints: &Joints) -> Position {
        self.kinematics.forward(joints)
    }

    /// Joint angles for the given end effector position. Does not touch the arm state.
    pub fn compute_ik(&self, position: &Position) -> Result<Joints, ArmError> {
        self.kinematics.inverse(position)
    }

    /// Same as [`Arm::write_servo`], with the joint given by its firmware index
    /// (1 shoulder, 2 elbow, 3 base, 0 claw).
    pub fn write_servo_index(&mut self, index: usize, angle: f64, speed: u8) -> Result<ArmState, ArmError> {
        let joint = Joint::try_from(index)?;
        self.write_servo(joint, angle, speed)
    }

    /// Sends the logical angle of one joint to its servo. On success the angle the servo
    /// was actually given (after clamping to its range) is recorded, the elbow solve angle
    /// follows the level wrist and the end effector position is recomputed. On failure the
    /// state is unchanged.
    pub fn write_servo(&mut self, joint: Joint, angle: f64, speed: u8) -> Result<ArmState, ArmError> {
        let physical = self.mapping.to_physical(joint, angle);
        debug!("{} logical {:.2} -> physical {:.2} at speed {}", joint, angle, physical, speed);
        self.actuators
            .get_mut(joint)
            .write(physical, speed)
            .map_err(|reason| ArmError::Actuator { joint, reason })?;

        if let Some(index) = joint.kinematic_index() {
            self.state.joints[index] = self.mapping.to_logical(joint, physical);
            // J3 has no servo, the same relation sync_from_actuators reads it back with
            self.state.joints[J_ELBOW] = -(self.state.joints[J_WRIST] + self.state.joints[J_SHOULDER]);
            self.refresh();
        }
        Ok(self.state)
    }

    /// Drives the arm to the joint angles: shoulder, then elbow (with the wrist angle),
    /// then base. The first failing servo aborts the move; servos written before it keep
    /// their new angles. J3 is not sent anywhere, it follows from J2 and J4.
    pub fn move_to(&mut self, joints: &Joints, speed: u8) -> Result<ArmState, ArmError> {
        self.write_servo(Joint::Shoulder, joints[J_SHOULDER], speed)?;
        self.write_servo(Joint::Elbow, joints[J_WRIST], speed)?;
        self.write_servo(Joint::Base, joints[J_BASE], speed)
    }

    /// Solves the inverse kinematics for the target and drives the arm there.
    pub fn move_to_position(&mut self, target: &Position, speed: u8) -> Result<ArmState, ArmError> {
        let joints = self.compute_ik(target)?;
        self.move_to(&joints, speed)
    }

    /// Logical angle the joint's servo currently reports.
    pub fn read_angle(&mut self, joint: Joint) -> Result<f64, ArmError> {
        let physical = self
            .actuators
            .get_mut(joint)
            .read()
            .map_err(|reason| ArmError::Actuator { joint, reason })?;
        Ok(self.mapping.to_logical(joint, physical))
    }

    /// Replaces the logical state with what the servos report. The elbow solve angle
    /// follows from the level wrist: J3 = -(J4 + J2).
    pub fn sync_from_actuators(&mut self) -> Result<ArmState, ArmError> {
        let base = self.read_angle(Joint::Base)?;
        let shoulder = self.read_angle(Joint::Shoulder)?;
        let wrist = self.read_angle(Joint::Elbow)?;
        self.state = ArmState::from_joints(
            self.kinematics.as_ref(),
            [base, shoulder, -(wrist + shoulder), wrist],
        );
        debug!("synchronized from servos: {:?}", self.state.joints);
        Ok(self.state)
    }

    /// Holds every servo at the angle it currently reports and adopts that pose.
    pub fn stop(&mut self) -> Result<ArmState, ArmError> {
        for joint in Joint::ALL {
            let actuator = self.actuators.get_mut(joint);
            let physical = actuator
                .read()
                .and_then(|angle| actuator.write(angle, 0).map(|_| angle))
                .map_err(|reason| ArmError::Actuator { joint, reason })?;
            debug!("{} held at {:.1}", joint, physical);
        }
        info!("arm stopped");
        self.sync_from_actuators()
    }

    /// Logs the coordinate with a label telling what it is.
    pub fn report_coord(&self, kind: CoordKind, position: &Position) {
        info!("{} {:.2}, {:.2}, {:.2}", kind.label(), position.x, position.y, position.z);
    }

    pub(crate) fn settle(&mut self, duration: Duration) {
        self.delay.delay(duration);
    }

    fn refresh(&mut self) {
        self.state.position = self.kinematics.forward(&self.state.joints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::simulated_arm;
    use crate::utils::max_joint_difference;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_write_servo_updates_state() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        let before = arm.state();
        let after = arm.write_servo(Joint::Shoulder, 30.0, 0).unwrap();
        assert_eq!(after.joints[J_SHOULDER], 30.0);
        assert_ne!(before.position, after.position);
        assert_eq!(after.position, arm.compute_fk(&after.joints));
        assert_abs_diff_eq!(arm.read_angle(Joint::Shoulder).unwrap(), 30.0);
    }

    #[test]
    fn test_claw_does_not_change_kinematics() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        let before = arm.state();
        let after = arm.write_servo(Joint::Claw, 45.0, 0).unwrap();
        assert_eq!(before, after);
        assert_abs_diff_eq!(arm.read_angle(Joint::Claw).unwrap(), 45.0);
    }

    #[test]
    fn test_invalid_joint_index() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        let before = arm.state();
        assert_eq!(arm.write_servo_index(5, 10.0, 0), Err(ArmError::InvalidJoint(5)));
        assert_eq!(arm.state(), before);
        assert!(arm.write_servo_index(3, 10.0, 0).is_ok());
        assert_eq!(arm.joints()[J_BASE], 10.0);
    }

    #[test]
    fn test_move_to_position_reaches_target() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        let target = Position::new(9.06, -18.12, 5.98);
        let state = arm.move_to_position(&target, 0).unwrap();
        assert_abs_diff_eq!(state.position.x, target.x, epsilon = 1e-9);
        assert_abs_diff_eq!(state.position.y, target.y, epsilon = 1e-9);
        assert_abs_diff_eq!(state.position.z, target.z, epsilon = 1e-9);
        assert_eq!(state.position, arm.end_effector());
    }

    #[test]
    fn test_clamped_command_is_what_state_records() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        // Behind the base: J1 = 180, the base servo stops at its end
        let state = arm.move_to_position(&Position::new(-15.0, 0.0, 6.0), 0).unwrap();
        assert_abs_diff_eq!(state.joints[J_BASE], 90.0);
        assert_abs_diff_eq!(state.position.y, 15.0, epsilon = 1e-9);

        // The servos report whole degrees, so allow for the rounding of shoulder and elbow
        let reported = arm.sync_from_actuators().unwrap();
        assert_abs_diff_eq!(reported.joints[J_BASE], 90.0);
        assert!((reported.position - state.position).norm() < 0.1,
            "{:?} vs {:?}", reported.position, state.position);
    }

    #[test]
    fn test_servo_writes_and_pins() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        assert_eq!(arm.mapping().servo(Joint::Elbow).pin, 6);
        arm.move_to(&[10.0, 20.0, -50.0, 30.0], 0).unwrap();
        // J3 follows the level wrist
        assert_eq!(arm.joints()[J_ELBOW], -50.0);
        arm.write_servo(Joint::Shoulder, 25.0, 0).unwrap();
        assert_eq!(arm.joints()[J_ELBOW], -55.0);
    }

    #[test]
    fn test_unreachable_leaves_state_untouched() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        let before = arm.state();
        let result = arm.move_to_position(&Position::new(40.0, 0.0, 6.0), 0);
        assert!(matches!(result, Err(ArmError::Unreachable { .. })));
        assert_eq!(arm.state(), before);
    }

    #[test]
    fn test_sync_from_actuators() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        let joints = [-20.0, 40.0, -70.0, 30.0];
        arm.move_to(&joints, 0).unwrap();
        let synced = arm.sync_from_actuators().unwrap();
        assert!(max_joint_difference(&synced.joints, &joints) < 1e-9, "{:?}", synced.joints);
    }

    #[test]
    fn test_stop_holds_reported_pose() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        arm.move_to(&[-20.0, 40.0, -70.0, 30.0], 0).unwrap();
        arm.sync_from_actuators().unwrap();
        // Slow base move, interrupted after the first poll
        arm.write_servo(Joint::Base, 20.0, 1).unwrap();
        let stopped = arm.stop().unwrap();
        assert_abs_diff_eq!(stopped.joints[J_BASE], -19.0);
        assert_abs_diff_eq!(arm.read_angle(Joint::Base).unwrap(), -19.0);
    }
}
