//! Everything needed to set up an arm: geometry, servo mounting and motion settings

use crate::actuator_mapping::ActuatorMap;
use crate::arm::DEFAULT_SPEED;
use crate::joint::Joint;
use crate::kinematics_impl::ArmKinematics;
use crate::line::LineConfig;
use crate::parameters::arm_kinematics::Parameters;
use crate::sweep::SweepConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ArmSettings {
    pub parameters: Parameters,
    pub servos: ActuatorMap,

    /// Speed of positioning moves.
    pub speed: u8,

    /// Reject inverse kinematic solutions the servos cannot take, instead of clamping
    /// the servo commands.
    pub enforce_limits: bool,

    pub line: LineConfig,
    pub sweep: SweepConfig,
}

impl Default for ArmSettings {
    fn default() -> Self {
        ArmSettings {
            parameters: Parameters::default(),
            servos: ActuatorMap::default(),
            speed: DEFAULT_SPEED,
            enforce_limits: false,
            line: LineConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl ArmSettings {
    /// Kinematic solver for these settings, constrained to the servo ranges if limits are enforced.
    pub fn kinematics(&self) -> ArmKinematics {
        if self.enforce_limits {
            ArmKinematics::new_with_constraints(self.parameters, self.servos.constraints())
        } else {
            ArmKinematics::new(self.parameters)
        }
    }

    /// Convert to string yaml representation, in the format read by `from_yaml_file`.
    pub fn to_yaml(&self) -> String {
        let mut yaml = self.parameters.to_yaml();
        yaml.push_str("servos:\n");
        for joint in [Joint::Base, Joint::Shoulder, Joint::Elbow, Joint::Claw] {
            let s = self.servos.servo(joint);
            yaml.push_str(&format!(
                "  {}: {{ pin: {}, offset: {}, reversed: {}, min: {}, max: {} }}\n",
                joint, s.pin, s.offset, s.reversed, s.min, s.max
            ));
        }
        yaml.push_str(&format!(
            "speed: {}\n\
            enforce_limits: {}\n\
            line: {{ steps: {}, step_size: {}, settle_ms: {} }}\n\
            sweep: {{ joint: {}, speed: {}, settle_ms: {}, poll_ms: {}, max_iterations: {}, tolerance: {} }}\n",
            self.speed,
            self.enforce_limits,
            self.line.steps,
            self.line.step_size,
            self.line.settle.as_millis(),
            self.sweep.joint,
            self.sweep.speed,
            self.sweep.settle.as_millis(),
            self.sweep.poll_interval.as_millis(),
            self.sweep.max_iterations,
            self.sweep.tolerance,
        ));
        yaml
    }
}
