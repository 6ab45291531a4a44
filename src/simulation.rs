//! Simulated servo and edge sensor, for tests and for running the controller without hardware

use crate::actuator::{Actuator, EdgeSensor, NoDelay};
use crate::arm::Arm;
use crate::arm_error::ArmError;
use crate::joint::PerJoint;
use crate::settings::ArmSettings;

/// Servo that moves towards the commanded angle a little on every read, like a slow
/// hobby servo being polled. It reports whole degrees, as servo libraries do.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedServo {
    pin: Option<u8>,
    current: f64,
    target: f64,
    speed: u8,
    min: f64,
    max: f64,
    /// Number of write calls received.
    pub writes: usize,
}

impl SimulatedServo {
    /// Servo resting at `initial` degrees within 0 to 180.
    pub fn new(initial: f64) -> Self {
        SimulatedServo {
            pin: None,
            current: initial,
            target: initial,
            speed: 0,
            min: 0.0,
            max: 180.0,
            writes: 0,
        }
    }

    pub fn pin(&self) -> Option<u8> {
        self.pin
    }

    /// The last commanded angle.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Degrees moved per read: speed 0 arrives at once, otherwise one degree per speed unit.
    fn step(&self) -> f64 {
        if self.speed == 0 {
            f64::INFINITY
        } else {
            self.speed as f64
        }
    }
}

impl Default for SimulatedServo {
    fn default() -> Self {
        SimulatedServo::new(90.0)
    }
}

impl Actuator for SimulatedServo {
    fn attach(&mut self, pin: u8) -> Result<(), String> {
        if let Some(existing) = self.pin {
            return Err(format!("already attached to pin {}", existing));
        }
        self.pin = Some(pin);
        Ok(())
    }

    fn write(&mut self, angle: f64, speed: u8) -> Result<(), String> {
        if self.pin.is_none() {
            return Err("write before attach".to_string());
        }
        if !angle.is_finite() {
            return Err(format!("angle {} is not a number", angle));
        }
        self.target = angle.clamp(self.min, self.max);
        self.speed = speed;
        self.writes += 1;
        Ok(())
    }

    fn read(&mut self) -> Result<f64, String> {
        if self.pin.is_none() {
            return Err("read before attach".to_string());
        }
        let remaining = self.target - self.current;
        if remaining.abs() <= self.step() {
            self.current = self.target;
        } else {
            self.current += self.step().copysign(remaining);
        }
        Ok(self.current.round())
    }
}

/// Edge sensor that fires on a given poll, or never.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatedEdge {
    detect_on: Option<usize>,
    /// Number of times the sensor was polled.
    pub polls: usize,
}

impl SimulatedEdge {
    /// Reports a detection on the `poll`-th call (counting from 1) and on every later call.
    pub fn detect_on(poll: usize) -> Self {
        SimulatedEdge { detect_on: Some(poll), polls: 0 }
    }

    pub fn never() -> Self {
        SimulatedEdge { detect_on: None, polls: 0 }
    }
}

impl EdgeSensor for SimulatedEdge {
    fn is_below(&mut self) -> bool {
        self.polls += 1;
        matches!(self.detect_on, Some(poll) if self.polls >= poll)
    }
}

/// Arm built from the settings on simulated servos resting at 90 degrees, with delays
/// that return immediately.
pub fn simulated_arm(settings: &ArmSettings) -> Result<Arm, ArmError> {
    let actuators = PerJoint::from_fn(|_| Box::new(SimulatedServo::default()) as Box<dyn Actuator>);
    Arm::from_settings(settings, actuators, Box::new(NoDelay::default()))
}
