//! Supports reading arm settings from YAML file (optional)

use std::path::Path;
use std::time::Duration;
use yaml_rust2::{Yaml, YamlLoader};

use crate::actuator_mapping::ServoMapping;
use crate::joint::Joint;
use crate::parameter_error::ParameterError;
use crate::parameters::arm_kinematics::Parameters;
use crate::settings::ArmSettings;

impl ArmSettings {
    /// Read the arm settings from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Desk arm, centimeters
    /// arm_geometry:
    ///   base_height: 6
    ///   upper_arm: 8
    ///   fore_arm: 8
    ///   wrist_offset: 6
    /// servos:
    ///   base: { pin: 9, offset: 90, reversed: true, min: 0, max: 180 }
    ///   shoulder: { pin: 11, offset: 0, reversed: true }
    /// speed: 80
    /// enforce_limits: false
    /// line: { steps: 2, step_size: 1.0, settle_ms: 0 }
    /// sweep: { joint: base, speed: 1, settle_ms: 2000, poll_ms: 0, max_iterations: 10000, tolerance: 0.5 }
    /// ```
    /// Only `arm_geometry` is required. Servos not listed, and fields not given for a
    /// listed servo, keep the desk arm calibration; other sections keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Same as [`ArmSettings::from_yaml_file`], reading the YAML text directly.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
        let root = docs
            .first()
            .ok_or_else(|| ParameterError::ParseError("empty document".to_string()))?;
        if root.as_hash().is_none() {
            return Err(ParameterError::ParseError("top level must be a mapping".to_string()));
        }

        let mut settings = ArmSettings::default();

        let geometry = &root["arm_geometry"];
        if geometry.is_badvalue() {
            return Err(ParameterError::MissingField("arm_geometry".to_string()));
        }
        settings.parameters = Parameters::new([
            required_number(&geometry["base_height"], "arm_geometry.base_height")?,
            required_number(&geometry["upper_arm"], "arm_geometry.upper_arm")?,
            required_number(&geometry["fore_arm"], "arm_geometry.fore_arm")?,
            required_number(&geometry["wrist_offset"], "arm_geometry.wrist_offset")?,
        ])
        .map_err(|e| ParameterError::ParameterPopulationError(e.to_string()))?;

        let servos = &root["servos"];
        for joint in Joint::ALL {
            let node = &servos[joint.name()];
            if !node.is_badvalue() {
                let servo = settings.servos.servos.get_mut(joint);
                *servo = read_servo(node, *servo, &format!("servos.{}", joint))?;
            }
        }

        if let Some(speed) = speed(&root["speed"], "speed")? {
            settings.speed = speed;
        }
        if let Some(enforce) = boolean(&root["enforce_limits"], "enforce_limits")? {
            settings.enforce_limits = enforce;
        }

        let line = &root["line"];
        if let Some(steps) = count(&line["steps"], "line.steps")? {
            settings.line.steps = steps;
        }
        if let Some(step_size) = number(&line["step_size"], "line.step_size")? {
            if step_size <= 0.0 {
                return Err(ParameterError::wrong("line.step_size", "must be positive"));
            }
            settings.line.step_size = step_size;
        }
        if let Some(settle) = millis(&line["settle_ms"], "line.settle_ms")? {
            settings.line.settle = settle;
        }

        let sweep = &root["sweep"];
        match &sweep["joint"] {
            Yaml::BadValue | Yaml::Null => {}
            Yaml::String(name) => {
                settings.sweep.joint = Joint::from_name(name)
                    .ok_or_else(|| ParameterError::wrong("sweep.joint", format!("unknown joint '{}'", name)))?;
            }
            _ => return Err(ParameterError::wrong("sweep.joint", "must be a joint name")),
        }
        if let Some(speed) = speed(&sweep["speed"], "sweep.speed")? {
            settings.sweep.speed = speed;
        }
        if let Some(settle) = millis(&sweep["settle_ms"], "sweep.settle_ms")? {
            settings.sweep.settle = settle;
        }
        if let Some(poll) = millis(&sweep["poll_ms"], "sweep.poll_ms")? {
            settings.sweep.poll_interval = poll;
        }
        if let Some(max_iterations) = count(&sweep["max_iterations"], "sweep.max_iterations")? {
            if max_iterations == 0 {
                return Err(ParameterError::wrong("sweep.max_iterations", "must be at least 1"));
            }
            settings.sweep.max_iterations = max_iterations;
        }
        if let Some(tolerance) = number(&sweep["tolerance"], "sweep.tolerance")? {
            if tolerance < 0.0 {
                return Err(ParameterError::wrong("sweep.tolerance", "must not be negative"));
            }
            settings.sweep.tolerance = tolerance;
        }

        Ok(settings)
    }
}

/// Overrides the given mapping with the fields present in the node.
fn read_servo(node: &Yaml, mut servo: ServoMapping, label: &str) -> Result<ServoMapping, ParameterError> {
    if node.as_hash().is_none() {
        return Err(ParameterError::wrong(label, "must be a mapping"));
    }
    if let Some(pin) = integer(&node["pin"], label)? {
        servo.pin = u8::try_from(pin)
            .map_err(|_| ParameterError::wrong(label, format!("pin {} out of range", pin)))?;
    }
    if let Some(offset) = number(&node["offset"], label)? {
        servo.offset = offset;
    }
    if let Some(reversed) = boolean(&node["reversed"], label)? {
        servo.reversed = reversed;
    }
    if let Some(min) = number(&node["min"], label)? {
        servo.min = min;
    }
    if let Some(max) = number(&node["max"], label)? {
        servo.max = max;
    }
    if servo.min >= servo.max {
        return Err(ParameterError::wrong(label, format!("min {} must be below max {}", servo.min, servo.max)));
    }
    Ok(servo)
}

/// Finite number, integers accepted. None if the field is absent.
fn number(node: &Yaml, field: &str) -> Result<Option<f64>, ParameterError> {
    let value = match node {
        Yaml::BadValue | Yaml::Null => return Ok(None),
        Yaml::Integer(i) => *i as f64,
        Yaml::Real(_) => node
            .as_f64()
            .ok_or_else(|| ParameterError::wrong(field, "not a number"))?,
        _ => return Err(ParameterError::wrong(field, "must be a number")),
    };
    if !value.is_finite() {
        return Err(ParameterError::wrong(field, format!("must be finite (got {})", value)));
    }
    Ok(Some(value))
}

fn required_number(node: &Yaml, field: &str) -> Result<f64, ParameterError> {
    number(node, field)?.ok_or_else(|| ParameterError::MissingField(field.to_string()))
}

fn integer(node: &Yaml, field: &str) -> Result<Option<i64>, ParameterError> {
    match node {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i)),
        _ => Err(ParameterError::wrong(field, "must be an integer")),
    }
}

fn count(node: &Yaml, field: &str) -> Result<Option<usize>, ParameterError> {
    integer(node, field)?
        .map(|i| usize::try_from(i).map_err(|_| ParameterError::wrong(field, "must not be negative")))
        .transpose()
}

fn speed(node: &Yaml, field: &str) -> Result<Option<u8>, ParameterError> {
    integer(node, field)?
        .map(|i| u8::try_from(i).map_err(|_| ParameterError::wrong(field, format!("speed {} is not in 0..=255", i))))
        .transpose()
}

fn millis(node: &Yaml, field: &str) -> Result<Option<Duration>, ParameterError> {
    Ok(count(node, field)?.map(|ms| Duration::from_millis(ms as u64)))
}

fn boolean(node: &Yaml, field: &str) -> Result<Option<bool>, ParameterError> {
    match node {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Boolean(b) => Ok(Some(*b)),
        _ => Err(ParameterError::wrong(field, "must be true or false")),
    }
}
