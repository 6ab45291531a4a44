#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::actuator_mapping::ServoMapping;
    use crate::joint::Joint;
    use crate::parameter_error::ParameterError;
    use crate::parameters::arm_kinematics::Parameters;
    use crate::settings::ArmSettings;

    const READ_ERROR: &str = "Failed to load settings from file";

    #[test]
    fn test_settings_from_yaml() {
        let loaded = ArmSettings::from_yaml_file("src/tests/data/desk_arm.yaml").expect(READ_ERROR);
        // The file spells out every default
        assert_eq!(loaded, ArmSettings::default());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let loaded = ArmSettings::from_yaml_file("src/tests/data/me_arm_partial.yaml").expect(READ_ERROR);
        let defaults = ArmSettings::default();

        assert_eq!(loaded.parameters, Parameters::me_arm());
        let shoulder = loaded.servos.servo(Joint::Shoulder);
        assert_eq!(
            *shoulder,
            ServoMapping { offset: -4.5, max: 170.0, ..*defaults.servos.servo(Joint::Shoulder) }
        );
        for joint in [Joint::Base, Joint::Elbow, Joint::Claw] {
            assert_eq!(loaded.servos.servo(joint), defaults.servos.servo(joint));
        }
        assert!(loaded.enforce_limits);
        assert_eq!(loaded.speed, defaults.speed);
        assert_eq!(loaded.line, defaults.line);
        assert_eq!(loaded.sweep.joint, Joint::Shoulder);
        assert_eq!(loaded.sweep.max_iterations, 500);
        assert_eq!(loaded.sweep.settle, Duration::from_millis(2000));
    }

    #[test]
    fn test_yaml_view_reads_back() {
        let mut settings = ArmSettings::default();
        settings.parameters = Parameters::me_arm();
        settings.speed = 40;
        settings.sweep.joint = Joint::Elbow;
        settings.line.steps = 12;
        settings.line.step_size = 0.25;

        let yaml = settings.to_yaml();
        let loaded = ArmSettings::from_yaml_str(&yaml).expect(READ_ERROR);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_geometry() {
        let result = ArmSettings::from_yaml_file("src/tests/data/bad_geometry.yaml");
        assert!(matches!(result, Err(ParameterError::ParameterPopulationError(_))));
    }

    #[test]
    fn test_missing_field() {
        match ArmSettings::from_yaml_file("src/tests/data/missing_fore_arm.yaml") {
            Err(ParameterError::MissingField(field)) => assert_eq!(field, "arm_geometry.fore_arm"),
            other => panic!("expected a missing field, got {:?}", other),
        }
        assert!(matches!(
            ArmSettings::from_yaml_str("speed: 10\n"),
            Err(ParameterError::MissingField(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ArmSettings::from_yaml_file("src/tests/data/no_such_arm.yaml"),
            Err(ParameterError::IoError(_))
        ));
    }

    #[test]
    fn test_wrong_values() {
        let geometry = "arm_geometry: { base_height: 6, upper_arm: 8, fore_arm: 8, wrist_offset: 6 }\n";
        let wrong = [
            "speed: 300\n",
            "speed: fast\n",
            "enforce_limits: 1\n",
            "servos:\n  elbow: { min: 120, max: 60 }\n",
            "servos:\n  base: { pin: -1 }\n",
            "line: { step_size: 0 }\n",
            "sweep: { joint: wrist }\n",
            "sweep: { max_iterations: 0 }\n",
            "sweep: { tolerance: -0.5 }\n",
        ];
        for extra in wrong {
            let result = ArmSettings::from_yaml_str(&format!("{}{}", geometry, extra));
            assert!(
                matches!(result, Err(ParameterError::WrongValue { .. })),
                "{:?} accepted: {:?}", extra, result
            );
        }
    }

    #[test]
    fn test_not_yaml() {
        assert!(matches!(
            ArmSettings::from_yaml_str("arm_geometry: [1, 2"),
            Err(ParameterError::ParseError(_))
        ));
        assert!(matches!(
            ArmSettings::from_yaml_str("- just\n- a list\n"),
            Err(ParameterError::ParseError(_))
        ));
    }
}
