//! Hardcoded geometry for a few arms

pub mod arm_kinematics {
    use crate::parameters::arm_kinematics::Parameters;

    #[allow(dead_code)]
    impl Parameters {
        /// The 3D printed desk arm the servo offsets were calibrated on, in centimeters.
        pub fn desk_arm() -> Self {
            Parameters {
                base_height: 6.0,
                upper_arm: 8.0,
                fore_arm: 8.0,
                wrist_offset: 6.0,
            }
        }

        // MeArm style acrylic kit with the gripper mounted forward of the wrist.
        pub fn me_arm() -> Self {
            Parameters {
                base_height: 5.5,
                upper_arm: 8.0,
                fore_arm: 8.0,
                wrist_offset: 6.8,
            }
        }
    }

    impl Default for Parameters {
        fn default() -> Self {
            Self::desk_arm()
        }
    }
}
