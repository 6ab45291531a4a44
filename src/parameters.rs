//! Defines the arm geometry data structure

pub mod arm_kinematics {
    use crate::arm_error::ArmError;

    /// Link lengths of the arm. See [parameters_robots.rs](parameters_robots.rs) for concrete arms.
    /// All lengths share one unit (the reference arm is measured in centimeters).
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// Height of the shoulder axis above the base plate.
        pub base_height: f64,

        /// Distance between the shoulder and the elbow axis.
        pub upper_arm: f64,

        /// Distance between the elbow and the wrist axis.
        pub fore_arm: f64,

        /// Horizontal distance from the wrist axis to the tool point. The wrist is kept
        /// level, so this offset always points away from the base axis.
        pub wrist_offset: f64,
    }

    impl Parameters {
        /// Creates parameters from lengths ordered base height, upper arm, fore arm,
        /// wrist offset. Every length must be finite and positive.
        pub fn new(lengths: [f64; 4]) -> Result<Self, ArmError> {
            let names = ["base_height", "upper_arm", "fore_arm", "wrist_offset"];
            for (name, length) in names.iter().zip(lengths) {
                if !length.is_finite() || length <= 0.0 {
                    return Err(ArmError::InvalidParameters(format!(
                        "{} must be positive (got {})", name, length
                    )));
                }
            }
            Ok(Parameters {
                base_height: lengths[0],
                upper_arm: lengths[1],
                fore_arm: lengths[2],
                wrist_offset: lengths[3],
            })
        }

        /// Lengths in the order accepted by [`Parameters::new`].
        pub fn lengths(&self) -> [f64; 4] {
            [self.base_height, self.upper_arm, self.fore_arm, self.wrist_offset]
        }

        /// Longest horizontal reach of the tool point.
        pub fn max_reach(&self) -> f64 {
            self.upper_arm + self.fore_arm + self.wrist_offset
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "arm_geometry:\n  \
              base_height: {}\n  \
              upper_arm: {}\n  \
              fore_arm: {}\n  \
              wrist_offset: {}\n",
                self.base_height, self.upper_arm, self.fore_arm, self.wrist_offset
            )
        }
    }
}
