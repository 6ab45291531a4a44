//! Helper functions

use crate::kinematic_traits::{Joints, Position};

/// Converts angle in degrees to radians
pub fn d2r(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts angle in radians to degrees
pub fn r2d(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Print joint values in degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..4 {
        row_str.push_str(&format!("{:7.2} ", joints[joint_idx]));
    }
    println!("[{}]", row_str.trim_end());
}

pub fn dump_position(position: &Position) {
    println!("x: {:.5}, y: {:.5}, z: {:.5}", position.x, position.y, position.z);
}

/// Allows to specify joint values as whole degrees
#[allow(dead_code)]
pub fn as_joints(degrees: [i32; 4]) -> Joints {
    std::array::from_fn(|i| degrees[i] as f64)
}

/// Largest absolute difference between two joint sets, in degrees.
pub fn max_joint_difference(a: &Joints, b: &Joints) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

pub fn assert_position_eq(a: &Position, b: &Position, distance_tolerance: f64) -> bool {
    let distance = (a - b).norm();
    if distance > distance_tolerance {
        dump_position(a);
        dump_position(b);
        panic!("Positions are {} apart", distance);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(263.0), -97.0);
        assert_eq!(normalize_degrees(-450.0), -90.0);
    }

    #[test]
    fn test_degree_conversion() {
        assert!((d2r(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((r2d(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
        let back = as_joints([10, -20, 30, -40]).map(|a| r2d(d2r(a)));
        assert!(max_joint_difference(&back, &[10.0, -20.0, 30.0, -40.0]) < 1e-12);
    }
}
