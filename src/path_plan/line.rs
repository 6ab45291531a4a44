//! Straight line stepping in the horizontal plane

use std::time::Duration;
use tracing::debug;

use crate::arm::{Arm, CoordKind};
use crate::arm_error::ArmError;
use crate::kinematic_traits::Position;
use crate::utils::d2r;

/// How a line is stepped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineConfig {
    /// Number of points visited. This is a fixed count, not derived from the distance
    /// to the end point, so the end point is only reached if it is close enough.
    pub steps: usize,

    /// Distance moved along x between points.
    pub step_size: f64,

    /// Wait after every point for the servos to get there.
    pub settle: Duration,
}

impl Default for LineConfig {
    fn default() -> Self {
        LineConfig {
            steps: 2,
            step_size: 1.0,
            settle: Duration::ZERO,
        }
    }
}

/// Points along the line `y = m x` through the origin of the base frame, `m = tan(heading)`.
///
/// The first point is `start` itself. Every following point advances x by the step size
/// towards `end.x` (forward if both x are equal), takes y from the line and keeps the
/// height of `start`. Exactly `config.steps` points are produced.
pub fn line_points(start: &Position, end: &Position, heading_deg: f64, config: &LineConfig) -> Vec<Position> {
    let m = d2r(heading_deg).tan();
    let step = if end.x < start.x { -config.step_size } else { config.step_size };

    let mut points = Vec::with_capacity(config.steps);
    let mut point = *start;
    for _ in 0..config.steps {
        points.push(point);
        // moving in the xy plane
        point.x += step;
        point.y = m * point.x;
    }
    points
}

impl Arm {
    /// Drives the arm through the points of [`line_points`] using the line settings of the
    /// arm, stopping at the first point that cannot be reached or commanded.
    ///
    /// Returns the visited points; the last one is where the arm stands now. This is a
    /// short preview of the line, not a walk to `end`.
    pub fn interpolate_line(&mut self, start: &Position, end: &Position, heading_deg: f64) -> Result<Vec<Position>, ArmError> {
        let config = self.line;
        let points = line_points(start, end, heading_deg, &config);
        self.report_coord(CoordKind::Begin, start);
        for (i, point) in points.iter().enumerate() {
            debug!("line point {}: {:.3}, {:.3}, {:.3}", i, point.x, point.y, point.z);
            let joints = self.compute_ik(point)?;
            self.move_to(&joints, self.speed)?;
            self.settle(config.settle);
        }
        if let Some(last) = points.last() {
            self.report_coord(CoordKind::End, last);
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ArmSettings;
    use crate::simulation::simulated_arm;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_points_follow_heading() {
        let config = LineConfig { steps: 4, ..LineConfig::default() };
        let points = line_points(&Position::new(4.0, 0.0, 6.0), &Position::new(10.0, 0.0, 6.0), 45.0, &config);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Position::new(4.0, 0.0, 6.0));
        for (i, p) in points.iter().enumerate().skip(1) {
            assert_abs_diff_eq!(p.x, 4.0 + i as f64, epsilon = 1e-12);
            assert_abs_diff_eq!(p.y, p.x, epsilon = 1e-9);
            assert_eq!(p.z, 6.0);
        }
    }

    #[test]
    fn test_steps_backwards() {
        let config = LineConfig { steps: 3, step_size: 0.5, ..LineConfig::default() };
        let points = line_points(&Position::new(10.0, 0.0, 6.0), &Position::new(4.0, 0.0, 6.0), 0.0, &config);
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 9.5, 9.0]);
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let config = LineConfig { steps: 0, ..LineConfig::default() };
        assert!(line_points(&Position::zeros(), &Position::zeros(), 0.0, &config).is_empty());
    }

    #[test]
    fn test_unreachable_point_aborts() {
        let mut arm = simulated_arm(&ArmSettings::default()).unwrap();
        arm.line.steps = 5;
        // 20.5 is reachable at shoulder height, 21.5 still is, 22.5 is not
        let result = arm.interpolate_line(&Position::new(20.5, 0.0, 6.0), &Position::new(30.0, 0.0, 6.0), 0.0);
        assert!(matches!(result, Err(ArmError::Unreachable { .. })));
        assert_abs_diff_eq!(arm.end_effector().x, 21.5, epsilon = 1e-9);
    }
}
