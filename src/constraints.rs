use crate::kinematic_traits::Joints;

/// Joint limits in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraints {
    /// Normalized lower limit. If more than upper limit, the range wraps-around through 0
    pub from: [f64; 4],

    /// Normalized upper limit. If less than lower limit, the range wraps-around through 0
    pub to: [f64; 4],
}

impl Constraints {
    pub fn new(from: [f64; 4], to: [f64; 4]) -> Self {
        Constraints {
            from: from.map(|f| f.rem_euclid(360.0)),
            to: to.map(|t| t.rem_euclid(360.0)),
        }
    }

    /// Index of the first joint outside its range, or None if all are within.
    pub fn violation(&self, angles: &Joints) -> Option<usize> {
        for i in 0..4 {
            if self.from[i] == self.to[i] {
                continue; // Joint without constraints, from == to
            }
            let angle = angles[i].rem_euclid(360.0);
            let inside = if self.from[i] <= self.to[i] {
                angle >= self.from[i] && angle <= self.to[i]
            } else {
                angle >= self.from[i] || angle <= self.to[i]
            };
            if !inside {
                return Some(i);
            }
        }
        None
    }

    pub fn compliant(&self, angles: &Joints) -> bool {
        self.violation(angles).is_none()
    }
}
