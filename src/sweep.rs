//! Sweeping one joint until the edge sensor fires or the joint arrives

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::actuator::EdgeSensor;
use crate::arm::{Arm, CoordKind};
use crate::arm_error::ArmError;
use crate::joint::Joint;
use crate::kinematic_traits::Position;

/// Parameters of the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// Joint that sweeps.
    pub joint: Joint,

    /// Speed of the sweeping joint; 1 is the slowest.
    pub speed: u8,

    /// Wait after moving to the begin position before sweeping.
    pub settle: Duration,

    /// Wait between polls.
    pub poll_interval: Duration,

    /// Polls before giving up with a timeout.
    pub max_iterations: usize,

    /// The joint has arrived when the reported angle is this close to the target, degrees.
    /// Servos report whole degrees, so this should not be less than 0.5.
    pub tolerance: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            joint: Joint::Base,
            speed: 1,
            settle: Duration::from_millis(2000),
            poll_interval: Duration::ZERO,
            max_iterations: 10_000,
            tolerance: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepState {
    MovingToStart,
    Sweeping,
    Done(SweepOutcome),
}

/// How a sweep ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepOutcome {
    /// The edge sensor fired on the given poll. The arm is held there and the position
    /// is the end effector as reported by the servos.
    Detected { iteration: usize, position: Position },

    /// The joint arrived at the target angle without a detection. The position is read
    /// back from the servos, as for a detection.
    Reached { iterations: usize, position: Position },
}

impl SweepOutcome {
    pub fn detected(&self) -> bool {
        matches!(self, SweepOutcome::Detected { .. })
    }

    pub fn position(&self) -> Position {
        match self {
            SweepOutcome::Detected { position, .. } | SweepOutcome::Reached { position, .. } => *position,
        }
    }
}

impl Arm {
    /// Calls `poll` until it returns a value, at most `max_iterations` times, waiting
    /// `interval` between calls. Iterations passed to `poll` count from 1.
    pub fn poll_until<T>(
        &mut self,
        max_iterations: usize,
        interval: Duration,
        mut poll: impl FnMut(&mut Arm, usize) -> Result<Option<T>, ArmError>,
    ) -> Result<T, ArmError> {
        for iteration in 1..=max_iterations {
            if let Some(result) = poll(self, iteration)? {
                return Ok(result);
            }
            self.settle(interval);
        }
        Err(ArmError::Timeout { iterations: max_iterations })
    }

    /// Moves to `begin`, then turns the sweep joint slowly towards `target_angle` while
    /// watching the edge sensor. Ends as soon as the sensor fires or the joint arrives.
    ///
    /// If neither happens within the poll limit the arm is stopped where it is and
    /// `Timeout` is returned. Any other error aborts the sweep immediately.
    pub fn sweep(&mut self, begin: &Position, target_angle: f64, edge: &mut dyn EdgeSensor) -> Result<SweepOutcome, ArmError> {
        let config = self.sweep;
        let mut state = SweepState::MovingToStart;

        loop {
            debug!("sweep state {:?}", state);
            state = match state {
                SweepState::MovingToStart => {
                    self.report_coord(CoordKind::Begin, begin);
                    self.move_to_position(begin, self.speed)?;
                    self.settle(config.settle);
                    self.sync_from_actuators()?;

                    self.write_servo(config.joint, target_angle, config.speed)?;
                    SweepState::Sweeping
                }
                SweepState::Sweeping => {
                    let polled = self.poll_until(config.max_iterations, config.poll_interval, |arm, iteration| {
                        let angle = arm.read_angle(config.joint)?;
                        let below = edge.is_below();
                        debug!("poll {}: {} at {:.1}, edge {}", iteration, config.joint, angle, below);
                        if below {
                            Ok(Some((iteration, true)))
                        } else if (angle - target_angle).abs() <= config.tolerance {
                            Ok(Some((iteration, false)))
                        } else {
                            Ok(None)
                        }
                    });

                    let outcome = match polled {
                        Ok((iteration, true)) => {
                            // Hold the joint where the edge was seen; the state still holds
                            // the sweep target until the servos are read back
                            let position = self.stop()?.position;
                            SweepOutcome::Detected { iteration, position }
                        }
                        Ok((iterations, false)) => {
                            let position = self.sync_from_actuators()?.position;
                            SweepOutcome::Reached { iterations, position }
                        }
                        Err(ArmError::Timeout { iterations }) => {
                            warn!("sweep of {} to {:.1} timed out, stopping", config.joint, target_angle);
                            self.stop()?;
                            return Err(ArmError::Timeout { iterations });
                        }
                        Err(e) => return Err(e),
                    };
                    SweepState::Done(outcome)
                }
                SweepState::Done(outcome) => {
                    self.report_coord(CoordKind::EndEffector, &outcome.position());
                    info!("sweep done: {}", if outcome.detected() { "detected" } else { "reached target" });
                    return Ok(outcome);
                }
            };
        }
    }
}
