//! Hardware the controller talks to: servo drivers, the edge sensor and the clock.
//!
//! The controller only ever talks to these traits, so tests and the demo binary
//! run against [`crate::simulation`] while firmware plugs in its own drivers.

use std::time::Duration;

/// A hobby servo or any other position controlled actuator working in its own
/// physical degree range (typically 0 to 180).
pub trait Actuator {
    /// Bind the driver to the signal pin.
    fn attach(&mut self, pin: u8) -> Result<(), String>;

    /// Command the physical angle in degrees. Speed 0 moves at full speed,
    /// 1 is the slowest and 255 the fastest of the limited speeds.
    fn write(&mut self, angle: f64, speed: u8) -> Result<(), String>;

    /// The physical angle the actuator currently reports, in degrees.
    fn read(&mut self) -> Result<f64, String>;
}

/// Presence sensor that reports whether something is below the end effector.
pub trait EdgeSensor {
    fn is_below(&mut self) -> bool;
}

/// Blocking wait used to let servos settle between commands.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Returns immediately, only counting the time it was asked to wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay {
    pub requested: Duration,
}

impl Delay for NoDelay {
    fn delay(&mut self, duration: Duration) {
        self.requested += duration;
    }
}
