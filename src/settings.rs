// Constants that shape the animation. Built once and handed to the pool and
// the driver; nothing reads them from a global.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Pool capacity, the most particles alive at once.
    pub length: usize,
    /// Lifetime of a particle in seconds.
    pub duration: f64,
    /// Nominal launch speed. Emission derives its speed from the heart
    /// curve instead (see `launch_scale`).
    pub velocity: f64,
    /// Acceleration as a multiple of launch velocity. Negative values pull
    /// particles back toward their origin.
    pub effect: f64,
    /// Side length of the baked heart sprite in pixels.
    pub size: u32,
    /// Launch velocity as a multiple of the emitting curve point.
    pub launch_scale: f64,
    pub color: Color,
}

impl Settings {
    /// Particles per second that keep the pool about full at steady state.
    pub fn particle_rate(&self) -> f64 {
        if self.duration > 0.0 {
            self.length as f64 / self.duration
        } else {
            0.0
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            length: 500,
            duration: 2.0,
            velocity: 100.0,
            effect: -0.75,
            size: 30,
            launch_scale: 2.0,
            color: Color::from_u32(0xff69b4ff),
        }
    }
}
