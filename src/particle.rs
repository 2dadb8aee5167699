// One heart sprite in flight: position, velocity, acceleration and age.
// Particles live in pool slots and are re-initialized in place.

use crate::surface::{Sprite, Surface};

pub type Point = glm::DVec2;

/// Cubic ease-out: fast start, settles at 1.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    pub acceleration: Point,
    pub age: f64,
}

impl Default for Particle {
    fn default() -> Self {
        Particle {
            position: glm::vec2(0.0, 0.0),
            velocity: glm::vec2(0.0, 0.0),
            acceleration: glm::vec2(0.0, 0.0),
            age: 0.0,
        }
    }
}

impl Particle {
    pub fn initialize(&mut self, x: f64, y: f64, dx: f64, dy: f64, effect: f64) {
        self.position = glm::vec2(x, y);
        self.velocity = glm::vec2(dx, dy);
        self.acceleration = glm::vec2(dx * effect, dy * effect);
        self.age = 0.0;
    }

    // Position steps with the velocity from before this update.
    pub fn update(&mut self, delta: f64) {
        self.position += self.velocity * delta;
        self.velocity += self.acceleration * delta;
        self.age += delta;
    }

    /// Grows with an ease-out from nothing to half the sprite size and fades
    /// linearly over `duration`. Does nothing while `image` is not ready.
    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        image: &S::Image,
        duration: f64,
    ) -> Result<(), S::Error> {
        if !image.is_ready() {
            return Ok(());
        }
        let progress = self.age / duration;
        let size = image.width() * ease_out_cubic(progress) * 0.5;
        surface.draw_image(
            image,
            1.0 - progress,
            self.position.x - size / 2.0,
            self.position.y - size / 2.0,
            size,
            size,
        )
    }
}
