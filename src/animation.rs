// Frame driver: turns wall-clock time into emissions, physics steps and a
// redraw. Knows nothing about the browser; the canvas and frame scheduler
// are wired up in `lib.rs`.

use std::f64::consts::PI;

use rand::Rng;

use crate::heart::point_on_heart;
use crate::particle::Point;
use crate::pool::ParticlePool;
use crate::settings::Settings;
use crate::surface::Surface;

/// Where a particle emitted at `angle` starts and how fast it leaves, for a
/// heart centered on `center` in screen space (y down). Launch velocity
/// points away from the heart's origin, scaled from the curve point itself.
pub fn launch(angle: f64, center: Point, scale: f64) -> (Point, Point) {
    let on_curve = point_on_heart(angle);
    let position = glm::vec2(center.x + on_curve.x, center.y - on_curve.y);
    let velocity = glm::vec2(on_curve.x * scale, -on_curve.y * scale);
    (position, velocity)
}

pub struct Animation<R> {
    settings: Settings,
    pool: ParticlePool,
    rng: R,
    time: Option<f64>,
    // Fraction of a particle owed from earlier frames.
    backlog: f64,
}

impl<R: Rng> Animation<R> {
    pub fn new(settings: Settings, rng: R) -> Animation<R> {
        Animation {
            pool: ParticlePool::from_settings(&settings),
            settings,
            rng,
            time: None,
            backlog: 0.0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Seconds since the previous call; zero the first time and whenever
    /// the clock runs backwards.
    pub fn delta_time(&mut self, now: f64) -> f64 {
        let delta = match self.time {
            Some(time) => (now - time).max(0.0),
            None => 0.0,
        };
        self.time = Some(now);
        delta
    }

    /// Emits as many particles as `delta` seconds are worth at the rate that
    /// keeps the pool full. Returns how many were emitted.
    pub fn emit(&mut self, delta: f64, center: Point) -> usize {
        let amount = self.settings.particle_rate() * delta + self.backlog;
        let count = amount.trunc();
        self.backlog = amount - count;

        let count = count as usize;
        for _ in 0..count {
            let angle = PI - 2.0 * PI * self.rng.gen::<f64>();
            let (position, velocity) = launch(angle, center, self.settings.launch_scale);
            self.pool
                .add(position.x, position.y, velocity.x, velocity.y);
        }
        count
    }

    /// One full frame at wall-clock time `now` (seconds).
    pub fn frame<S: Surface>(
        &mut self,
        now: f64,
        surface: &mut S,
        image: &S::Image,
    ) -> Result<(), S::Error> {
        let delta = self.delta_time(now);
        surface.clear();

        let center = glm::vec2(surface.width() / 2.0, surface.height() / 2.0);
        self.emit(delta, center);

        self.pool.update(delta);
        self.pool.draw(surface, image)
    }
}
