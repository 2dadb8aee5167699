// Fixed-capacity ring of particles. The live particles are the slots from
// `first_active` up to (not including) `first_free`, wrapping at the end of
// the storage. Adding to a full ring overwrites the oldest live particle.

use std::ops::Range;

use crate::particle::Particle;
use crate::settings::Settings;
use crate::surface::Surface;

pub struct ParticlePool {
    particles: Vec<Particle>,
    first_active: usize,
    first_free: usize,
    duration: f64,
    effect: f64,
}

impl ParticlePool {
    pub fn new(capacity: usize, duration: f64, effect: f64) -> ParticlePool {
        // One spare slot so that a full ring and an empty ring have
        // different cursor positions.
        ParticlePool {
            particles: vec![Particle::default(); capacity + 1],
            first_active: 0,
            first_free: 0,
            duration,
            effect,
        }
    }

    pub fn from_settings(settings: &Settings) -> ParticlePool {
        ParticlePool::new(settings.length, settings.duration, settings.effect)
    }

    pub fn capacity(&self) -> usize {
        self.particles.len() - 1
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn len(&self) -> usize {
        if self.first_active <= self.first_free {
            self.first_free - self.first_active
        } else {
            self.particles.len() - self.first_active + self.first_free
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_active == self.first_free
    }

    /// Live particles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        let (head, tail) = self.live_ranges();
        self.particles[head].iter().chain(self.particles[tail].iter())
    }

    pub fn add(&mut self, x: f64, y: f64, dx: f64, dy: f64) {
        self.particles[self.first_free].initialize(x, y, dx, dy, self.effect);
        self.first_free = self.next(self.first_free);
        if self.first_active == self.first_free {
            self.first_active = self.next(self.first_active);
        }
    }

    pub fn update(&mut self, delta: f64) {
        let (head, tail) = self.live_ranges();
        for particle in self.particles[head].iter_mut() {
            particle.update(delta);
        }
        for particle in self.particles[tail].iter_mut() {
            particle.update(delta);
        }

        // Everything shares one lifetime and ages together, so expired
        // particles are always at the head.
        while self.first_active != self.first_free
            && self.particles[self.first_active].age >= self.duration
        {
            self.first_active = self.next(self.first_active);
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, image: &S::Image) -> Result<(), S::Error> {
        for particle in self.iter() {
            particle.draw(surface, image, self.duration)?;
        }
        Ok(())
    }

    fn next(&self, index: usize) -> usize {
        (index + 1) % self.particles.len()
    }

    fn live_ranges(&self) -> (Range<usize>, Range<usize>) {
        if self.first_active <= self.first_free {
            (self.first_active..self.first_free, 0..0)
        } else {
            (self.first_active..self.particles.len(), 0..self.first_free)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, TestSprite};

    fn markers(pool: &ParticlePool) -> Vec<f64> {
        pool.iter().map(|p| p.position.x).collect()
    }

    #[test]
    fn empty_pool_is_a_no_op() {
        let mut pool = ParticlePool::new(4, 2.0, -0.75);
        pool.update(1.0);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        pool.draw(&mut surface, &TestSprite { size: 30.0 }).unwrap();

        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        assert!(surface.blits.is_empty());
    }

    #[test]
    fn adds_up_to_capacity_are_all_live() {
        for count in 0..=5 {
            let mut pool = ParticlePool::new(5, 2.0, -0.75);
            for i in 0..count {
                let i = i as f64;
                pool.add(i, i + 0.5, i * 2.0, i * 3.0);
            }

            assert_eq!(pool.len(), count);
            for (i, particle) in pool.iter().enumerate() {
                let i = i as f64;
                assert_eq!(particle.position, glm::vec2(i, i + 0.5));
                assert_eq!(particle.velocity, glm::vec2(i * 2.0, i * 3.0));
                assert_eq!(particle.age, 0.0);
            }
        }
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut pool = ParticlePool::new(3, 2.0, -0.75);
        for i in 0..7 {
            pool.add(i as f64, 0.0, 0.0, 0.0);
            assert!(pool.len() <= 3);
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(markers(&pool), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn zero_capacity_never_holds_anything() {
        let mut pool = ParticlePool::new(0, 2.0, -0.75);
        pool.add(1.0, 1.0, 1.0, 1.0);
        pool.update(0.1);
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 0);
    }

    #[test]
    fn particles_reaching_duration_are_reaped() {
        let mut pool = ParticlePool::new(4, 2.0, -0.75);
        for i in 0..4 {
            pool.add(i as f64, 0.0, 1.0, 1.0);
        }
        pool.update(2.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn reaping_stops_at_the_first_live_particle() {
        let mut pool = ParticlePool::new(4, 2.0, 0.0);
        pool.add(0.0, 0.0, 0.0, 0.0);
        pool.add(1.0, 0.0, 0.0, 0.0);
        pool.update(1.5);
        pool.add(2.0, 0.0, 0.0, 0.0);
        pool.update(0.5);

        assert_eq!(markers(&pool), vec![2.0]);
        assert_eq!(pool.iter().next().unwrap().age, 0.5);
    }

    #[test]
    fn zero_step_update_keeps_every_particle() {
        let mut pool = ParticlePool::new(4, 2.0, -0.75);
        pool.add(1.0, 2.0, 3.0, 4.0);
        pool.add(5.0, 6.0, 7.0, 8.0);
        let before: Vec<Particle> = pool.iter().cloned().collect();
        pool.update(0.0);
        let after: Vec<Particle> = pool.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn update_and_draw_follow_a_wrapped_live_range() {
        let mut pool = ParticlePool::new(4, 10.0, 0.0);
        for i in 0..4 {
            pool.add(0.0, i as f64, 1.0, 0.0);
        }
        pool.update(3.0);
        for i in 4..7 {
            pool.add(0.0, i as f64, 1.0, 0.0);
        }
        // Five slots of storage, so the live range now wraps past the end.
        let ids: Vec<f64> = pool.iter().map(|p| p.position.y).collect();
        assert_eq!(ids, vec![3.0, 4.0, 5.0, 6.0]);

        pool.update(1.0);
        let ages: Vec<f64> = pool.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![4.0, 1.0, 1.0, 1.0]);

        let mut surface = RecordingSurface::new(10.0, 10.0);
        pool.draw(&mut surface, &TestSprite { size: 30.0 }).unwrap();
        let expected = [0.6, 0.9, 0.9, 0.9];
        assert_eq!(surface.blits.len(), expected.len());
        for (blit, alpha) in surface.blits.iter().zip(expected.iter()) {
            assert!((blit.alpha - alpha).abs() < 1e-12);
        }
    }

    #[test]
    fn draw_stops_at_the_first_surface_error() {
        let mut pool = ParticlePool::new(4, 2.0, -0.75);
        for i in 0..3 {
            pool.add(i as f64, 0.0, 0.0, 0.0);
        }
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fail_after = Some(1);

        let result = pool.draw(&mut surface, &TestSprite { size: 30.0 });
        assert_eq!(result, Err("surface lost".to_owned()));
        assert_eq!(surface.blits.len(), 1);
    }
}
