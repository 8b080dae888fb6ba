//! Simulation state for the animated background.

use nightsky_core::Viewport;

use crate::animations::meteors::{self, Meteor};
use crate::animations::particles::{self, Particle};
use crate::animations::stars::{self, Star};
use crate::random::RandomSource;
use crate::surface::Surface;

/// Viewport area per particle, in px².
pub const AREA_PER_PARTICLE: f64 = 26_000.0;

/// Viewport area per star, in px².
pub const AREA_PER_STAR: f64 = 12_000.0;

/// Number of particles for a viewport.
pub fn particle_count(viewport: Viewport) -> usize {
    (viewport.area() / AREA_PER_PARTICLE).floor().max(0.0) as usize
}

/// Number of stars for a viewport.
pub fn star_count(viewport: Viewport) -> usize {
    (viewport.area() / AREA_PER_STAR).floor().max(0.0) as usize
}

/// Stars, particles and meteors plus the meteor spawn gate.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub stars: Vec<Star>,
    pub particles: Vec<Particle>,
    pub meteors: Vec<Meteor>,
    /// Frames left before another meteor may spawn.
    pub meteor_cooldown: u32,
    /// Whether meteors may ever spawn. Off in reduced-motion mode.
    pub meteors_enabled: bool,
}

impl SimulationState {
    /// Populate a simulation sized for the viewport.
    pub fn populate(viewport: Viewport, rng: &mut impl RandomSource) -> Self {
        let particles = particles::init_particles(particle_count(viewport), viewport, rng);
        let stars = stars::init_stars(star_count(viewport), viewport, rng);
        Self {
            stars,
            particles,
            meteors: Vec::new(),
            meteor_cooldown: 0,
            meteors_enabled: true,
        }
    }

    /// An empty simulation that never spawns anything.
    pub fn still() -> Self {
        Self::default()
    }

    /// Advance one frame and draw it.
    pub fn step(
        &mut self,
        viewport: Viewport,
        elapsed_ms: f64,
        rng: &mut impl RandomSource,
        surface: &mut impl Surface,
    ) {
        surface.clear(viewport.width, viewport.height);

        stars::draw(&self.stars, elapsed_ms, surface);

        particles::update(&mut self.particles, viewport);
        particles::draw_links(&self.particles, surface);
        particles::draw(&self.particles, surface);

        if !self.meteors_enabled {
            return;
        }
        self.maybe_spawn_meteor(viewport, rng);
        meteors::update_and_draw(&mut self.meteors, viewport, surface);
    }

    fn maybe_spawn_meteor(&mut self, viewport: Viewport, rng: &mut impl RandomSource) {
        if self.meteor_cooldown > 0 {
            self.meteor_cooldown -= 1;
            return;
        }
        if rng.chance(meteors::SPAWN_CHANCE) {
            self.meteors.push(meteors::spawn(viewport, rng));
            self.meteor_cooldown = meteors::next_cooldown(rng);
            log::trace!(
                "meteor spawned, {} live, next in >= {} frames",
                self.meteors.len(),
                self.meteor_cooldown
            );
        }
    }
}
