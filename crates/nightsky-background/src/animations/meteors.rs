//! Shooting stars with fading trails (stateful, stochastic spawn).

use std::f64::consts::FRAC_PI_4;

use nightsky_core::Viewport;

use crate::color::Rgba;
use crate::random::RandomSource;
use crate::surface::Surface;

/// Per-frame spawn probability once the cooldown has elapsed.
pub const SPAWN_CHANCE: f64 = 0.02;

/// Frames a meteor lives before it is removed.
pub const MAX_LIFE: u32 = 120;

/// Distance past the right/bottom edge at which a meteor is dropped.
pub const EXIT_MARGIN: f64 = 60.0;

/// Off-screen offset meteors start from.
const START_OFFSET: f64 = 50.0;

/// Number of trail segments behind the head.
const TRAIL_SEGMENTS: u32 = 10;

const TRAIL_OPACITY: f64 = 0.15;
const TRAIL_DOT: f64 = 2.0;
const HEAD_RADIUS: f64 = 1.6;
const HEAD_OPACITY: f64 = 0.9;

/// State for a single meteor.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Frames lived so far.
    pub age: u32,
    pub max_life: u32,
}

impl Meteor {
    /// Move one frame and grow one frame older.
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.age += 1;
    }

    /// Whether the meteor has outlived its lifetime or left the viewport.
    pub fn is_expired(&self, viewport: Viewport) -> bool {
        self.age > self.max_life
            || self.x > viewport.width + EXIT_MARGIN
            || self.y > viewport.height + EXIT_MARGIN
    }

    /// Trail dots then the head.
    pub fn draw(&self, surface: &mut impl Surface) {
        for t in 0..TRAIL_SEGMENTS {
            let k = t as f64 / TRAIL_SEGMENTS as f64;
            let color = Rgba::WHITE.with_alpha(TRAIL_OPACITY * (1.0 - k));
            surface.fill_rect(
                self.x - self.vx * k * 2.0,
                self.y - self.vy * k * 2.0,
                TRAIL_DOT,
                TRAIL_DOT,
                color,
            );
        }
        surface.fill_circle(
            self.x,
            self.y,
            HEAD_RADIUS,
            Rgba::WHITE.with_alpha(HEAD_OPACITY),
        );
    }
}

/// Create a meteor entering from the top or left edge, heading down-right.
pub fn spawn(viewport: Viewport, rng: &mut impl RandomSource) -> Meteor {
    let from_top = rng.chance(0.5);
    let (x, y) = if from_top {
        (rng.next_f64() * viewport.width * 0.6, -START_OFFSET)
    } else {
        (-START_OFFSET, rng.next_f64() * viewport.height * 0.6)
    };
    let speed = rng.range(3.0, 5.0);
    let angle = FRAC_PI_4 + rng.next_f64() * 0.4;
    Meteor {
        x,
        y,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed,
        age: 0,
        max_life: MAX_LIFE,
    }
}

/// Frames to wait after a spawn, in `[180, 420)`.
pub fn next_cooldown(rng: &mut impl RandomSource) -> u32 {
    (180.0 + rng.next_f64() * 240.0).floor() as u32
}

/// Advance, draw and cull live meteors.
pub fn update_and_draw(meteors: &mut Vec<Meteor>, viewport: Viewport, surface: &mut impl Surface) {
    for m in meteors.iter_mut() {
        m.advance();
        m.draw(surface);
    }
    meteors.retain(|m| !m.is_expired(viewport));
}
