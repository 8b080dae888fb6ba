//! Drifting particles joined by proximity lines (stateful).

use nightsky_core::Viewport;

use crate::color::{CONNECTION_COLOR, PARTICLE_PALETTE, Rgba};
use crate::random::RandomSource;
use crate::surface::Surface;

/// How far past the viewport edge a particle may drift before wrapping.
pub const WRAP_MARGIN: f64 = 10.0;

/// Pairs closer than this are connected.
pub const MAX_LINK_DISTANCE: f64 = 110.0;

/// Opacity of a connection at zero distance.
const LINK_OPACITY: f64 = 0.12;

/// State for a single drifting particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Velocity in px per frame.
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: Rgba,
}

impl Particle {
    /// Integrate one frame of motion, then wrap around the padded viewport.
    pub fn advance(&mut self, viewport: Viewport) {
        self.x += self.vx;
        self.y += self.vy;
        self.x = wrap(self.x, viewport.width);
        self.y = wrap(self.y, viewport.height);
    }
}

/// Toroidal wrap of one coordinate over `[-margin, extent + margin]`.
fn wrap(value: f64, extent: f64) -> f64 {
    if value < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if value > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}

/// Scatter `count` particles across the viewport with small random drift.
pub fn init_particles(
    count: usize,
    viewport: Viewport,
    rng: &mut impl RandomSource,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: rng.next_f64() * viewport.width,
            y: rng.next_f64() * viewport.height,
            vx: (rng.next_f64() - 0.5) * 0.2,
            vy: (rng.next_f64() - 0.5) * 0.2,
            radius: rng.range(0.5, 2.5),
            color: PARTICLE_PALETTE[rng.index(PARTICLE_PALETTE.len())],
        })
        .collect()
}

/// Advance every particle by one frame.
pub fn update(particles: &mut [Particle], viewport: Viewport) {
    for p in particles {
        p.advance(viewport);
    }
}

/// Opacity of the line joining two particles `sqrt(dist_sq)` apart.
///
/// Returns `None` at or beyond [`MAX_LINK_DISTANCE`].
pub fn link_opacity(dist_sq: f64) -> Option<f64> {
    let max_sq = MAX_LINK_DISTANCE * MAX_LINK_DISTANCE;
    (dist_sq < max_sq).then(|| (1.0 - dist_sq / max_sq) * LINK_OPACITY)
}

/// Draw a line between every pair of nearby particles.
pub fn draw_links(particles: &[Particle], surface: &mut impl Surface) {
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            if let Some(alpha) = link_opacity(dx * dx + dy * dy) {
                surface.stroke_line(
                    (a.x, a.y),
                    (b.x, b.y),
                    1.0,
                    CONNECTION_COLOR.with_alpha(alpha),
                );
            }
        }
    }
}

/// Draw every particle as a dot in its own color.
pub fn draw(particles: &[Particle], surface: &mut impl Surface) {
    for p in particles {
        surface.fill_circle(p.x, p.y, p.radius, p.color);
    }
}
