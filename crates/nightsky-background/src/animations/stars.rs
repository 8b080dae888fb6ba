//! Twinkling stars (static positions, time-driven opacity).

use std::f64::consts::TAU;

use nightsky_core::Viewport;

use crate::color::Rgba;
use crate::random::RandomSource;
use crate::surface::Surface;

/// A fixed star whose brightness oscillates over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Phase offset in radians.
    pub phase: f64,
    /// Twinkle rate multiplier.
    pub speed: f64,
}

impl Star {
    /// Opacity at the given frame timestamp, in 0.4-1.0.
    pub fn opacity(&self, elapsed_ms: f64) -> f64 {
        0.4 + 0.6 * (self.phase + elapsed_ms * 0.001 * self.speed).sin().abs()
    }
}

/// Scatter `count` stars across the viewport.
pub fn init_stars(count: usize, viewport: Viewport, rng: &mut impl RandomSource) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: rng.next_f64() * viewport.width,
            y: rng.next_f64() * viewport.height,
            radius: rng.range(0.2, 1.4),
            phase: rng.next_f64() * TAU,
            speed: rng.range(0.5, 2.0),
        })
        .collect()
}

/// Draw every star as a white dot at its current opacity.
pub fn draw(stars: &[Star], elapsed_ms: f64, surface: &mut impl Surface) {
    for star in stars {
        let color = Rgba::WHITE.with_alpha(star.opacity(elapsed_ms));
        surface.fill_circle(star.x, star.y, star.radius, color);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::random::FixedSequence;
    use crate::surface::{DrawCommand, DrawList};

    fn star(phase: f64, speed: f64) -> Star {
        Star {
            x: 0.0,
            y: 0.0,
            radius: 1.0,
            phase,
            speed,
        }
    }

    #[test]
    fn test_opacity_at_time_zero() {
        assert_eq!(star(0.0, 1.0).opacity(0.0), 0.4);
    }

    #[test]
    fn test_opacity_peaks_at_quarter_turn() {
        assert!((star(FRAC_PI_2, 1.0).opacity(0.0) - 1.0).abs() < 1e-12);
        // speed 2.0 reaches sin = 1 after pi/4 seconds
        let t = FRAC_PI_2 / 2.0 * 1000.0;
        assert!((star(0.0, 2.0).opacity(t) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_opacity_stays_in_range() {
        let s = star(1.3, 1.7);
        for ms in (0..20_000).step_by(37) {
            let a = s.opacity(ms as f64);
            assert!((0.4..=1.0).contains(&a));
        }
    }

    #[test]
    fn test_init_ranges() {
        let mut rng = FixedSequence::new([0.0, 0.5, 0.999_999]);
        let stars = init_stars(30, Viewport::new(200.0, 100.0), &mut rng);
        assert_eq!(stars.len(), 30);
        for s in &stars {
            assert!((0.0..200.0).contains(&s.x));
            assert!((0.0..100.0).contains(&s.y));
            assert!((0.2..1.4).contains(&s.radius));
            assert!((0.0..TAU).contains(&s.phase));
            assert!((0.5..2.0).contains(&s.speed));
        }
        assert_eq!(rng.draws(), 30 * 5);
    }

    #[test]
    fn test_draw_uses_white() {
        let mut list = DrawList::new();
        draw(&[star(0.0, 1.0)], 0.0, &mut list);
        match &list.commands()[0] {
            DrawCommand::Circle { color, .. } => {
                assert_eq!((color.r, color.g, color.b), (255, 255, 255));
                assert_eq!(color.a, 0.4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
