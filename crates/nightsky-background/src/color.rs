//! Color utility functions for background animations.

use ratatui::style::Color;

/// An sRGB color with a straight (non-premultiplied) alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in 0.0-1.0.
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different opacity.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Composite this color over an opaque background.
    ///
    /// Terminal cells have no alpha channel, so translucent shapes are
    /// flattened against the page background before painting.
    pub fn blend_over(self, background: (u8, u8, u8)) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            let v = bg as f64 + (fg as f64 - bg as f64) * a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::Rgb(
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

/// Particle colors: purple, blue, green, pink.
pub const PARTICLE_PALETTE: [Rgba; 4] = [
    Rgba::new(111, 66, 193, 0.5),
    Rgba::new(79, 140, 255, 0.5),
    Rgba::new(16, 185, 129, 0.45),
    Rgba::new(244, 114, 182, 0.45),
];

/// Base color of particle connection lines; alpha is set per pair.
pub const CONNECTION_COLOR: Rgba = Rgba::new(106, 168, 255, 1.0);
