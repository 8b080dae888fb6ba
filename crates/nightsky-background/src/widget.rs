//! Paints a recorded frame onto a ratatui Braille canvas.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Context, Line, Points},
    },
};

use crate::surface::{DrawCommand, DrawList};

/// Widget rendering a [`DrawList`] over the page background.
///
/// Canvas y grows upward, so logical coordinates are flipped.
#[derive(Debug)]
pub struct SkyCanvas<'a> {
    frame: &'a DrawList,
    background: (u8, u8, u8),
    width: f64,
    height: f64,
}

impl<'a> SkyCanvas<'a> {
    /// `width`/`height` are the logical viewport the frame was drawn for.
    pub fn new(frame: &'a DrawList, background: (u8, u8, u8), width: f64, height: f64) -> Self {
        Self {
            frame,
            background,
            width,
            height,
        }
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        let flip = |y: f64| self.height - y;
        for command in self.frame.commands() {
            match *command {
                DrawCommand::Circle { x, y, color, .. } => {
                    ctx.draw(&Points {
                        coords: &[(x, flip(y))],
                        color: color.blend_over(self.background),
                    });
                }
                DrawCommand::Line {
                    from, to, color, ..
                } => {
                    ctx.draw(&Line {
                        x1: from.0,
                        y1: flip(from.1),
                        x2: to.0,
                        y2: flip(to.1),
                        color: color.blend_over(self.background),
                    });
                }
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    ctx.draw(&Points {
                        coords: &[(x + width / 2.0, flip(y + height / 2.0))],
                        color: color.blend_over(self.background),
                    });
                }
            }
        }
    }
}

impl Widget for SkyCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (r, g, b) = self.background;
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(ratatui::style::Color::Rgb(r, g, b))
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| self.paint(ctx))
            .render(area, buf);
    }
}
