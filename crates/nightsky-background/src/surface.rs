//! 2D drawing surface abstraction and a recording implementation.

use crate::color::Rgba;

/// Backing and logical dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Device pixels.
    pub backing_width: u32,
    pub backing_height: u32,
    /// Viewport units that drawing coordinates are expressed in.
    pub logical_width: f64,
    pub logical_height: f64,
}

impl SurfaceSize {
    /// Size a surface for a viewport at the given (already capped) density.
    pub fn for_viewport(width: f64, height: f64, density: f64) -> Self {
        Self {
            backing_width: (width * density).floor().max(0.0) as u32,
            backing_height: (height * density).floor().max(0.0) as u32,
            logical_width: width,
            logical_height: height,
        }
    }
}

/// The drawing operations the background needs.
///
/// Coordinates are logical viewport units; implementations apply the
/// current scale transform themselves.
pub trait Surface {
    fn resize(&mut self, size: SurfaceSize);

    /// Reset the transform to identity.
    fn reset_transform(&mut self);

    /// Multiply the current transform by a uniform scale.
    fn scale(&mut self, factor: f64);

    /// Clear the rectangle `(0, 0)..(width, height)`.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgba,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
}

/// A surface that records what was drawn since the last clear.
///
/// The terminal host paints the list with [`SkyCanvas`](crate::SkyCanvas);
/// tests inspect it directly.
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    size: Option<SurfaceSize>,
    scale: f64,
    clears: usize,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            size: None,
            scale: 1.0,
            clears: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Current uniform scale factor of the transform.
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Number of clears, i.e. frames drawn.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }
}

impl Surface for DrawList {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = Some(size);
        // Resizing a canvas resets its context state.
        self.scale = 1.0;
        self.commands.clear();
    }

    fn reset_transform(&mut self) {
        self.scale = 1.0;
    }

    fn scale(&mut self, factor: f64) {
        self.scale *= factor;
    }

    fn clear(&mut self, _width: f64, _height: f64) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_floors() {
        let size = SurfaceSize::for_viewport(333.3, 100.0, 1.5);
        assert_eq!(size.backing_width, 499);
        assert_eq!(size.backing_height, 150);
        assert_eq!(size.logical_width, 333.3);
    }

    #[test]
    fn test_draw_list_records_and_clears() {
        let mut list = DrawList::new();
        list.fill_circle(1.0, 2.0, 3.0, Rgba::WHITE);
        list.stroke_line((0.0, 0.0), (1.0, 1.0), 1.0, Rgba::WHITE);
        assert_eq!(list.circles().count(), 1);
        assert_eq!(list.lines().count(), 1);
        list.clear(10.0, 10.0);
        assert!(list.commands().is_empty());
        assert_eq!(list.clear_count(), 1);
    }

    #[test]
    fn test_transform() {
        let mut list = DrawList::new();
        list.scale(2.0);
        list.scale(2.0);
        assert_eq!(list.scale_factor(), 4.0);
        list.reset_transform();
        assert_eq!(list.scale_factor(), 1.0);
    }
}
