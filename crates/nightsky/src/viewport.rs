//! Terminal size to logical viewport.

use nightsky_core::Viewport;

/// Logical pixels per cell when the terminal does not report pixel sizes.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Logical viewport for a terminal of `columns` x `rows` cells.
///
/// `pixels` is the terminal's reported size in pixels; zero means unknown.
pub fn terminal_viewport(columns: u16, rows: u16, pixels: Option<(u16, u16)>) -> Viewport {
    match pixels {
        Some((w, h)) if w > 0 && h > 0 => Viewport::new(w as f64, h as f64),
        _ => Viewport::new(columns as f64 * CELL_WIDTH_PX, rows as f64 * CELL_HEIGHT_PX),
    }
}

/// Query the current terminal. Falls back to cell-based sizing.
pub fn current(columns: u16, rows: u16) -> Viewport {
    let pixels = crossterm::terminal::window_size()
        .ok()
        .map(|size| (size.width, size.height));
    terminal_viewport(columns, rows, pixels)
}
