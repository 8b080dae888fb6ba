//! Reveal-on-scroll for page sections.

/// Vertical extent of an element in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub top: u16,
    pub height: u16,
}

/// Marks elements visible once enough of them scrolls into view.
///
/// The viewport's bottom is pulled in by [`ROOT_MARGIN_BOTTOM`] of its height
/// and an element is revealed once [`THRESHOLD`] of it intersects what is
/// left. Revealed elements stay revealed.
///
/// [`ROOT_MARGIN_BOTTOM`]: RevealObserver::ROOT_MARGIN_BOTTOM
/// [`THRESHOLD`]: RevealObserver::THRESHOLD
#[derive(Debug, Clone)]
pub struct RevealObserver {
    revealed: Vec<bool>,
}

impl RevealObserver {
    pub const ROOT_MARGIN_BOTTOM: f64 = 0.10;
    pub const THRESHOLD: f64 = 0.1;

    /// Observe `count` elements. With reduced motion everything starts
    /// revealed and nothing is observed.
    pub fn new(count: usize, reduced_motion: bool) -> Self {
        Self {
            revealed: vec![reduced_motion; count],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(true)
    }

    /// Whether any element is still waiting to be revealed.
    pub fn is_observing(&self) -> bool {
        self.revealed.iter().any(|r| !r)
    }

    /// Check every unrevealed element against the current scroll position.
    pub fn observe(&mut self, extents: &[Extent], scroll_top: u16, viewport_height: u16) {
        let root_top = scroll_top as f64;
        let root_bottom =
            root_top + viewport_height as f64 * (1.0 - Self::ROOT_MARGIN_BOTTOM);

        for (revealed, extent) in self.revealed.iter_mut().zip(extents) {
            if *revealed || extent.height == 0 {
                continue;
            }
            let top = extent.top as f64;
            let bottom = top + extent.height as f64;
            let overlap = bottom.min(root_bottom) - top.max(root_top);
            if overlap > 0.0 && overlap / extent.height as f64 >= Self::THRESHOLD {
                *revealed = true;
            }
        }
    }
}
