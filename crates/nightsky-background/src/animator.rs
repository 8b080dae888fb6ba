//! Frame-synchronized background animator.

use nightsky_core::{Viewport, Visibility};

use crate::random::RandomSource;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::state::SimulationState;
use crate::surface::{Surface, SurfaceSize};

/// Highest device pixel ratio the backing surface is sized for.
pub const MAX_PIXEL_DENSITY: f64 = 2.0;

/// Clamp a reported device pixel ratio to `(0, MAX_PIXEL_DENSITY]`.
///
/// A missing or non-positive ratio counts as 1.
pub fn capped_density(reported: Option<f64>) -> f64 {
    match reported {
        Some(d) if d.is_finite() && d > 0.0 => d.min(MAX_PIXEL_DENSITY),
        _ => 1.0,
    }
}

/// Everything the animator needs from its host at startup.
#[derive(Debug)]
pub struct AnimatorContext<S, F, R> {
    pub viewport: Viewport,
    pub device_pixel_ratio: Option<f64>,
    pub reduced_motion: bool,
    /// `None` when the host has no drawing surface.
    pub surface: Option<S>,
    /// `None` when the host cannot deliver frame callbacks.
    pub scheduler: Option<F>,
    pub rng: R,
}

/// Owns the simulation and runs the simulate-and-draw loop.
#[derive(Debug)]
pub struct BackgroundAnimator<S, F, R> {
    surface: S,
    scheduler: F,
    rng: R,
    viewport: Viewport,
    density: f64,
    reduced_motion: bool,
    state: SimulationState,
    pending: Option<FrameHandle>,
    visibility: Visibility,
}

impl<S, F, R> BackgroundAnimator<S, F, R>
where
    S: Surface,
    F: FrameScheduler,
    R: RandomSource,
{
    /// Size the surface, populate the simulation and request the first frame.
    ///
    /// Returns `None`, touching nothing, if the host lacks a surface or a
    /// frame scheduler.
    pub fn init(context: AnimatorContext<S, F, R>) -> Option<Self> {
        let AnimatorContext {
            viewport,
            device_pixel_ratio,
            reduced_motion,
            surface,
            scheduler,
            mut rng,
        } = context;

        let (Some(mut surface), Some(scheduler)) = (surface, scheduler) else {
            log::debug!("background disabled: no drawing surface or frame scheduler");
            return None;
        };

        let density = capped_density(device_pixel_ratio);
        apply_size(&mut surface, viewport, density);

        let state = if reduced_motion {
            SimulationState::still()
        } else {
            SimulationState::populate(viewport, &mut rng)
        };
        log::debug!(
            "background init {}x{} @{density}x: {} stars, {} particles, reduced motion {reduced_motion}",
            viewport.width,
            viewport.height,
            state.stars.len(),
            state.particles.len(),
        );

        let mut animator = Self {
            surface,
            scheduler,
            rng,
            viewport,
            density,
            reduced_motion,
            state,
            pending: None,
            visibility: Visibility::Visible,
        };
        animator.arm();
        Some(animator)
    }

    /// Run one frame. Handles other than the pending request are ignored.
    ///
    /// `timestamp_ms` is the scheduler's frame time; `None` counts as 0.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: Option<f64>) {
        if self.pending != Some(handle) {
            return;
        }
        self.pending = None;

        let elapsed_ms = timestamp_ms.unwrap_or(0.0);
        self.state
            .step(self.viewport, elapsed_ms, &mut self.rng, &mut self.surface);

        if self.visibility == Visibility::Visible {
            self.arm();
        }
    }

    /// Resize the surface for a new viewport. Entities are kept as they are.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        apply_size(&mut self.surface, viewport, self.density);
        log::debug!("background resized to {}x{}", viewport.width, viewport.height);
    }

    /// Suspend on hidden, resume on visible.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        match visibility {
            Visibility::Hidden => {
                if let Some(handle) = self.pending.take() {
                    self.scheduler.cancel_frame(handle);
                    log::debug!("background suspended");
                }
            }
            Visibility::Visible => {
                if self.pending.is_none() {
                    self.arm();
                    log::debug!("background resumed");
                }
            }
        }
    }

    fn arm(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    /// The outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_suspended(&self) -> bool {
        self.pending.is_none()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Capped pixel density in use.
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

fn apply_size(surface: &mut impl Surface, viewport: Viewport, density: f64) {
    surface.resize(SurfaceSize::for_viewport(
        viewport.width,
        viewport.height,
        density,
    ));
    surface.reset_transform();
    surface.scale(density);
}
