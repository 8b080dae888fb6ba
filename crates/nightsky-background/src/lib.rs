//! Animated background for the nightsky page.
//!
//! Twinkling stars, drifting particles joined by proximity lines and the
//! occasional meteor, advanced once per display frame. The animator only
//! talks to its host through three seams: a [`Surface`] to draw on, a
//! [`FrameScheduler`] that grants frame callbacks, and a [`RandomSource`].
//! [`DrawList`] plus [`SkyCanvas`] put the result on a ratatui canvas.

mod animations;
mod animator;
mod color;
mod random;
mod scheduler;
mod state;
mod surface;
mod widget;

pub use animations::meteors::Meteor;
pub use animations::particles::Particle;
pub use animations::stars::Star;
pub use animator::{AnimatorContext, BackgroundAnimator, MAX_PIXEL_DENSITY, capped_density};
pub use color::{PARTICLE_PALETTE, Rgba};
pub use random::{FixedSequence, RandomSource};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use state::{SimulationState, particle_count, star_count};
pub use surface::{DrawCommand, DrawList, Surface, SurfaceSize};
pub use widget::SkyCanvas;
