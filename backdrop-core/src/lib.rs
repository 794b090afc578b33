//! Animated particle backdrop: simulation, proximity links and frame loop.
//!
//! Main components:
//! - [`particle`] — a single drifting particle and its per-tick physics.
//! - [`field`] — the fixed-size particle set and its reflection bounds.
//! - [`pointer`] — last known pointer position.
//! - [`linker`] — per-tick connections between nearby particles and the pointer.
//! - [`spatial`] — uniform grid used by the optional bucketed linker.
//! - [`renderer`] and [`surface`] — drawing a frame onto a host surface.
//! - [`scheduler`] — the cooperative frame loop and its host contract.
//! - [`backdrop`] — mount/unmount lifecycle handed to the host.
//! - [`config`] — tuning constants.
//! - [`types`] — bounds and colours.

pub mod backdrop;
pub mod config;
pub mod error;
pub mod field;
pub mod linker;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod scheduler;
pub mod spatial;
pub mod surface;
pub mod types;

pub use backdrop::Backdrop;
pub use error::BackdropError;
