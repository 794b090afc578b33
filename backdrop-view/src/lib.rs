//! Native egui host for the particle backdrop.
//!
//! - [`app`] — the eframe application mounting the backdrop behind page content.
//! - [`host`] — egui implementations of the backdrop's surface and frame host.
//! - [`settings`] — window and field settings loaded with figment.

pub mod app;
pub mod host;
pub mod settings;
