use rand::Rng;

use crate::{
    config::Config,
    error::Result,
    field::ParticleField,
    scheduler::{FrameHost, FrameRequest, FrameScheduler, InputEvent},
    surface::Surface,
};

/// A mounted backdrop. Returned by [`Backdrop::mount`]; the host keeps it
/// for as long as the surface is shown and hands it back to
/// [`Backdrop::unmount`].
#[derive(Debug)]
pub struct Backdrop {
    scheduler: FrameScheduler,
}

impl Backdrop {
    /// Acquires the surface, spawns a field sized for it and starts the
    /// frame loop.
    ///
    /// The particle count is chosen from the surface width at this moment
    /// and never changes afterwards.
    ///
    /// ### Errors
    /// - [`crate::BackdropError::SurfaceUnavailable`] if the host cannot
    ///   provide a drawable context.
    /// - [`crate::BackdropError::ListenerRegistration`] if input listeners
    ///   could not be registered.
    ///
    /// In both cases nothing is left running.
    pub fn mount(host: &mut impl FrameHost, cfg: Config, rng: &mut impl Rng) -> Result<Self> {
        let bounds = host
            .acquire_surface()
            .inspect_err(|e| log::warn!("backdrop disabled: {e}"))?;

        let field = ParticleField::create(bounds, bounds.width, &cfg, rng);
        let mut scheduler = FrameScheduler::new(field, cfg);
        scheduler
            .start(host)
            .inspect_err(|e| log::warn!("backdrop disabled: {e}"))?;

        log::info!(
            "backdrop mounted: {} particles on {}x{}",
            scheduler.field().len(),
            bounds.width,
            bounds.height
        );
        Ok(Self { scheduler })
    }

    pub fn tick(&mut self, host: &mut impl FrameHost, request: FrameRequest, surface: &mut impl Surface) -> bool {
        self.scheduler.tick(host, request, surface)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        self.scheduler.handle_event(event)
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.scheduler.pending()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Tears the backdrop down: the pending frame is cancelled and the input
    /// listeners are removed before this returns.
    pub fn unmount(mut self, host: &mut impl FrameHost) {
        self.scheduler.stop(host);
        log::info!("backdrop unmounted after {} frames", self.scheduler.frames());
    }
}
