//! Cooperative frame loop driving the backdrop.
//!
//! The host owns the clock: it hands out [`FrameRequest`]s, later calls
//! [`FrameScheduler::tick`] with the request that fired, and delivers input
//! between ticks through [`FrameScheduler::handle_event`]. Each tick:
//! 1. steps every particle against the current pointer and bounds,
//! 2. rebuilds the connection list,
//! 3. renders onto the supplied [`Surface`],
//! 4. requests the next frame.
//!
//! Integration is one time unit per tick. Nothing compensates for long
//! gaps between frames.

use glam::Vec2;

use crate::{
    config::Config,
    error::{BackdropError, Result},
    field::ParticleField,
    linker::{self, Connection},
    pointer::PointerState,
    renderer::Renderer,
    spatial::SpatialGrid,
    surface::Surface,
    types::Bounds,
};

/// Handle for a pending "draw before the next frame" request.
///
/// The id is chosen by the host and only compared for equality: a tick
/// carrying any other id than the pending one is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Handle for a registered set of input listeners.
///
/// Not `Copy`: it is handed back to [`FrameHost::unsubscribe`] exactly once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

/// What the backdrop needs from its host environment.
pub trait FrameHost {
    /// Acquires a drawable context and reports its size in pixels.
    fn acquire_surface(&mut self) -> Result<Bounds>;

    /// Asks to be ticked before the next frame is presented.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancels a request so it never fires.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Starts delivering pointer, touch and resize events.
    fn subscribe(&mut self) -> Result<Subscription>;

    /// Stops delivering events registered by `subscription`.
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Input delivered by the host between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Vec2),
    /// Single-point touch move.
    TouchMove(Vec2),
    /// The pointer left the surface entirely.
    PointerLeave,
    Resize(Bounds),
}

/// Lifecycle of a [`FrameScheduler`]: `Idle -> Running -> Stopped`, or
/// straight from `Idle` to `Stopped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Built but not started; no listeners, no pending frame.
    Idle,
    /// Exactly one frame request and one subscription outstanding.
    Running,
    /// Terminal.
    Stopped,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Running {
        pending: FrameRequest,
        subscription: Subscription,
    },
    Stopped,
}

/// Owns the simulation and runs it one frame at a time.
#[derive(Debug)]
pub struct FrameScheduler {
    phase: Phase,
    field: ParticleField,
    pointer: PointerState,
    cfg: Config,
    renderer: Renderer,
    connections: Vec<Connection>,
    grid: Option<SpatialGrid>,
    frames: u64,
}

impl FrameScheduler {
    /// Creates an idle scheduler. Nothing is requested from the host until
    /// [`FrameScheduler::start`].
    ///
    /// ### Parameters
    /// - `field` - Particles to simulate; its bounds are the initial walls.
    /// - `cfg` - Tuning; `cfg.spatial_grid` selects the bucketed linker and
    ///   `cfg.clear_mode` how each frame is cleared.
    pub fn new(field: ParticleField, cfg: Config) -> Self {
        Self {
            phase: Phase::Idle,
            field,
            pointer: PointerState::Absent,
            renderer: Renderer::new(cfg.clear_mode),
            connections: Vec::new(),
            grid: cfg.spatial_grid.then(SpatialGrid::new),
            cfg,
            frames: 0,
        }
    }

    /// Registers listeners and requests the first frame.
    ///
    /// Only valid from [`SchedulerState::Idle`]. If the host refuses the
    /// listener registration the scheduler stays idle and no frame is
    /// requested.
    pub fn start(&mut self, host: &mut impl FrameHost) -> Result<()> {
        match self.phase {
            Phase::Idle => {}
            Phase::Running { .. } => return Err(BackdropError::AlreadyRunning),
            Phase::Stopped => return Err(BackdropError::Stopped),
        }

        let subscription = host.subscribe()?;
        let pending = host.request_frame();
        log::debug!("frame loop started, first request {pending:?}");

        self.phase = Phase::Running {
            pending,
            subscription,
        };
        Ok(())
    }

    /// Runs one frame if `request` is the one currently pending.
    ///
    /// ### Parameters
    /// - `host` - Receives the request for the following frame.
    /// - `request` - The request that just fired.
    /// - `surface` - Where this frame is drawn.
    ///
    /// Stale or cancelled requests, and any request while not running, are
    /// ignored and draw nothing.
    ///
    /// ### Returns
    /// `true` if a frame was simulated and drawn.
    pub fn tick(&mut self, host: &mut impl FrameHost, request: FrameRequest, surface: &mut impl Surface) -> bool {
        let Phase::Running { pending, .. } = &mut self.phase else {
            return false;
        };
        if *pending != request {
            return false;
        }

        self.field.step(&self.pointer, &self.cfg);

        match &mut self.grid {
            Some(grid) => linker::link_with_grid(
                &self.field,
                &self.pointer,
                &self.cfg,
                grid,
                &mut self.connections,
            ),
            None => linker::link(&self.field, &self.pointer, &self.cfg, &mut self.connections),
        }

        self.renderer
            .render(surface, &self.field, &self.connections, &self.cfg);
        self.frames += 1;

        *pending = host.request_frame();
        true
    }

    /// Applies one input event. O(1); ignored unless running.
    ///
    /// ### Returns
    /// `true` if the event changed pointer or bounds state.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !matches!(self.phase, Phase::Running { .. }) {
            return false;
        }

        match event {
            InputEvent::PointerMove(p) | InputEvent::TouchMove(p) => self.pointer.set(p),
            InputEvent::PointerLeave => self.pointer.clear(),
            InputEvent::Resize(bounds) => self.field.update_bounds(bounds),
        }
        true
    }

    /// Cancels the pending frame and unregisters listeners, then enters the
    /// terminal [`SchedulerState::Stopped`] state.
    ///
    /// Safe to call in any state; only the first call while running talks
    /// to the host.
    pub fn stop(&mut self, host: &mut impl FrameHost) {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running {
                pending,
                subscription,
            } => {
                host.cancel_frame(pending);
                host.unsubscribe(subscription);
                log::debug!("frame loop stopped after {} frames", self.frames);
            }
            Phase::Idle | Phase::Stopped => {}
        }
    }

    pub fn state(&self) -> SchedulerState {
        match self.phase {
            Phase::Idle => SchedulerState::Idle,
            Phase::Running { .. } => SchedulerState::Running,
            Phase::Stopped => SchedulerState::Stopped,
        }
    }

    /// The request the scheduler is waiting on, if running.
    pub fn pending(&self) -> Option<FrameRequest> {
        match self.phase {
            Phase::Running { pending, .. } => Some(pending),
            _ => None,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Connections computed by the last tick.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
