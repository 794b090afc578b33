//! End-to-end tests of the mount → tick → unmount cycle against a scripted host.

use backdrop_core::{
    Backdrop, BackdropError,
    config::Config,
    field::ParticleField,
    particle::Particle,
    pointer::PointerState,
    scheduler::{FrameHost, FrameRequest, FrameScheduler, InputEvent, SchedulerState, Subscription},
    surface::Surface,
    types::{Bounds, Rgba},
};
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

/// A host that only delivers frames and events when told to.
#[derive(Default)]
struct ScriptedHost {
    size: Option<Bounds>,
    refuse_listeners: bool,
    next_id: u64,
    pending: Vec<FrameRequest>,
    listeners: Option<u64>,
}

impl ScriptedHost {
    fn with_size(width: f32, height: f32) -> Self {
        Self {
            size: Some(Bounds::new(width, height)),
            ..Self::default()
        }
    }

    /// Takes every request that would fire at the next display refresh.
    fn due(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.pending)
    }

    fn listening(&self) -> bool {
        self.listeners.is_some()
    }
}

impl FrameHost for ScriptedHost {
    fn acquire_surface(&mut self) -> Result<Bounds, BackdropError> {
        self.size
            .ok_or_else(|| BackdropError::SurfaceUnavailable("no 2d context".into()))
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let r = FrameRequest(self.next_id);
        self.pending.push(r);
        r
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }

    fn subscribe(&mut self) -> Result<Subscription, BackdropError> {
        if self.refuse_listeners {
            return Err(BackdropError::ListenerRegistration("window gone".into()));
        }
        self.next_id += 1;
        self.listeners = Some(self.next_id);
        Ok(Subscription(self.next_id))
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        if self.listeners == Some(subscription.0) {
            self.listeners = None;
        }
    }
}

#[derive(Default)]
struct DrawLog {
    clears: usize,
    circles: usize,
    lines: usize,
}

impl DrawLog {
    fn total(&self) -> usize {
        self.clears + self.circles + self.lines
    }
}

impl Surface for DrawLog {
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn fade(&mut self, _: Rgba) {
        self.clears += 1;
    }
    fn fill_circle(&mut self, _: Vec2, _: f32, _: Rgba) {
        self.circles += 1;
    }
    fn stroke_line(&mut self, _: Vec2, _: Vec2, _: f32, _: Rgba) {
        self.lines += 1;
    }
}

fn run_due(host: &mut ScriptedHost, backdrop: &mut Backdrop, surface: &mut DrawLog) -> usize {
    let mut drawn = 0;
    for r in host.due() {
        if backdrop.tick(host, r, surface) {
            drawn += 1;
        }
    }
    drawn
}

#[test]
fn mount_picks_cardinality_from_surface_width() {
    let cfg = Config::default();
    let mut rng = StdRng::seed_from_u64(1);

    let mut narrow = ScriptedHost::with_size(767.0, 900.0);
    let b = Backdrop::mount(&mut narrow, cfg, &mut rng).unwrap();
    assert_eq!(b.scheduler().field().len(), 45);
    b.unmount(&mut narrow);

    let mut wide = ScriptedHost::with_size(768.0, 900.0);
    let mut b = Backdrop::mount(&mut wide, cfg, &mut rng).unwrap();
    assert_eq!(b.scheduler().field().len(), 90);

    b.handle_event(InputEvent::Resize(Bounds::new(320.0, 480.0)));
    let mut surface = DrawLog::default();
    for _ in 0..3 {
        run_due(&mut wide, &mut b, &mut surface);
    }
    assert_eq!(b.scheduler().field().len(), 90, "resizing never respawns");
    b.unmount(&mut wide);
}

#[test]
fn missing_surface_means_no_backdrop() {
    let mut host = ScriptedHost::default();
    let mut rng = StdRng::seed_from_u64(2);

    let err = Backdrop::mount(&mut host, Config::default(), &mut rng).unwrap_err();

    assert!(matches!(err, BackdropError::SurfaceUnavailable(_)));
    assert!(host.pending.is_empty());
    assert!(!host.listening());
}

#[test]
fn listener_failure_leaves_nothing_running() {
    let mut host = ScriptedHost {
        refuse_listeners: true,
        ..ScriptedHost::with_size(800.0, 600.0)
    };
    let mut rng = StdRng::seed_from_u64(3);

    let err = Backdrop::mount(&mut host, Config::default(), &mut rng).unwrap_err();

    assert!(matches!(err, BackdropError::ListenerRegistration(_)));
    assert!(host.pending.is_empty());
}

#[test]
fn each_tick_draws_and_requests_exactly_one_more_frame() {
    let mut host = ScriptedHost::with_size(1024.0, 768.0);
    let mut rng = StdRng::seed_from_u64(4);
    let mut b = Backdrop::mount(&mut host, Config::default(), &mut rng).unwrap();
    let mut surface = DrawLog::default();

    for frame in 1..=10 {
        assert_eq!(run_due(&mut host, &mut b, &mut surface), 1);
        assert_eq!(host.pending.len(), 1);
        assert_eq!(surface.clears, frame);
    }
    assert_eq!(surface.circles, 10 * 90);
    assert_eq!(b.scheduler().frames(), 10);

    b.unmount(&mut host);
}

#[test]
fn first_tick_without_pointer_moves_each_particle_by_its_velocity() {
    let mut host = ScriptedHost::with_size(1024.0, 768.0);
    let mut rng = StdRng::seed_from_u64(5);
    let mut b = Backdrop::mount(&mut host, Config::default(), &mut rng).unwrap();
    let mut surface = DrawLog::default();

    let before: Vec<Particle> = b.scheduler().field().particles().to_vec();
    assert!(before.iter().all(|p| Bounds::new(1024.0, 768.0).contains(p.pos)));
    assert_eq!(b.scheduler().pointer(), PointerState::Absent);

    run_due(&mut host, &mut b, &mut surface);

    for (old, new) in before.iter().zip(b.scheduler().field().particles()) {
        assert_eq!(new.pos, old.pos + old.vel);
    }

    // Put the pointer right on top of particle 0 and take another step.
    let target = b.scheduler().field().particles()[0];
    b.handle_event(InputEvent::PointerMove(target.pos));
    run_due(&mut host, &mut b, &mut surface);

    let after = b.scheduler().field().particles()[0];
    assert!(after.pos.is_finite());
    let push = after.pos - (target.pos + target.vel);
    assert!(push.length() <= Config::default().push_strength + 1e-3);
    assert!(push.length() > 0.0);

    b.unmount(&mut host);
}

#[test]
fn pointer_exactly_on_resting_particle_pushes_by_full_strength() {
    let cfg = Config::default();
    let mut host = ScriptedHost::with_size(400.0, 400.0);
    let field = ParticleField::from_particles(
        vec![Particle::new(Vec2::new(200.0, 200.0), Vec2::ZERO, 2.0)],
        Bounds::new(400.0, 400.0),
    );
    let mut s = FrameScheduler::new(field, cfg);
    s.start(&mut host).unwrap();
    s.handle_event(InputEvent::PointerMove(Vec2::new(200.0, 200.0)));

    let r = host.due()[0];
    assert!(s.tick(&mut host, r, &mut DrawLog::default()));

    assert_eq!(s.field().particles()[0].pos, Vec2::new(200.0 + cfg.push_strength, 200.0));
    s.stop(&mut host);
}

#[test]
fn velocities_never_point_further_outside() {
    let cfg = Config::default();
    let mut host = ScriptedHost::with_size(300.0, 200.0);
    let mut rng = StdRng::seed_from_u64(6);
    let mut b = Backdrop::mount(&mut host, cfg, &mut rng).unwrap();
    let mut surface = DrawLog::default();

    for t in 0..2000 {
        // Sweep the pointer along the edges to shove particles outside.
        let x = (t as f32 * 3.0) % 300.0;
        b.handle_event(InputEvent::PointerMove(Vec2::new(x, if t % 2 == 0 { 5.0 } else { 195.0 })));
        run_due(&mut host, &mut b, &mut surface);

        let bounds = b.scheduler().field().bounds();
        for p in b.scheduler().field().particles() {
            assert!(p.pos.is_finite());
            if p.pos.x < 0.0 {
                assert!(p.vel.x >= 0.0);
            }
            if p.pos.x > bounds.width {
                assert!(p.vel.x <= 0.0);
            }
            if p.pos.y < 0.0 {
                assert!(p.vel.y >= 0.0);
            }
            if p.pos.y > bounds.height {
                assert!(p.vel.y <= 0.0);
            }
        }
    }

    b.unmount(&mut host);
}

#[test]
fn pointer_leave_removes_pointer_links() {
    let cfg = Config::default();
    let mut host = ScriptedHost::with_size(1024.0, 768.0);
    let mut rng = StdRng::seed_from_u64(8);
    let mut b = Backdrop::mount(&mut host, cfg, &mut rng).unwrap();
    let mut surface = DrawLog::default();

    let first = b.scheduler().field().particles()[0].pos;
    b.handle_event(InputEvent::TouchMove(first));
    run_due(&mut host, &mut b, &mut surface);
    assert!(b.scheduler().connections().iter().any(|c| c.to == first));

    b.handle_event(InputEvent::PointerLeave);
    run_due(&mut host, &mut b, &mut surface);
    assert!(b.scheduler().connections().iter().all(|c| c.width == cfg.link_width));

    b.unmount(&mut host);
}

#[test]
fn nothing_happens_after_stop() {
    let mut host = ScriptedHost::with_size(1024.0, 768.0);
    let mut rng = StdRng::seed_from_u64(7);
    let field = ParticleField::create(Bounds::new(1024.0, 768.0), 1024.0, &Config::default(), &mut rng);
    let mut s = FrameScheduler::new(field, Config::default());
    let mut surface = DrawLog::default();

    s.start(&mut host).unwrap();
    for r in host.due() {
        s.tick(&mut host, r, &mut surface);
    }
    let last = s.pending().unwrap();

    s.stop(&mut host);
    assert_eq!(s.state(), SchedulerState::Stopped);
    assert!(host.pending.is_empty(), "pending frame cancelled");
    assert!(!host.listening(), "listeners removed");

    let snapshot = s.field().clone();
    let pointer = s.pointer();
    let drawn = surface.total();

    assert!(!s.handle_event(InputEvent::PointerMove(Vec2::new(10.0, 10.0))));
    assert!(!s.handle_event(InputEvent::TouchMove(Vec2::new(20.0, 20.0))));
    assert!(!s.handle_event(InputEvent::Resize(Bounds::new(10.0, 10.0))));
    // A request that slipped through anyway, and one from a later refresh.
    assert!(!s.tick(&mut host, last, &mut surface));
    assert!(!s.tick(&mut host, FrameRequest(last.0 + 1), &mut surface));

    assert_eq!(s.field().particles(), snapshot.particles());
    assert_eq!(s.field().bounds(), snapshot.bounds());
    assert_eq!(s.pointer(), pointer);
    assert_eq!(surface.total(), drawn);
    assert!(host.pending.is_empty());
}

#[test]
fn unmount_leaves_host_quiet() {
    let mut host = ScriptedHost::with_size(640.0, 480.0);
    let mut rng = StdRng::seed_from_u64(9);
    let mut b = Backdrop::mount(&mut host, Config::default(), &mut rng).unwrap();
    let mut surface = DrawLog::default();
    run_due(&mut host, &mut b, &mut surface);

    b.unmount(&mut host);

    assert!(host.due().is_empty());
    assert!(!host.listening());
}
