//! egui implementations of the backdrop's host contract.
//!
//! - [`EguiSurface`] paints onto an [`egui::Painter`], translating surface
//!   pixels into screen points relative to the backdrop rect.
//! - [`EguiHost`] maps frame requests onto [`egui::Context::request_repaint`]
//!   and turns raw egui input into [`InputEvent`]s while subscribed.

use backdrop_core::{
    BackdropError,
    error::Result,
    scheduler::{FrameHost, FrameRequest, InputEvent, Subscription},
    surface::Surface,
    types::{Bounds, Rgba},
};
use glam::Vec2;

pub fn to_color32(c: Rgba) -> egui::Color32 {
    let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

/// Draws into `rect` through `painter`, with `rect.min` as the surface origin.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    background: egui::Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect, background: egui::Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x, p.y)
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    // egui repaints every frame from scratch, so the overlay is drawn on top
    // of the plain background rather than on top of the previous frame.
    fn fade(&mut self, color: Rgba) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
        self.painter.rect_filled(self.rect, 0.0, to_color32(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.painter
            .circle_filled(self.to_screen(center), radius, to_color32(color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(width, to_color32(color)),
        );
    }
}

/// Frame and input plumbing backed by an egui context.
///
/// egui has no per-callback cancellation, so a request is "cancelled" by
/// forgetting it: [`EguiHost::take_due`] only hands out the request that is
/// still pending.
pub struct EguiHost {
    ctx: Option<egui::Context>,
    next_id: u64,
    pending: Option<FrameRequest>,
    subscription: Option<u64>,
    surface_rect: Option<egui::Rect>,
    last_size: Option<egui::Vec2>,
    /// The one finger that drives the pointer while it stays down.
    active_touch: Option<egui::TouchId>,
}

impl EguiHost {
    pub fn new(ctx: Option<egui::Context>) -> Self {
        Self {
            ctx,
            next_id: 0,
            pending: None,
            subscription: None,
            surface_rect: None,
            last_size: None,
            active_touch: None,
        }
    }

    /// Records where the backdrop is drawn this frame.
    pub fn set_surface_rect(&mut self, rect: egui::Rect) {
        self.surface_rect = Some(rect);
    }

    /// Takes the pending request, if any, so it fires exactly once.
    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Translates this frame's raw input into backdrop events.
    ///
    /// Returns nothing while unsubscribed. Positions are made relative to the
    /// surface rect; a change of the rect size becomes a single resize.
    /// Only the first finger down is followed; other touches are ignored
    /// until it lifts.
    pub fn collect_events(&mut self, input: &egui::InputState) -> Vec<InputEvent> {
        let (Some(_), Some(rect)) = (self.subscription, self.surface_rect) else {
            return Vec::new();
        };

        let local = |p: egui::Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);
        let mut events = Vec::new();

        if self.last_size != Some(rect.size()) {
            if self.last_size.is_some() {
                events.push(InputEvent::Resize(Bounds::new(rect.width(), rect.height())));
            }
            self.last_size = Some(rect.size());
        }

        for ev in &input.events {
            match ev {
                egui::Event::PointerMoved(p) => events.push(InputEvent::PointerMove(local(*p))),
                egui::Event::Touch { id, phase, pos, .. } => {
                    if self.track_touch(*id, *phase) {
                        events.push(InputEvent::TouchMove(local(*pos)));
                    }
                }
                egui::Event::PointerGone => events.push(InputEvent::PointerLeave),
                _ => {}
            }
        }
        events
    }

    /// Updates the followed finger and reports whether this touch moves the
    /// pointer.
    fn track_touch(&mut self, id: egui::TouchId, phase: egui::TouchPhase) -> bool {
        match phase {
            egui::TouchPhase::Start => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(id);
                }
                false
            }
            egui::TouchPhase::Move => *self.active_touch.get_or_insert(id) == id,
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                }
                false
            }
        }
    }
}

impl FrameHost for EguiHost {
    fn acquire_surface(&mut self) -> Result<Bounds> {
        match self.surface_rect {
            Some(rect) if rect.width() > 0.0 && rect.height() > 0.0 => {
                Ok(Bounds::new(rect.width(), rect.height()))
            }
            Some(_) => Err(BackdropError::SurfaceUnavailable("empty drawing area".into())),
            None => Err(BackdropError::SurfaceUnavailable("no drawing area laid out yet".into())),
        }
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn subscribe(&mut self) -> Result<Subscription> {
        if self.subscription.is_some() {
            return Err(BackdropError::ListenerRegistration(
                "input already forwarded to another backdrop".into(),
            ));
        }
        self.next_id += 1;
        self.subscription = Some(self.next_id);
        self.last_size = self.surface_rect.map(|r| r.size());
        Ok(Subscription(self.next_id))
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        if self.subscription == Some(subscription.0) {
            self.subscription = None;
            self.last_size = None;
            self.active_touch = None;
        }
    }
}
