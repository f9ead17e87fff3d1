//! Widget controller.
//!
//! Owns one phase engine (timer widgets only) and one drag state, and turns
//! host input into engine transitions. Everything runs on the host's event
//! loop; the controller never sleeps or spawns.
//!
//! Two pieces of scheduling are expressed as plain state the host (or
//! [`crate::runtime`]) acts on:
//!
//! - the [`TickerSlot`]: armed while the timer runs, at most one per widget;
//! - [`WidgetController::listeners_attached`]: true while a drag is in
//!   progress, when pointer move/up must be observed document-wide.

use chrono::Utc;

use super::view::{format_mmss, TimerView, ViewState};
use super::{WidgetConfig, WidgetKind};
use crate::audio::ToneScheduler;
use crate::drag::{self, DragState, ElementSize, Point, Size};
use crate::events::Event;
use crate::timer::PhaseEngine;

/// Where a pointer-down landed inside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Widget body or title bar.
    Handle,
    /// A button or other interactive child; never starts a drag.
    Control,
}

/// The widget's recurring one-second timer.
///
/// `generation` increases every time the slot is armed, so a driver can tell
/// a re-armed timer from one that kept running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickerSlot {
    armed: bool,
    generation: u64,
}

impl TickerSlot {
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.generation += 1;
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

type Callback = Box<dyn FnMut()>;

pub struct WidgetController {
    kind: WidgetKind,
    engine: Option<PhaseEngine>,
    playing: bool,
    tones: ToneScheduler,
    audio_unlocked: bool,
    ticker: TickerSlot,

    drag: DragState,
    last_pointer: Point,
    size: ElementSize,
    viewport: Size,
    draggable: bool,
    visible: bool,

    events: Vec<Event>,
    on_double_click: Option<Callback>,
    on_close: Option<Callback>,
}

impl std::fmt::Debug for WidgetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetController")
            .field("kind", &self.kind)
            .field("engine", &self.engine)
            .field("playing", &self.playing)
            .field("ticker", &self.ticker)
            .field("drag", &self.drag)
            .field("viewport", &self.viewport)
            .field("draggable", &self.draggable)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl WidgetController {
    /// Mount a widget. The initial position is clamped right away, using the
    /// fallback size until the host reports a measurement.
    pub fn new(kind: WidgetKind, config: &WidgetConfig, viewport: Size) -> Self {
        Self::with_tones(kind, config, viewport, ToneScheduler::new())
    }

    pub fn with_tones(
        kind: WidgetKind,
        config: &WidgetConfig,
        viewport: Size,
        tones: ToneScheduler,
    ) -> Self {
        let engine = match kind {
            WidgetKind::Timer => Some(PhaseEngine::with_tones(
                config.session(),
                config.muted,
                tones.clone(),
            )),
            WidgetKind::MusicPlayer => None,
        };
        let size = ElementSize::unmeasured(config.fallback_size.unwrap_or_else(|| kind.fallback_size()));
        let position = drag::on_viewport_or_size_change(config.initial_position, size.effective(), viewport);
        if position != config.initial_position {
            tracing::debug!(?kind, from = ?config.initial_position, to = ?position, "initial position clamped");
        }
        Self {
            kind,
            engine,
            playing: false,
            tones,
            audio_unlocked: false,
            ticker: TickerSlot::default(),
            drag: DragState::at(position),
            last_pointer: position,
            size,
            viewport,
            draggable: config.draggable,
            visible: true,
            events: Vec::new(),
            on_double_click: None,
            on_close: None,
        }
    }

    pub fn on_double_click(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_double_click = Some(Box::new(callback));
        self
    }

    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn engine(&self) -> Option<&PhaseEngine> {
        self.engine.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn position(&self) -> Point {
        self.drag.position
    }

    pub fn widget_size(&self) -> Size {
        self.size.effective()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn ticker(&self) -> TickerSlot {
        self.ticker
    }

    pub fn is_running(&self) -> bool {
        match &self.engine {
            Some(engine) => engine.is_running(),
            None => self.playing,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Document-wide pointer move/up listeners are needed.
    pub fn listeners_attached(&self) -> bool {
        self.drag.dragging
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            kind: self.kind,
            visible: self.visible,
            running: self.is_running(),
            position: self.drag.position,
            dragging: self.drag.dragging,
            timer: self.engine.as_ref().map(|engine| TimerView {
                phase: engine.phase(),
                round: engine.round(),
                total_rounds: engine.total_rounds(),
                remaining_seconds_formatted: format_mmss(engine.remaining_secs()),
                progress_fraction: engine.progress(),
                complete: engine.is_complete(),
            }),
        }
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Session commands ─────────────────────────────────────────────

    /// Start or pause.
    ///
    /// The first start from a fresh session also unlocks the shared audio
    /// output, since platforms only allow that from a user gesture.
    pub fn toggle(&mut self) {
        match &mut self.engine {
            Some(engine) => {
                if !self.audio_unlocked && engine.is_at_rest() && !engine.is_muted() {
                    self.audio_unlocked = true;
                    if !self.tones.unlock() {
                        tracing::info!("audio not available yet, cues will be skipped");
                    }
                }
                if let Some(event) = engine.toggle_running() {
                    self.events.push(event);
                }
            }
            None => {
                self.playing = !self.playing;
                self.events.push(Event::PlaybackToggled {
                    playing: self.playing,
                    at: Utc::now(),
                });
            }
        }
        self.sync_ticker();
    }

    pub fn start(&mut self) {
        if !self.is_running() {
            self.toggle();
        }
    }

    pub fn pause(&mut self) {
        if self.is_running() {
            self.toggle();
        }
    }

    pub fn reset(&mut self) {
        match &mut self.engine {
            Some(engine) => {
                if let Some(event) = engine.reset() {
                    self.events.push(event);
                }
            }
            None if self.playing => {
                self.playing = false;
                self.events.push(Event::PlaybackToggled {
                    playing: false,
                    at: Utc::now(),
                });
            }
            None => {}
        }
        self.sync_ticker();
    }

    /// Advance the timer by one second. Driven by the ticker slot; a call
    /// while the slot is disarmed does nothing.
    pub fn tick(&mut self) {
        if !self.ticker.is_armed() {
            return;
        }
        if let Some(engine) = &mut self.engine {
            if let Some(event) = engine.tick() {
                self.events.push(event);
            }
        }
        self.sync_ticker();
    }

    pub fn set_muted(&mut self, muted: bool) {
        if let Some(engine) = &mut self.engine {
            engine.set_muted(muted);
        }
    }

    // ── Visibility ───────────────────────────────────────────────────

    /// Hide the widget. Session state is kept for reopening.
    pub fn close(&mut self) {
        if !self.visible {
            return;
        }
        self.release_drag();
        self.visible = false;
        self.events.push(Event::WidgetClosed {
            widget: self.kind,
            at: Utc::now(),
        });
        if let Some(callback) = &mut self.on_close {
            callback();
        }
    }

    pub fn open(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.reclamp();
        self.events.push(Event::WidgetOpened {
            widget: self.kind,
            at: Utc::now(),
        });
    }

    pub fn double_click(&mut self) {
        self.events.push(Event::WidgetExpanded {
            widget: self.kind,
            at: Utc::now(),
        });
        if let Some(callback) = &mut self.on_double_click {
            callback();
        }
    }

    // ── Pointer & geometry ───────────────────────────────────────────

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
        if !draggable {
            self.release_drag();
        }
    }

    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, pointer: Point, target: PointerTarget) -> bool {
        if !self.draggable || !self.visible || target == PointerTarget::Control {
            return false;
        }
        if self.drag.dragging {
            return true;
        }
        self.drag = drag::begin_drag(pointer, self.drag.position);
        self.last_pointer = pointer;
        self.events.push(Event::DragStarted {
            widget: self.kind,
            position: self.drag.position,
            at: Utc::now(),
        });
        true
    }

    /// Pointer moved anywhere on the page.
    pub fn pointer_move(&mut self, pointer: Point) {
        if !self.drag.dragging {
            return;
        }
        self.last_pointer = pointer;
        self.drag = drag::on_pointer_move(pointer, self.drag, self.size.effective(), self.viewport);
    }

    pub fn pointer_up(&mut self) {
        self.release_drag();
    }

    pub fn resize_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.reclamp();
    }

    /// Layout measured the widget.
    pub fn measure(&mut self, size: Size) {
        if self.size.measure(size) {
            self.reclamp();
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn release_drag(&mut self) {
        if !self.drag.dragging {
            return;
        }
        self.drag = drag::end_drag(self.drag);
        self.events.push(Event::DragEnded {
            widget: self.kind,
            position: self.drag.position,
            at: Utc::now(),
        });
    }

    fn reclamp(&mut self) {
        self.drag = drag::reclamp(self.drag, self.last_pointer, self.size.effective(), self.viewport);
    }

    fn sync_ticker(&mut self) {
        let wants_ticks = self.engine.as_ref().is_some_and(PhaseEngine::is_running);
        if wants_ticks {
            self.ticker.arm();
        } else {
            self.ticker.disarm();
        }
    }
}
