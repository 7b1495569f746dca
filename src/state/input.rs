//! Input Module - Pointer conversion and gesture routing
//!
//! Bridges crossterm's mouse events with the deck's gesture entry points.
//!
//! # API
//!
//! - `convert_mouse_event` - Convert a crossterm MouseEvent into a PointerEvent
//! - `PointerTracker::route` - Feed a down/drag/up sequence to the top card
//! - `PointerTracker::route_hit` - Same, but only presses inside the card start a gesture
//! - `poll_event` / `read_event` - Event polling for a terminal shell
//! - `enable_mouse` / `disable_mouse` - Control mouse capture
//!
//! Only the left button is tracked; other buttons, moves and scrolls are
//! dropped during conversion.
//!
//! # Example
//!
//! ```ignore
//! use flashdeck::state::input::{poll_event, InputEvent, PointerTracker};
//! use std::time::Duration;
//!
//! let mut tracker = PointerTracker::new();
//! loop {
//!     if let Ok(Some(InputEvent::Pointer(pointer))) = poll_event(Duration::from_millis(16), &config.input) {
//!         tracker.route(&deck, pointer);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyEvent as CrosstermKeyEvent,
    MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent,
    MouseEventKind,
    poll, read,
    EnableMouseCapture, DisableMouseCapture,
};
use crossterm::execute;
use std::io::stdout;
use std::time::{Duration, Instant};

use log::trace;

use super::deck::DeckManager;
use crate::config::InputConfig;
use crate::types::{CardId, Decision, Point};

// =============================================================================
// POINTER EVENT
// =============================================================================

/// Pointer action relevant to a card gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Drag,
    Up,
}

/// A primary-button pointer sample in pixel-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub point: Point,
    pub time: Instant,
}

/// Unified event type for a terminal shell
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Left-button pointer sample
    Pointer(PointerEvent),
    /// Keyboard event, passed through untouched
    Key(CrosstermKeyEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert a crossterm MouseEvent into a PointerEvent.
///
/// Cell coordinates are scaled by the configured cell size. Returns `None`
/// for anything other than left-button down, drag or up.
pub fn convert_mouse_event(event: CrosstermMouseEvent, time: Instant, config: &InputConfig) -> Option<PointerEvent> {
    let action = match event.kind {
        MouseEventKind::Down(CrosstermMouseButton::Left) => PointerAction::Down,
        MouseEventKind::Drag(CrosstermMouseButton::Left) => PointerAction::Drag,
        MouseEventKind::Up(CrosstermMouseButton::Left) => PointerAction::Up,
        _ => return None,
    };

    Some(PointerEvent {
        action,
        point: Point::new(
            event.column as f32 * config.cell_width,
            event.row as f32 * config.cell_height,
        ),
        time,
    })
}

// =============================================================================
// GESTURE ROUTING
// =============================================================================

/// Turns pointer samples into gesture calls on the deck's top card.
///
/// The card under the pointer at `Down` owns the gesture until `Up`, even if
/// it stops being the top card in between; the deck then ignores the rest.
#[derive(Debug, Default)]
pub struct PointerTracker {
    origin: Option<(CardId, Point)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card currently being dragged, if any.
    pub fn active_card(&self) -> Option<CardId> {
        self.origin.map(|(card_id, _)| card_id)
    }

    /// Route one pointer sample. Returns the decision on release.
    pub fn route(&mut self, deck: &DeckManager, event: PointerEvent) -> Option<Decision> {
        self.route_hit(deck, event, |_| true)
    }

    /// Route one pointer sample, starting a gesture only when `hits_top`
    /// accepts the press point.
    ///
    /// Drag and release samples follow whichever card owns the gesture, so
    /// the pointer may leave the card while dragging.
    pub fn route_hit(
        &mut self,
        deck: &DeckManager,
        event: PointerEvent,
        hits_top: impl FnOnce(Point) -> bool,
    ) -> Option<Decision> {
        match event.action {
            PointerAction::Down => {
                let Some(top) = deck.top() else {
                    trace!("Pointer down on empty deck");
                    return None;
                };
                if !hits_top(event.point) {
                    trace!("Pointer down outside card {}", top.id);
                    self.origin = None;
                    return None;
                }
                self.origin = Some((top.id, event.point));
                deck.gesture_start(top.id, event.point, event.time);
                None
            }
            PointerAction::Drag => {
                if let Some((card_id, origin)) = self.origin {
                    deck.drag(card_id, event.point.x - origin.x);
                }
                None
            }
            PointerAction::Up => {
                let (card_id, origin) = self.origin.take()?;
                Some(deck.gesture_end(card_id, event.point, event.time, event.point.x - origin.x))
            }
        }
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent, time: Instant, config: &InputConfig) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse, time, config)
            .map(InputEvent::Pointer)
            .unwrap_or(InputEvent::None),
        CrosstermEvent::Key(key) => InputEvent::Key(key),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration, config: &InputConfig) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event(config)?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event(config: &InputConfig) -> std::io::Result<InputEvent> {
    let event = read()?;
    Ok(convert_event(event, Instant::now(), config))
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable mouse capture.
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable mouse capture.
pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================
