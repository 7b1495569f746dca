//! Deck Manager - Card stack ownership and commit handling
//!
//! Owns the live card sequence, the settle counter and the interaction state
//! of the top card. All three are signals, so a presentation derived built on
//! top of them recomputes whenever the deck changes.
//!
//! # Lifecycle of a card
//!
//! ```text
//! Queued ──(promoted to top)──▶ Active ──(commit-left / commit-right)──▶ Committed
//!                                 │  ▲
//!                                 └──┘ flip / no-op
//! ```
//!
//! # Example
//!
//! ```ignore
//! use flashdeck::{Card, DeckManager, SwipeDirection};
//!
//! let deck = DeckManager::new(cards, Box::new(|id, direction| {
//!     println!("Card {} swiped {}", id, direction);
//! }))?;
//!
//! deck.apply_commit(1, SwipeDirection::Right);
//! assert_eq!(deck.settle_counter(), 1);
//! ```

use std::cell::Cell;
use std::collections::HashSet;
use std::time::Instant;

use log::{debug, trace};
use spark_signals::{signal, Signal};

use super::gesture::{GestureClassifier, InteractionState};
use crate::config::DeckConfig;
use crate::error::{DeckError, Result};
use crate::pipeline::presentation_derived::{project_presentation, CardPresentation};
use crate::types::{Card, CardId, Decision, Point, SwipeDirection};

// =============================================================================
// TYPES
// =============================================================================

/// Receives every committed card, after it has left the deck.
pub type DecisionSink = Box<dyn Fn(CardId, SwipeDirection)>;

/// A card in the visible window with its stack depth (0 = top).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowEntry {
    pub depth: usize,
    pub card: Card,
}

/// Parse seed cards from a JSON array of `{id, title, content, backContent}`.
pub fn parse_cards(json: &str) -> Result<Vec<Card>> {
    Ok(serde_json::from_str(json)?)
}

/// Reject seed data with repeated ids.
fn check_unique_ids(cards: &[Card]) -> Result<()> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(card.id) {
            return Err(DeckError::DuplicateCardId(card.id));
        }
    }
    Ok(())
}

// =============================================================================
// DECK MANAGER
// =============================================================================

pub struct DeckManager {
    config: DeckConfig,
    cards: Signal<Vec<Card>>,
    settle_counter: Signal<u8>,
    interaction: Signal<InteractionState>,
    commit_count: Cell<usize>,
    sink: DecisionSink,
}

impl DeckManager {
    /// Create a deck with the default configuration.
    pub fn new(cards: Vec<Card>, sink: DecisionSink) -> Result<Self> {
        Self::with_config(cards, DeckConfig::default(), sink)
    }

    /// Create a deck, validating seed ids and configuration.
    pub fn with_config(cards: Vec<Card>, config: DeckConfig, sink: DecisionSink) -> Result<Self> {
        config.validate()?;
        check_unique_ids(&cards)?;
        debug!("Deck initialized with {} cards", cards.len());

        Ok(Self {
            config,
            cards: signal(cards),
            settle_counter: signal(0),
            interaction: signal(InteractionState::default()),
            commit_count: Cell::new(0),
            sink,
        })
    }

    /// Create a deck from a JSON seed.
    pub fn from_json(json: &str, config: DeckConfig, sink: DecisionSink) -> Result<Self> {
        Self::with_config(parse_cards(json)?, config, sink)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Snapshot of the live sequence, front to back.
    pub fn cards(&self) -> Vec<Card> {
        self.cards.get()
    }

    pub fn len(&self) -> usize {
        self.cards.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.get().is_empty()
    }

    /// Card currently on top of the stack.
    pub fn top(&self) -> Option<Card> {
        self.cards.get().into_iter().next()
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.get().iter().any(|card| card.id == card_id)
    }

    /// Check if `card_id` is the top (interactive) card
    pub fn is_active(&self, card_id: CardId) -> bool {
        self.cards.get().first().map(|card| card.id) == Some(card_id)
    }

    pub fn settle_counter(&self) -> u8 {
        self.settle_counter.get()
    }

    /// Interaction state of the top card.
    pub fn interaction(&self) -> InteractionState {
        self.interaction.get()
    }

    /// Number of commits applied since creation.
    pub fn commit_count(&self) -> usize {
        self.commit_count.get()
    }

    /// The first `window_size` cards with their depth index.
    pub fn visible_window(&self) -> Vec<WindowEntry> {
        self.cards
            .get()
            .into_iter()
            .take(self.config.stack.window_size)
            .enumerate()
            .map(|(depth, card)| WindowEntry { depth, card })
            .collect()
    }

    /// Presentation tuples for the visible window.
    pub fn presentation(&self) -> Vec<CardPresentation> {
        project_presentation(
            &self.cards.get(),
            self.settle_counter.get(),
            &self.interaction.get(),
            &self.config,
        )
    }

    pub(crate) fn cards_signal(&self) -> Signal<Vec<Card>> {
        self.cards.clone()
    }

    pub(crate) fn settle_counter_signal(&self) -> Signal<u8> {
        self.settle_counter.clone()
    }

    pub(crate) fn interaction_signal(&self) -> Signal<InteractionState> {
        self.interaction.clone()
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Remove a committed card and notify the sink.
    ///
    /// Ignored when `card_id` is no longer in the deck: duplicate deliveries
    /// from a stale render leave the deck, the counter and the sink untouched.
    /// Returns whether the commit was applied.
    pub fn apply_commit(&self, card_id: CardId, direction: SwipeDirection) -> bool {
        let mut cards = self.cards.get();
        let Some(position) = cards.iter().position(|card| card.id == card_id) else {
            trace!("Ignoring commit for absent card {}", card_id);
            return false;
        };

        cards.remove(position);
        let remaining = cards.len();
        self.cards.set(cards);

        if position == 0 {
            // New top card starts from scratch
            self.interaction.set(InteractionState::default());
        }

        let modulus = self.config.stack.settle_modulus;
        self.settle_counter.set((self.settle_counter.get() + 1) % modulus);
        self.commit_count.set(self.commit_count.get() + 1);

        debug!(
            "Card {} committed {} ({} remaining, settle {})",
            card_id,
            direction,
            remaining,
            self.settle_counter.get()
        );

        (self.sink)(card_id, direction);
        true
    }

    // -------------------------------------------------------------------------
    // Gestures (top card only)
    // -------------------------------------------------------------------------

    /// Run `f` against the top card's classifier and publish the new state.
    fn with_classifier<R>(&self, f: impl FnOnce(&mut GestureClassifier) -> R) -> R {
        let mut classifier = GestureClassifier::with_state(self.config.gesture, self.interaction.get());
        let result = f(&mut classifier);
        self.interaction.set(classifier.into_state());
        result
    }

    fn accepts_gesture(&self, card_id: CardId) -> bool {
        if self.is_active(card_id) {
            true
        } else {
            trace!("Ignoring gesture for inactive card {}", card_id);
            false
        }
    }

    /// Pointer down on `card_id`. Ignored unless it is the top card.
    pub fn gesture_start(&self, card_id: CardId, point: Point, time: Instant) {
        if self.accepts_gesture(card_id) {
            self.with_classifier(|c| c.on_gesture_start(point, time));
        }
    }

    /// Drag sample for `card_id`. Ignored unless it is the top card.
    pub fn drag(&self, card_id: CardId, horizontal_offset: f32) {
        if self.accepts_gesture(card_id) {
            self.with_classifier(|c| c.on_drag(horizontal_offset));
        }
    }

    /// Release on `card_id`; applies the resulting commit, if any.
    ///
    /// Returns `Decision::NoOp` for a card that is not the top card.
    pub fn gesture_end(&self, card_id: CardId, point: Point, time: Instant, horizontal_offset: f32) -> Decision {
        if !self.accepts_gesture(card_id) {
            return Decision::NoOp;
        }

        let decision = self.with_classifier(|c| c.on_gesture_end(point, time, horizontal_offset));
        if let Some(direction) = decision.direction() {
            self.apply_commit(card_id, direction);
        }
        decision
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    type Calls = Rc<RefCell<Vec<(CardId, SwipeDirection)>>>;

    fn cards(ids: &[CardId]) -> Vec<Card> {
        ids.iter()
            .map(|&id| Card::new(id, format!("Card {}", id), "front", "back"))
            .collect()
    }

    fn setup(ids: &[CardId]) -> (DeckManager, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink_calls = calls.clone();
        let deck = DeckManager::new(
            cards(ids),
            Box::new(move |id, direction| sink_calls.borrow_mut().push((id, direction))),
        )
        .unwrap();
        (deck, calls)
    }

    fn ids(deck: &DeckManager) -> Vec<CardId> {
        deck.cards().iter().map(|card| card.id).collect()
    }

    #[test]
    fn test_initial_state() {
        let (deck, calls) = setup(&[1, 2, 3]);

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.top().map(|c| c.id), Some(1));
        assert_eq!(deck.settle_counter(), 0);
        assert_eq!(deck.interaction(), InteractionState::default());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = DeckManager::new(cards(&[1, 2, 1]), Box::new(|_, _| {}));
        assert!(matches!(result, Err(DeckError::DuplicateCardId(1))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": 1, "title": "A", "content": "a", "backContent": "aa"},
            {"id": 2, "title": "B", "content": "b", "backContent": "bb"}
        ]"#;
        let deck = DeckManager::from_json(json, DeckConfig::default(), Box::new(|_, _| {})).unwrap();
        assert_eq!(ids(&deck), vec![1, 2]);
    }

    #[test]
    fn test_from_json_missing_field() {
        let json = r#"[{"id": 1, "title": "A", "content": "a"}]"#;
        let result = DeckManager::from_json(json, DeckConfig::default(), Box::new(|_, _| {}));
        assert!(matches!(result, Err(DeckError::Json(_))));
    }

    #[test]
    fn test_visible_window() {
        let (deck, _) = setup(&[1, 2, 3, 4, 5, 6, 7]);
        let window = deck.visible_window();

        assert_eq!(window.len(), 5);
        for (i, entry) in window.iter().enumerate() {
            assert_eq!(entry.depth, i);
            assert_eq!(entry.card.id, i as CardId + 1);
        }
        // Read-only
        assert_eq!(deck.len(), 7);
    }

    #[test]
    fn test_visible_window_short_deck() {
        let (deck, _) = setup(&[4, 9]);
        let window: Vec<_> = deck.visible_window().iter().map(|e| (e.depth, e.card.id)).collect();
        assert_eq!(window, vec![(0, 4), (1, 9)]);
    }

    #[test]
    fn test_commit_removes_and_notifies() {
        let (deck, calls) = setup(&[1, 2, 3]);

        assert!(deck.apply_commit(1, SwipeDirection::Right));

        assert_eq!(*calls.borrow(), vec![(1, SwipeDirection::Right)]);
        assert_eq!(deck.top().map(|c| c.id), Some(2));
        assert_eq!(deck.settle_counter(), 1);
        assert_eq!(deck.commit_count(), 1);
    }

    #[test]
    fn test_commit_preserves_order() {
        let (deck, _) = setup(&[1, 2, 3, 4, 5]);

        deck.apply_commit(3, SwipeDirection::Left);
        deck.apply_commit(5, SwipeDirection::Right);

        assert_eq!(ids(&deck), vec![1, 2, 4]);
    }

    #[test]
    fn test_absent_commit_is_silent() {
        let (deck, calls) = setup(&[1, 2]);

        deck.apply_commit(1, SwipeDirection::Left);
        assert!(!deck.apply_commit(1, SwipeDirection::Left));
        assert!(!deck.apply_commit(42, SwipeDirection::Right));

        assert_eq!(ids(&deck), vec![2]);
        assert_eq!(deck.settle_counter(), 1);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_settle_counter_wraps() {
        let all: Vec<CardId> = (1..=25).collect();
        let (deck, _) = setup(&all);

        let mut observed = Vec::new();
        for id in 1..=12 {
            deck.apply_commit(id, SwipeDirection::Right);
            observed.push(deck.settle_counter());
        }

        assert_eq!(observed, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2]);
    }

    #[test]
    fn test_interaction_reset_when_top_changes() {
        let (deck, _) = setup(&[1, 2, 3]);
        let t0 = Instant::now();

        // Flip the top card
        deck.gesture_start(1, Point::new(0.0, 0.0), t0);
        deck.gesture_end(1, Point::new(0.0, 0.0), t0 + Duration::from_millis(30), 0.0);
        assert!(deck.interaction().is_flipped);

        // Removing a background card keeps the top card's state
        deck.apply_commit(3, SwipeDirection::Left);
        assert!(deck.interaction().is_flipped);

        // Removing the top card resets it
        deck.apply_commit(1, SwipeDirection::Left);
        assert_eq!(deck.interaction(), InteractionState::default());
    }

    #[test]
    fn test_gesture_commit_flows_to_sink() {
        let (deck, calls) = setup(&[1, 2]);
        let t0 = Instant::now();

        deck.gesture_start(1, Point::new(100.0, 50.0), t0);
        deck.drag(1, -120.0);
        deck.drag(1, -260.0);
        let decision = deck.gesture_end(1, Point::new(-160.0, 50.0), t0 + Duration::from_millis(300), -260.0);

        assert_eq!(decision, Decision::CommitLeft);
        assert_eq!(*calls.borrow(), vec![(1, SwipeDirection::Left)]);
        assert_eq!(deck.top().map(|c| c.id), Some(2));
        assert_eq!(deck.interaction(), InteractionState::default());
    }

    #[test]
    fn test_gestures_on_inactive_card_ignored() {
        let (deck, calls) = setup(&[1, 2]);
        let t0 = Instant::now();

        deck.gesture_start(2, Point::new(0.0, 0.0), t0);
        deck.drag(2, 300.0);
        assert_eq!(deck.interaction(), InteractionState::default());

        let decision = deck.gesture_end(2, Point::new(300.0, 0.0), t0, 300.0);
        assert_eq!(decision, Decision::NoOp);
        assert_eq!(ids(&deck), vec![1, 2]);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_flip_and_noop_never_notify() {
        let (deck, calls) = setup(&[1]);
        let t0 = Instant::now();

        deck.gesture_start(1, Point::new(0.0, 0.0), t0);
        assert_eq!(deck.gesture_end(1, Point::new(1.0, 0.0), t0 + Duration::from_millis(40), 1.0), Decision::Flip);

        deck.gesture_start(1, Point::new(0.0, 0.0), t0);
        deck.drag(1, 150.0);
        assert_eq!(deck.gesture_end(1, Point::new(150.0, 0.0), t0 + Duration::from_secs(1), 150.0), Decision::NoOp);

        assert!(calls.borrow().is_empty());
        assert_eq!(deck.settle_counter(), 0);
        assert_eq!(deck.interaction().drag_offset, 0.0);
    }

    #[test]
    fn test_reentrant_commit_from_sink() {
        let deck: Rc<RefCell<Option<Rc<DeckManager>>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let sink_deck = deck.clone();
        let sink_count = count.clone();
        let manager = Rc::new(
            DeckManager::new(
                cards(&[1, 2, 3]),
                Box::new(move |id, direction| {
                    sink_count.set(sink_count.get() + 1);
                    // Duplicate delivery of the same commit
                    if let Some(deck) = sink_deck.borrow().as_ref() {
                        deck.apply_commit(id, direction);
                    }
                }),
            )
            .unwrap(),
        );
        *deck.borrow_mut() = Some(manager.clone());

        manager.apply_commit(1, SwipeDirection::Right);

        assert_eq!(count.get(), 1);
        assert_eq!(manager.settle_counter(), 1);
        assert_eq!(ids(&manager), vec![2, 3]);

        // Break the Rc cycle
        deck.borrow_mut().take();
    }
}
