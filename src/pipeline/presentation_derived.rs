//! Presentation Derived - Reactive projection of the visible stack.
//!
//! Creates a Derived that recomputes the presentation tuples whenever:
//! - A card is committed (deck composition changes)
//! - The settle counter advances
//! - The top card's interaction state changes (drag offset, flip)

use spark_signals::{derived, Derived};

use crate::config::DeckConfig;
use crate::state::deck::DeckManager;
use crate::state::feedback::{drag_feedback, DragFeedback};
use crate::state::gesture::InteractionState;
use crate::types::{Card, CardId, PresentationFlags, Rgba};

/// Everything a renderer needs to draw one card of the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPresentation {
    pub card_id: CardId,
    /// 0 = top of stack.
    pub depth: usize,
    pub scale: f32,
    pub vertical_offset: f32,
    /// Horizontal drag displacement (top card only).
    pub horizontal_offset: f32,
    pub rotation: f32,
    pub opacity: f32,
    pub tint: Rgba,
    pub flags: PresentationFlags,
    pub text_opacity: f32,
    pub left_label_opacity: f32,
    pub right_label_opacity: f32,
}

impl CardPresentation {
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(PresentationFlags::INTERACTIVE)
    }

    pub fn is_flipped(&self) -> bool {
        self.flags.contains(PresentationFlags::FLIPPED)
    }
}

/// Scale at stack depth `depth`.
pub fn depth_scale(depth: usize, config: &DeckConfig) -> f32 {
    1.0 - depth as f32 * config.stack.scale_step
}

/// Vertical offset at stack depth `depth` for the given settle counter.
pub fn depth_offset(depth: usize, settle_counter: u8, config: &DeckConfig) -> f32 {
    depth as f32 * config.stack.depth_step - settle_counter as f32 * config.stack.settle_step
}

/// Project the visible window into presentation tuples.
///
/// Only depth 0 carries the interaction state; background cards are shown at
/// rest, front face up.
pub fn project_presentation(
    cards: &[Card],
    settle_counter: u8,
    interaction: &InteractionState,
    config: &DeckConfig,
) -> Vec<CardPresentation> {
    let resting = DragFeedback::neutral(&config.feedback);

    cards
        .iter()
        .take(config.stack.window_size)
        .enumerate()
        .map(|(depth, card)| {
            let is_top = depth == 0;
            let (offset, feedback) = if is_top {
                (
                    interaction.drag_offset,
                    drag_feedback(interaction.drag_offset, &config.feedback),
                )
            } else {
                (0.0, resting)
            };

            let mut flags = PresentationFlags::NONE;
            if is_top {
                flags |= PresentationFlags::INTERACTIVE;
                if interaction.is_flipped {
                    flags |= PresentationFlags::FLIPPED;
                }
            }

            CardPresentation {
                card_id: card.id,
                depth,
                scale: depth_scale(depth, config),
                vertical_offset: depth_offset(depth, settle_counter, config),
                horizontal_offset: offset,
                rotation: feedback.rotation,
                opacity: feedback.opacity,
                tint: feedback.tint,
                flags,
                text_opacity: feedback.text_opacity,
                left_label_opacity: feedback.left_label_opacity,
                right_label_opacity: feedback.right_label_opacity,
            }
        })
        .collect()
}

/// Create the presentation derived for a deck.
///
/// The derived reads the deck's signals, so it stays current after commits
/// and gestures without being rebuilt.
pub fn create_presentation_derived(deck: &DeckManager) -> Derived<Vec<CardPresentation>> {
    let cards_signal = deck.cards_signal();
    let settle_signal = deck.settle_counter_signal();
    let interaction_signal = deck.interaction_signal();
    let config = *deck.config();

    derived(move || {
        let cards = cards_signal.get();
        let settle = settle_signal.get();
        let interaction = interaction_signal.get();

        project_presentation(&cards, settle, &interaction, &config)
    })
}

// =============================================================================
// Tests
// =============================================================================
