//! # flashdeck
//!
//! Swipeable, flippable flashcard stack for learning review.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Two pieces do the work:
//!
//! - the **gesture classifier** turns one pointer gesture on the top card into
//!   a decision: no-op, flip, commit-left or commit-right;
//! - the **deck manager** owns the card order, exposes the top five cards as
//!   the visible window, and removes a card when its gesture commits,
//!   forwarding the decision to an external sink.
//!
//! Deck state lives in signals and the presentation is a derived over them:
//! ```text
//! pointer samples → GestureClassifier → DeckManager (signals) → presentationDerived → renderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Card, Decision, Rgba, etc.)
//! - [`config`] - Thresholds and presentation constants
//! - [`interpolate`] - Piecewise-linear mapping
//! - [`state`] - Gesture classifier, drag feedback, deck manager, pointer input
//! - [`pipeline`] - Presentation projection

pub mod config;
pub mod error;
pub mod interpolate;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{DeckConfig, FeedbackConfig, GestureThresholds, InputConfig, StackConfig};

pub use error::{DeckError, Result};

pub use pipeline::{create_presentation_derived, project_presentation, CardPresentation};

pub use state::{
    // Gesture
    classify, GestureClassifier, GestureStart, InteractionState,
    // Feedback
    drag_feedback, DragFeedback,
    // Deck
    parse_cards, DeckManager, DecisionSink, WindowEntry,
    // Input
    PointerAction, PointerEvent, PointerTracker,
};
