//! State Module - Runtime state for the card stack
//!
//! - **Gesture** - Tap vs swipe classification for the top card
//! - **Feedback** - Offset-to-style mapping while dragging
//! - **Deck** - Card ordering, visible window, commits
//! - **Input** - Terminal pointer conversion and gesture routing

pub mod deck;
pub mod feedback;
pub mod gesture;
pub mod input;

pub use deck::{parse_cards, DeckManager, DecisionSink, WindowEntry};
pub use feedback::{drag_feedback, DragFeedback};
pub use gesture::{classify, GestureClassifier, GestureStart, InteractionState};
pub use input::{PointerAction, PointerEvent, PointerTracker};
