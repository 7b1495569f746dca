//! Presentation Pipeline
//!
//! ```text
//! Deck signals (cards, settle counter, interaction) → presentationDerived → renderer
//! ```
//!
//! The derived is a pure computation over the deck's signals. Rendering is
//! left to the consumer.

pub mod presentation_derived;

pub use presentation_derived::{
    create_presentation_derived, depth_offset, depth_scale, project_presentation, CardPresentation,
};
