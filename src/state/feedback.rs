//! Drag Feedback - Live offset-to-style mapping for the top card
//!
//! Pure functions of the current horizontal offset. Nothing here is stateful;
//! the deck recomputes feedback whenever the offset changes.
//!
//! | Output              | Domain                     | Range                  |
//! |---------------------|----------------------------|------------------------|
//! | rotation (degrees)  | [-200, 200]                | [-30, 30]              |
//! | opacity             | [-200, -100, 0, 100, 200]  | [0, 1, 1, 1, 0]        |
//! | tint                | [-200, 0, 200]             | red → white → green    |
//! | front text opacity  | [-100, 0, 100]             | [0, 1, 0]              |
//! | left label opacity  | [-100, -50]                | [1, 0]                 |
//! | right label opacity | [50, 100]                  | [0, 1]                 |

use crate::config::FeedbackConfig;
use crate::interpolate::{interpolate, interpolate_color};
use crate::types::Rgba;

/// Style parameters for a card at a given drag offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    pub rotation: f32,
    pub opacity: f32,
    pub tint: Rgba,
    pub text_opacity: f32,
    pub left_label_opacity: f32,
    pub right_label_opacity: f32,
}

impl DragFeedback {
    /// Feedback of a card at rest.
    pub fn neutral(config: &FeedbackConfig) -> Self {
        drag_feedback(0.0, config)
    }
}

/// Rotation in degrees, linear over the full offset range.
pub fn rotation(offset: f32, config: &FeedbackConfig) -> f32 {
    let full = config.full_offset;
    interpolate(offset, &[-full, full], &[-config.max_rotation, config.max_rotation])
}

/// Card opacity: fully opaque in the dead zone, fading past `fade_start`.
pub fn opacity(offset: f32, config: &FeedbackConfig) -> f32 {
    let (full, fade) = (config.full_offset, config.fade_start);
    interpolate(
        offset,
        &[-full, -fade, 0.0, fade, full],
        &[0.0, 1.0, 1.0, 1.0, 0.0],
    )
}

/// Background tint from the left color through neutral to the right color.
pub fn tint(offset: f32, config: &FeedbackConfig) -> Rgba {
    let full = config.full_offset;
    interpolate_color(
        offset,
        &[-full, 0.0, full],
        &[config.left_tint, config.neutral_tint, config.right_tint],
    )
}

/// Front face text fades out as the card leaves the center.
pub fn text_opacity(offset: f32, config: &FeedbackConfig) -> f32 {
    let fade = config.fade_start;
    interpolate(offset, &[-fade, 0.0, fade], &[0.0, 1.0, 0.0])
}

/// "Retry soon" label, visible when dragged strongly left.
pub fn left_label_opacity(offset: f32, config: &FeedbackConfig) -> f32 {
    interpolate(
        offset,
        &[-config.label_full, -config.label_start],
        &[1.0, 0.0],
    )
}

/// "Learned" label, visible when dragged strongly right.
pub fn right_label_opacity(offset: f32, config: &FeedbackConfig) -> f32 {
    interpolate(
        offset,
        &[config.label_start, config.label_full],
        &[0.0, 1.0],
    )
}

/// All feedback parameters for `offset`.
pub fn drag_feedback(offset: f32, config: &FeedbackConfig) -> DragFeedback {
    DragFeedback {
        rotation: rotation(offset, config),
        opacity: opacity(offset, config),
        tint: tint(offset, config),
        text_opacity: text_opacity(offset, config),
        left_label_opacity: left_label_opacity(offset, config),
        right_label_opacity: right_label_opacity(offset, config),
    }
}

// =============================================================================
// TESTS
// =============================================================================
