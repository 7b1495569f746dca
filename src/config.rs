//! Deck configuration.
//!
//! Every threshold and presentation constant lives here. `Default` gives the
//! stock values; [`DeckConfig::from_json`] loads a partial override where any
//! missing key keeps its default.
//!
//! ```ignore
//! use flashdeck::DeckConfig;
//!
//! let config = DeckConfig::from_json(r#"{"gesture": {"commitThreshold": 150.0}}"#)?;
//! assert_eq!(config.stack.window_size, 5);
//! ```

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};
use crate::types::Rgba;

// =============================================================================
// GESTURE THRESHOLDS
// =============================================================================

/// Thresholds used to tell a swipe from a tap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureThresholds {
    /// Horizontal displacement beyond which a release commits.
    pub commit_threshold: f32,
    /// A tap must be released strictly faster than this.
    pub tap_max_duration_ms: u64,
    /// A tap must move strictly less than this.
    pub tap_max_distance: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            commit_threshold: 200.0,
            tap_max_duration_ms: 200,
            tap_max_distance: 5.0,
        }
    }
}

impl GestureThresholds {
    pub fn tap_max_duration(&self) -> Duration {
        Duration::from_millis(self.tap_max_duration_ms)
    }
}

// =============================================================================
// DRAG FEEDBACK
// =============================================================================

/// Offset-to-style mapping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackConfig {
    /// Offset at which rotation, fade and tint reach their extremes.
    pub full_offset: f32,
    /// Rotation in degrees at `full_offset`.
    pub max_rotation: f32,
    /// Card stays fully opaque inside +/- this offset.
    pub fade_start: f32,
    /// Side labels start to appear past this offset.
    pub label_start: f32,
    /// Side labels are fully visible past this offset.
    pub label_full: f32,
    pub left_tint: Rgba,
    pub neutral_tint: Rgba,
    pub right_tint: Rgba,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            full_offset: 200.0,
            max_rotation: 30.0,
            fade_start: 100.0,
            label_start: 50.0,
            label_full: 100.0,
            left_tint: Rgba::RETRY_RED,
            neutral_tint: Rgba::WHITE,
            right_tint: Rgba::LEARNED_GREEN,
        }
    }
}

// =============================================================================
// STACK LAYOUT
// =============================================================================

/// Visible window and depth presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StackConfig {
    /// Number of cards rendered from the top of the deck.
    pub window_size: usize,
    /// Settle counter wraps at this value.
    pub settle_modulus: u8,
    /// Scale lost per depth level.
    pub scale_step: f32,
    /// Vertical offset added per depth level.
    pub depth_step: f32,
    /// Vertical offset removed per settle counter step.
    pub settle_step: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            settle_modulus: 10,
            scale_step: 0.05,
            depth_step: 10.0,
            settle_step: 2.0,
        }
    }
}

// =============================================================================
// POINTER INPUT
// =============================================================================

/// Terminal cell size in pixel-equivalent units.
///
/// Mouse events arrive in cells; gesture thresholds are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputConfig {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

// =============================================================================
// DECK CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub gesture: GestureThresholds,
    pub feedback: FeedbackConfig,
    pub stack: StackConfig,
    pub input: InputConfig,
}

impl DeckConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DeckConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the deck unusable.
    pub fn validate(&self) -> Result<()> {
        let problem = if !(self.gesture.commit_threshold > 0.0) {
            Some("gesture.commitThreshold must be positive")
        } else if !(self.gesture.tap_max_distance > 0.0) {
            Some("gesture.tapMaxDistance must be positive")
        } else if !(self.feedback.full_offset > 0.0) {
            Some("feedback.fullOffset must be positive")
        } else if !(self.feedback.fade_start >= 0.0 && self.feedback.fade_start < self.feedback.full_offset) {
            Some("feedback.fadeStart must lie in [0, fullOffset)")
        } else if !(self.feedback.label_start < self.feedback.label_full) {
            Some("feedback.labelStart must be below feedback.labelFull")
        } else if self.stack.window_size == 0 {
            Some("stack.windowSize must be at least 1")
        } else if self.stack.settle_modulus == 0 {
            Some("stack.settleModulus must be at least 1")
        } else if !(self.input.cell_width > 0.0 && self.input.cell_height > 0.0) {
            Some("input cell size must be positive")
        } else {
            None
        };

        match problem {
            Some(message) => {
                warn!("Rejecting deck configuration: {}", message);
                Err(DeckError::InvalidConfig(message.to_string()))
            }
            None => Ok(()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::default();
        assert_eq!(config.gesture.commit_threshold, 200.0);
        assert_eq!(config.gesture.tap_max_duration(), Duration::from_millis(200));
        assert_eq!(config.gesture.tap_max_distance, 5.0);
        assert_eq!(config.stack.window_size, 5);
        assert_eq!(config.stack.settle_modulus, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config =
            DeckConfig::from_json(r#"{"gesture": {"commitThreshold": 150.0}, "stack": {"windowSize": 3}}"#)
                .unwrap();
        assert_eq!(config.gesture.commit_threshold, 150.0);
        assert_eq!(config.gesture.tap_max_duration_ms, 200);
        assert_eq!(config.stack.window_size, 3);
        assert_eq!(config.feedback, FeedbackConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(DeckConfig::from_json("{}").unwrap(), DeckConfig::default());
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = DeckConfig::from_json(r#"{"stack": {"windowSize": 0}}"#).unwrap_err();
        assert!(matches!(err, DeckError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = DeckConfig::default();
        config.gesture.commit_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(DeckConfig::from_json("{"), Err(DeckError::Json(_))));
    }
}
