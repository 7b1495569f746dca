//! Core types for flashdeck.
//!
//! These types flow from the seed data through the gesture classifier and the
//! deck manager into the presentation projection.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Integer channels for exact comparison. Alpha 255 = fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Tint of a card dragged fully left (tailwind red-600).
    pub const RETRY_RED: Self = Self::rgb(220, 38, 38);
    /// Tint of a card dragged fully right (tailwind green-600).
    pub const LEARNED_GREEN: Self = Self::rgb(22, 163, 74);

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            (from as f32 + (to as f32 - from as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };

        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({} {} {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgb({} {} {} / {:.3})", self.r, self.g, self.b, self.a as f32 / 255.0)
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A pointer position in pixel-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// =============================================================================
// Cards
// =============================================================================

/// Stable card identity, used for removal and keying.
pub type CardId = i64;

/// One learning unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    /// Front-face body text.
    pub content: String,
    /// Detail text shown when the card is flipped.
    pub back_content: String,
}

impl Card {
    pub const FRONT_HINT: &'static str = "Swipe left to retry, right when learned";
    pub const BACK_HINT: &'static str = "Tap to flip back | Swipe to categorize";

    pub fn new(
        id: CardId,
        title: impl Into<String>,
        content: impl Into<String>,
        back_content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            back_content: back_content.into(),
        }
    }

    /// Heading shown on the back face.
    pub fn back_heading(&self) -> String {
        format!("Deep Dive: {}", self.title)
    }
}

// =============================================================================
// Decisions
// =============================================================================

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction for a signed horizontal offset (positive = right).
    pub fn from_offset(offset: f32) -> Self {
        if offset > 0.0 { Self::Right } else { Self::Left }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Label shown while the card is dragged toward this side.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "Retry soon",
            Self::Right => "Learned",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single gesture on the top card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    /// Released below both thresholds; the card springs back.
    #[default]
    NoOp,
    /// Tap: toggle the visible face.
    Flip,
    CommitLeft,
    CommitRight,
}

impl Decision {
    pub fn commit(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::CommitLeft,
            SwipeDirection::Right => Self::CommitRight,
        }
    }

    /// Swipe direction for commit decisions, `None` otherwise.
    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            Self::CommitLeft => Some(SwipeDirection::Left),
            Self::CommitRight => Some(SwipeDirection::Right),
            Self::NoOp | Self::Flip => None,
        }
    }

    #[inline]
    pub fn is_commit(&self) -> bool {
        self.direction().is_some()
    }
}

// =============================================================================
// Presentation Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-card presentation switches.
    ///
    /// Combine with bitwise OR: `PresentationFlags::INTERACTIVE | PresentationFlags::FLIPPED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PresentationFlags: u8 {
        const NONE = 0;
        /// Drag-enabled (top of stack only).
        const INTERACTIVE = 1 << 0;
        /// Back face showing.
        const FLIPPED = 1 << 1;
    }
}

// =============================================================================
// Tests
// =============================================================================
