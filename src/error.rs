//! Deck error types

use thiserror::Error;

use crate::types::CardId;

/// Errors raised while building a deck from seed data or configuration.
///
/// Runtime operations never fail: stale gesture and commit events are ignored.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Duplicate card id in seed data: {0}")]
    DuplicateCardId(CardId),

    #[error("Invalid deck configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for deck construction
pub type Result<T> = std::result::Result<T, DeckError>;
