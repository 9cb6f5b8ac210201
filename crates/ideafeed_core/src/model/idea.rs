//! Idea domain model.
//!
//! # Responsibility
//! - Define the canonical feed record and its validation rules.
//!
//! # Invariants
//! - `id` is unique across the collection and never reassigned.
//! - `support` is never mutated after generation.
//! - `acceleration` is the only field a user action may change.
//! - `last_updated` is set once at generation and never refreshed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for every idea in the feed.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type IdeaId = i64;

/// Canonical feed record.
///
/// Display strings and `support` are immutable after creation. `velocity`
/// and `acceleration` carry no ranking weight; `acceleration` receives a
/// fixed bump when the idea is supported for the first time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    /// Unique integer id assigned at generation time.
    pub id: IdeaId,
    /// Display name of the idea's author.
    pub author: String,
    /// Headline shown on the idea card.
    pub title: String,
    /// One-line pitch.
    pub description: String,
    /// Single topic tag, also a filter target.
    pub tag: String,
    /// Emoji associated with the tag.
    pub icon: String,
    /// Ranking score. Feed ordering sorts on this field alone.
    pub support: f64,
    /// Decorative momentum score.
    pub velocity: f64,
    /// Decorative momentum score; bumped once per supported idea.
    pub acceleration: f64,
    /// Unix epoch milliseconds at generation. Never refreshed.
    pub last_updated: i64,
}

/// Validation error for idea records.
#[derive(Debug, Clone, PartialEq)]
pub enum IdeaValidationError {
    /// Ids are assigned from zero upward; a negative id is corrupt input.
    NegativeId(IdeaId),
    /// The title must carry visible text.
    BlankTitle,
    /// Score fields must be finite and non-negative.
    InvalidScore { field: &'static str, value: f64 },
}

impl Display for IdeaValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeId(id) => write!(f, "idea id must be non-negative, got {id}"),
            Self::BlankTitle => write!(f, "idea title must not be blank"),
            Self::InvalidScore { field, value } => {
                write!(f, "idea {field} must be a finite non-negative number, got {value}")
            }
        }
    }
}

impl Error for IdeaValidationError {}

impl Idea {
    /// Checks record-level invariants.
    ///
    /// Write paths must call this before persistence; read paths use it to
    /// reject invalid stored state instead of masking it.
    pub fn validate(&self) -> Result<(), IdeaValidationError> {
        if self.id < 0 {
            return Err(IdeaValidationError::NegativeId(self.id));
        }
        if self.title.trim().is_empty() {
            return Err(IdeaValidationError::BlankTitle);
        }
        for (field, value) in [
            ("support", self.support),
            ("velocity", self.velocity),
            ("acceleration", self.acceleration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(IdeaValidationError::InvalidScore { field, value });
            }
        }
        Ok(())
    }

    /// Returns whether the lowercased needle occurs in the idea's title,
    /// description or tag.
    ///
    /// Callers are expected to pass an already-lowercased needle; a blank
    /// needle matches everything.
    pub fn matches(&self, lowercased_needle: &str) -> bool {
        if lowercased_needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(lowercased_needle)
            || self.description.to_lowercase().contains(lowercased_needle)
            || self.tag.to_lowercase().contains(lowercased_needle)
    }
}
