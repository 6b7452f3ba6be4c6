//! Content validation errors.
//!
//! Every variant is a build-time failure: pages are static data, so a
//! malformed scoreboard must stop `toolhub build` / `toolhub check` rather
//! than reach a reader. Brand lookups that miss the catalog are not errors
//! and have no variant here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    /// A contender has no score for a declared criterion.
    #[error("missing score for contender '{contender}' in criterion '{criterion}'")]
    MissingScore { criterion: String, contender: String },

    /// A scoreboard was declared without any criteria.
    #[error("no criteria supplied")]
    EmptyCriteria,

    /// A scoreboard was declared without any contenders.
    #[error("no contenders supplied")]
    EmptyContenders,

    /// A criterion scores a key that is not in the page's contender list.
    #[error("criterion '{criterion}' scores unknown contender '{contender}'")]
    UnknownContender { criterion: String, contender: String },

    /// Two contenders on one page share a key.
    #[error("duplicate contender key '{0}'")]
    DuplicateContender(String),

    /// A contender key or page slug is not a lowercase slug.
    #[error("invalid key '{0}': expected lowercase letters, digits and '-'")]
    InvalidKey(String),

    /// A page slug starts with a path the preview server serves itself.
    #[error("slug '{0}' starts with a reserved path")]
    ReservedSlug(String),

    /// A score is NaN, infinite or outside 0.0..=10.0.
    #[error("score {score} for '{contender}' in criterion '{criterion}' is outside 0..=10")]
    ScoreOutOfRange {
        criterion: String,
        contender: String,
        score: f64,
    },

    /// A pros/cons block or pricing row points at an undeclared contender.
    #[error("{context} references unknown contender '{contender}'")]
    DanglingReference { context: String, contender: String },
}
