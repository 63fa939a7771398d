//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Running out of fringe
//! without a goal is a normal outcome, expressed via
//! [`crate::graph::TerminationReason`] and the strategy's exhaustion hook.

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No
/// `SearchGraph` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A beam search was configured to keep zero fringe entries.
    InvalidBeamWidth { width: usize },
    /// A search policy field holds an unusable value.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBeamWidth { width } => {
                write!(f, "beam width must be at least 1 (got {width})")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
