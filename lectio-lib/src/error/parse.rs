//! Reference parse errors

/// Errors produced when a citation string does not match the reference
/// grammar.
///
/// Parse errors are terminal for the single reference that produced them: no
/// partial result is returned, and the orchestrator skips every remote source
/// for that reference (falling through only to the local store's permissive
/// re-match).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// The string does not match any supported citation form.
    #[error("Unrecognized scripture reference: {reference:?}")]
    Unrecognized {
        /// The offending input.
        reference: String,
    },

    /// The string contains a book name but no chapter number. A book-only
    /// reference must fail rather than silently defaulting to chapter 1.
    #[error("Reference has no chapter number: {reference:?}")]
    MissingChapter {
        /// The offending input.
        reference: String,
    },
}

impl ParseError {
    /// Creates an `Unrecognized` error for the given input.
    pub fn unrecognized(reference: impl Into<String>) -> Self {
        Self::Unrecognized {
            reference: reference.into(),
        }
    }

    /// Creates a `MissingChapter` error for the given input.
    pub fn missing_chapter(reference: impl Into<String>) -> Self {
        Self::MissingChapter {
            reference: reference.into(),
        }
    }
}
