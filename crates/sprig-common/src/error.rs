//! Error types shared between the scanner crates.
//!
//! Markup itself never produces an error. The only failure the scanner knows
//! about is reaching outside the input while looking one character ahead or
//! behind, and that stays internal to a scan.

use thiserror::Error;

/// A look-ahead or look-behind fell outside the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// Looked behind the first character.
    #[error("look-behind before the start of the input")]
    BeforeStart,
    /// Looked at or past the end of the input.
    #[error("offset {offset} is past the end of the input (length {len})")]
    PastEnd {
        /// The offending character offset.
        offset: usize,
        /// Length of the input in characters.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_error_messages() {
        let err = BoundsError::PastEnd { offset: 7, len: 7 };
        assert_eq!(
            err.to_string(),
            "offset 7 is past the end of the input (length 7)"
        );
        assert_eq!(
            BoundsError::BeforeStart.to_string(),
            "look-behind before the start of the input"
        );
    }
}
