//! Hard error type for contract violations.
//!
//! User-facing parse failures flow through [`crate::ParseFailure`] and the
//! `Fail` arm of [`crate::State`]; this type is reserved for violations of the
//! driver's own contract (shrunk input, a negative repeat count, an empty
//! buffer) that abort the parse rather than participate in backtracking.

use core::fmt;

/// Hard error produced by driver entry points.
///
/// Distinct from [`crate::ParseFailure`]: a `ParseFailure` is data that flows
/// through `Fail` and may be caught by `<|>`. An `Error` is a contract
/// violation — it is returned from `parse`, `parse_only`, or a buffered
/// `feed`, never constructed mid-grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// A buffered driver was asked to operate with a zero-sized buffer.
    EmptyBuffer,

    /// A resumed chunk was shorter than the input already seen.
    ///
    /// The engine requires that input only grows across resumptions; a
    /// caller that forgets previously-fed bytes violates this and aborts the
    /// parse rather than silently rewinding.
    ShrunkInput,

    /// A repetition combinator (`count`) was asked for a negative count.
    NegativeCount,

    /// Recursion limit exceeded while tying a `fix` knot.
    RecursionLimitExceeded {
        /// Current recursion depth when the limit was exceeded.
        depth: usize,
        /// Maximum allowed recursion depth.
        limit: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyBuffer => write!(f, "buffer must have nonzero capacity"),
            Error::ShrunkInput => write!(f, "resumed input is shorter than input already seen"),
            Error::NegativeCount => write!(f, "count: negative repeat count"),
            Error::RecursionLimitExceeded { depth, limit } => {
                write!(f, "recursion limit exceeded: depth {} > limit {}", depth, limit)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A data-carrying parse failure: a breadcrumb trail of named contexts plus
/// the message of the primitive that ultimately failed.
///
/// `marks` is outermost-first, populated by `<?>`. Composite combinators
/// never rewrite `message`; they only prepend marks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseFailure {
    pub marks: Vec<String>,
    pub message: String,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            marks: Vec::new(),
            message: message.into(),
        }
    }

    pub fn with_mark(mut self, mark: impl Into<String>) -> Self {
        self.marks.insert(0, mark.into());
        self
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.marks.is_empty() {
            write!(f, "{}: ", self.marks.join(" > "))?;
        }
        write!(f, "{}", self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_marks_outermost_first() {
        let failure = ParseFailure::new("take_while1")
            .with_mark("digits")
            .with_mark("decimal");
        assert_eq!(failure.to_string(), "decimal > digits: take_while1");
    }

    #[test]
    fn display_with_no_marks_is_bare_message() {
        let failure = ParseFailure::new("end_of_input");
        assert_eq!(failure.to_string(), "end_of_input");
    }
}
