use std::fmt::{self, Display};
use thiserror::Error;

/// Failures raised by the declaration and invocation machinery.
///
/// They travel inside [`crate::Error`] (an `anyhow::Error`), possibly wrapped in additional
/// context. Use [`StatementError::find`] or `error.downcast_ref::<StatementError>()` to match on
/// the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("Invalid parameter `{0}`, expected `$` followed by digits or lower_case_words")]
    MalformedParameter(String),
    #[error("Named and numbered parameters cannot be mixed in the same statement")]
    MixedParameterStyles,
    #[error("Numbered parameters must be contiguous and start at $1, found {}", DisplayIndexes(.0))]
    NonContiguousPositionalParameters(Vec<u64>),
    #[error("{given} arguments given, {} expected", DisplayRange(.min, .max))]
    ArityMismatch { given: usize, min: usize, max: usize },
    #[error("Missing argument `{0}`")]
    MissingNamedArgument(String),
    #[error("Unexpected argument `{0}`")]
    UnexpectedNamedArgument(String),
    #[error("The operation expects {expected} arguments")]
    ArgumentStyleMismatch { expected: &'static str },
    #[error("An operation named `{0}` is already declared")]
    DuplicateOperationName(String),
    #[error("The setting `{0}` was already configured")]
    ConfigurationAlreadySet(&'static str),
    #[error("{0}")]
    InvalidConfiguration(String),
    #[error("The connection was not established")]
    ConnectionNotEstablished,
    #[error("A transaction is already open on this instance")]
    AlreadyInTransaction,
    #[error("The query returned no results")]
    NoResults,
    #[error("The query returned {0} rows, expected exactly one")]
    TooManyResults(usize),
    #[error("No operation named `{0}` is declared")]
    UnknownOperation(String),
}

impl StatementError {
    /// Look for a `StatementError` anywhere in the chain of `error`.
    pub fn find(error: &crate::Error) -> Option<&StatementError> {
        error.chain().find_map(|e| e.downcast_ref::<StatementError>())
    }
}

struct DisplayIndexes<'a>(&'a [u64]);

impl Display for DisplayIndexes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for index in self.0 {
            write!(f, "{separator}${index}")?;
            separator = ", ";
        }
        Ok(())
    }
}

struct DisplayRange<'a>(&'a usize, &'a usize);

impl Display for DisplayRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{}..={}", self.0, self.1)
        }
    }
}
