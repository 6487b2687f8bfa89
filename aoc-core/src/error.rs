//! Error types for parsing, solving and registration

use thiserror::Error;

/// Error raised while turning raw puzzle text into a day's shared data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
    /// Other parsing errors
    #[error("Parse error: {0}")]
    Other(String),
}

impl ParseError {
    /// Shorthand for [`ParseError::InvalidFormat`] from anything printable
    pub fn invalid(message: impl std::fmt::Display) -> Self {
        Self::InvalidFormat(message.to_string())
    }

    /// Shorthand for [`ParseError::MissingData`] from anything printable
    pub fn missing(message: impl std::fmt::Display) -> Self {
        Self::MissingData(message.to_string())
    }
}

/// Error raised while solving one part of a puzzle
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part number is not implemented
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The requested part number is outside `1..=PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input was well formed but has no answer
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Shorthand for [`SolveError::SolveFailed`] with a plain message
    pub fn failed(message: impl Into<String>) -> Self {
        Self::SolveFailed(message.into().into())
    }
}

/// Text parsed lazily inside a part can still be malformed
impl From<ParseError> for SolveError {
    fn from(err: ParseError) -> Self {
        Self::SolveFailed(Box::new(err))
    }
}

/// Error returned by the registry when creating or running a solver
#[derive(Debug, Error)]
pub enum SolverError {
    /// Solver not found for the given year and day
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Year or day outside the supported storage range
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Attempted to register a solver for a year-day combination that already exists
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// Year or day outside the supported storage range
    #[error("Cannot register year {0} day {1}: outside the supported range")]
    InvalidYearDay(u16, u8),
}
