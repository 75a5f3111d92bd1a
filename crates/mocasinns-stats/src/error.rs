//! Error types shared by the estimators and the table loader.

/// Which side of a key/value column selection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ColumnRole {
    #[display("key")]
    Key,
    #[display("value")]
    Value,
}

/// A precondition of an estimator or conversion was violated.
///
/// No partial result is ever returned alongside this error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidInputError {
    #[display("at least {required} samples are required, got {actual}")]
    TooFewSamples { required: usize, actual: usize },
    #[display("at least 2 resamples are required, got {actual}")]
    TooFewResamples { actual: usize },
    #[display("no {role} columns selected")]
    EmptyColumns { role: ColumnRole },
    #[display("column {column} is out of range for a table of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },
    #[display("expected a value of arity {expected}, got arity {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[display("cannot combine a scalar with a tuple of arity {arity}")]
    ShapeMismatch { arity: usize },
    #[display("rows must have equal length: expected {expected}, got {actual}")]
    RaggedRows { expected: usize, actual: usize },
    #[display("bin size must be positive")]
    ZeroBinSize,
}

/// Malformed table text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the source text, counting skipped and comment lines.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseErrorKind {
    #[display("expected {expected} columns, found {actual}")]
    ColumnCount { expected: usize, actual: usize },
    #[display("cannot parse {token:?} as a number")]
    InvalidNumber { token: String },
}

/// Failure while loading a table into a keyed mapping.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("failed to read table")]
    Io(std::io::Error),
    #[display("malformed table")]
    Parse(ParseError),
    #[display("invalid column selection")]
    InvalidInput(InvalidInputError),
}
