use std::fmt;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonErrorKind {
    #[error("unexpected end of input")]
    Incomplete,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("object key expected")]
    ObjectKeyExpected,
    #[error("colon expected")]
    ColonExpected,
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("path buffer capacity exceeded")]
    PathOverflow,
    #[error("{0}")]
    Message(String),
}

/// A structural/truncation error from `walk` or any operation built on it,
/// tagged with the byte position at which it was detected.
///
/// Truncation (document ends before a value closes) and every other
/// structural failure are kept distinguishable via [`JsonErrorKind::Incomplete`]
/// vs. every other variant, so callers can tell "needs more bytes" apart
/// from "this input is simply wrong" without inspecting a raw status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonError {
    pub kind: JsonErrorKind,
    pub position: usize,
}

impl JsonError {
    pub fn new(kind: JsonErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn incomplete(position: usize) -> Self {
        Self::new(JsonErrorKind::Incomplete, position)
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self.kind, JsonErrorKind::Incomplete)
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.position)
    }
}

impl std::error::Error for JsonError {}

/// Errors that can additionally occur at an I/O boundary (slurp, `fprintf`,
/// `prettify_file`). Kept as a distinct type from [`JsonError`] because most
/// in-memory operations (`walk`, `scanf`, `printf`, `setf`) never touch a
/// filesystem at all and should not carry an `io::Error` variant they can
/// never produce.
#[derive(Debug, thiserror::Error)]
pub enum IoJsonError {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type JRResult<T> = Result<T, JsonError>;
