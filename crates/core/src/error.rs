//! Error taxonomy for the index engine.
//!
//! Two layers, mirroring the engine's status-code contract:
//!
//! - [`ErrorCode`] is the flat status taxonomy. Every code has a stable
//!   human-readable message obtainable via [`strerror`].
//! - [`Error`] is the structured error type carrying context (ids, expected
//!   dimensions, io sources). Every `Error` maps to exactly one `ErrorCode`
//!   via [`Error::code`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat status code taxonomy.
///
/// The numeric values are part of the dump-file and wire contract and must
/// not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    /// Operation completed.
    Success = 0,
    /// Index construction failed (bad dims or allocation parameters).
    InvalidInit = 1,
    /// Handle is null, destroyed, or otherwise unusable.
    InvalidIndex = 2,
    /// Vector payload is malformed (non-finite components, empty slice).
    InvalidVector = 3,
    /// Result buffer is missing or unusable.
    InvalidResult = 4,
    /// Vector length does not match the configured dimensionality.
    InvalidDimensions = 5,
    /// Argument outside its valid domain (zero capacity, bad mode, ...).
    InvalidArgument = 6,
    /// Id outside the valid domain.
    InvalidId = 7,
    /// Dangling or invalid internal reference.
    InvalidRef = 8,
    /// Unknown distance method.
    InvalidMethod = 9,
    /// Insert collided with an existing id.
    DuplicatedEntry = 10,
    /// Id not present in the index.
    NotFoundId = 11,
    /// Search against an index with zero live entries.
    IndexEmpty = 12,
    /// Locking or thread-related failure.
    ThreadError = 13,
    /// Unclassified system failure.
    SystemError = 14,
    /// File read/write failure.
    FileIoError = 15,
    /// Operation not supported by this index type.
    NotImplemented = 16,
    /// Dump file is corrupt, truncated, or not a dump file.
    InvalidFile = 17,
}

impl ErrorCode {
    /// Stable human-readable message for this status code.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::InvalidInit => "invalid index initialization",
            ErrorCode::InvalidIndex => "invalid or destroyed index handle",
            ErrorCode::InvalidVector => "invalid vector payload",
            ErrorCode::InvalidResult => "invalid result buffer",
            ErrorCode::InvalidDimensions => "vector dimensions do not match index",
            ErrorCode::InvalidArgument => "invalid argument",
            ErrorCode::InvalidId => "invalid id",
            ErrorCode::InvalidRef => "invalid internal reference",
            ErrorCode::InvalidMethod => "unknown distance method",
            ErrorCode::DuplicatedEntry => "duplicated entry",
            ErrorCode::NotFoundId => "id not found",
            ErrorCode::IndexEmpty => "index is empty",
            ErrorCode::ThreadError => "thread error",
            ErrorCode::SystemError => "system error",
            ErrorCode::FileIoError => "file I/O error",
            ErrorCode::NotImplemented => "not implemented",
            ErrorCode::InvalidFile => "invalid index file",
        }
    }

    /// Raw numeric value of this code.
    pub fn as_raw(&self) -> i32 {
        *self as i32
    }

    /// Parse a raw numeric value back into a code.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ErrorCode::Success),
            1 => Some(ErrorCode::InvalidInit),
            2 => Some(ErrorCode::InvalidIndex),
            3 => Some(ErrorCode::InvalidVector),
            4 => Some(ErrorCode::InvalidResult),
            5 => Some(ErrorCode::InvalidDimensions),
            6 => Some(ErrorCode::InvalidArgument),
            7 => Some(ErrorCode::InvalidId),
            8 => Some(ErrorCode::InvalidRef),
            9 => Some(ErrorCode::InvalidMethod),
            10 => Some(ErrorCode::DuplicatedEntry),
            11 => Some(ErrorCode::NotFoundId),
            12 => Some(ErrorCode::IndexEmpty),
            13 => Some(ErrorCode::ThreadError),
            14 => Some(ErrorCode::SystemError),
            15 => Some(ErrorCode::FileIoError),
            16 => Some(ErrorCode::NotImplemented),
            17 => Some(ErrorCode::InvalidFile),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Map a status code to its human-readable message.
pub fn strerror(code: ErrorCode) -> &'static str {
    code.message()
}

/// Structured engine error.
///
/// Carries enough context for diagnostics; callers that need the flat status
/// code use [`Error::code`].
#[derive(Debug, Error)]
pub enum Error {
    /// Index construction failed before any state was created.
    #[error("invalid index initialization: {0}")]
    InvalidInit(String),

    /// Operation on a null or destroyed handle.
    #[error("invalid or destroyed index handle")]
    InvalidIndex,

    /// Vector payload is malformed (beyond a plain length mismatch).
    #[error("invalid vector: {0}")]
    InvalidVector(String),

    /// Result buffer missing or unusable.
    #[error("invalid result buffer")]
    InvalidResult,

    /// Vector length does not match the index dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimensions {
        /// Dimensionality configured at allocation time.
        expected: u16,
        /// Length of the offending vector.
        actual: usize,
    },

    /// Argument outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Id outside the valid domain.
    #[error("invalid id: {0}")]
    InvalidId(u64),

    /// Dangling internal reference.
    #[error("invalid internal reference")]
    InvalidRef,

    /// Unknown distance method name or byte.
    #[error("unknown distance method: {0}")]
    InvalidMethod(String),

    /// Insert collided with an existing id.
    #[error("duplicated entry: id {0} already present")]
    DuplicatedEntry(u64),

    /// Id not present in the index.
    #[error("id {0} not found")]
    NotFoundId(u64),

    /// Search against an index with zero live entries.
    #[error("index is empty")]
    IndexEmpty,

    /// Locking failure.
    #[error("thread error: {0}")]
    ThreadError(String),

    /// Unclassified system failure.
    #[error("system error: {0}")]
    System(String),

    /// File read/write failure during dump/load.
    #[error("file I/O error: {0}")]
    FileIo(#[from] std::io::Error),

    /// Operation not supported by this index type.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Dump file is corrupt, truncated, or not a dump file.
    #[error("invalid index file: {0}")]
    InvalidFile(String),
}

impl Error {
    /// Flat status code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidInit(_) => ErrorCode::InvalidInit,
            Error::InvalidIndex => ErrorCode::InvalidIndex,
            Error::InvalidVector(_) => ErrorCode::InvalidVector,
            Error::InvalidResult => ErrorCode::InvalidResult,
            Error::InvalidDimensions { .. } => ErrorCode::InvalidDimensions,
            Error::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Error::InvalidId(_) => ErrorCode::InvalidId,
            Error::InvalidRef => ErrorCode::InvalidRef,
            Error::InvalidMethod(_) => ErrorCode::InvalidMethod,
            Error::DuplicatedEntry(_) => ErrorCode::DuplicatedEntry,
            Error::NotFoundId(_) => ErrorCode::NotFoundId,
            Error::IndexEmpty => ErrorCode::IndexEmpty,
            Error::ThreadError(_) => ErrorCode::ThreadError,
            Error::System(_) => ErrorCode::SystemError,
            Error::FileIo(_) => ErrorCode::FileIoError,
            Error::NotImplemented(_) => ErrorCode::NotImplemented,
            Error::InvalidFile(_) => ErrorCode::InvalidFile,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFoundId(_))
    }

    /// Check if this is a precondition violation (detected before any
    /// state was touched).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::InvalidIndex
                | Error::InvalidVector(_)
                | Error::InvalidDimensions { .. }
                | Error::InvalidArgument(_)
                | Error::InvalidInit(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
