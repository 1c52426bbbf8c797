//! Error types shared across the `hunt-*` crates.
//!
//! [`LocationError`] is what a location source reports; it is not a failure of
//! the core itself, so it lives beside [`HuntError`] rather than inside it and
//! only gets wrapped when an initial fix fails.

use thiserror::Error;

use crate::TreasureId;

/// The top-level error type for the `hunt-*` crates.
#[derive(Debug, Error)]
pub enum HuntError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("treasures were already generated for this session")]
    AlreadySeeded,

    #[error("{0} does not exist in this session")]
    UnknownTreasure(TreasureId),

    #[error("location unavailable: {0}")]
    Location(#[from] LocationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `hunt-*` crates.
pub type HuntResult<T> = Result<T, HuntError>;

/// Failure reported by a location source, either for the one-shot initial fix
/// or for an event on a watch stream.
///
/// Variants follow the W3C Geolocation `PositionError` codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out acquiring a position")]
    Timeout,
}

impl LocationError {
    /// Map a W3C numeric error code (1, 2, 3).
    pub fn from_code(code: u16) -> Option<LocationError> {
        match code {
            1 => Some(LocationError::PermissionDenied),
            2 => Some(LocationError::PositionUnavailable),
            3 => Some(LocationError::Timeout),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            LocationError::PermissionDenied    => 1,
            LocationError::PositionUnavailable => 2,
            LocationError::Timeout             => 3,
        }
    }
}
