//! Error types for data parsing in weatherdash-types.

use thiserror::Error;

/// Errors that can occur when parsing weather station data.
///
/// This error type is transport-agnostic and does not include
/// HTTP errors (those belong in weatherdash-core).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Timestamp was not in any of the accepted formats.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A numeric field held a value that is not a number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Field name does not match any reading attribute.
    #[error("Unknown field '{0}' (expected one of: time, temperature, humidity, aqi, wifiStrength, hi, raining)")]
    UnknownField(String),

    /// Range name does not match any bucket.
    #[error("Unknown range '{0}' (expected one of: lastHour, last6Hours, last24Hours, lastWeek, lastMonth, lastYear, allTime)")]
    UnknownRange(String),
}

/// Result type alias using weatherdash-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
