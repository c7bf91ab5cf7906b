//! Error types for the booking client.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur in mrbs operations.
#[derive(Error, Debug)]
pub enum MrbsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid start slot {slot}: {reason}")]
    InvalidStartSlot { slot: NaiveDateTime, reason: String },

    #[error("No booking durations available")]
    EmptyDurationSet,

    #[error("Room {0} is not in the room list")]
    UnknownRoom(u32),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    #[error("Invalid user entry: {0}")]
    InvalidUser(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Not logged in. Run `mrbs login` first")]
    NotLoggedIn,

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for mrbs operations.
pub type MrbsResult<T> = Result<T, MrbsError>;
