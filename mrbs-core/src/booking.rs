//! Bookings as the grid sees them, and their wire representation.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MrbsError, MrbsResult};

/// A booking of one room over the half-open range `[start_time, end_time)`.
///
/// Times are wall-clock in the grid's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub booking_id: String,
    pub room_id: u32,
    pub room_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub title: String,
    pub description: String,
    /// Display name of the person who made the booking
    pub booked_by: String,
    /// Login name of the person who made the booking
    pub booked_by_username: String,
}

impl Booking {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.booked_by_username.eq_ignore_ascii_case(username)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}-{})",
            self.title,
            self.room_name,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// A booking as returned by `GET /bookings`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub booking_id: String,
    #[serde(default)]
    pub booked_by: String,
    #[serde(default)]
    pub booked_by_username: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub room_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "string_or_number")]
    pub room_id: String,
}

impl BookingRecord {
    /// Convert to grid wall-clock time in `tz`.
    pub fn into_booking(self, tz: Tz) -> MrbsResult<Booking> {
        let room_id = self.room_id.trim().parse::<u32>().map_err(|_| {
            MrbsError::Serialization(format!(
                "booking {} has non-numeric room_id '{}'",
                self.booking_id, self.room_id
            ))
        })?;

        Ok(Booking {
            booking_id: self.booking_id,
            room_id,
            room_name: self.room_name,
            start_time: self.start_time.with_timezone(&tz).naive_local(),
            end_time: self.end_time.with_timezone(&tz).naive_local(),
            title: self.title,
            description: self.description,
            booked_by: self.booked_by,
            booked_by_username: self.booked_by_username,
        })
    }
}

/// The backend sends ids as strings, older builds as numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}
