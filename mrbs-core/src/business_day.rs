//! The calendar day a booking grid is drawn for.

use std::fmt;

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::constants::{API_DATE_FORMAT, SLOT_COUNT, SLOT_WIDTH_MINUTES};
use crate::error::{MrbsError, MrbsResult};
use crate::grid::opening_time;

/// A calendar day. The grid window runs from 08:00 on this date until
/// 02:00 on the following date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusinessDay(NaiveDate);

impl BusinessDay {
    pub fn new(date: NaiveDate) -> Self {
        BusinessDay(date)
    }

    /// The business day whose grid is current in the given timezone.
    pub fn today(tz: Tz) -> Self {
        Self::containing(Utc::now().with_timezone(&tz).naive_local())
    }

    /// The business day `instant` belongs to. Until the previous night's
    /// grid closes at 02:00, that is still the previous day.
    pub fn containing(instant: NaiveDateTime) -> Self {
        let date = instant.date();
        let Some(previous) = date.checked_sub_days(Days::new(1)) else {
            return BusinessDay(date);
        };

        let previous_closing =
            opening_time(previous) + Duration::minutes(SLOT_COUNT as i64 * SLOT_WIDTH_MINUTES);
        if instant < previous_closing {
            BusinessDay(previous)
        } else {
            BusinessDay(date)
        }
    }

    /// Parse an optional YYYY-MM-DD argument, defaulting to today in `tz`.
    pub fn from_arg(arg: Option<&str>, tz: Tz) -> MrbsResult<Self> {
        match arg {
            Some(s) => s.parse(),
            None => Ok(Self::today(tz)),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn opening(&self) -> NaiveDateTime {
        opening_time(self.0)
    }

    /// Date in the format the bookings endpoint expects.
    pub fn to_api_string(&self) -> String {
        self.0.format(API_DATE_FORMAT).to_string()
    }
}

impl std::str::FromStr for BusinessDay {
    type Err = MrbsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), API_DATE_FORMAT)
            .map(BusinessDay)
            .map_err(|_| MrbsError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for BusinessDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a %d %b %Y"))
    }
}
