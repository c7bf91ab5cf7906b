use anyhow::{Result, bail};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use mrbs_core::BusinessDay;
use mrbs_core::constants::{API_DATETIME_FORMAT, OPENING_HOUR};

const TIME_FORMATS: [&str; 3] = ["%H:%M", "%I:%M %p", "%I:%M%p"];

/// Parse a start time on the grid of `day`.
///
/// Accepts "14:30", "02:30 PM", "2:30pm" or a full "2024-01-01 14:30".
/// Clock times before opening fall on the morning after `day`, so "01:30"
/// is the last slot of that day's grid.
pub fn parse_start(input: &str, day: BusinessDay) -> Result<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, API_DATETIME_FORMAT) {
        return Ok(dt);
    }

    let upper = input.to_uppercase();
    let Some(time) = TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(&upper, f).ok())
    else {
        bail!("Invalid time '{input}'. Use HH:MM (e.g. 14:30) or hh:mm AM/PM");
    };

    let start = day.date().and_time(time);
    if time.hour() < OPENING_HOUR {
        Ok(start + Duration::days(1))
    } else {
        Ok(start)
    }
}
