//! Which booking lengths are allowed from a given start slot.
//!
//! A booking may last one to six slots but can never run past closing, so
//! the options shrink as the start slot approaches the end of the grid.
//! Nothing here is cached: callers re-run [`available_durations`] and then
//! [`clamp_duration`] each time the start slot changes.

use chrono::{Duration, NaiveDateTime};

use crate::constants::{DEFAULT_DURATION_SLOTS, DURATION_OPTIONS};
use crate::error::{MrbsError, MrbsResult};
use crate::grid::{SlotGrid, TimeSlot};

/// Index of `start_slot` in a grid opening at `opening` with `total_slots`
/// slots of `slot_width_minutes` each.
///
/// Starts that are off the slot grid, before opening, or at/after closing
/// are rejected rather than rounded.
pub fn start_slot_index(
    start_slot: TimeSlot,
    opening: NaiveDateTime,
    total_slots: usize,
    slot_width_minutes: i64,
) -> MrbsResult<usize> {
    let invalid = |reason: &str| MrbsError::InvalidStartSlot {
        slot: start_slot,
        reason: reason.to_string(),
    };

    let diff = start_slot - opening;
    if diff < Duration::zero() {
        return Err(invalid("starts before the grid opens"));
    }
    if slot_width_minutes <= 0 {
        return Err(invalid("grid has no slot width"));
    }
    if diff.subsec_nanos() != 0 || diff.num_seconds() % (slot_width_minutes * 60) != 0 {
        return Err(invalid(&format!(
            "not aligned to a {slot_width_minutes}-minute slot"
        )));
    }

    let index = (diff.num_minutes() / slot_width_minutes) as usize;
    if index >= total_slots {
        return Err(invalid("starts at or after closing"));
    }
    Ok(index)
}

/// The entries of `options` that fit between `start_slot` and closing, ascending.
pub fn available_durations(
    start_slot: TimeSlot,
    opening: NaiveDateTime,
    total_slots: usize,
    slot_width_minutes: i64,
    options: &[u32],
) -> MrbsResult<Vec<u32>> {
    let index = start_slot_index(start_slot, opening, total_slots, slot_width_minutes)?;
    let slots_remaining = (total_slots - index) as u32;

    let mut durations: Vec<u32> = options
        .iter()
        .copied()
        .filter(|d| *d <= slots_remaining)
        .collect();
    durations.sort_unstable();
    Ok(durations)
}

/// Keep `selected` if still allowed, otherwise fall back to the longest allowed.
pub fn clamp_duration(selected: u32, available: &[u32]) -> MrbsResult<u32> {
    if available.contains(&selected) {
        return Ok(selected);
    }
    available.iter().max().copied().ok_or(MrbsError::EmptyDurationSet)
}

/// "0.5 hour", "1 hour", "1.5 hours", ... for a count of 30-minute slots.
pub fn format_duration(slots: u32) -> String {
    let hours = if slots % 2 == 0 {
        format!("{}", slots / 2)
    } else {
        format!("{}.5", slots / 2)
    };
    let plural = if slots > 2 { "s" } else { "" };
    format!("{hours} hour{plural}")
}

/// End of a booking that starts at `start` and lasts `slots` slots.
pub fn end_time(start: TimeSlot, slots: u32, slot_width_minutes: i64) -> NaiveDateTime {
    start + Duration::minutes(slots as i64 * slot_width_minutes)
}

/// The (start, duration) pair a booking form is editing.
///
/// Every change of start slot re-derives the allowed durations and clamps
/// the current choice, so the pair can never cross closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    opening: NaiveDateTime,
    total_slots: usize,
    slot_width_minutes: i64,
    start_slot: TimeSlot,
    duration: u32,
}

impl PendingBooking {
    pub fn new(grid: &SlotGrid, start_slot: TimeSlot) -> MrbsResult<Self> {
        let mut pending = PendingBooking {
            opening: grid.opening(),
            total_slots: grid.len(),
            slot_width_minutes: grid.slot_width_minutes(),
            start_slot: grid.opening(),
            duration: DEFAULT_DURATION_SLOTS,
        };
        pending.set_start(start_slot)?;
        Ok(pending)
    }

    pub fn start_slot(&self) -> TimeSlot {
        self.start_slot
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn end_time(&self) -> NaiveDateTime {
        end_time(self.start_slot, self.duration, self.slot_width_minutes)
    }

    pub fn available(&self) -> MrbsResult<Vec<u32>> {
        available_durations(
            self.start_slot,
            self.opening,
            self.total_slots,
            self.slot_width_minutes,
            &DURATION_OPTIONS,
        )
    }

    /// Move the start slot, clamping the duration if it no longer fits.
    /// Leaves the booking untouched on error.
    pub fn set_start(&mut self, start_slot: TimeSlot) -> MrbsResult<()> {
        let available = available_durations(
            start_slot,
            self.opening,
            self.total_slots,
            self.slot_width_minutes,
            &DURATION_OPTIONS,
        )?;
        let duration = clamp_duration(self.duration, &available)?;

        if duration != self.duration {
            tracing::debug!(
                from = self.duration,
                to = duration,
                "duration clamped after start moved to {}",
                start_slot
            );
        }
        self.start_slot = start_slot;
        self.duration = duration;
        Ok(())
    }

    pub fn set_duration(&mut self, duration: u32) -> MrbsResult<()> {
        let available = self.available()?;
        if !available.contains(&duration) {
            return Err(MrbsError::InvalidBooking(format!(
                "a {}-minute booking starting at {} runs past closing",
                duration as i64 * self.slot_width_minutes,
                self.start_slot.format("%H:%M")
            )));
        }
        self.duration = duration;
        Ok(())
    }
}
