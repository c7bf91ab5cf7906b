//! The daily slot grid.
//!
//! A business day is cut into fixed 30-minute slots from 08:00 until 02:00
//! the next morning. Bookings are mapped onto that grid as a column (the
//! room) and a run of rows (the slots they cover).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::booking::Booking;
use crate::business_day::BusinessDay;
use crate::constants::{OPENING_HOUR, SLOT_COUNT, SLOT_WIDTH_MINUTES};
use crate::room::{Room, room_index};

/// Start of one grid slot, as wall-clock time in the grid's timezone.
pub type TimeSlot = NaiveDateTime;

/// Where a booking sits in the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPlacement {
    /// Room index plus one; column 0 holds the time labels.
    pub column: usize,
    pub row_start: usize,
    pub row_span: usize,
}

impl GridPlacement {
    /// One past the last row covered.
    pub fn row_end(&self) -> usize {
        self.row_start + self.row_span
    }

    pub fn covers_row(&self, row: usize) -> bool {
        row >= self.row_start && row < self.row_end()
    }
}

/// 08:00 on `day`: the opening boundary of that day's grid.
pub fn opening_time(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + Duration::hours(OPENING_HOUR as i64)
}

/// `slot_count` slot starts beginning at `opening`, `slot_width_minutes` apart.
pub fn generate_slots(
    opening: NaiveDateTime,
    slot_count: usize,
    slot_width_minutes: i64,
) -> Vec<TimeSlot> {
    (0..slot_count)
        .map(|i| opening + Duration::minutes(i as i64 * slot_width_minutes))
        .collect()
}

/// Grid coordinates for `booking` in a standard 36-slot grid.
///
/// Returns `None` when the booking starts before opening or at/after
/// closing, has no positive length, or its room is not in `rooms`.
/// Bookings running past closing are clipped to the last row.
pub fn place_booking(
    booking: &Booking,
    opening: NaiveDateTime,
    rooms: &[Room],
) -> Option<GridPlacement> {
    place_in_grid(booking, opening, rooms, SLOT_COUNT, SLOT_WIDTH_MINUTES)
}

fn place_in_grid(
    booking: &Booking,
    opening: NaiveDateTime,
    rooms: &[Room],
    slot_count: usize,
    slot_width_minutes: i64,
) -> Option<GridPlacement> {
    let column = room_index(rooms, booking.room_id)? + 1;

    let diff_minutes = (booking.start_time - opening).num_minutes();
    if diff_minutes < 0 {
        return None;
    }
    let row_start = (diff_minutes / slot_width_minutes) as usize;
    if row_start >= slot_count {
        return None;
    }

    let length_minutes = booking.duration_minutes();
    if length_minutes <= 0 {
        return None;
    }
    let row_span = ((length_minutes + slot_width_minutes - 1) / slot_width_minutes) as usize;

    Some(GridPlacement {
        column,
        row_start,
        row_span: row_span.min(slot_count - row_start),
    })
}

/// Every slot in `slots` whose start lies within `[start_time, end_time)`.
pub fn slots_occupied(booking: &Booking, slots: &[TimeSlot]) -> Vec<TimeSlot> {
    slots
        .iter()
        .copied()
        .filter(|s| *s >= booking.start_time && *s < booking.end_time)
        .collect()
}

/// Whether `slot` is the cell that carries the booking's label.
pub fn is_first_slot(booking: &Booking, slot: TimeSlot) -> bool {
    slot == booking.start_time
}

/// Slots for one business day together with the grid's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    opening: NaiveDateTime,
    slot_width_minutes: i64,
    slots: Vec<TimeSlot>,
}

impl SlotGrid {
    pub fn new(opening: NaiveDateTime) -> Self {
        Self::with_shape(opening, SLOT_COUNT, SLOT_WIDTH_MINUTES)
    }

    pub fn with_shape(opening: NaiveDateTime, slot_count: usize, slot_width_minutes: i64) -> Self {
        SlotGrid {
            opening,
            slot_width_minutes,
            slots: generate_slots(opening, slot_count, slot_width_minutes),
        }
    }

    pub fn for_day(day: BusinessDay) -> Self {
        Self::new(day.opening())
    }

    pub fn opening(&self) -> NaiveDateTime {
        self.opening
    }

    /// End of the last slot.
    pub fn closing(&self) -> NaiveDateTime {
        self.opening + Duration::minutes(self.slots.len() as i64 * self.slot_width_minutes)
    }

    pub fn slot_width_minutes(&self) -> i64 {
        self.slot_width_minutes
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<TimeSlot> {
        self.slots.get(index).copied()
    }

    /// Index of the slot starting exactly at `instant`.
    pub fn slot_index(&self, instant: NaiveDateTime) -> Option<usize> {
        self.slots.binary_search(&instant).ok()
    }

    pub fn place(&self, booking: &Booking, rooms: &[Room]) -> Option<GridPlacement> {
        place_in_grid(
            booking,
            self.opening,
            rooms,
            self.slots.len(),
            self.slot_width_minutes,
        )
    }

    pub fn occupied_by(&self, booking: &Booking) -> Vec<TimeSlot> {
        slots_occupied(booking, &self.slots)
    }
}

/// 12-hour label used for time columns and pickers, e.g. "01:30 AM".
pub fn slot_label(slot: TimeSlot) -> String {
    slot.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::default_rooms;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn at(d: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        d.and_hms_opt(h, m, 0).unwrap()
    }

    fn booking(room_id: u32, start: NaiveDateTime, end: NaiveDateTime) -> Booking {
        Booking {
            booking_id: "1".into(),
            room_id,
            room_name: String::new(),
            start_time: start,
            end_time: end,
            title: "Project Sync".into(),
            description: String::new(),
            booked_by: "Alice".into(),
            booked_by_username: "alice".into(),
        }
    }

    #[test]
    fn test_opening_time_is_eight_am() {
        assert_eq!(opening_time(day()), at(day(), 8, 0));
    }

    #[test]
    fn test_generate_slots_shape() {
        let opening = opening_time(day());
        let slots = generate_slots(opening, SLOT_COUNT, SLOT_WIDTH_MINUTES);

        assert_eq!(slots.len(), 36);
        assert_eq!(slots[0], opening);
        for pair in slots.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(30), "slots must be 30 minutes apart");
        }
    }

    #[test]
    fn test_last_slot_is_half_past_one_next_day() {
        let slots = generate_slots(opening_time(day()), SLOT_COUNT, SLOT_WIDTH_MINUTES);
        let next = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(slots[35], at(next, 1, 30));
    }

    #[test]
    fn test_generate_slots_is_repeatable() {
        let opening = opening_time(day());
        assert_eq!(
            generate_slots(opening, SLOT_COUNT, SLOT_WIDTH_MINUTES),
            generate_slots(opening, SLOT_COUNT, SLOT_WIDTH_MINUTES)
        );
    }

    #[test]
    fn test_grid_closes_at_two_am() {
        let grid = SlotGrid::for_day(BusinessDay::new(day()));
        let next = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(grid.closing(), at(next, 2, 0));
        assert_eq!(grid.slot_index(at(day(), 10, 0)), Some(4));
        assert_eq!(grid.slot_index(at(day(), 10, 15)), None);
    }

    #[test]
    fn test_place_two_hour_booking() {
        let rooms = default_rooms();
        let b = booking(2, at(day(), 10, 0), at(day(), 12, 0));

        let placement = place_booking(&b, opening_time(day()), &rooms).unwrap();

        assert_eq!(
            placement,
            GridPlacement {
                column: 2,
                row_start: 4,
                row_span: 4
            }
        );
    }

    #[test]
    fn test_place_rounds_partial_slots_up() {
        let rooms = default_rooms();
        let b = booking(1, at(day(), 9, 0), at(day(), 9, 45));

        let placement = place_booking(&b, opening_time(day()), &rooms).unwrap();
        assert_eq!(placement.row_start, 2);
        assert_eq!(placement.row_span, 2);
    }

    #[test]
    fn test_booking_before_opening_is_not_placed() {
        let rooms = default_rooms();
        let b = booking(1, at(day(), 7, 30), at(day(), 9, 0));
        assert_eq!(place_booking(&b, opening_time(day()), &rooms), None);
    }

    #[test]
    fn test_booking_for_unknown_room_is_not_placed() {
        let rooms = default_rooms();
        let b = booking(99, at(day(), 10, 0), at(day(), 11, 0));
        assert_eq!(place_booking(&b, opening_time(day()), &rooms), None);
    }

    #[test]
    fn test_placement_never_runs_past_closing() {
        let rooms = default_rooms();
        let opening = opening_time(day());
        let next = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        // Every aligned start with every legal length stays inside the grid.
        for (row, start) in generate_slots(opening, SLOT_COUNT, SLOT_WIDTH_MINUTES)
            .into_iter()
            .enumerate()
        {
            let remaining = (SLOT_COUNT - row) as i64;
            for len in 1..=remaining.min(6) {
                let b = booking(3, start, start + Duration::minutes(len * 30));
                let p = place_booking(&b, opening, &rooms).unwrap();
                assert!(p.row_end() <= SLOT_COUNT, "row {row} len {len} overflowed");
            }
        }

        // An over-long booking from upstream is clipped rather than overflowing.
        let late = booking(3, at(next, 1, 0), at(next, 3, 0));
        let p = place_booking(&late, opening, &rooms).unwrap();
        assert_eq!(p.row_start, 34);
        assert_eq!(p.row_span, 2);

        let after_close = booking(3, at(next, 2, 0), at(next, 3, 0));
        assert_eq!(place_booking(&after_close, opening, &rooms), None);
    }

    #[test]
    fn test_slots_occupied_marks_first_slot_only_once() {
        let grid = SlotGrid::for_day(BusinessDay::new(day()));
        let b = booking(1, at(day(), 10, 0), at(day(), 12, 0));

        let occupied = grid.occupied_by(&b);

        let expected: Vec<TimeSlot> = (4..8).filter_map(|i| grid.slot(i)).collect();
        assert_eq!(occupied, expected);
        let firsts: Vec<_> = occupied.iter().filter(|s| is_first_slot(&b, **s)).collect();
        assert_eq!(firsts, vec![&at(day(), 10, 0)]);
    }

    #[test]
    fn test_placement_covers_rows() {
        let p = GridPlacement {
            column: 1,
            row_start: 4,
            row_span: 4,
        };
        assert!(p.covers_row(4));
        assert!(p.covers_row(7));
        assert!(!p.covers_row(8));
    }

    #[test]
    fn test_slot_label_uses_twelve_hour_clock() {
        let next = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(slot_label(at(day(), 8, 0)), "08:00 AM");
        assert_eq!(slot_label(at(day(), 20, 30)), "08:30 PM");
        assert_eq!(slot_label(at(next, 1, 30)), "01:30 AM");
    }
}
