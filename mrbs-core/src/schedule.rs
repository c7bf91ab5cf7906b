//! One render pass over a day's bookings.

use std::collections::HashMap;

use crate::booking::Booking;
use crate::business_day::BusinessDay;
use crate::grid::{GridPlacement, SlotGrid};
use crate::room::Room;

/// What a single (room, slot) cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Free,
    /// First slot of a booking; the only cell that carries its title.
    Start(&'a Booking),
    Continued(&'a Booking),
}

impl Cell<'_> {
    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }
}

/// Slots, placements and cell occupancy for one business day.
///
/// Built fresh from the fetched bookings every time; nothing is carried
/// over between days.
#[derive(Debug, Clone)]
pub struct DailySchedule {
    day: BusinessDay,
    grid: SlotGrid,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    placements: Vec<(usize, GridPlacement)>,
    /// (room, row) to an index into `placements`
    occupancy: HashMap<(u32, usize), usize>,
}

impl DailySchedule {
    pub fn build(day: BusinessDay, rooms: Vec<Room>, bookings: Vec<Booking>) -> Self {
        let grid = SlotGrid::for_day(day);
        let mut placements = Vec::new();
        let mut occupancy = HashMap::new();

        for (i, booking) in bookings.iter().enumerate() {
            let Some(placement) = grid.place(booking, &rooms) else {
                tracing::warn!(
                    booking_id = %booking.booking_id,
                    room_id = booking.room_id,
                    "booking {} is outside the {} grid, skipping",
                    booking,
                    day
                );
                continue;
            };
            // Later bookings win a contested cell.
            for row in placement.row_start..placement.row_end() {
                occupancy.insert((booking.room_id, row), placements.len());
            }
            placements.push((i, placement));
        }

        DailySchedule {
            day,
            grid,
            rooms,
            bookings,
            placements,
            occupancy,
        }
    }

    pub fn day(&self) -> BusinessDay {
        self.day
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn placements(&self) -> impl Iterator<Item = (&Booking, GridPlacement)> {
        self.placements
            .iter()
            .map(|(i, p)| (&self.bookings[*i], *p))
    }

    /// Bookings that could not be placed on the grid.
    pub fn skipped(&self) -> Vec<&Booking> {
        self.bookings
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.placements.iter().any(|(p, _)| p == i))
            .map(|(_, b)| b)
            .collect()
    }

    /// The cell for `room_id` at `row`. A booking's title cell is the first
    /// row of its placement, even when its start is off the slot grid.
    pub fn cell(&self, room_id: u32, row: usize) -> Cell<'_> {
        let Some((i, placement)) = self
            .occupancy
            .get(&(room_id, row))
            .map(|p| self.placements[*p])
        else {
            return Cell::Free;
        };

        let booking = &self.bookings[i];
        if placement.row_start == row {
            Cell::Start(booking)
        } else {
            Cell::Continued(booking)
        }
    }

    /// Whether a room is free for `duration` slots from `row`. A range
    /// that runs past closing is never free.
    pub fn is_free(&self, room_id: u32, row: usize, duration: u32) -> bool {
        let end = row + duration as usize;
        end <= self.grid.len() && (row..end).all(|r| self.cell(room_id, r).is_free())
    }
}
