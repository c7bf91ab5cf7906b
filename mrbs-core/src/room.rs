//! Bookable rooms.
//!
//! The room list is reference data: loaded once from config (or the
//! built-in table) and passed explicitly to everything that needs a
//! column order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: u32,
    #[serde(default)]
    pub area_id: u32,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
}

impl Room {
    fn seminar(room_id: u32, display_name: &str, capacity: u32) -> Self {
        Room {
            room_id,
            area_id: 2,
            display_name: display_name.to_string(),
            description: String::new(),
            capacity,
            admin_email: None,
        }
    }
}

/// The rooms of the default deployment, in column order.
pub fn default_rooms() -> Vec<Room> {
    vec![
        Room::seminar(1, "Seminar Room 1", 50),
        Room::seminar(2, "Seminar Room 2", 50),
        Room::seminar(3, "Alan Turing", 4),
        Room::seminar(4, "Da Vinci", 10),
        Room::seminar(5, "Isaac Newton", 10),
        Room::seminar(6, "Marie Curie", 4),
        Room::seminar(7, "Michael Faraday", 4),
        Room::seminar(8, "Nikola Tesla", 4),
        Room::seminar(9, "Thomas Edison", 6),
    ]
}

/// Position of `room_id` in `rooms`.
pub fn room_index(rooms: &[Room], room_id: u32) -> Option<usize> {
    rooms.iter().position(|r| r.room_id == room_id)
}

pub fn find_room(rooms: &[Room], room_id: u32) -> Option<&Room> {
    rooms.iter().find(|r| r.room_id == room_id)
}
