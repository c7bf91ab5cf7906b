//! Core types for the meeting room booking client.
//!
//! - `grid`: the 30-minute slot grid for a business day and booking placement
//! - `duration`: which booking lengths fit before closing
//! - `schedule`: one render pass of placements and cell occupancy
//! - `api`: REST client for the booking backend
//! - `user`: accounts as seen by admins

pub mod api;
pub mod booking;
pub mod business_day;
pub mod config;
pub mod constants;
pub mod duration;
pub mod error;
pub mod grid;
pub mod request;
pub mod room;
pub mod schedule;
pub mod session;
pub mod user;

pub use booking::Booking;
pub use business_day::BusinessDay;
pub use error::{MrbsError, MrbsResult};
pub use grid::{GridPlacement, SlotGrid, TimeSlot};
pub use user::{NewUser, User};
