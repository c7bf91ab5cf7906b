pub mod book;
pub mod config;
pub mod delete;
pub mod durations;
pub mod grid;
pub mod login;
pub mod passwd;
pub mod rooms;
pub mod slots;
pub mod users;
