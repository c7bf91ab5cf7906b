//! TUI rendering for mrbs types.
//!
//! Extension traits that add colored terminal output to mrbs-core types
//! using owo_colors.

use mrbs_core::{Booking, User};
use mrbs_core::grid::slot_label;
use mrbs_core::room::Room;
use mrbs_core::schedule::{Cell, DailySchedule};
use owo_colors::OwoColorize;

use crate::utils::tui::fit;

const TIME_COLUMN_WIDTH: usize = 9;
const ROOM_COLUMN_WIDTH: usize = 14;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Room {
    fn render(&self) -> String {
        format!(
            "{:>3}  {} {}",
            self.room_id.dimmed(),
            self.display_name.bold(),
            format!("({} pax)", self.capacity).dimmed()
        )
    }
}

impl Render for Booking {
    fn render(&self) -> String {
        let time = format!(
            "{} - {}",
            slot_label(self.start_time),
            slot_label(self.end_time)
        );
        format!(
            "{} {} {} {} {}",
            format!("#{}", self.booking_id).dimmed(),
            self.title.bold(),
            self.room_name.cyan(),
            time,
            format!("by {}", self.booked_by).dimmed()
        )
    }
}

impl Render for User {
    fn render(&self) -> String {
        let last_login = match self.logged_in_at() {
            Some(t) => format!("last login {}", t.format("%Y-%m-%d %H:%M")),
            None => "never logged in".to_string(),
        };
        let role = if self.is_admin() {
            format!(" {}", "admin".yellow())
        } else {
            String::new()
        };
        format!(
            "{} {} {}{} {}",
            self.name.bold(),
            self.display_name,
            format!("<{}>", self.email).dimmed(),
            role,
            last_login.dimmed()
        )
    }
}

/// Daily grid: one row per slot, one column per room. Only the first cell
/// of a booking shows its title; the rest are shaded.
pub fn render_schedule(schedule: &DailySchedule, current_user: Option<&str>) -> String {
    let mut lines = Vec::new();

    let mut header = format!("{}", fit("Time", TIME_COLUMN_WIDTH).bold());
    for room in schedule.rooms() {
        header.push(' ');
        header.push_str(&fit(&room.display_name, ROOM_COLUMN_WIDTH).bold().to_string());
    }
    lines.push(header);

    for (row, slot) in schedule.grid().slots().iter().enumerate() {
        let mut line = format!("{}", fit(&slot_label(*slot), TIME_COLUMN_WIDTH).dimmed());

        for room in schedule.rooms() {
            line.push(' ');
            let cell = schedule.cell(room.room_id, row);
            line.push_str(&render_cell(cell, current_user));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn render_cell(cell: Cell<'_>, current_user: Option<&str>) -> String {
    let mine = |b: &Booking| current_user.is_some_and(|u| b.is_owned_by(u));

    match cell {
        Cell::Free => fit("·", ROOM_COLUMN_WIDTH).dimmed().to_string(),
        Cell::Start(b) if mine(b) => fit(&b.title, ROOM_COLUMN_WIDTH).on_green().black().to_string(),
        Cell::Start(b) => fit(&b.title, ROOM_COLUMN_WIDTH).on_cyan().black().to_string(),
        Cell::Continued(b) if mine(b) => " ".repeat(ROOM_COLUMN_WIDTH).on_green().to_string(),
        Cell::Continued(_) => " ".repeat(ROOM_COLUMN_WIDTH).on_cyan().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mrbs_core::BusinessDay;
    use mrbs_core::room::default_rooms;

    fn booking() -> Booking {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Booking {
            booking_id: "17".into(),
            room_id: 4,
            room_name: "Da Vinci".into(),
            start_time: day.and_hms_opt(10, 0, 0).unwrap(),
            end_time: day.and_hms_opt(12, 0, 0).unwrap(),
            title: "Project Sync".into(),
            description: String::new(),
            booked_by: "Alice Tan".into(),
            booked_by_username: "alice".into(),
        }
    }

    #[test]
    fn test_schedule_has_header_and_one_row_per_slot() {
        let day: BusinessDay = "2024-01-01".parse().unwrap();
        let schedule = DailySchedule::build(day, default_rooms(), vec![booking()]);

        let output = render_schedule(&schedule, None);

        assert_eq!(output.lines().count(), 37);
        assert_eq!(
            output.matches("Project Sync").count(),
            1,
            "title should only appear in the first cell"
        );
        assert!(output.contains("01:30 AM"));
    }

    #[test]
    fn test_user_line_marks_admins() {
        let user = User {
            user_id: "1".into(),
            level: 2,
            name: "alice".into(),
            display_name: "Alice Tan".into(),
            email: "alice@example.com".into(),
            time_created: None,
            last_login: None,
        };

        let line = user.render();
        assert!(line.contains("admin"));
        assert!(line.contains("never logged in"));
    }

    #[test]
    fn test_booking_line_shows_times() {
        let line = booking().render();
        assert!(line.contains("10:00 AM - 12:00 PM"));
        assert!(line.contains("Alice Tan"));
    }
}
