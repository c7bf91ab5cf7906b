use anyhow::Result;
use mrbs_core::api::{BookingApi, HttpBookingApi};
use mrbs_core::config::MrbsConfig;
use mrbs_core::constants::DURATION_OPTIONS;
use mrbs_core::duration::{available_durations, clamp_duration, end_time, format_duration};
use mrbs_core::grid::slot_label;
use mrbs_core::room::find_room;
use mrbs_core::schedule::DailySchedule;
use mrbs_core::{BusinessDay, MrbsError, SlotGrid};
use owo_colors::OwoColorize;

use crate::utils::time::parse_start;
use crate::utils::tui::create_spinner;

pub async fn run(
    config: &MrbsConfig,
    start: &str,
    date: Option<&str>,
    previous: Option<u32>,
    room: Option<u32>,
) -> Result<()> {
    let day = BusinessDay::from_arg(date, config.tz()?)?;
    let grid = SlotGrid::for_day(day);
    let start = parse_start(start, day)?;

    let durations = available_durations(
        start,
        grid.opening(),
        grid.len(),
        grid.slot_width_minutes(),
        &DURATION_OPTIONS,
    )?;

    // With a room, mark the durations that clash with existing bookings.
    let schedule = match room {
        Some(room_id) => {
            let rooms = config.rooms();
            find_room(&rooms, room_id).ok_or(MrbsError::UnknownRoom(room_id))?;

            let api = HttpBookingApi::from_config(config)?;
            let spinner = create_spinner(format!("Fetching bookings for {day}"));
            let bookings = api.bookings_or_empty(day).await;
            spinner.finish_and_clear();

            Some((room_id, DailySchedule::build(day, rooms, bookings)))
        }
        None => None,
    };
    let row = grid.slot_index(start);

    println!("{}", format!("Starting {}", slot_label(start)).bold());
    for d in &durations {
        let taken = match (&schedule, row) {
            (Some((room_id, schedule)), Some(row)) => !schedule.is_free(*room_id, row, *d),
            _ => false,
        };
        let line = format!(
            "  {:>2}  until {} {}",
            d,
            slot_label(end_time(start, *d, grid.slot_width_minutes())),
            format!("({})", format_duration(*d)).dimmed()
        );
        if taken {
            println!("{} {}", line, "booked".red());
        } else {
            println!("{line}");
        }
    }

    if let Some(previous) = previous {
        let clamped = clamp_duration(previous, &durations)?;
        if clamped == previous {
            println!("\n{} still fits", format_duration(previous).green());
        } else {
            println!(
                "\n{} no longer fits, using {}",
                format_duration(previous).yellow(),
                format_duration(clamped).green()
            );
        }
    }

    Ok(())
}
