use anyhow::Result;
use mrbs_core::BusinessDay;
use mrbs_core::api::{BookingApi, HttpBookingApi};
use mrbs_core::config::MrbsConfig;
use mrbs_core::schedule::DailySchedule;
use owo_colors::OwoColorize;

use crate::render::{Render, render_schedule};
use crate::utils::tui::create_spinner;

pub async fn run(config: &MrbsConfig, date: Option<&str>) -> Result<()> {
    let day = BusinessDay::from_arg(date, config.tz()?)?;
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Fetching bookings for {day}"));
    let bookings = api.bookings_or_empty(day).await;
    spinner.finish_and_clear();

    let schedule = DailySchedule::build(day, config.rooms(), bookings);
    let current_user = api.session().map(|s| s.username.as_str());

    println!("{}\n", day.to_string().bold());
    println!("{}", render_schedule(&schedule, current_user));

    let mut placed: Vec<_> = schedule.placements().map(|(b, _)| b).collect();
    if !placed.is_empty() {
        placed.sort_by_key(|b| (b.start_time, b.room_id));
        println!("\n{}", "Bookings".bold());
        for booking in placed {
            println!("  {}", booking.render());
        }
    }

    let skipped = schedule.skipped();
    if !skipped.is_empty() {
        println!(
            "\n{}",
            format!("{} booking(s) fall outside the grid and are not shown", skipped.len()).yellow()
        );
    }

    Ok(())
}
