use anyhow::{Context, Result};
use mrbs_core::api::{BookingApi, HttpBookingApi};
use mrbs_core::config::MrbsConfig;
use mrbs_core::duration::{PendingBooking, format_duration};
use mrbs_core::grid::slot_label;
use mrbs_core::request::BookingRequest;
use mrbs_core::room::find_room;
use mrbs_core::{BusinessDay, MrbsError, SlotGrid};
use owo_colors::OwoColorize;

use crate::utils::time::parse_start;
use crate::utils::tui::create_spinner;

/// Booking details as entered on the command line.
pub struct BookingForm {
    pub room: u32,
    pub start: String,
    pub duration: u32,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl BookingForm {
    /// Run the form through the grid and duration rules into a request body.
    fn into_request(self, config: &MrbsConfig) -> Result<BookingRequest> {
        let day = BusinessDay::from_arg(self.date.as_deref(), config.tz()?)?;
        let grid = SlotGrid::for_day(day);
        let start = parse_start(&self.start, day)?;

        let mut pending = PendingBooking::new(&grid, start)?;
        if let Err(e) = pending.set_duration(self.duration) {
            let options: Vec<String> = pending
                .available()?
                .iter()
                .map(|d| format!("{d} ({})", format_duration(*d)))
                .collect();
            return Err(e).context(format!(
                "Durations available from {}: {}",
                slot_label(start),
                options.join(", ")
            ));
        }

        let rooms = config.rooms();
        let room = find_room(&rooms, self.room).ok_or(MrbsError::UnknownRoom(self.room))?;

        Ok(BookingRequest::new(
            room,
            &pending,
            &self.title,
            self.description.as_deref(),
        )?)
    }
}

pub async fn create(config: &MrbsConfig, form: BookingForm) -> Result<()> {
    let request = form.into_request(config)?;
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner("Saving booking".to_string());
    let result = api.create_booking(&request).await;
    spinner.finish_and_clear();

    let response = result?;
    println!("{}", response.message.green());
    if let Some(id) = response.booking_id {
        println!("{}", format!("Booking #{id}").dimmed());
    }

    Ok(())
}

pub async fn edit(config: &MrbsConfig, booking_id: &str, form: BookingForm) -> Result<()> {
    let request = form.into_request(config)?;
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Updating booking #{booking_id}"));
    let result = api.edit_booking(booking_id, &request).await;
    spinner.finish_and_clear();

    println!("{}", result?.message.green());

    Ok(())
}
