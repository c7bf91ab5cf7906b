use anyhow::Result;
use mrbs_core::api::{BookingApi, HttpBookingApi};
use mrbs_core::config::MrbsConfig;
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

pub async fn run(config: &MrbsConfig, booking_id: &str) -> Result<()> {
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Deleting booking #{booking_id}"));
    let result = api.delete_booking(booking_id).await;
    spinner.finish_and_clear();

    println!("{}", result?.message.green());

    Ok(())
}
