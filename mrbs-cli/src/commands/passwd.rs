use anyhow::Result;
use mrbs_core::api::HttpBookingApi;
use mrbs_core::config::MrbsConfig;
use mrbs_core::MrbsError;
use mrbs_core::request::ChangePasswordRequest;
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

pub async fn run(config: &MrbsConfig) -> Result<()> {
    let api = HttpBookingApi::from_config(config)?;
    let Some(session) = api.session() else {
        return Err(MrbsError::NotLoggedIn.into());
    };
    println!("Changing password for {}", session.username.bold());

    let current = rpassword::prompt_password("  Current password: ")?;
    let new = rpassword::prompt_password("  New password: ")?;
    let confirm = rpassword::prompt_password("  Confirm new password: ")?;
    let request = ChangePasswordRequest::new(&current, &new, &confirm)?;

    let spinner = create_spinner("Changing password".to_string());
    let result = api.change_password(&request).await;
    spinner.finish_and_clear();

    println!("{}", result?.message.green());

    Ok(())
}
