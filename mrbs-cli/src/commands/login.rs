use anyhow::Result;
use mrbs_core::api::HttpBookingApi;
use mrbs_core::config::MrbsConfig;
use mrbs_core::session::Session;
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

pub async fn login(config: &MrbsConfig, username: &str) -> Result<()> {
    let password = rpassword::prompt_password("  Password: ")?;
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Logging in as {username}"));
    let result = api.login(username, &password).await;
    spinner.finish_and_clear();

    let session = result?;
    session.save(&config.session_path())?;

    println!("{}", format!("Logged in as {}", session.display_name).green());

    Ok(())
}

pub async fn logout(config: &MrbsConfig) -> Result<()> {
    let session_path = config.session_path();
    let api = HttpBookingApi::from_config(config)?;

    // The local session goes regardless; the server expires stale keys itself.
    if api.session().is_some() {
        if let Err(e) = api.logout().await {
            tracing::warn!("server logout failed: {}", e);
        }
    }

    if Session::clear(&session_path)? {
        println!("{}", "Logged out.".green());
    } else {
        println!("Already logged out.");
    }

    Ok(())
}
