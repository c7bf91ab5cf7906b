use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use mrbs_core::api::HttpBookingApi;
use mrbs_core::config::MrbsConfig;
use mrbs_core::user::parse_user_entries;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn list(config: &MrbsConfig) -> Result<()> {
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner("Fetching users".to_string());
    let result = api.list_users().await;
    spinner.finish_and_clear();

    let mut users = result?;
    users.sort_by(|a, b| a.name.cmp(&b.name));

    println!("{}", format!("{} users", users.len()).bold());
    for user in &users {
        println!("  {}", user.render());
    }

    Ok(())
}

/// Add users from `file`, or from stdin when no file is given.
pub async fn add(config: &MrbsConfig, file: Option<&Path>) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read users from stdin")?;
            input
        }
    };
    let users = parse_user_entries(&input)?;
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Adding {} users", users.len()));
    let result = api.insert_users(&users).await;
    spinner.finish_and_clear();

    println!("{}", result?.message.green());
    for user in &users {
        println!("  {} {}", user.username().bold(), user.display_name.dimmed());
    }

    Ok(())
}

pub async fn delete(config: &MrbsConfig, username: &str) -> Result<()> {
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Deleting {username}"));
    let result = api.delete_user(username).await;
    spinner.finish_and_clear();

    println!("{}", result?.message.green());

    Ok(())
}

pub async fn promote(config: &MrbsConfig, username: &str) -> Result<()> {
    let api = HttpBookingApi::from_config(config)?;

    let spinner = create_spinner(format!("Promoting {username} to admin"));
    let result = api.promote_user(username).await;
    spinner.finish_and_clear();

    println!("{}", result?.message.green());

    Ok(())
}
