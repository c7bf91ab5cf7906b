use anyhow::Result;
use mrbs_core::config::MrbsConfig;
use owo_colors::OwoColorize;

pub fn run(config: &MrbsConfig) -> Result<()> {
    let config_path = MrbsConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Session:  {}", config.session_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {line}");
    }

    Ok(())
}
