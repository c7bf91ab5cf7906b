use anyhow::Result;
use mrbs_core::config::MrbsConfig;

use crate::render::Render;

pub fn run(config: &MrbsConfig) -> Result<()> {
    for room in config.rooms() {
        println!("{}", room.render());
    }
    Ok(())
}
