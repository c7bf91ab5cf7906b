use anyhow::Result;
use mrbs_core::config::MrbsConfig;
use mrbs_core::grid::slot_label;
use mrbs_core::{BusinessDay, SlotGrid};
use owo_colors::OwoColorize;

pub fn run(config: &MrbsConfig, date: Option<&str>) -> Result<()> {
    let day = BusinessDay::from_arg(date, config.tz()?)?;
    let grid = SlotGrid::for_day(day);

    println!("{}", day.to_string().bold());
    for (i, slot) in grid.slots().iter().enumerate() {
        let next_day = if slot.date() != day.date() { " (+1 day)" } else { "" };
        println!("  {:>2}  {}{}", i.dimmed(), slot_label(*slot), next_day.dimmed());
    }
    println!(
        "  Closes at {} (+1 day)",
        slot_label(grid.closing()).bold()
    );

    Ok(())
}
