//! `invtrack stats` - statistics for the products stored in a CSV file

use miette::Result;

use crate::cli::table::render_statistics;
use crate::cli::GlobalOpts;

use super::load_inventory;

#[derive(clap::Args, Debug)]
pub struct StatsArgs {}

pub fn run(_args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let mut inventory = load_inventory(&global.csv_path(), global.quiet)?;
    let stats = inventory.statistics()?;
    print!("{}", render_statistics(&stats, global.output_format())?);
    Ok(())
}
