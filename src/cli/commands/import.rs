//! `invtrack import` command - reconcile another CSV into the inventory file

use clap::ValueEnum;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::Inventory;
use crate::exchange::{self, ExportOptions, ImportMode};

use super::load_inventory;

/// Reconciliation choice on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliImportMode {
    /// Replace the inventory with the imported products
    Overwrite,
    /// Add quantities to matching products and append the rest
    Merge,
}

impl From<CliImportMode> for ImportMode {
    fn from(mode: CliImportMode) -> Self {
        match mode {
            CliImportMode::Overwrite => ImportMode::Overwrite,
            CliImportMode::Merge => ImportMode::Merge,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import (header: name,price,quantity)
    pub source: PathBuf,

    /// How to reconcile with the current inventory
    #[arg(long, short = 'm', value_enum)]
    pub mode: CliImportMode,

    /// Show the result without writing the inventory file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let target = global.csv_path();
    let mode = ImportMode::from(args.mode);

    let mut inventory = if target.exists() {
        load_inventory(&target, global.quiet)?
    } else {
        log::info!("{} does not exist yet, starting empty", target.display());
        Inventory::new()
    };

    if !global.quiet {
        println!(
            "{} Importing {} into {} ({}){}",
            style("→").blue(),
            style(args.source.display()).yellow(),
            style(target.display()).yellow(),
            style(mode).cyan(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
    }

    let report = exchange::import(&mut inventory, &args.source, |_| mode)?;

    if !args.dry_run {
        exchange::export(&inventory, &target, ExportOptions::default())?;
    }

    if global.quiet {
        return Ok(());
    }

    // Print summary
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Products loaded:      {}", style(report.loaded).cyan());
    println!("  Invalid rows skipped: {}", style(report.invalid_rows).red());
    println!("  Action performed:     {}", style(report.mode).green());
    if report.mode == ImportMode::Merge {
        println!("  Merged into existing: {}", style(report.merged).yellow());
    }
    println!("  Products added:       {}", style(report.added).green());
    println!("  Inventory size:       {}", style(inventory.len()).cyan());

    if args.dry_run {
        println!();
        println!(
            "{}",
            style("Dry run complete. The inventory file was not changed.").yellow()
        );
    }

    Ok(())
}
