//! `invtrack list` - list the products stored in a CSV file

use console::style;
use miette::Result;

use crate::cli::table::render_products;
use crate::cli::{GlobalOpts, OutputFormat};

use super::load_inventory;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive substring filter on product names
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let path = global.csv_path();
    let inventory = load_inventory(&path, global.quiet)?;

    let needle = args.search.as_deref().map(str::to_lowercase);
    let products: Vec<_> = inventory
        .products()
        .iter()
        .filter(|p| {
            needle
                .as_ref()
                .map_or(true, |n| p.name.to_lowercase().contains(n.as_str()))
        })
        .cloned()
        .collect();

    if args.count {
        println!("{}", products.len());
        return Ok(());
    }

    if products.is_empty() {
        if !global.quiet {
            println!("No products found.");
        }
        return Ok(());
    }

    print!("{}", render_products(&products, global.output_format())?);

    if !global.quiet && global.output_format() == OutputFormat::Auto {
        println!(
            "{} product(s) found in {}",
            style(products.len()).cyan(),
            style(path.display()).yellow()
        );
    }
    Ok(())
}
