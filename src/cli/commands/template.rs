//! `invtrack template` - print a CSV template

use console::style;
use miette::Result;

use crate::exchange;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {}

pub fn run(_args: TemplateArgs) -> Result<()> {
    // Output to stdout (can be redirected to file)
    print!("{}", exchange::template());

    // Usage hint goes to stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: invtrack template > inventory.csv",
        style("→").blue()
    );
    Ok(())
}
