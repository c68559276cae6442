//! `invtrack shell` - the interactive inventory menu
//!
//! The shell owns a [`Session`]: the in-memory inventory plus the CSV file
//! it saves to and loads from. Every menu action reports its own failures
//! and returns to the menu; nothing but closing the input ends the loop
//! early.

use console::style;
use miette::Result;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::cli::helpers::product_card;
use crate::cli::prompt::{prompt_valid, LinePrompter, PromptError, PromptResult, Prompter, TerminalPrompter};
use crate::cli::table::{render_products, render_statistics};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::inventory::{DeleteOutcome, ProductUpdate};
use crate::core::product::{parse_decimal, parse_integer, parse_price, parse_quantity, validate_name};
use crate::core::{Inventory, Statistics};
use crate::exchange::{self, ExportOptions, ExportOutcome};

#[derive(clap::Args, Debug)]
pub struct ShellArgs {
    /// Load the inventory file before showing the menu
    #[arg(long)]
    pub load: bool,
}

const MENU: [&str; 9] = [
    "Add Product",
    "Search Product",
    "Update Product",
    "Delete Product",
    "Show Inventory",
    "Statistics",
    "Save inventory to CSV",
    "Load inventory from CSV",
    "Exit",
];

/// One menu entry, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Search,
    Update,
    Delete,
    Show,
    Statistics,
    Save,
    Load,
    Exit,
}

impl MenuAction {
    fn from_index(idx: usize) -> Self {
        match idx {
            0 => MenuAction::Add,
            1 => MenuAction::Search,
            2 => MenuAction::Update,
            3 => MenuAction::Delete,
            4 => MenuAction::Show,
            5 => MenuAction::Statistics,
            6 => MenuAction::Save,
            7 => MenuAction::Load,
            _ => MenuAction::Exit,
        }
    }
}

/// Process-lifetime state of an interactive session
#[derive(Debug)]
pub struct Session {
    pub inventory: Inventory,
    pub csv_path: PathBuf,
    pub format: OutputFormat,
}

impl Session {
    pub fn new(csv_path: PathBuf, format: OutputFormat) -> Self {
        Self {
            inventory: Inventory::new(),
            csv_path,
            format,
        }
    }

    /// Run the menu loop until Exit is chosen or input closes
    pub fn run<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> PromptResult<()> {
        println!("Welcome to the Product Inventory Management System!");

        loop {
            println!();
            println!("{}", style("---- Options Menu ----").bold());
            let action = MenuAction::from_index(prompter.choose("Select an option", &MENU)?);
            if action == MenuAction::Exit {
                println!("Exiting the menu. See you later!");
                return Ok(());
            }
            self.dispatch(action, prompter)?;
        }
    }

    /// Perform one menu action; only prompt failures propagate
    pub fn dispatch<P: Prompter + ?Sized>(
        &mut self,
        action: MenuAction,
        prompter: &mut P,
    ) -> PromptResult<()> {
        match action {
            MenuAction::Add => self.add(prompter),
            MenuAction::Search => self.search(prompter),
            MenuAction::Update => self.update(prompter),
            MenuAction::Delete => self.delete(prompter),
            MenuAction::Show => {
                self.show();
                Ok(())
            }
            MenuAction::Statistics => {
                self.statistics();
                Ok(())
            }
            MenuAction::Save => {
                self.save();
                Ok(())
            }
            MenuAction::Load => self.load(prompter),
            MenuAction::Exit => Ok(()),
        }
    }

    fn add<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> PromptResult<()> {
        let name = prompt_valid(prompter, "Please enter the product name", validate_name)?;
        let price = prompt_valid(prompter, "Enter the product price", parse_price)?;
        let quantity = prompt_valid(prompter, "Enter the product quantity", parse_quantity)?;

        match self.inventory.add(&name, quantity, price) {
            Ok(product) => println!(
                "{} {} units of the product {} added to the inventory.",
                style("✓").green(),
                product.quantity,
                style(&product.name).cyan()
            ),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn search<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> PromptResult<()> {
        if let Err(e) = self.inventory.ensure_not_empty("search products") {
            report(&e);
            return Ok(());
        }

        let name = prompter.input("Enter the product name to search")?;
        match self.inventory.search(&name) {
            Ok(product) => {
                println!("Product found:");
                println!("{}", product_card(product, None));
            }
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn update<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> PromptResult<()> {
        if let Err(e) = self.inventory.ensure_not_empty("update a product") {
            report(&e);
            return Ok(());
        }

        let name = prompter.input("Enter the product name to update")?;
        match self.inventory.search(&name) {
            Ok(product) => {
                println!("Product found:");
                println!("{}", product_card(product, None));
            }
            Err(e) => {
                report(&e);
                return Ok(());
            }
        }

        println!("Leave any field empty to keep the current value.");

        let raw_price = prompter.input("Enter new price (or press Enter to keep current)")?;
        let price = optional_field(&raw_price, parse_decimal, "price");

        let raw_quantity = prompter.input("Enter new quantity (or press Enter to keep current)")?;
        let quantity = optional_field(&raw_quantity, parse_integer, "quantity");

        match self.inventory.update(&name, ProductUpdate { price, quantity }) {
            Ok(outcome) => {
                for rejected in &outcome.rejected {
                    println!(
                        "{} {}. Keeping previous value.",
                        style("!").yellow(),
                        rejected
                    );
                }
                println!("{} Product updated successfully:", style("✓").green());
                println!("{}", product_card(&outcome.product, None));
            }
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn delete<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> PromptResult<()> {
        if let Err(e) = self.inventory.ensure_not_empty("delete a product") {
            report(&e);
            return Ok(());
        }

        let name = prompter.input("Enter the name of the product to delete")?;

        let mut answer: PromptResult<bool> = Ok(false);
        let outcome = self.inventory.delete(&name, |product| {
            println!("Product found:");
            println!("{}", product_card(product, None));
            answer = prompter.confirm("Are you sure you want to delete this product?");
            matches!(answer, Ok(true))
        });
        answer?;

        match outcome {
            Ok(DeleteOutcome::Removed(product)) => println!(
                "{} Product '{}' has been removed successfully.",
                style("✓").green(),
                product.name
            ),
            Ok(DeleteOutcome::Cancelled(_)) => println!("Deletion cancelled."),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn show(&self) {
        println!("{}", style("--- Product Inventory ---").bold());
        if let Err(e) = self.inventory.ensure_not_empty("view the inventory") {
            report(&e);
            return;
        }
        match self.format {
            OutputFormat::Auto => {
                for (i, product) in self.inventory.products().iter().enumerate() {
                    println!("{}", product_card(product, Some(i + 1)));
                }
            }
            format => match render_products(self.inventory.products(), format) {
                Ok(out) => print!("{}", out),
                Err(e) => eprintln!("{} {}", style("✗").red(), e),
            },
        }
    }

    fn statistics(&mut self) {
        println!("{}", style("--- Inventory Statistics ---").bold());
        let stats = match self.inventory.statistics() {
            Ok(stats) => stats,
            Err(e) => {
                report(&e);
                Statistics::default()
            }
        };
        match render_statistics(&stats, self.format) {
            Ok(out) => print!("{}", out),
            Err(e) => eprintln!("{} {}", style("✗").red(), e),
        }
    }

    fn save(&self) {
        match exchange::export(&self.inventory, &self.csv_path, ExportOptions::default()) {
            Ok(ExportOutcome::Written { rows }) => println!(
                "{} Inventory saved to: {} ({} product(s))",
                style("✓").green(),
                style(self.csv_path.display()).yellow(),
                rows
            ),
            Ok(ExportOutcome::NothingToSave) => {
                println!("Inventory is empty. No data to save.")
            }
            Err(e) => report(&e),
        }
    }

    fn load<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> PromptResult<()> {
        let staged = match exchange::stage(&self.csv_path) {
            Ok(staged) => staged,
            Err(e) => {
                report(&e);
                return Ok(());
            }
        };

        println!(
            "Found {} valid product(s) in {} ({} invalid row(s)).",
            staged.loaded(),
            style(staged.path().display()).yellow(),
            staged.invalid_rows()
        );
        let mode = prompter.import_mode()?;
        let report = staged.apply(&mut self.inventory, mode);

        println!(
            "{} Inventory loaded from: {}",
            style("✓").green(),
            style(report.path.display()).yellow()
        );
        println!("Products loaded: {}", report.loaded);
        println!("Invalid rows skipped: {}", report.invalid_rows);
        println!("Action performed: {}", report.mode);
        Ok(())
    }
}

/// Parse an optional update field; blank keeps the current value and a
/// parse failure is reported and also keeps it
fn optional_field<T, F>(raw: &str, parse: F, field: &str) -> Option<T>
where
    F: Fn(&str) -> std::result::Result<T, crate::core::ValidationError>,
{
    if raw.trim().is_empty() {
        return None;
    }
    match parse(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            println!(
                "{} Invalid {}: {}. Keeping previous value.",
                style("!").yellow(),
                field,
                e
            );
            None
        }
    }
}

fn report(err: &dyn std::error::Error) {
    println!("{} {}", style("✗").red(), err);
}

pub fn run(args: ShellArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = Session::new(global.csv_path(), global.output_format());

    if args.load {
        match super::load_inventory(&session.csv_path, global.quiet) {
            Ok(inventory) => session.inventory = inventory,
            Err(e) => report(&e),
        }
    }

    let attended = std::io::stdin().is_terminal() && console::user_attended();
    let result = if attended {
        session.run(&mut TerminalPrompter::new())
    } else {
        session.run(&mut LinePrompter::stdio())
    };

    match result {
        Ok(()) => Ok(()),
        Err(PromptError::Closed) => {
            log::debug!("input closed, leaving shell");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
