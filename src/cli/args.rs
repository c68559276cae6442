//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, import::ImportArgs, list::ListArgs, shell::ShellArgs,
    stats::StatsArgs, template::TemplateArgs,
};
use crate::core::Config;

#[derive(Parser)]
#[command(name = "invtrack")]
#[command(author, version, about = "Interactive product inventory tracker")]
#[command(long_about = "Track products, prices and stock levels in memory and keep them in a plain name,price,quantity CSV file.")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run (default: interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format (default: from config, else auto)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Inventory CSV file (default: from config, else inventory.csv)
    #[arg(long, short = 'F', global = true, value_name = "CSV")]
    pub file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Fill unset options from the loaded configuration
    pub fn resolve(mut self, config: &Config) -> Self {
        if self.format.is_none() {
            self.format = config
                .default_format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }
        if self.file.is_none() {
            self.file = Some(config.csv_path());
        }
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn csv_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::core::config::DEFAULT_CSV_PATH))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu (add, search, update, delete, show, statistics, save, load)
    Shell(ShellArgs),

    /// List the products stored in the CSV file
    List(ListArgs),

    /// Show statistics for the products stored in the CSV file
    Stats(StatsArgs),

    /// Import another CSV into the inventory file (overwrite or merge)
    Import(ImportArgs),

    /// Print a CSV template with the expected header
    Template(TemplateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick a human-readable table
    #[default]
    Auto,
    /// Bordered table
    Table,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Markdown tables
    Md,
    /// Just product names, one per line
    Name,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["invtrack"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resolve_prefers_flags_over_config() {
        let config = Config {
            csv_path: Some(PathBuf::from("config.csv")),
            default_format: Some("json".to_string()),
        };
        let opts = GlobalOpts {
            format: Some(OutputFormat::Md),
            file: Some(PathBuf::from("flag.csv")),
            ..Default::default()
        }
        .resolve(&config);
        assert_eq!(opts.output_format(), OutputFormat::Md);
        assert_eq!(opts.csv_path(), PathBuf::from("flag.csv"));
    }

    #[test]
    fn test_resolve_falls_back_to_config() {
        let config = Config {
            csv_path: Some(PathBuf::from("config.csv")),
            default_format: Some("JSON".to_string()),
        };
        let opts = GlobalOpts::default().resolve(&config);
        assert_eq!(opts.output_format(), OutputFormat::Json);
        assert_eq!(opts.csv_path(), PathBuf::from("config.csv"));
    }
}
