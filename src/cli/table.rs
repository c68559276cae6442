//! Table formatting for product listings and statistics
//!
//! Every output format is rendered to a `String` first so callers decide
//! where it goes. Human formats (auto, table, md) use tabled; the piping
//! formats (tsv, csv, name) stay one record per line.

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style, Table};

use crate::cli::helpers::{escape_csv, format_money, format_optional, truncate_str};
use crate::cli::OutputFormat;
use crate::core::{Product, Statistics};

/// Names longer than this are truncated in bordered tables
const NAME_WIDTH: usize = 40;

const HEADERS: [&str; 5] = ["#", "Name", "Unit Price", "Quantity", "Total Value"];

/// Render a product list in the requested format
pub fn render_products(products: &[Product], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Auto | OutputFormat::Table => Ok(format!(
            "{}\n",
            build_table(products, true).with(Style::rounded())
        )),
        OutputFormat::Md => Ok(format!(
            "{}\n",
            build_table(products, false).with(Style::markdown())
        )),
        OutputFormat::Tsv => {
            let mut out = String::from("name\tprice\tquantity\ttotal_cost\n");
            for p in products {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\n",
                    p.name,
                    p.price,
                    p.quantity,
                    p.total_cost()
                ));
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut out = String::from("name,price,quantity,total_cost\n");
            for p in products {
                out.push_str(&format!(
                    "{},{},{},{}\n",
                    escape_csv(&p.name),
                    p.price,
                    p.quantity,
                    p.total_cost()
                ));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(products).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yml::to_string(products).into_diagnostic(),
        OutputFormat::Name => Ok(products
            .iter()
            .map(|p| format!("{}\n", p.name))
            .collect()),
    }
}

fn build_table(products: &[Product], truncate: bool) -> Table {
    let mut builder = Builder::default();
    builder.push_record(HEADERS);

    for (i, p) in products.iter().enumerate() {
        let name = if truncate {
            truncate_str(&p.name, NAME_WIDTH)
        } else {
            p.name.clone()
        };
        builder.push_record([
            (i + 1).to_string(),
            name,
            format_money(p.price),
            p.quantity.to_string(),
            format_money(p.total_cost()),
        ]);
    }

    builder.build()
}

/// Render statistics in the requested format
pub fn render_statistics(stats: &Statistics, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(stats).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yml::to_string(stats).into_diagnostic(),
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if format == OutputFormat::Tsv { "\t" } else { "," };
            let mut out = ["total_value", "total_units", "max_price", "max_quantity"].join(sep);
            out.push('\n');
            out.push_str(
                &[
                    stats.total_value.to_string(),
                    stats.total_units.to_string(),
                    stats.max_price.map(|v| v.to_string()).unwrap_or_default(),
                    stats.max_quantity.map(|v| v.to_string()).unwrap_or_default(),
                ]
                .join(sep),
            );
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Auto | OutputFormat::Table | OutputFormat::Md | OutputFormat::Name => {
            let mut out = String::new();
            out.push_str(&format!(
                "Total Inventory Value: {}\n",
                format_money(stats.total_value)
            ));
            out.push_str(&format!(
                "Total Number of Units in Stock: {}\n",
                stats.total_units
            ));
            out.push_str(&format!(
                "Most Expensive Product Price: {}\n",
                format_optional(stats.max_price, format_money)
            ));
            out.push_str(&format!(
                "Product with Highest Stock Quantity: {}\n",
                format_optional(stats.max_quantity, |q| q.to_string())
            ));
            Ok(out)
        }
    }
}
