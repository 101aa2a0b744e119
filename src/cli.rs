use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::split::parse_amount;

/// Split Bill — spread what was actually paid across the items on a bill.
#[derive(Parser, Debug)]
#[command(name = "split_bill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Edit the bill row by row in an interactive session.
    Interactive {
        /// Start with the light theme.
        #[arg(long)]
        light: bool,

        /// Pre-fill rows from a .csv or .json file.
        #[arg(long, value_name = "PATH")]
        items_file: Option<PathBuf>,

        /// Offer to export the last result to this .csv or .json file on quit.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Split a bill in one go.
    Split {
        /// An item as NAME=PRICE (repeatable). A bare PRICE leaves the name blank.
        #[arg(short = 'i', long = "item", value_name = "NAME=PRICE")]
        items: Vec<String>,

        /// Read items from a .csv (name,price) or .json file before any --item.
        #[arg(long, value_name = "PATH")]
        items_file: Option<PathBuf>,

        /// Total actually paid. Omit or 0 to keep original prices.
        #[arg(short, long, default_value = "0")]
        total: String,

        /// Output format for stdout.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the result to a .csv or .json file instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive {
            light: false,
            items_file: None,
            output: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Parse a `NAME=PRICE` argument. Splits on the last `=` so names may contain one.
pub fn parse_item_arg(arg: &str) -> (String, f64) {
    match arg.rsplit_once('=') {
        Some((name, price)) => (name.trim().to_string(), parse_amount(price)),
        None => (String::new(), parse_amount(arg)),
    }
}
