use std::io;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use split_bill_rs::cli::{parse_item_arg, Cli, Command, OutputFormat};
use split_bill_rs::error::Result;
use split_bill_rs::interface::{
    display_items, display_result, prompt_amount, prompt_item_name, prompt_menu,
    prompt_select_item, prompt_yes_no, render_result, MenuChoice,
};
use split_bill_rs::models::{Item, ItemId, Theme};
use split_bill_rs::split::parse_amount;
use split_bill_rs::state::{export_result, load_items, write_result_csv, write_result_json};
use split_bill_rs::{Action, Session};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. RUST_LOG wins over the -v count.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_default() {
        Command::Interactive {
            light,
            items_file,
            output,
        } => cmd_interactive(light, items_file.as_deref(), output.as_deref()),
        Command::Split {
            items,
            items_file,
            total,
            format,
            output,
        } => cmd_split(&items, items_file.as_deref(), &total, format, output.as_deref()),
    }
}

/// Split a bill given entirely on the command line.
fn cmd_split(
    item_args: &[String],
    items_file: Option<&Path>,
    total: &str,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut items = match items_file {
        Some(path) => load_items(path)?,
        None => Vec::new(),
    };
    items.extend(
        item_args
            .iter()
            .map(|arg| parse_item_arg(arg))
            .map(|(name, price)| Item::new(ItemId(0), name, price)),
    );

    let session = Session::with_items(items, parse_amount(total)).apply(Action::Calculate);
    info!(items = session.items().len(), total_paid = session.total_paid(), "Split requested");

    let (Some(rows), Some(summary)) = (session.result(), session.result_summary()) else {
        println!("Nothing to split: every price is zero.");
        return Ok(());
    };

    if let Some(path) = output {
        export_result(path, rows, summary)?;
        println!("Result written to {}", path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Table => print!("{}", render_result(rows, summary)),
        OutputFormat::Json => write_result_json(io::stdout().lock(), rows, summary)?,
        OutputFormat::Csv => write_result_csv(io::stdout().lock(), rows, summary)?,
    }

    Ok(())
}

/// Run the interactive bill form until the user quits.
fn cmd_interactive(light: bool, items_file: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let mut session = match items_file {
        Some(path) => Session::with_items(load_items(path)?, 0.0),
        None => Session::new(),
    };
    if light {
        session = session.apply(Action::ToggleTheme);
    }

    loop {
        let theme = session.theme();
        display_items(session.items(), session.total_paid(), theme);
        if let (Some(rows), Some(summary)) = (session.result(), session.result_summary()) {
            display_result(rows, summary, theme);
        }

        let choice = prompt_menu(theme)?;
        debug!(?choice, "Menu choice");

        session = match choice {
            MenuChoice::AddRow => add_row(session)?,
            MenuChoice::EditRow => edit_row(session)?,
            MenuChoice::RemoveRow => remove_row(session)?,
            MenuChoice::SetTotalPaid => {
                let total = prompt_amount("Total paid (final)", session.total_paid(), theme)?;
                session.apply(Action::SetTotalPaid(total))
            }
            MenuChoice::Calculate => calculate(session),
            MenuChoice::Reset => {
                println!("Bill cleared.");
                session.apply(Action::Reset)
            }
            MenuChoice::ToggleTheme => session.apply(Action::ToggleTheme),
            MenuChoice::Quit => break,
        };
    }

    if let (Some(path), Some(rows), Some(summary)) =
        (output, session.result(), session.result_summary())
    {
        let prompt = format!("Export the last result to {}?", path.display());
        if prompt_yes_no(&prompt, true, session.theme())? {
            export_result(path, rows, summary)?;
            println!("Result written to {}", path.display());
        }
    }

    Ok(())
}

fn add_row(session: Session) -> Result<Session> {
    let theme = session.theme();
    let session = session.apply(Action::AddItem);
    let Some(id) = session.items().last().map(|item| item.id) else {
        return Ok(session);
    };
    fill_row(session, id, theme)
}

fn edit_row(session: Session) -> Result<Session> {
    if session.items().is_empty() {
        println!("There are no rows to edit.");
        return Ok(session);
    }

    let theme = session.theme();
    match prompt_select_item(session.items(), "Which row?", theme)? {
        Some(id) => fill_row(session, id, theme),
        None => Ok(session),
    }
}

fn fill_row(session: Session, id: ItemId, theme: Theme) -> Result<Session> {
    let (current_name, current_price) = match session.find_item(id) {
        Some(item) => (item.name.clone(), item.price),
        None => return Ok(session),
    };

    let name = prompt_item_name(&current_name, theme)?;
    let price = prompt_amount("Price", current_price, theme)?;

    Ok(session
        .apply(Action::UpdateName(id, name))
        .apply(Action::UpdatePrice(id, price)))
}

fn remove_row(session: Session) -> Result<Session> {
    if session.items().is_empty() {
        println!("There are no rows to remove.");
        return Ok(session);
    }

    let theme = session.theme();
    match prompt_select_item(session.items(), "Remove which row?", theme)? {
        Some(id) => Ok(session.apply(Action::RemoveItem(id))),
        None => Ok(session),
    }
}

/// The fresh result is shown by the next pass of the menu loop.
fn calculate(session: Session) -> Session {
    let session = session.apply(Action::Calculate);

    if session.subtotal() == 0.0 {
        println!("Nothing to split yet: enter at least one price.");
    }

    session
}
