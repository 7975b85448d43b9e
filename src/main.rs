use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use stickywall::api::ApiClient;
use stickywall::{calendar, config, logger, plain, runtime};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI application (default)
    Tui,
    /// Print every note and its tasks
    Notes,
    /// Print a month calendar
    Calendar {
        /// Year to show (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month to show, 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

async fn print_notes(app_config: &config::AppConfig) -> Result<()> {
    let client = ApiClient::new(&app_config.service)?;
    let notes = client.list_notes().await?;
    print!(
        "{}",
        plain::notes_text(&notes, app_config.general.locale.strings())
    );
    Ok(())
}

fn print_calendar(
    app_config: &config::AppConfig,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());
    let reference = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid month: {}-{}", year, month))?;
    let grid = calendar::month_grid(reference, today, app_config.general.locale);
    print!("{}", plain::calendar_text(&grid));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = runtime::restore_terminal();
        default_hook(info);
    }));

    logger::init();
    let args = Args::parse();
    let app_config = config::load_config();

    match args.command {
        Some(Commands::Notes) => return print_notes(&app_config).await,
        Some(Commands::Calendar { year, month }) => {
            return print_calendar(&app_config, year, month);
        }
        None | Some(Commands::Tui) => {}
    }

    if let Err(err) = runtime::run_tui(app_config).await {
        logger::log(&format!("TUI error: {:?}", err));
        eprintln!("Error: {:?}", err);
    }
    Ok(())
}
