//! Command-line access to the liturgical calendar

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};

use liturgical_calendar::client::{HttpIcsSource, ResolverProbe};
use liturgical_calendar::provider::download_progress::feedback_channel;
use liturgical_calendar::store::LocalStore;
use liturgical_calendar::{utils, Provider};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser)]
#[command(version, about = "Downloads and queries the liturgical calendar")]
struct Cli {
    /// Folder where the downloaded years are stored
    #[arg(long, short, default_value = "liturgical-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the given years, unless they are already available
    Download {
        years: Vec<i32>,
        /// Download the years again even if they are available
        #[arg(long)]
        force: bool,
    },
    /// List the years that are available locally
    Years,
    /// Print the dominant event of every day of a month
    Month { year: i32, month: u32 },
    /// Print every event of a day (YYYY-MM-DD)
    Day {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Delete every downloaded year
    Purge,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| format!("expected a date like 2024-12-25: {}", err))
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> liturgical_calendar::Result<()> {
    let store = LocalStore::in_data_dir(&cli.data_dir)?;
    let mut provider = Provider::new(HttpIcsSource::new()?, ResolverProbe, store);

    match cli.command {
        Command::Download { years, force: true } => {
            for year in years {
                provider.download_year(year).await?;
                println!("{}: downloaded", year);
            }
        },
        Command::Download { years, force: false } => {
            let (sender, mut receiver) = feedback_channel();
            let printer = tokio::spawn(async move {
                while receiver.changed().await.is_ok() {
                    println!("{}", *receiver.borrow());
                }
            });
            let report = provider.download_missing_years_with_feedback(&years, sender).await;
            let _ = printer.await;

            println!("{}", report);
            for (year, err) in &report.failed {
                println!("{}: {}", year, err);
            }
        },
        Command::Years => {
            for year in provider.get_available_years() {
                println!("{}", year);
            }
        },
        Command::Month { year, month } => {
            let year_data = provider.get_augmented_liturgical_year(year).await?;
            match &year_data {
                None => println!("Year {} is not available, download it first", year),
                Some(data) => utils::print_month(year, month, data),
            }
            if let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) {
                println!("{}", provider.get_liturgical_year_info(year_data.as_ref(), first_day));
            }
        },
        Command::Day { date } => {
            match provider.get_augmented_liturgical_year(date.year()).await? {
                None => println!("Year {} is not available, download it first", date.year()),
                Some(data) => utils::print_day(date, data.events_for_date(date)),
            }
        },
        Command::Purge => {
            provider.delete_all_calendar_files().await?;
            println!("Every downloaded year has been deleted");
        },
    }

    Ok(())
}
