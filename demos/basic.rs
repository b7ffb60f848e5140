use std::path::Path;

use chrono::{Datelike, Local};

use liturgical_calendar::client::{HttpIcsSource, ResolverProbe};
use liturgical_calendar::store::LocalStore;
use liturgical_calendar::Provider;

const DATA_FOLDER: &str = "example_data";


#[tokio::main]
async fn main() {
    env_logger::init();

    let today = Local::now().date_naive();
    let store = match LocalStore::in_data_dir(Path::new(DATA_FOLDER)) {
        Ok(store) => store,
        Err(err) => {
            log::error!("Unable to use {}: {}", DATA_FOLDER, err);
            return;
        },
    };
    let source = match HttpIcsSource::new() {
        Ok(source) => source,
        Err(err) => {
            log::error!("Unable to create an HTTP client: {}", err);
            return;
        },
    };
    let mut provider = Provider::new(source, ResolverProbe, store);

    let years = [today.year() - 1, today.year(), today.year() + 1];
    let report = provider.download_missing_years_only(&years).await;
    println!("---- downloads: {} -----", report);

    let year_data = match provider.get_augmented_liturgical_year(today.year()).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            println!("No data for {}", today.year());
            return;
        },
        Err(err) => {
            log::error!("Unable to load {}: {}", today.year(), err);
            return;
        },
    };

    println!("---- today -----");
    liturgical_calendar::utils::print_day(today, year_data.events_for_date(today));
    println!("---- this month -----");
    liturgical_calendar::utils::print_month(today.year(), today.month(), &year_data);
    println!("{}", provider.get_liturgical_year_info(Some(&year_data), today));
}
