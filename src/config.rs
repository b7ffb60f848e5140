//! Support for library configuration options

use std::sync::{Arc, Mutex};
use std::time::Duration;
use once_cell::sync::Lazy;

/// URL of the yearly ICS feed. `{year}` and `{locale}` are substituted before each download.
/// Feel free to override it when initing this library.
pub static ICS_URL_TEMPLATE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://gcatholic.org/calendar/ics/{year}-{locale}.ics?v=3".to_string())));

/// Locale of the ICS feed (the parser and the translation table expect Polish summaries).
/// Feel free to override it when initing this library.
pub static ICS_LOCALE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("pl-PL".to_string())));

/// Maximum time to establish a connection to the ICS server
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Maximum time to wait for the whole ICS response
pub const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// Name of the folder (inside the app data folder) that holds one JSON file per year
pub const CALENDAR_FOLDER: &str = "kalendarz";

/// Build the ICS URL for a given year, using the current values of [`ICS_URL_TEMPLATE`] and [`ICS_LOCALE`]
pub fn ics_url_for_year(year: i32) -> String {
    let template = match ICS_URL_TEMPLATE.lock() {
        Ok(t) => t.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    let locale = match ICS_LOCALE.lock() {
        Ok(l) => l.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    template
        .replace("{year}", &year.to_string())
        .replace("{locale}", &locale)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_url() {
        assert_eq!(ics_url_for_year(2024), "https://gcatholic.org/calendar/ics/2024-pl-PL.ics?v=3");
    }
}
