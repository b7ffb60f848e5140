//! Sunday (A/B/C) and weekday (1/2) lectionary cycles

use chrono::{Datelike, Duration, NaiveDate};

use crate::event::{SundayCycle, WeekdayCycle};

/// The lectionary cycles that apply on a given date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiturgicalCycles {
    pub sunday_cycle: SundayCycle,
    pub weekday_cycle: WeekdayCycle,
}

/// First Sunday of Advent of a calendar year, i.e. the last Sunday on or before December 3rd.
///
/// Returns `None` only for years outside of chrono's supported range
pub fn first_sunday_of_advent(year: i32) -> Option<NaiveDate> {
    let dec3 = NaiveDate::from_ymd_opt(year, 12, 3)?;
    let days_since_sunday = dec3.weekday().num_days_from_sunday();
    Some(dec3 - Duration::days(i64::from(days_since_sunday)))
}

/// Compute the lectionary cycles for a date.
///
/// The weekday cycle follows the parity of the calendar year. The Sunday cycle follows the
/// liturgical year, that starts on the first Sunday of Advent.
pub fn compute_cycles(date: NaiveDate) -> LiturgicalCycles {
    let calendar_year = date.year();
    let weekday_cycle = WeekdayCycle::from_calendar_year(calendar_year);

    let reference_year = match first_sunday_of_advent(calendar_year) {
        Some(advent) if date < advent => calendar_year - 1,
        _ => calendar_year,
    };

    LiturgicalCycles {
        sunday_cycle: SundayCycle::from_reference_year(reference_year),
        weekday_cycle,
    }
}
