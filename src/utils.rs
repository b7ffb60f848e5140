//! Some utility functions

use chrono::{Datelike, NaiveDate};

use crate::event::Event;
use crate::resolver::{dominant, sort_by_precedence};
use crate::year::YearEventSet;

/// A debug utility that pretty-prints the events of a day, the dominant one first
pub fn print_day(date: NaiveDate, events: &[Event]) {
    let mut events = events.to_vec();
    sort_by_precedence(&mut events);

    println!("{}", date.format("%d-%m-%Y"));
    for event in &events {
        print_event(event);
    }
}

pub fn print_event(event: &Event) {
    let rank = match event.rank().label() {
        "" => "-",
        label => label,
    };
    let year_id = event.year_id().unwrap_or_else(|| "?".to_string());
    println!("    {} [{}] ({}) {}", event.color(), rank, year_id, event.name());
}

/// A debug utility that prints the dominant event of every day of a month
pub fn print_month(year: i32, month: u32, year_data: &YearEventSet) {
    let mut date = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return,
    };
    while date.month() == month {
        match dominant(year_data.events_for_date(date)) {
            Some(event) => println!("{:2}  {:9}  {}", date.day(), event.color().label(), event.name()),
            None => println!("{:2}  -", date.day()),
        }
        date = match date.succ_opt() {
            Some(d) => d,
            None => break,
        };
    }
}
