//! Events of one or more calendar years, indexed by date

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::event::Event;

/// A set of events indexed by date.
///
/// Events keep their insertion order within a day. An event with the same date and name as an already
/// present one is ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YearEventSet {
    by_date: BTreeMap<NaiveDate, Vec<Event>>,
    len: usize,
}

impl YearEventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event. Returns `false` if an event with the same date and name was already there
    pub fn insert(&mut self, event: Event) -> bool {
        let day = self.by_date.entry(event.date()).or_insert_with(Vec::new);
        if day.iter().any(|e| e.name() == event.name()) {
            return false;
        }
        day.push(event);
        self.len += 1;
        true
    }

    /// Events of a day, in insertion order. Empty if there are none
    pub fn events_for_date(&self, date: NaiveDate) -> &[Event] {
        self.by_date.get(&date).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Every event, by ascending date
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.by_date.values().flatten()
    }

    /// Dates that have at least one event, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Calendar years that have at least one event, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.by_date.keys()
            .map(|d| d.year())
            .filter(|y| seen.insert(*y))
            .collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next_back().copied()
    }

    /// Consume this set, returning its events by ascending date
    pub fn into_events(self) -> Vec<Event> {
        self.by_date.into_iter().flat_map(|(_, events)| events).collect()
    }
}

impl std::iter::FromIterator<Event> for YearEventSet {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut set = Self::new();
        for event in iter {
            set.insert(event);
        }
        set
    }
}

impl From<Vec<Event>> for YearEventSet {
    fn from(events: Vec<Event>) -> Self {
        events.into_iter().collect()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{LiturgicalColor, Rank};

    fn event(name: &str, y: i32, m: u32, d: u32) -> Event {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Event::new(name, date, None, None, Rank::Weekday, LiturgicalColor::Green)
    }

    #[test]
    fn test_index() {
        let set: YearEventSet = vec![
            event("B", 2024, 1, 2),
            event("A", 2023, 12, 31),
            event("C", 2024, 1, 2),
            event("B", 2024, 1, 2),
        ].into();

        assert_eq!(set.len(), 3);
        assert_eq!(set.years(), vec![2023, 2024]);
        assert_eq!(set.first_date(), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(set.last_date(), NaiveDate::from_ymd_opt(2024, 1, 2));

        let day: Vec<&str> = set.events_for_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .iter().map(|e| e.name()).collect();
        assert_eq!(day, vec!["B", "C"]);
        assert!(set.events_for_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()).is_empty());

        let all: Vec<&str> = set.iter().map(|e| e.name()).collect();
        assert_eq!(all, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty() {
        let set = YearEventSet::new();
        assert!(set.is_empty());
        assert!(set.years().is_empty());
        assert_eq!(set.first_date(), None);
    }
}
