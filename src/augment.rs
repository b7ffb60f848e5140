//! Filling the gaps of a calendar, and telling which liturgical year applies to a month

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate};

use crate::cycles::compute_cycles;
use crate::event::{Event, Rank};
use crate::resolver::dominant;
use crate::season::day_context;
use crate::year::YearEventSet;

/// Main info when the liturgical year cannot be told
pub const NO_YEAR_DATA: &str = "Brak danych o roku liturgicznym";

const MONTHS_GENITIVE: [&str; 12] = [
    "stycznia", "lutego", "marca", "kwietnia", "maja", "czerwca",
    "lipca", "sierpnia", "września", "października", "listopada", "grudnia",
];

/// Which liturgical year applies to a month, and whether it changed during that month
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearTransitionInfo {
    pub main_info: String,
    pub transition_info: Option<String>,
}

impl YearTransitionInfo {
    pub fn no_data() -> Self {
        Self {
            main_info: NO_YEAR_DATA.to_string(),
            transition_info: None,
        }
    }
}

impl Display for YearTransitionInfo {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.transition_info {
            None => write!(f, "{}", self.main_info),
            Some(transition) => write!(f, "{} ({})", self.main_info, transition),
        }
    }
}

/// Add a weekday placeholder to every day that has no celebration of its own.
///
/// Every day from January 1st to December 31st of each calendar year present in `events` that has
/// no event, or only memorials, gets an event of rank [`Rank::Weekday`] named after its place in
/// the liturgical season. Duplicates (same date and name) are removed. The result is sorted by date.
pub fn augment_years(events: Vec<Event>) -> Vec<Event> {
    let mut set = YearEventSet::from(events);
    let mut n_added = 0;

    for year in set.years() {
        let (first, last) = match (NaiveDate::from_ymd_opt(year, 1, 1), NaiveDate::from_ymd_opt(year, 12, 31)) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };

        let mut date = first;
        while date <= last {
            let day = set.events_for_date(date);
            if day.iter().all(|e| e.rank().is_memorial()) {
                if let Some(placeholder) = weekday_placeholder(date) {
                    if set.insert(placeholder) {
                        n_added += 1;
                    }
                }
            }
            date = date + Duration::days(1);
        }
    }

    log::debug!("Added {} weekday placeholders", n_added);
    set.into_events()
}

fn weekday_placeholder(date: NaiveDate) -> Option<Event> {
    let context = day_context(date)?;
    let cycles = compute_cycles(date);
    Some(Event::new(
        context.weekday_label(),
        date,
        Some(cycles.sunday_cycle),
        Some(cycles.weekday_cycle),
        Rank::Weekday,
        context.season.color(),
    ))
}

fn year_id_on(date: NaiveDate, year_data: &YearEventSet) -> Option<String> {
    dominant(year_data.events_for_date(date)).and_then(|e| e.year_id())
}

/// Tell which liturgical year applies at the end of a month, and on which day the previous one ended if
/// it changed during that month.
///
/// When the year changes several times within the month, only the latest change is reported.
pub fn year_info_for_month(year: i32, month: u32, year_data: &YearEventSet) -> YearTransitionInfo {
    let last_day = match last_day_of_month(year, month) {
        None => return YearTransitionInfo::no_data(),
        Some(d) => d,
    };

    let final_id = match year_id_on(last_day, year_data) {
        None => return YearTransitionInfo::no_data(),
        Some(id) => id,
    };

    let mut transition_info = None;
    for day in (1..last_day.day()).rev() {
        let date = match NaiveDate::from_ymd_opt(year, month, day) {
            None => break,
            Some(d) => d,
        };
        let id = year_id_on(date, year_data);
        if id.as_ref() != Some(&final_id) {
            if let Some(previous_id) = id {
                transition_info = Some(format!("Rok obowiązujący do {} {}: {}",
                    day, MONTHS_GENITIVE[month as usize - 1], previous_id));
            }
            break;
        }
    }

    YearTransitionInfo {
        main_info: format!("Aktualny rok: {}", final_id),
        transition_info,
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.pred_opt()
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{LiturgicalColor, SundayCycle, WeekdayCycle};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parsed(name: &str, date: NaiveDate, rank: Rank) -> Event {
        let cycles = compute_cycles(date);
        Event::new(name, date, Some(cycles.sunday_cycle), Some(cycles.weekday_cycle), rank, LiturgicalColor::White)
    }

    #[test]
    fn test_every_day_is_covered() {
        let events = vec![parsed("Narodzenie Pańskie", ymd(2024, 12, 25), Rank::Solemnity)];
        let augmented = augment_years(events);
        let set = YearEventSet::from(augmented.clone());

        // 2024 is a leap year
        assert_eq!(augmented.len(), 366);
        let mut date = ymd(2024, 1, 1);
        while date.year() == 2024 {
            assert!(dominant(set.events_for_date(date)).is_some(), "no event on {}", date);
            date = date.succ_opt().unwrap();
        }

        // The parsed solemnity did not get a placeholder
        assert_eq!(set.events_for_date(ymd(2024, 12, 25)).len(), 1);
        // Sorted by date
        assert!(augmented.windows(2).all(|w| w[0].date() <= w[1].date()));
    }

    #[test]
    fn test_placeholders() {
        let memorial = parsed("Św. Agnieszki", ymd(2024, 1, 21), Rank::ObligatoryMemorial);
        let set = YearEventSet::from(augment_years(vec![memorial.clone()]));

        let day = set.events_for_date(ymd(2024, 1, 21));
        assert_eq!(day.len(), 2);
        assert_eq!(dominant(day), Some(&memorial));
        let placeholder = &day[1];
        assert_eq!(placeholder.name(), "3 Niedziela Okresu Zwykłego");
        assert_eq!(placeholder.rank(), Rank::Weekday);
        assert_eq!(placeholder.color(), LiturgicalColor::Green);
        assert_eq!(placeholder.sunday_cycle(), Some(SundayCycle::B));
        assert_eq!(placeholder.weekday_cycle(), Some(WeekdayCycle::Two));

        let advent = &set.events_for_date(ymd(2024, 12, 20))[0];
        assert_eq!(advent.name(), "20 grudnia - Dzień powszedni w okresie Adwentu");
        assert_eq!(advent.color(), LiturgicalColor::Purple);
        assert_eq!(advent.sunday_cycle(), Some(SundayCycle::C));
    }

    #[test]
    fn test_empty_input() {
        assert!(augment_years(Vec::new()).is_empty());
    }

    #[test]
    fn test_transition_in_december() {
        let events = vec![parsed("Niepokalane Poczęcie", ymd(2023, 12, 8), Rank::Solemnity)];
        let set = YearEventSet::from(augment_years(events));

        let info = year_info_for_month(2023, 12, &set);
        assert_eq!(info.main_info, "Aktualny rok: B, 1");
        assert_eq!(info.transition_info.as_deref(), Some("Rok obowiązujący do 2 grudnia: A, 1"));

        let info = year_info_for_month(2023, 11, &set);
        assert_eq!(info.main_info, "Aktualny rok: A, 1");
        assert_eq!(info.transition_info, None);
    }

    #[test]
    fn test_missing_data() {
        let set = YearEventSet::from(augment_years(vec![
            parsed("Niepokalane Poczęcie", ymd(2023, 12, 8), Rank::Solemnity),
        ]));
        assert_eq!(year_info_for_month(2024, 1, &set), YearTransitionInfo::no_data());
        assert_eq!(year_info_for_month(2023, 13, &set), YearTransitionInfo::no_data());
        assert_eq!(year_info_for_month(2024, 0, &set), YearTransitionInfo::no_data());

        // Events without cycles cannot tell the year
        let date = ymd(2024, 5, 31);
        let set = YearEventSet::from(vec![Event::new("Nawiedzenie", date, None, None, Rank::Feast, LiturgicalColor::White)]);
        assert_eq!(year_info_for_month(2024, 5, &set).main_info, NO_YEAR_DATA);
    }

    #[test]
    fn test_gap_stops_the_scan() {
        let mut set = YearEventSet::new();
        set.insert(parsed("Koniec", ymd(2023, 12, 31), Rank::Feast));
        set.insert(parsed("Przed Adwentem", ymd(2023, 12, 1), Rank::Feast));
        // December 30th has no event: the scan stops there without reporting the change
        let info = year_info_for_month(2023, 12, &set);
        assert_eq!(info.main_info, "Aktualny rok: B, 1");
        assert_eq!(info.transition_info, None);
    }
}
