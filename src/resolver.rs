//! Picks the dominant celebration among the events of a single day

use std::cmp::Ordering;

use crate::event::Event;

fn has_digit(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_digit())
}

/// Total order of precedence between two events (the lesser one wins):
/// 1. rank precedence (solemnities first, unknown ranks last),
/// 2. names without any digit before names with digits (e.g. a named feast before "2 Dzień Oktawy"),
/// 3. lexicographic order of names.
pub fn compare_precedence(left: &Event, right: &Event) -> Ordering {
    left.rank().precedence().cmp(&right.rank().precedence())
        .then_with(|| has_digit(left.name()).cmp(&has_digit(right.name())))
        .then_with(|| left.name().cmp(right.name()))
}

/// Return the dominant event of a list of events sharing the same date, or `None` if the list is empty
pub fn dominant(events: &[Event]) -> Option<&Event> {
    events.iter().min_by(|l, r| compare_precedence(l, r))
}

/// Sort a day's events the way they should be listed: dominant first
pub fn sort_by_precedence(events: &mut [Event]) {
    events.sort_by(compare_precedence);
}


#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use crate::event::{LiturgicalColor, Rank};

    fn event(name: &str, rank: Rank) -> Event {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        Event::new(name, date, None, None, rank, LiturgicalColor::White)
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(dominant(&[]), None);

        let single = vec![event("Narodzenie Pańskie", Rank::Solemnity)];
        assert_eq!(dominant(&single), Some(&single[0]));
    }

    #[test]
    fn test_rank_wins_regardless_of_order() {
        let solemnity = event("Narodzenie Pańskie", Rank::Solemnity);
        let optional = event("Św. Anastazji", Rank::OptionalMemorial);

        let one_way = vec![solemnity.clone(), optional.clone()];
        let other_way = vec![optional, solemnity.clone()];
        assert_eq!(dominant(&one_way), Some(&solemnity));
        assert_eq!(dominant(&other_way), Some(&solemnity));
    }

    #[test]
    fn test_weekday_between_memorials() {
        let weekday = event("3 Wtorek Adwentu", Rank::Weekday);
        let obligatory = event("Św. Łucji", Rank::ObligatoryMemorial);
        let optional = event("Św. Jana", Rank::OptionalMemorial);
        let unknown = event("Coś", Rank::Unknown);

        assert_eq!(dominant(&[weekday.clone(), obligatory.clone()]), Some(&obligatory));
        assert_eq!(dominant(&[optional.clone(), weekday.clone()]), Some(&weekday));
        assert_eq!(dominant(&[unknown.clone(), optional.clone()]), Some(&optional));
    }

    #[test]
    fn test_names_without_digits_win_ties() {
        let named = event("Boże Narodzenie", Rank::Feast);
        let numbered = event("2 Dzień Oktawy Narodzenia", Rank::Feast);
        assert_eq!(dominant(&[numbered.clone(), named.clone()]), Some(&named));
        assert_eq!(dominant(&[named.clone(), numbered]), Some(&named));

        let b = event("B", Rank::Feast);
        let a = event("A", Rank::Feast);
        assert_eq!(dominant(&[b, a.clone()]), Some(&a));
    }

    #[test]
    fn test_sort() {
        let mut events = vec![
            event("Św. Jana", Rank::OptionalMemorial),
            event("Narodzenie Pańskie", Rank::Solemnity),
            event("1 Czwartek", Rank::Weekday),
        ];
        sort_by_precedence(&mut events);
        let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Narodzenie Pańskie", "1 Czwartek", "Św. Jana"]);
    }
}
