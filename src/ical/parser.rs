//! A module to parse the yearly ICS feed

use chrono::NaiveDate;
use ical::property::{Property, PropertyParser};

use crate::cycles::compute_cycles;
use crate::event::{Event, LiturgicalColor, Rank};
use super::TranslationTable;

/// Summaries (lowercase) of the two Sundays that use rose vestments, whatever their marker says
const PINK_SUNDAYS: &[&str] = &[
    "gaudete",
    "iii niedziela adwentu",
    "3 niedziela adwentu",
    "laetare",
    "iv niedziela wielkiego postu",
    "4 niedziela wielkiego postu",
];

/// Color markers, in the order they are looked for
const COLOR_MARKERS: &[(&str, LiturgicalColor)] = &[
    ("⚪", LiturgicalColor::White),
    ("🔴", LiturgicalColor::Red),
    ("🟢", LiturgicalColor::Green),
    ("🟣", LiturgicalColor::Purple),
    ("💗", LiturgicalColor::Pink),
    ("🩷", LiturgicalColor::Pink),
];

/// Characters removed from the names, on top of the bracketed codes
const STRIPPED_CHARS: &[char] = &['⚪', '🔴', '🟢', '🟣', '💗', '🩷', '\u{fe0f}', '?', '\\', '/'];

const ICS_DATE_FORMAT: &str = "%Y%m%d";

/// What has been read so far from a `VEVENT` block
#[derive(Default)]
struct PendingEvent {
    date: Option<NaiveDate>,
    summary: Option<String>,
}

/// Parse the text of an ICS feed into events.
///
/// Only `VEVENT` blocks that have both a `DTSTART;VALUE=DATE` and a `SUMMARY` are kept.
/// Incomplete blocks, unparsable lines and events whose name ends up blank are skipped (and counted in the logs).
pub fn parse(content: &str, translations: &TranslationTable) -> Vec<Event> {
    let reader = PropertyParser::from_reader(content.as_bytes());

    let mut events = Vec::new();
    let mut current: Option<PendingEvent> = None;
    let mut n_skipped = 0;

    for property in reader {
        let property = match property {
            Ok(p) => p,
            Err(err) => {
                log::debug!("Ignoring an invalid ICS line: {}", err);
                continue;
            },
        };
        let value = property.value.as_deref().unwrap_or("");

        if property.name.eq_ignore_ascii_case("BEGIN") && value.eq_ignore_ascii_case("VEVENT") {
            if current.is_some() {
                log::debug!("VEVENT block not closed before the next one");
                n_skipped += 1;
            }
            current = Some(PendingEvent::default());
            continue;
        }

        if property.name.eq_ignore_ascii_case("END") && value.eq_ignore_ascii_case("VEVENT") {
            if let Some(pending) = current.take() {
                match to_event(pending, translations) {
                    Some(event) => events.push(event),
                    None => n_skipped += 1,
                }
            }
            continue;
        }

        let pending = match current.as_mut() {
            None => continue,
            Some(p) => p,
        };

        if property.name.eq_ignore_ascii_case("DTSTART") {
            if is_date_value(&property) {
                pending.date = NaiveDate::parse_from_str(value.trim(), ICS_DATE_FORMAT).ok();
            }
        } else if property.name.eq_ignore_ascii_case("SUMMARY") {
            pending.summary = Some(value.to_string());
        }
    }

    if current.is_some() {
        n_skipped += 1;
    }
    if n_skipped > 0 {
        log::info!("Skipped {} incomplete VEVENT blocks", n_skipped);
    }
    log::debug!("Parsed {} events", events.len());
    events
}

fn is_date_value(property: &Property) -> bool {
    property.params.as_ref()
        .map(|params| params.iter().any(|(key, values)| {
            key.eq_ignore_ascii_case("VALUE") && values.iter().any(|v| v.eq_ignore_ascii_case("DATE"))
        }))
        .unwrap_or(false)
}

fn to_event(pending: PendingEvent, translations: &TranslationTable) -> Option<Event> {
    let date = pending.date?;
    let summary = pending.summary?;

    let rank = rank_code(&summary).map(Rank::from_code).unwrap_or(Rank::Weekday);
    let color = color_of(&summary);
    let name = translations.translate(&clean_name(&summary));
    if name.trim().is_empty() {
        return None;
    }

    let cycles = compute_cycles(date);
    Some(Event::new(name, date, Some(cycles.sunday_cycle), Some(cycles.weekday_cycle), rank, color))
}

/// The content of the first `[...]` group, e.g. `U` in `[U] Narodzenie Pańskie`
fn rank_code(summary: &str) -> Option<&str> {
    let start = summary.find('[')? + 1;
    let len = summary[start..].find(']')?;
    Some(summary[start..start + len].trim())
}

fn color_of(summary: &str) -> LiturgicalColor {
    let lowercase = summary.to_lowercase();
    if PINK_SUNDAYS.iter().any(|s| lowercase.contains(s)) {
        return LiturgicalColor::Pink;
    }

    COLOR_MARKERS.iter()
        .find(|(marker, _)| summary.contains(marker))
        .map(|(_, color)| *color)
        .unwrap_or(LiturgicalColor::Unknown)
}

/// Remove the bracketed codes and color markers, and normalize whitespace
fn clean_name(summary: &str) -> String {
    let mut without_codes = String::with_capacity(summary.len());
    let mut rest = summary;
    while let Some(open) = rest.find('[') {
        let close = match rest[open..].find(']') {
            None => break,
            Some(offset) => open + offset,
        };
        without_codes.push_str(&rest[..open]);
        rest = rest[close + 1..].trim_start();
    }
    without_codes.push_str(rest);

    without_codes
        .replace(STRIPPED_CHARS, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{SundayCycle, WeekdayCycle};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vevent(date: &str, summary: &str) -> String {
        format!("BEGIN:VEVENT\nDTSTART;VALUE=DATE:{}\nSUMMARY:{}\nEND:VEVENT\n", date, summary)
    }

    #[test]
    fn test_single_event() {
        let ics = "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20240101\nSUMMARY:[U] Świętej Bożej Rodzicielki Maryi ⚪\nEND:VEVENT";
        let events = parse(ics, &TranslationTable::empty());

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.rank(), Rank::Solemnity);
        assert_eq!(event.color(), LiturgicalColor::White);
        assert_eq!(event.name(), "Świętej Bożej Rodzicielki Maryi");
        assert_eq!(event.date(), ymd(2024, 1, 1));
        assert_eq!(event.sunday_cycle(), Some(SundayCycle::B));
        assert_eq!(event.weekday_cycle(), Some(WeekdayCycle::Two));
    }

    #[test]
    fn test_full_calendar() {
        let ics = format!(
            "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//GCatholic//PL\n{}{}END:VCALENDAR\n",
            vevent("20241225", "[U] Narodzenie Pańskie ⚪"),
            vevent("20241226", "[Ś] Św. Szczepana, pierwszego męczennika 🔴"),
        );

        let events = parse(&ics, &TranslationTable::polish());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "25 grudnia - Uroczystość Narodzenia Pańskiego");
        assert_eq!(events[1].name(), "26 grudnia - Święto św. Szczepana, pierwszego męczennika");
        assert_eq!(events[1].rank(), Rank::Feast);
        assert_eq!(events[1].color(), LiturgicalColor::Red);
        // Advent 2024 started on December 1st
        assert_eq!(events[0].sunday_cycle(), Some(SundayCycle::C));
    }

    #[test]
    fn test_pink_sundays() {
        let ics = vevent("20231217", "III Niedziela Adwentu „Gaudete” 🟣")
            + &vevent("20240310", "IV Niedziela Wielkiego Postu „Laetare” 🟣")
            + &vevent("20240303", "III Niedziela Wielkiego Postu 🟣");
        let events = parse(&ics, &TranslationTable::empty());

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].color(), LiturgicalColor::Pink);
        assert_eq!(events[1].color(), LiturgicalColor::Pink);
        assert_eq!(events[2].color(), LiturgicalColor::Purple);
        assert_eq!(events[0].rank(), Rank::Weekday);
    }

    #[test]
    fn test_codes_and_markers() {
        let ics = vevent("20240131", "[W] Św. Jana Bosko, prezbitera ⚪")
            + &vevent("20240129", "[w*] [PL] Bł. Bolesławy Lament, dziewicy ⚪️")
            + &vevent("20240130", "Wtorek IV tygodnia zwykłego 🟢")
            + &vevent("20240201", "Coś bez koloru");
        let events = parse(&ics, &TranslationTable::empty());

        assert_eq!(events[0].rank(), Rank::ObligatoryMemorial);
        assert_eq!(events[1].rank(), Rank::OptionalMemorial);
        assert_eq!(events[1].name(), "Bł. Bolesławy Lament, dziewicy");
        assert_eq!(events[1].color(), LiturgicalColor::White);
        assert_eq!(events[2].rank(), Rank::Weekday);
        assert_eq!(events[2].color(), LiturgicalColor::Green);
        assert_eq!(events[3].color(), LiturgicalColor::Unknown);
    }

    #[test]
    fn test_folded_summary() {
        let ics = "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20240131\nSUMMARY:[W] Św. Jana Bosk\n o, prezbitera ⚪\nEND:VEVENT\n";
        let events = parse(ics, &TranslationTable::empty());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "Św. Jana Bosko, prezbitera");
    }

    #[test]
    fn test_incomplete_blocks_are_skipped() {
        let ics = "BEGIN:VEVENT\nSUMMARY:[U] Bez daty ⚪\nEND:VEVENT\n".to_string()
            + "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20240102\nEND:VEVENT\n"
            + "BEGIN:VEVENT\nDTSTART:20240103T100000Z\nSUMMARY:Nie cały dzień\nEND:VEVENT\n"
            + &vevent("20240104", "[U] ⚪")
            + &vevent("2024-01-05", "Zła data")
            + &vevent("20240106", "[U] Objawienie Pańskie ⚪");
        let events = parse(&ics, &TranslationTable::empty());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "Objawienie Pańskie");
    }

    #[test]
    fn test_translation() {
        let ics = vevent("20240109", "Wtorek I tygodnia zwykłego 🟢")
            + &vevent("20240107", "[Ś] Chrzest Pański ⚪");
        let events = parse(&ics, &TranslationTable::polish());
        assert_eq!(events[0].name(), "1 Wtorek Okresu Zwykłego");
        assert_eq!(events[1].name(), "Niedziela Chrztu Pańskiego");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("[U]   Narodzenie  Pańskie ⚪"), "Narodzenie Pańskie");
        assert_eq!(clean_name("Święci\\/Męczennicy? 🔴"), "ŚwięciMęczennicy");
        assert_eq!(clean_name("Niedomknięty [nawias"), "Niedomknięty [nawias");
        assert_eq!(rank_code("[ w* ] X"), Some("w*"));
        assert_eq!(rank_code("Brak kodu"), None);
    }
}
