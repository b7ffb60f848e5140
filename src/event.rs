//! Liturgical events

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format of dates in the persisted JSON files
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Sunday lectionary cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SundayCycle {
    A,
    B,
    C,
}

impl SundayCycle {
    /// Maps `year mod 3` to a cycle (0 → A, 1 → B, 2 → C)
    pub fn from_reference_year(year: i32) -> Self {
        match year.rem_euclid(3) {
            0 => Self::A,
            1 => Self::B,
            _ => Self::C,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Parses a persisted value. Blank, `"null"`, `"N/A"` and the like give `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            _ => None,
        }
    }
}

impl Display for SundayCycle {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday lectionary cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekdayCycle {
    One,
    Two,
}

impl WeekdayCycle {
    /// Odd calendar years use cycle 1, even ones cycle 2
    pub fn from_calendar_year(year: i32) -> Self {
        if year.rem_euclid(2) == 1 { Self::One } else { Self::Two }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            _ => None,
        }
    }
}

impl Display for WeekdayCycle {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// Liturgical rank of an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Solemnity,
    Feast,
    ObligatoryMemorial,
    /// Plain weekday (no code in the feed)
    Weekday,
    OptionalMemorial,
    /// A persisted label this crate does not know
    Unknown,
}

/// Bracket codes used in the ICS summaries
const RANK_CODES: &[(&str, Rank)] = &[
    ("U", Rank::Solemnity),
    ("Ś", Rank::Feast),
    ("W", Rank::ObligatoryMemorial),
    ("w", Rank::OptionalMemorial),
    ("w*", Rank::OptionalMemorial),
];

/// Persisted label and precedence of every known rank (lower wins)
const RANK_TABLE: &[(Rank, &str, u32)] = &[
    (Rank::Solemnity, "Uroczystość", 1),
    (Rank::Feast, "Święto", 2),
    (Rank::ObligatoryMemorial, "Wspomnienie obowiązkowe", 3),
    (Rank::Weekday, "", 4),
    (Rank::OptionalMemorial, "Wspomnienie dowolne", 5),
];

const UNKNOWN_RANK_LABEL: &str = "Nieznany";

impl Rank {
    /// Rank of a bracket code such as `U` or `w*`. Unrecognised codes are plain weekdays
    pub fn from_code(code: &str) -> Self {
        RANK_CODES.iter()
            .find(|(c, _)| *c == code)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::Weekday)
    }

    /// Rank of a persisted `typ` label
    pub fn from_label(label: &str) -> Self {
        RANK_TABLE.iter()
            .find(|(_, l, _)| *l == label)
            .map(|(rank, _, _)| *rank)
            .unwrap_or(Rank::Unknown)
    }

    pub fn label(&self) -> &'static str {
        RANK_TABLE.iter()
            .find(|(rank, _, _)| rank == self)
            .map(|(_, label, _)| *label)
            .unwrap_or(UNKNOWN_RANK_LABEL)
    }

    /// Precedence of this rank: 1 for solemnities, up to 5 for optional memorials, `u32::MAX` for unknown ranks
    pub fn precedence(&self) -> u32 {
        RANK_TABLE.iter()
            .find(|(rank, _, _)| rank == self)
            .map(|(_, _, p)| *p)
            .unwrap_or(u32::MAX)
    }

    pub fn is_memorial(&self) -> bool {
        matches!(self, Rank::ObligatoryMemorial | Rank::OptionalMemorial)
    }
}


/// Liturgical color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiturgicalColor {
    White,
    Red,
    Green,
    Purple,
    Pink,
    Unknown,
}

const COLOR_LABELS: &[(LiturgicalColor, &str)] = &[
    (LiturgicalColor::White, "Biały"),
    (LiturgicalColor::Red, "Czerwony"),
    (LiturgicalColor::Green, "Zielony"),
    (LiturgicalColor::Purple, "Fioletowy"),
    (LiturgicalColor::Pink, "Różowy"),
    (LiturgicalColor::Unknown, "Nieznany"),
];

impl LiturgicalColor {
    pub fn from_label(label: &str) -> Self {
        COLOR_LABELS.iter()
            .find(|(_, l)| *l == label)
            .map(|(color, _)| *color)
            .unwrap_or(LiturgicalColor::Unknown)
    }

    pub fn label(&self) -> &'static str {
        COLOR_LABELS.iter()
            .find(|(color, _)| color == self)
            .map(|(_, l)| *l)
            .unwrap_or("Nieznany")
    }
}

impl Display for LiturgicalColor {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}


/// A single occurrence of a liturgical event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredEvent", try_from = "StoredEvent")]
pub struct Event {
    name: String,
    date: NaiveDate,
    sunday_cycle: Option<SundayCycle>,
    weekday_cycle: Option<WeekdayCycle>,
    rank: Rank,
    color: LiturgicalColor,
}

impl Event {
    pub fn new<S: ToString>(
        name: S,
        date: NaiveDate,
        sunday_cycle: Option<SundayCycle>,
        weekday_cycle: Option<WeekdayCycle>,
        rank: Rank,
        color: LiturgicalColor,
    ) -> Self {
        Self {
            name: name.to_string(),
            date, sunday_cycle, weekday_cycle, rank, color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sunday_cycle(&self) -> Option<SundayCycle> {
        self.sunday_cycle
    }

    pub fn weekday_cycle(&self) -> Option<WeekdayCycle> {
        self.weekday_cycle
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn color(&self) -> LiturgicalColor {
        self.color
    }

    /// Identifier of the liturgical year this event belongs to, e.g. `"B, 2"`.
    ///
    /// `None` when either cycle is missing
    pub fn year_id(&self) -> Option<String> {
        match (self.sunday_cycle, self.weekday_cycle) {
            (Some(letter), Some(number)) => Some(format!("{}, {}", letter, number)),
            _ => None,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.name)
    }
}


/// The on-disk representation of an [`Event`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    #[serde(default)]
    pub name: String,
    pub data: String,
    #[serde(default)]
    pub rok_litera: String,
    #[serde(default)]
    pub rok_cyfra: String,
    #[serde(default)]
    pub typ: String,
    #[serde(default)]
    pub kolor: String,
}

impl From<Event> for StoredEvent {
    fn from(event: Event) -> Self {
        Self {
            name: event.name,
            data: event.date.format(DATE_FORMAT).to_string(),
            rok_litera: event.sunday_cycle.map(|c| c.as_str()).unwrap_or("").to_string(),
            rok_cyfra: event.weekday_cycle.map(|c| c.as_str()).unwrap_or("").to_string(),
            typ: event.rank.label().to_string(),
            kolor: event.color.label().to_string(),
        }
    }
}

impl TryFrom<StoredEvent> for Event {
    type Error = chrono::ParseError;

    fn try_from(stored: StoredEvent) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(stored.data.trim(), DATE_FORMAT)?;
        Ok(Self {
            name: stored.name,
            date,
            sunday_cycle: SundayCycle::parse(&stored.rok_litera),
            weekday_cycle: WeekdayCycle::parse(&stored.rok_cyfra),
            rank: Rank::from_label(&stored.typ),
            color: LiturgicalColor::from_label(&stored.kolor),
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rank_tables() {
        assert_eq!(Rank::from_code("U"), Rank::Solemnity);
        assert_eq!(Rank::from_code("Ś"), Rank::Feast);
        assert_eq!(Rank::from_code("W"), Rank::ObligatoryMemorial);
        assert_eq!(Rank::from_code("w"), Rank::OptionalMemorial);
        assert_eq!(Rank::from_code("w*"), Rank::OptionalMemorial);
        assert_eq!(Rank::from_code("X"), Rank::Weekday);

        assert_eq!(Rank::Solemnity.precedence(), 1);
        assert_eq!(Rank::Weekday.precedence(), 4);
        assert_eq!(Rank::OptionalMemorial.precedence(), 5);
        assert_eq!(Rank::Unknown.precedence(), u32::MAX);

        assert_eq!(Rank::from_label(""), Rank::Weekday);
        assert_eq!(Rank::from_label("Święto"), Rank::Feast);
        assert_eq!(Rank::from_label("something else"), Rank::Unknown);
    }

    #[test]
    fn test_stored_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let event = Event::new("Świętej Bożej Rodzicielki Maryi", date,
            Some(SundayCycle::B), Some(WeekdayCycle::Two), Rank::Solemnity, LiturgicalColor::White);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "Świętej Bożej Rodzicielki Maryi");
        assert_eq!(json["data"], "01-01-2024");
        assert_eq!(json["rok_litera"], "B");
        assert_eq!(json["rok_cyfra"], "2");
        assert_eq!(json["typ"], "Uroczystość");
        assert_eq!(json["kolor"], "Biały");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_missing_cycles() {
        let stored = StoredEvent {
            name: "Dzień".to_string(),
            data: "02-01-2024".to_string(),
            rok_litera: "null".to_string(),
            rok_cyfra: "N/A".to_string(),
            typ: "".to_string(),
            kolor: "Seledynowy".to_string(),
        };
        let event = Event::try_from(stored).unwrap();
        assert_eq!(event.sunday_cycle(), None);
        assert_eq!(event.weekday_cycle(), None);
        assert_eq!(event.year_id(), None);
        assert_eq!(event.color(), LiturgicalColor::Unknown);

        let invalid = StoredEvent { data: "2024-01-02".to_string(), ..StoredEvent::default() };
        assert!(Event::try_from(invalid).is_err());
    }
}
