//! Liturgical seasons, and where a given date falls in them

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::cycles::first_sunday_of_advent;
use crate::event::LiturgicalColor;

/// A liturgical season
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Advent,
    ChristmasTime,
    OrdinaryTime,
    Lent,
    Triduum,
    EasterTime,
}

impl Season {
    /// Liturgical color of an ordinary weekday in this season
    pub fn color(&self) -> LiturgicalColor {
        match self {
            Season::Advent | Season::Lent => LiturgicalColor::Purple,
            Season::ChristmasTime | Season::EasterTime => LiturgicalColor::White,
            Season::OrdinaryTime => LiturgicalColor::Green,
            Season::Triduum => LiturgicalColor::Unknown,
        }
    }

    /// Genitive name of the season, as used in the names of weekdays
    fn period_name(&self) -> &'static str {
        match self {
            Season::Advent => "Adwentu",
            Season::ChristmasTime => "Okresu Narodzenia Pańskiego",
            Season::OrdinaryTime => "Okresu Zwykłego",
            Season::Lent => "Wielkiego Postu",
            Season::Triduum => "Triduum Paschalnego",
            Season::EasterTime => "Okresu Wielkanocnego",
        }
    }
}

/// Where a date falls in the liturgical year
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayContext {
    pub date: NaiveDate,
    pub season: Season,
    /// Week of the season. 0 for the days after Ash Wednesday, for the Triduum and for Christmas time
    pub week: u32,
}

/// Easter Sunday of a year (Gregorian computus)
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Sunday of the Baptism of the Lord: the first Sunday after January 6th
pub fn baptism_of_the_lord(year: i32) -> Option<NaiveDate> {
    let epiphany = NaiveDate::from_ymd_opt(year, 1, 6)?;
    let days_to_sunday = 7 - epiphany.weekday().num_days_from_sunday();
    Some(epiphany + Duration::days(i64::from(days_to_sunday)))
}

fn weeks_since(date: NaiveDate, start: NaiveDate) -> u32 {
    ((date - start).num_days() / 7) as u32 + 1
}

/// Find the season and the week of a date
pub fn day_context(date: NaiveDate) -> Option<DayContext> {
    let year = date.year();
    let christmas = NaiveDate::from_ymd_opt(year, 12, 25)?;
    let advent = first_sunday_of_advent(year)?;
    let baptism = baptism_of_the_lord(year)?;
    let easter = easter_sunday(year)?;
    let ash_wednesday = easter - Duration::days(46);
    let first_sunday_of_lent = ash_wednesday + Duration::days(4);
    let holy_thursday = easter - Duration::days(3);
    let pentecost = easter + Duration::days(49);

    let (season, week) = if date >= christmas || date <= baptism {
        (Season::ChristmasTime, 0)
    } else if date >= advent {
        (Season::Advent, weeks_since(date, advent))
    } else if date < ash_wednesday {
        (Season::OrdinaryTime, weeks_since(date, baptism))
    } else if date < first_sunday_of_lent {
        (Season::Lent, 0)
    } else if date < holy_thursday {
        (Season::Lent, weeks_since(date, first_sunday_of_lent))
    } else if date < easter {
        (Season::Triduum, 0)
    } else if date <= pentecost {
        (Season::EasterTime, weeks_since(date, easter))
    } else {
        // The last week before Advent is the 34th week of ordinary time
        let weeks_before_advent = ((advent - date).num_days() - 1) / 7;
        (Season::OrdinaryTime, 34 - weeks_before_advent as u32)
    };

    Some(DayContext { date, season, week })
}

/// Polish name of a day of the week
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Poniedziałek",
        Weekday::Tue => "Wtorek",
        Weekday::Wed => "Środa",
        Weekday::Thu => "Czwartek",
        Weekday::Fri => "Piątek",
        Weekday::Sat => "Sobota",
        Weekday::Sun => "Niedziela",
    }
}

impl DayContext {
    /// Generic name of this day, when no celebration is known for it
    pub fn weekday_label(&self) -> String {
        let weekday = self.date.weekday();
        let day_name = weekday_name(weekday);
        let period = self.season.period_name();

        match self.season {
            Season::ChristmasTime => format!("Dzień powszedni {}", period),
            Season::Triduum => "Triduum Paschalne".to_string(),
            Season::Advent if weekday != Weekday::Sun && self.date.month() == 12 && self.date.day() >= 17 => {
                format!("{} grudnia - Dzień powszedni w okresie Adwentu", self.date.day())
            },
            Season::Lent if self.week == 0 => {
                if weekday == Weekday::Wed {
                    "Środa Popielcowa".to_string()
                } else {
                    format!("{} po Popielcu", day_name)
                }
            },
            Season::EasterTime if self.week == 1 => {
                if weekday == Weekday::Sun {
                    "Niedziela Zmartwychwstania Pańskiego".to_string()
                } else {
                    format!("{} w Oktawie Wielkanocy", day_name)
                }
            },
            _ => format!("{} {} {}", self.week, day_name, period),
        }
    }
}
