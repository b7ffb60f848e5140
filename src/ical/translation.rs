//! Mapping of the feed's event names to the names used in the rest of the application

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Names that are renamed as a whole
const FIXED_NAMES: &[(&str, &str)] = &[
    ("Świętej Bożej Rodzicielki Maryi", "1 stycznia - Uroczystość Świętej Bożej Rodzicielki Maryi"),
    ("Świętych Bazylego Wielkiego i Grzegorza z Nazjanzu, biskupów i doktorów Kościoła", "2 stycznia - Dzień powszedni w Okresie Narodzenia Pańskiego"),
    ("Objawienie Pańskie", "6 stycznia - Uroczystość Objawienia Pańskiego"),
    ("Chrzest Pański", "Niedziela Chrztu Pańskiego"),
    ("II Niedziela po Bożym Narodzeniu", "2 Niedziela po Narodzeniu Pańskim"),
    ("Świętych biskupów Tymoteusza i Tytusa", "26 stycznia - św. biskupów Tymoteusza i Tytusa"),
    ("Ofiarowanie Pańskie", "2 lutego - Ofiarowanie Pańskie"),
    ("Świętych Cyryla, mnicha i Metodego, biskupa", "14 lutego - św. Cyryla i Metodego, patronów Europy"),
    ("Św. Kazimierza", "4 marca - św. Kazimierza królewicza"),
    ("Św. Józefa, Oblubieńca Najświętszej Maryi Panny", "19 marca - Uroczystość św. Józefa, Oblubieńca NMP"),
    ("Zwiastowanie Pańskie", "25 marca - Uroczystość Zwiastowania Pańskiego"),
    ("Św. Wojciecha, biskupa i męczennika", "23 kwietnia - Uroczystość św. Wojciecha, biskupa i męczennika, głównego patrona Polski"),
    ("Św. Marka, Ewangelisty", "25 kwietnia - św. Marka Ewangelisty"),
    ("Św. Katarzyny Sieneńskiej, dziewicy i doktora Kościoła", "29 kwietnia - św. Katarzyny ze Sieny, dziewicy i doktora Kościoła"),
    ("Św. Józefa, rzemieślnika", "1 maja - św. Józefa rzemieślnika"),
    ("Najświętszej Maryi Panny, Królowej Polski", "3 maja - Uroczystość NMP Królowej Polski"),
    ("Świętych Apostołów Filipa i Jakuba", "6 maja - św. Apostołów Filipa i Jakuba"),
    ("Św. Stanisława, biskupa i męczennika", "8 maja - Uroczystość św. Stanisława, głównego patrona Polski"),
    ("Św. Macieja, Apostoła", "14 maja - św. Macieja Apostoła"),
    ("Św. Andrzeja Boboli, prezbitera i męczennika", "16 maja - św. Andrzeja Boboli"),
    ("Św. Barnaby, Apostoła", "11 czerwca - św. Barnaby Apostoła"),
    ("Narodzenie św. Jana Chrzciciela", "24 czerwca - Uroczystość Narodzenia św. Jana Chrzciciela"),
    ("Świętych Apostołów Piotra i Pawła", "29 czerwca - Uroczystość św. Apostołów Piotra i Pawła"),
    ("Św. Tomasza, Apostoła", "3 lipca - św. Tomasza Apostoła"),
    ("Św. Benedykta, opata", "11 lipca - św. Benedykta, patrona Europy"),
    ("Św. Marii Magdaleny", "22 lipca - Święto św. Marii Magdaleny"),
    ("Św. Brygidy, zakonnicy", "23 lipca - Święto św. Brygidy, patronki Europy"),
    ("Św. Jakuba, Apostoła", "25 lipca - św. Jakuba Apostoła"),
    ("Świętych Marty, Marii i Łazarza", "29 lipca - św. Marty"),
    ("Przemienienie Pańskie", "6 sierpnia - Święto Przemienienia Pańskiego"),
    ("Św. Wawrzyńca, diakona i męczennika", "10 sierpnia - św. Wawrzyńca"),
    ("Św. Maksymiliana Marii Kolbego, prezbitera i męczennika", "14 sierpnia - św. Maksymiliana Marii Kolbego"),
    ("Wniebowzięcie Najświętszej Maryi Panny", "15 sierpnia - Uroczystość Wniebowzięcia NMP"),
    ("Najświętszej Maryi Panny, Królowej", "22 sierpnia - NMP Królowej Polski"),
    ("Św. Bartłomieja, Apostoła", "24 sierpnia - Święto św. Bartłomieja, Apostoła"),
    ("Najświętszej Maryi Panny Częstochowskiej", "26 sierpnia - Uroczystość NMP Częstochowskiej"),
    ("Męczeństwo św. Jana Chrzciciela", "29 sierpnia - Męczeństwo św. Jana Chrzciciela"),
    ("Narodzenie Najświętszej Maryi Panny", "8 września - Narodzenie NMP"),
    ("Podwyższenie Krzyża Świętego", "14 września - Święto Podwyższenia Krzyża Świętego"),
    ("Najświętszej Maryi Panny Bolesnej", "15 września - NMP Bolesnej"),
    ("Św. Stanisława Kostki, zakonnika", "18 września - św. Stanisława Kostki, zakonnika, patrona Polski"),
    ("Św. Mateusza, Apostoła i Ewangelisty", "21 września - Święto św. Mateusza, Apostoła i Ewangelisty"),
    ("Świętych Archaniołów Michała, Gabriela i Rafała", "29 września - Święto św. Archaniołów Michała, Gabriela i Rafała"),
    ("Świętych Aniołów Stróżów", "2 października - Świętych Aniołów Stróżów"),
    ("Świętych Apostołów Szymona i Judy Tadeusza", "28 października - św. Apostołów Szymona i Judy Tadeusza"),
    ("Wszystkich Świętych", "1 listopada - Uroczystość Wszystkich Świętych"),
    ("Wspomnienie wszystkich wiernych zmarłych", "2 listopada - Wspomnienie Wszystkich Wiernych Zmarłych"),
    ("Rocznica poświęcenia Bazyliki Laterańskiej", "9 listopada - Rocznica poświęcenia Bazyliki Laterańskiej"),
    ("Ofiarowanie Najświętszej Maryi Panny", "21 listopada - Ofiarowanie Najświętszej Maryi Panny"),
    ("Św. Andrzeja, Apostoła", "30 listopada - św. Andrzeja Apostoła"),
    ("Niepokalane poczęcie Najświętszej Maryi Panny", "8 grudnia - Uroczystość Niepokalanego Poczęcia NMP"),
    ("Dzień adwentu (17 grudnia)", "17 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (18 grudnia)", "18 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (19 grudnia)", "19 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (20 grudnia)", "20 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (21 grudnia)", "21 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (22 grudnia)", "22 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (23 grudnia)", "23 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Dzień adwentu (24 grudnia)", "24 grudnia - Dzień powszedni w okresie Adwentu"),
    ("Narodzenie Pańskie", "25 grudnia - Uroczystość Narodzenia Pańskiego"),
    ("Św. Szczepana, pierwszego męczennika", "26 grudnia - Święto św. Szczepana, pierwszego męczennika"),
    ("Świętych Młodziaków, męczenników", "28 grudnia - Święto Świętych Młodzianków, męczenników"),
    ("V dzień w oktawie Narodzenia Pańskiego", "29 grudnia - Piąty dzień w oktawie Narodzenia Pańskiego"),
    ("VI dzień w oktawie Narodzenia Pańskiego", "30 grudnia - Szósty dzień w oktawie Narodzenia Pańskiego"),
    ("VII dzień w oktawie Narodzenia Pańskiego", "31 grudnia - Siódmy dzień w oktawie Narodzenia Pańskiego"),
    ("Świętej Rodziny Jezusa, Maryi i Józefa", "Niedziela w oktawie Narodzenia Pańskiego - Święto Świętej Rodziny"),
    ("III Niedziela Adwentu „Gaudete”", "3 Niedziela Adwentu"),
    ("IV Niedziela Wielkiego Postu „Laetare”", "4 Niedziela Wielkiego Postu"),
    ("Wielki Czwartek: Wieczerzy Pańskiej", "Wielki Czwartek"),
    ("Wielki Piątek: Męki Pańskiej", "Wielki Piątek Męki Pańskiej"),
    ("Wielka Sobota", "Wigilia Paschalna"),
    ("II Niedziela Wielkanocna czyli Miłosierdzia Bożego", "2 Niedziela Okresu Wielkanocnego"),
    ("Wniebowstąpienie Pańskie", "Uroczystość Wniebowstąpienia Pańskiego"),
    ("Niedziela Zesłania Ducha Świętego", "Uroczystość Zesłania Ducha Świętego"),
    ("Najświętszej Maryi Panny, Matki Kościoła", "Wspomnienie NMP Matki Kościoła"),
    ("Jezusa Chrystusa, Najwyższego i Wiecznego Kapłana", "Święto Jezusa Chrystusa, Najwyższego i Wiecznego Kapłana"),
    ("Najświętszej Trójcy", "Uroczystość Najświętszej Trójcy"),
    ("Najświętszego Ciała i Krwi Chrystusa", "Uroczystość Najświętszego Ciała i Krwi Chrystusa"),
    ("Najświętszego Serca Pana Jezusa", "Uroczystość Najświętszego Serca Pana Jezusa"),
    ("Niepokalanego Serca Najświętszej Maryi Panny", "Wspomnienie Niepokalanego Serca NMP"),
    ("Jezusa Chrystusa, Króla Wszechświata", "Uroczystość Jezusa Chrystusa, Króla Wszechświata"),
];

/// Lowercase season suffix of weekday names ("... tygodnia zwykłego") and its target name
const WEEK_SUFFIXES: &[(&str, &str)] = &[
    ("adwentu", "Adwentu"),
    ("wielkiego postu", "Wielkiego Postu"),
    ("wielkanocnego", "Okresu Wielkanocnego"),
    ("zwykłego", "Okresu Zwykłego"),
];

/// Lowercase season suffix of Sunday names ("... Niedziela Zwykła") and its target name
const SUNDAY_SUFFIXES: &[(&str, &str)] = &[
    ("adwentu", "Adwentu"),
    ("wielkiego postu", "Wielkiego Postu"),
    ("wielkanocna", "Okresu Wielkanocnego"),
    ("zwykła", "Okresu Zwykłego"),
];

const WEEKDAYS: &[&str] = &["Poniedziałek", "Wtorek", "Środa", "Czwartek", "Piątek", "Sobota"];

static POLISH: Lazy<TranslationTable> = Lazy::new(|| {
    let mut table = TranslationTable::empty();
    for (from, to) in FIXED_NAMES {
        table.insert(*from, *to);
    }
    table.numbered_weeks = true;
    table
});

/// Renames the events of the feed.
///
/// A table looks up exact names first. When enabled, names of ordinary weekdays and Sundays written with
/// Roman numerals (e.g. `Wtorek X tygodnia zwykłego`, `XIV Niedziela Zwykła`) are then rewritten to their
/// numbered form (`10 Wtorek Okresu Zwykłego`, `14 Niedziela Okresu Zwykłego`).
/// Anything else is kept unchanged.
#[derive(Clone, Debug, Default)]
pub struct TranslationTable {
    fixed: HashMap<String, String>,
    numbered_weeks: bool,
}

impl TranslationTable {
    /// A table that keeps every name unchanged
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default table for the Polish feed
    pub fn polish() -> Self {
        POLISH.clone()
    }

    /// Add (or replace) an exact-name entry
    pub fn insert<S: ToString, T: ToString>(&mut self, from: S, to: T) {
        self.fixed.insert(from.to_string(), to.to_string());
    }

    pub fn len(&self) -> usize {
        self.fixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && !self.numbered_weeks
    }

    pub fn translate(&self, name: &str) -> String {
        if let Some(target) = self.fixed.get(name) {
            return target.clone();
        }
        if self.numbered_weeks {
            if let Some(target) = translate_weekday(name).or_else(|| translate_sunday(name)) {
                return target;
            }
        }
        name.to_string()
    }
}

/// `{Day} {ROMAN} tygodnia {season}`
fn translate_weekday(name: &str) -> Option<String> {
    let mut parts = name.splitn(4, ' ');
    let day = parts.next()?;
    let week = parse_roman(parts.next()?)?;
    if parts.next()?.to_lowercase() != "tygodnia" {
        return None;
    }
    let season = season_name(WEEK_SUFFIXES, parts.next()?)?;
    let day = WEEKDAYS.iter().find(|d| **d == day)?;
    Some(format!("{} {} {}", week, day, season))
}

/// `{ROMAN} Niedziela {season}`
fn translate_sunday(name: &str) -> Option<String> {
    let mut parts = name.splitn(3, ' ');
    let week = parse_roman(parts.next()?)?;
    if parts.next()? != "Niedziela" {
        return None;
    }
    let season = season_name(SUNDAY_SUFFIXES, parts.next()?)?;
    Some(format!("{} Niedziela {}", week, season))
}

fn season_name(suffixes: &[(&str, &'static str)], suffix: &str) -> Option<&'static str> {
    let suffix = suffix.to_lowercase();
    suffixes.iter()
        .find(|(s, _)| *s == suffix)
        .map(|(_, name)| *name)
}

/// Parse a Roman numeral between 1 and 34 (the longest season has 34 weeks)
fn parse_roman(s: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut previous = 0;
    for c in s.chars().rev() {
        let value = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            _ => return None,
        };
        if value < previous {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            previous = value;
        }
    }
    if (1..=34).contains(&total) {
        Some(total)
    } else {
        None
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_roman() {
        assert_eq!(parse_roman("I"), Some(1));
        assert_eq!(parse_roman("IV"), Some(4));
        assert_eq!(parse_roman("IX"), Some(9));
        assert_eq!(parse_roman("XIV"), Some(14));
        assert_eq!(parse_roman("XXXIV"), Some(34));
        assert_eq!(parse_roman("XL"), None);
        // More subtractions than the running total
        assert_eq!(parse_roman("IIIIIIV"), None);
        assert_eq!(parse_roman("IIV"), None);
        assert_eq!(parse_roman("Wtorek"), None);
        assert_eq!(parse_roman(""), None);
    }

    #[test]
    fn test_polish_table() {
        let table = TranslationTable::polish();
        assert_eq!(table.translate("Chrzest Pański"), "Niedziela Chrztu Pańskiego");
        assert_eq!(table.translate("Wielka Sobota"), "Wigilia Paschalna");
        assert_eq!(table.translate("Wtorek X tygodnia zwykłego"), "10 Wtorek Okresu Zwykłego");
        assert_eq!(table.translate("Czwartek II Tygodnia Wielkanocnego"), "2 Czwartek Okresu Wielkanocnego");
        assert_eq!(table.translate("Sobota I tygodnia Wielkiego Postu"), "1 Sobota Wielkiego Postu");
        assert_eq!(table.translate("Środa III tygodnia Adwentu"), "3 Środa Adwentu");
        assert_eq!(table.translate("XIV Niedziela Zwykła"), "14 Niedziela Okresu Zwykłego");
        assert_eq!(table.translate("VII Niedziela Wielkanocna"), "7 Niedziela Okresu Wielkanocnego");
        assert_eq!(table.translate("I Niedziela Adwentu"), "1 Niedziela Adwentu");
        assert_eq!(table.translate("IV Niedziela Wielkiego Postu „Laetare”"), "4 Niedziela Wielkiego Postu");

        // Unknown names go through untouched
        assert_eq!(table.translate("Św. Agnieszki, dziewicy i męczennicy"), "Św. Agnieszki, dziewicy i męczennicy");
        assert_eq!(table.translate("Niedziela X tygodnia"), "Niedziela X tygodnia");
    }

    #[test]
    fn test_custom_table() {
        let mut table = TranslationTable::empty();
        assert_eq!(table.translate("Wtorek X tygodnia zwykłego"), "Wtorek X tygodnia zwykłego");

        table.insert("Chrzest Pański", "Baptism of the Lord");
        assert_eq!(table.len(), 1);
        assert_eq!(table.translate("Chrzest Pański"), "Baptism of the Lord");
    }
}
