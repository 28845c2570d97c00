//! English and Arabic strings for the booking widget.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Display language. Parsed case-insensitively from `en` / `ar`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Lang {
    #[default]
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

/// Sunday first.
const WEEKDAYS_EN: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

const WEEKDAYS_AR: [&str; 7] = [
    "الأحد", "الإثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت",
];

/// Column headers are the first three characters of the weekday name in both languages.
const HEADER_CHARS: usize = 3;

impl Lang {
    pub fn direction(self) -> Direction {
        match self {
            Lang::En => Direction::Ltr,
            Lang::Ar => Direction::Rtl,
        }
    }

    /// `month` is 1-based; out-of-range months yield an empty string.
    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Lang::En => &MONTHS_EN,
            Lang::Ar => &MONTHS_AR,
        };
        month
            .checked_sub(1)
            .and_then(|i| names.get(i as usize))
            .copied()
            .unwrap_or_default()
    }

    fn weekday_names(self) -> &'static [&'static str; 7] {
        match self {
            Lang::En => &WEEKDAYS_EN,
            Lang::Ar => &WEEKDAYS_AR,
        }
    }

    /// Calendar column headers, Sunday first.
    pub fn weekday_headers(self) -> Vec<String> {
        self.weekday_names()
            .iter()
            .map(|name| name.chars().take(HEADER_CHARS).collect())
            .collect()
    }

    /// Caption above the calendar, e.g. "June 2024".
    pub fn month_caption(self, year: i32, month: u32) -> String {
        format!("{} {}", self.month_name(month), self.number(year))
    }

    /// Full date shown at the top of the time view.
    ///
    /// English: `Saturday, June 15, 2024`. Arabic: `السبت، ١٥ يونيو ٢٠٢٤`.
    pub fn long_date(self, date: NaiveDate) -> String {
        let weekday = self.weekday_names()[date.weekday().num_days_from_sunday() as usize];
        let month = self.month_name(date.month());
        match self {
            Lang::En => format!("{}, {} {}, {}", weekday, month, date.day(), date.year()),
            Lang::Ar => format!(
                "{}، {} {} {}",
                weekday,
                self.number(date.day()),
                month,
                self.number(date.year())
            ),
        }
    }

    /// Arabic renders numerals with Arabic-Indic digits.
    fn number(self, n: impl ToString) -> String {
        let s = n.to_string();
        match self {
            Lang::En => s,
            Lang::Ar => s.chars().map(arabic_indic_digit).collect(),
        }
    }

    pub fn captions(self, meeting_duration_min: u32) -> Captions {
        match self {
            Lang::En => Captions {
                select_day: "Select a Day",
                select_time: "Select a Time",
                duration: format!("Duration: {} min", meeting_duration_min),
                timezone: "Time zone",
            },
            Lang::Ar => Captions {
                select_day: "اختر يوماً",
                select_time: "اختر وقتاً",
                duration: format!("المدة: {} دقيقة", meeting_duration_min),
                timezone: "المنطقة الزمنية",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language {0:?}, expected \"en\" or \"ar\"")]
pub struct ParseLangError(String);

impl FromStr for Lang {
    type Err = ParseLangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ar" => Ok(Lang::Ar),
            _ => Err(ParseLangError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Lang {
    type Error = ParseLangError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Static headings of the booking widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Captions {
    pub select_day: &'static str,
    pub select_time: &'static str,
    pub duration: String,
    pub timezone: &'static str,
}

/// How a timezone label reads in the picker: `America/New_York` → `America/New York`.
pub fn timezone_display(tz: &str) -> String {
    tz.replace('_', " ")
}

fn arabic_indic_digit(c: char) -> char {
    match c.to_digit(10) {
        Some(d) => char::from_u32('\u{0660}' as u32 + d).unwrap_or(c),
        None => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_lang() {
        assert_eq!("en".parse::<Lang>(), Ok(Lang::En));
        assert_eq!(" AR ".parse::<Lang>(), Ok(Lang::Ar));
        assert_eq!("fr".parse::<Lang>(), Err(ParseLangError("fr".into())));
        assert_eq!(Lang::default(), Lang::En);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Lang::En.direction(), Direction::Ltr);
        assert_eq!(Lang::Ar.direction(), Direction::Rtl);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Lang::En.month_name(1), "January");
        assert_eq!(Lang::En.month_name(12), "December");
        assert_eq!(Lang::Ar.month_name(6), "يونيو");
        assert_eq!(Lang::En.month_name(0), "");
        assert_eq!(Lang::En.month_name(13), "");
    }

    #[test]
    fn test_weekday_headers_english() {
        assert_eq!(
            Lang::En.weekday_headers(),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
    }

    #[test]
    fn test_weekday_headers_arabic_truncated() {
        let headers = Lang::Ar.weekday_headers();
        assert_eq!(headers.len(), 7);
        assert_eq!(headers[0], "الأ");
        assert!(headers.iter().all(|h| h.chars().count() == 3));
    }

    #[test]
    fn test_month_caption() {
        assert_eq!(Lang::En.month_caption(2024, 6), "June 2024");
        assert_eq!(Lang::Ar.month_caption(2024, 6), "يونيو ٢٠٢٤");
    }

    #[test]
    fn test_long_date_english() {
        assert_eq!(Lang::En.long_date(date(2024, 6, 15)), "Saturday, June 15, 2024");
    }

    #[test]
    fn test_long_date_arabic() {
        assert_eq!(Lang::Ar.long_date(date(2024, 6, 15)), "السبت، ١٥ يونيو ٢٠٢٤");
    }

    #[test]
    fn test_captions_switch_language() {
        let en = Lang::En.captions(30);
        assert_eq!(en.select_day, "Select a Day");
        assert_eq!(en.duration, "Duration: 30 min");
        let ar = Lang::Ar.captions(45);
        assert_eq!(ar.select_time, "اختر وقتاً");
        assert_eq!(ar.duration, "المدة: 45 دقيقة");
    }

    #[test]
    fn test_timezone_display() {
        assert_eq!(timezone_display("America/New_York"), "America/New York");
        assert_eq!(timezone_display("UTC+02:00"), "UTC+02:00");
    }

    #[test]
    fn test_lang_serde() {
        assert_eq!(serde_json::to_string(&Lang::Ar).unwrap(), "\"ar\"");
        let lang: Lang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Lang::En);
        let lang: Lang = serde_json::from_str("\"AR\"").unwrap();
        assert_eq!(lang, Lang::Ar);
        assert!(serde_json::from_str::<Lang>("\"fr\"").is_err());
    }
}
