//! Date and time heuristics.
//!
//! Recognizes the calendar layouts a loosely-typed payload commonly carries
//! (ISO-8601/RFC 3339, RFC 2822, long-form `Mon Jan 15 2024 ...` text, month
//! names, slash-separated dates) and renders dates back as ISO-8601 or long
//! form. All instants are normalized to UTC; layouts without a zone are read
//! as UTC. Precision is milliseconds.

use regex::{Captures, Regex};
use std::sync::OnceLock;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

const TIME: &str =
    r"(?:[Tt\s]\s*(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:\.(?P<frac>\d{1,9}))?)?)?";
const ZONE: &str =
    r"(?:\s*(?:GMT|UTC|UT|Z)?\s*(?P<sign>[+-])(?P<oh>\d{2}):?(?P<om>\d{2})|\s*(?P<utc>GMT|UTC|UT|Z))?";
const TAIL: &str = r"\s*(?:\([^)]*\))?\s*$";
const WEEKDAY: &str = r"(?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+)?";

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

enum MonthField {
    Numeric,
    Named,
}

struct Layout {
    regex: Regex,
    month: MonthField,
}

fn layouts() -> &'static [Layout] {
    static LAYOUTS: OnceLock<Vec<Layout>> = OnceLock::new();
    LAYOUTS.get_or_init(|| {
        let build = |head: &str, month: MonthField| Layout {
            regex: Regex::new(&format!("(?i)^{}{}{}{}", head, TIME, ZONE, TAIL)).unwrap(),
            month,
        };
        vec![
            build(r"(?P<year>\d{4})-(?P<month>\d{1,2})(?:-(?P<day>\d{1,2}))?", MonthField::Numeric),
            build(
                &format!(r"{}(?P<day>\d{{1,2}})\s+(?P<month>[a-z]{{3,9}})\.?,?\s+(?P<year>\d{{4}})", WEEKDAY),
                MonthField::Named,
            ),
            build(
                &format!(
                    r"{}(?P<month>[a-z]{{3,9}})\.?\s+(?P<day>\d{{1,2}})(?:st|nd|rd|th)?,?\s+(?P<year>\d{{4}})",
                    WEEKDAY
                ),
                MonthField::Named,
            ),
            build(r"(?P<month>\d{1,2})/(?P<day>\d{1,2})/(?P<year>\d{4})", MonthField::Numeric),
            build(r"(?P<year>\d{4})/(?P<month>\d{1,2})/(?P<day>\d{1,2})", MonthField::Numeric),
        ]
    })
}

fn time_of_day_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{2}):(\d{2}):(\d{2})\s+GMT([+-])(\d{2})(\d{2}).+$").unwrap()
    })
}

/// Parses a calendar date/time string. Returns `None` when the text is not a
/// recognizable date or names an impossible one.
pub fn parse_date(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(truncate_to_millis(date.to_offset(UtcOffset::UTC)));
    }
    layouts().iter().find_map(|layout| {
        let caps = layout.regex.captures(text)?;
        let month = match layout.month {
            MonthField::Numeric => caps.name("month")?.as_str().parse().ok()?,
            MonthField::Named => month_from_name(caps.name("month")?.as_str())?,
        };
        assemble(&caps, month)
    })
}

/// Recovers a bare time-of-day such as `10:30:00 GMT-0300 (Brasilia Time)`.
///
/// The result is anchored at 1970-01-01 in the given offset. `None` means the
/// text does not have that shape; `Some(None)` means it does but names an
/// impossible time.
pub fn parse_time_of_day(text: &str) -> Option<Option<OffsetDateTime>> {
    let caps = time_of_day_regex().captures(text)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());
    let build = || {
        let time = Time::from_hms(field(1)?, field(2)?, field(3)?).ok()?;
        let sign: i8 = if &caps[4] == "-" { -1 } else { 1 };
        let hours = i8::try_from(field(5)?).ok()? * sign;
        let minutes = i8::try_from(field(6)?).ok()? * sign;
        let offset = UtcOffset::from_hms(hours, minutes, 0).ok()?;
        Some(
            PrimitiveDateTime::new(Date::from_calendar_date(1970, Month::January, 1).ok()?, time)
                .assume_offset(offset)
                .to_offset(UtcOffset::UTC),
        )
    };
    Some(build())
}

/// `2024-01-15T10:30:00.000Z`
pub fn to_iso_string(date: &OffsetDateTime) -> Option<String> {
    date.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .ok()
}

/// `Mon Jan 15 2024 10:30:00 GMT+0000 (Coordinated Universal Time)`
pub fn to_long_string(date: &OffsetDateTime) -> String {
    date.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second] GMT+0000 (Coordinated Universal Time)"
        ))
        .unwrap_or_else(|_| "Invalid Date".to_string())
}

fn month_from_name(name: &str) -> Option<u8> {
    if name.len() < 3 {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|full| full.starts_with(&lower))
        .and_then(|i| u8::try_from(i + 1).ok())
}

fn assemble(caps: &Captures<'_>, month: u8) -> Option<OffsetDateTime> {
    let number = |name: &str, default: u32| -> Option<u32> {
        match caps.name(name) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(default),
        }
    };
    let year = i32::try_from(number("year", 0)?).ok()?;
    let day = u8::try_from(number("day", 1)?).ok()?;
    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;

    let millis = match caps.name("frac") {
        Some(m) => {
            let digits: String = m.as_str().chars().chain("00".chars()).take(3).collect();
            digits.parse::<u16>().ok()?
        }
        None => 0,
    };
    let time = Time::from_hms_milli(
        u8::try_from(number("hour", 0)?).ok()?,
        u8::try_from(number("minute", 0)?).ok()?,
        u8::try_from(number("second", 0)?).ok()?,
        millis,
    )
    .ok()?;

    let offset = match caps.name("sign") {
        Some(sign) => {
            let seconds = i32::try_from(number("oh", 0)? * 3600 + number("om", 0)? * 60).ok()?;
            let seconds = if sign.as_str() == "-" { -seconds } else { seconds };
            UtcOffset::from_whole_seconds(seconds).ok()?
        }
        None => UtcOffset::UTC,
    };

    Some(PrimitiveDateTime::new(date, time).assume_offset(offset).to_offset(UtcOffset::UTC))
}

fn truncate_to_millis(date: OffsetDateTime) -> OffsetDateTime {
    date.replace_millisecond(date.millisecond()).unwrap_or(date)
}
