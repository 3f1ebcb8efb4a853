use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").ok()
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn first_of_next_month(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(d)
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(mut d) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return out;
    };

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

pub fn month_dates(first: NaiveDate) -> Vec<NaiveDate> {
    all_days_of_month(first.year(), first.month())
}

pub fn current_month() -> NaiveDate {
    first_of_month(today())
}

/// Parse a comma separated list of `YYYY-MM-DD` dates.
pub fn parse_date_list(s: &str) -> Result<Vec<NaiveDate>, String> {
    s.split(',')
        .filter(|p| !p.trim().is_empty())
        .map(|p| parse_date(p).ok_or_else(|| p.trim().to_string()))
        .collect()
}

/// Half-open date range `[start, end)` used for repository listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn month_of(d: NaiveDate) -> Self {
        let start = first_of_month(d);
        Self {
            start,
            end: first_of_next_month(start),
        }
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        d >= self.start && d < self.end
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// First day of the calendar week containing `d`.
    pub fn week_of(&self, d: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => d.weekday().num_days_from_sunday(),
            WeekStart::Monday => d.weekday().num_days_from_monday(),
        };
        d.checked_sub_signed(Duration::days(i64::from(offset)))
            .unwrap_or(d)
    }
}

pub fn weekday_abbrev(d: NaiveDate) -> &'static str {
    match d.weekday() {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}
