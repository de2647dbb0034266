//! Return periods and filing due dates

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::GstConfig;
use crate::types::{GstError, GstResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// GST return forms with a monthly due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnType {
    /// Statement of outward supplies
    #[serde(rename = "GSTR1")]
    Gstr1,
    /// Summary return with tax payment
    #[serde(rename = "GSTR3B")]
    Gstr3B,
}

impl ReturnType {
    /// Day of the month after the period on which this return is due
    pub fn due_day(&self, config: &GstConfig) -> u32 {
        match self {
            ReturnType::Gstr1 => config.gstr1_due_day,
            ReturnType::Gstr3B => config.gstr3b_due_day,
        }
    }
}

impl FromStr for ReturnType {
    type Err = GstError;

    /// Accepts `GSTR1`, `GSTR-1`, `GSTR3B`, `GSTR-3B` in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "").as_str() {
            "GSTR1" => Ok(ReturnType::Gstr1),
            "GSTR3B" => Ok(ReturnType::Gstr3B),
            _ => Err(GstError::InvalidPeriod(format!(
                "unknown return type '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Gstr1 => f.write_str("GSTR1"),
            ReturnType::Gstr3B => f.write_str("GSTR3B"),
        }
    }
}

/// A monthly return period, written `MMYYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReturnPeriod {
    // year first so the derived ordering is chronological
    year: i32,
    month: u32,
}

impl ReturnPeriod {
    /// Create a period, checking the month and the configured year range
    pub fn new(month: u32, year: i32, config: &GstConfig) -> GstResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(GstError::InvalidPeriod(format!(
                "month {} is outside 01-12",
                month
            )));
        }

        if !(config.min_period_year..=config.max_period_year).contains(&year) {
            return Err(GstError::InvalidPeriod(format!(
                "year {} is outside {}-{}",
                year, config.min_period_year, config.max_period_year
            )));
        }

        Ok(Self { year, month })
    }

    /// Parse an `MMYYYY` string
    pub fn parse(period: &str, config: &GstConfig) -> GstResult<Self> {
        if period.len() != 6 || !period.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GstError::InvalidPeriod(format!(
                "'{}' is not in MMYYYY form",
                period
            )));
        }

        // all six bytes are ASCII digits
        let month: u32 = period[..2]
            .parse()
            .map_err(|_| GstError::InvalidPeriod(period.to_string()))?;
        let year: i32 = period[2..]
            .parse()
            .map_err(|_| GstError::InvalidPeriod(period.to_string()))?;

        Self::new(month, year, config)
    }

    /// Period a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Period containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// First day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the period
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-readable label, e.g. "July 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// Financial year (April to March) the period belongs to, e.g. "2025-26"
    pub fn financial_year(&self) -> String {
        let start = if self.month >= 4 {
            self.year
        } else {
            self.year - 1
        };
        format!("{}-{:02}", start, (start + 1) % 100)
    }

    /// Due date of a return for this period
    pub fn due_date(&self, return_type: ReturnType, config: &GstConfig) -> Option<NaiveDate> {
        let following = self.next();
        NaiveDate::from_ymd_opt(
            following.year,
            following.month,
            return_type.due_day(config),
        )
    }
}

impl FromStr for ReturnPeriod {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReturnPeriod::parse(s, &GstConfig::default())
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:04}", self.month, self.year)
    }
}

impl Serialize for ReturnPeriod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReturnPeriod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Period validation and due dates under a configuration
#[derive(Debug, Clone, Default)]
pub struct ReturnCalendar {
    config: GstConfig,
}

impl ReturnCalendar {
    pub fn new(config: GstConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, period: &str) -> GstResult<ReturnPeriod> {
        ReturnPeriod::parse(period, &self.config)
    }

    pub fn validate_period(&self, period: &str) -> bool {
        self.parse(period).is_ok()
    }

    /// Due date, or `None` for an invalid period
    pub fn due_date(&self, period: &str, return_type: ReturnType) -> Option<NaiveDate> {
        self.parse(period)
            .ok()
            .and_then(|p| p.due_date(return_type, &self.config))
    }

    /// Whether the return was due before `today`
    ///
    /// Filing on the due date itself is on time. An invalid period is never
    /// reported overdue; check [`validate_period`](Self::validate_period) first.
    pub fn is_overdue_on(&self, period: &str, return_type: ReturnType, today: NaiveDate) -> bool {
        self.due_date(period, return_type)
            .is_some_and(|due| today > due)
    }

    /// Days from `today` to the due date; negative once overdue
    pub fn days_until_due(
        &self,
        period: &str,
        return_type: ReturnType,
        today: NaiveDate,
    ) -> Option<i64> {
        self.due_date(period, return_type)
            .map(|due| (due - today).num_days())
    }
}

/// Whether `period` is a valid `MMYYYY` return period
pub fn validate_period(period: &str) -> bool {
    ReturnCalendar::default().validate_period(period)
}

/// GSTR-1 is due on the 11th and GSTR-3B on the 20th of the following month
pub fn get_return_due_date(period: &str, return_type: ReturnType) -> Option<NaiveDate> {
    ReturnCalendar::default().due_date(period, return_type)
}

/// Whether the return is overdue as of today's local date
pub fn is_return_overdue(period: &str, return_type: ReturnType) -> bool {
    is_return_overdue_on(period, return_type, Local::now().date_naive())
}

/// Whether the return is overdue as of `today`
pub fn is_return_overdue_on(period: &str, return_type: ReturnType, today: NaiveDate) -> bool {
    ReturnCalendar::default().is_overdue_on(period, return_type, today)
}
