use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    /// Accepts the single-letter codes used by the dataset as well as full names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "F" | "f" | "Female" | "female" => Ok(Gender::Female),
            "M" | "m" | "Male" | "male" => Ok(Gender::Male),
            other => Err(CoreError::InvalidInput(
                "gender".to_string(),
                format!("unrecognized value '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls how month-grouped metrics bucket order dates.
///
/// `CalendarMonth` reproduces the source reports, which group by month name
/// only and therefore merge same-named months from different years.
/// `YearMonth` keeps years apart and is the mode to use for multi-year data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthGrouping {
    #[default]
    CalendarMonth,
    YearMonth,
}

impl MonthGrouping {
    pub fn bucket(&self, date: NaiveDate) -> MonthBucket {
        match self {
            MonthGrouping::CalendarMonth => MonthBucket {
                year: None,
                month: date.month(),
            },
            MonthGrouping::YearMonth => MonthBucket {
                year: Some(date.year()),
                month: date.month(),
            },
        }
    }
}

impl FromStr for MonthGrouping {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calendar-month" => Ok(MonthGrouping::CalendarMonth),
            "year-month" => Ok(MonthGrouping::YearMonth),
            other => Err(CoreError::InvalidInput(
                "month_grouping".to_string(),
                format!("expected 'calendar-month' or 'year-month', got '{}'", other),
            )),
        }
    }
}

/// The key a month-grouped metric groups by. `year` is `None` under
/// `MonthGrouping::CalendarMonth`. Buckets sort chronologically via the
/// derived ordering (year first, then month number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: Option<i32>,
    pub month: u32,
}

impl MonthBucket {
    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }

    /// The label used in result tables: "February" or "2023-02" depending on
    /// the grouping mode that produced this bucket.
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{:04}-{:02}", year, self.month),
            None => self.month_name().to_string(),
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
