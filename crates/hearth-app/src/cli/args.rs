use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A command-line date-time that may omit its time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LooseDateTime {
    DateOnly(NaiveDate),
    Floating(NaiveDateTime),
}

impl LooseDateTime {
    /// The instant itself, or the start of the day.
    #[must_use]
    pub fn floor(self) -> NaiveDateTime {
        match self {
            Self::DateOnly(date) => date.and_time(NaiveTime::MIN),
            Self::Floating(dt) => dt,
        }
    }

    /// The instant itself, or the last second of the day.
    #[must_use]
    pub fn ceil(self) -> NaiveDateTime {
        match self {
            Self::DateOnly(date) => date
                .and_hms_opt(23, 59, 59)
                .unwrap_or_else(|| date.and_time(NaiveTime::MIN)),
            Self::Floating(dt) => dt,
        }
    }
}

impl FromStr for LooseDateTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        {
            Ok(Self::Floating(dt))
        } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(Self::DateOnly(date))
        } else {
            Err(format!(
                "Invalid date-time '{s}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or YYYY-MM-DDTHH:MM:SS"
            ))
        }
    }
}
