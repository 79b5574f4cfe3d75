//! Relative reporting windows.
//!
//! A [`Period`] is anchored to the current instant and resolved in the
//! engine's time zone, so "today" and "this month" follow the user's
//! calendar rather than UTC.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Lenient lookup: unknown keys fall back to [`Period::Month`].
    pub fn from_key(key: &str) -> Period {
        key.parse().unwrap_or_default()
    }

    /// Inclusive lower bound of the window, `None` when unbounded.
    ///
    /// - `Day`: local midnight of the current day
    /// - `Week`: exactly seven days before `now`
    /// - `Month`: local midnight of the first day of the current month
    pub fn window_start(self, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
        let today = now.with_timezone(&tz).date_naive();
        match self {
            Self::Day => Some(local_midnight(tz, today)),
            Self::Week => Some(now - TimeDelta::days(7)),
            Self::Month => Some(local_midnight(tz, today.with_day(1).unwrap_or(today))),
            Self::All => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(EngineError::InvalidPeriod(other.to_string())),
        }
    }
}

// Midnight can be skipped by a DST jump; the first instant after the gap is
// used instead.
fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
