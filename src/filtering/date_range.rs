//! Date-range selection and filtering.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::PpeError;
use crate::normalization::record::NormalizedRecord;

/// Window of records to show, relative to the current moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
    Month,
}

impl DateRange {
    pub const ALL: [DateRange; 5] = [
        DateRange::All,
        DateRange::Today,
        DateRange::Yesterday,
        DateRange::Week,
        DateRange::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Yesterday => "yesterday",
            DateRange::Week => "week",
            DateRange::Month => "month",
        }
    }

    /// Whether an instant falls in this window relative to `now`.
    ///
    /// A missing instant is only inside `All`.
    pub fn contains(&self, instant: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
        if *self == DateRange::All {
            return true;
        }
        let Some(instant) = instant else {
            return false;
        };

        match self {
            DateRange::All => true,
            DateRange::Today => instant.date() == now.date(),
            DateRange::Yesterday => now
                .date()
                .pred_opt()
                .is_some_and(|yesterday| instant.date() == yesterday),
            DateRange::Week => instant >= now - Duration::days(7),
            DateRange::Month => {
                // Clamps to the last day of the previous month (Mar 31 -> Feb 28).
                let cutoff = now
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(NaiveDateTime::MIN);
                instant >= cutoff
            }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = PpeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "yesterday" => Ok(DateRange::Yesterday),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            other => Err(PpeError::InvalidRange(other.to_string())),
        }
    }
}

/// Keep the records inside `range`, preserving order.
///
/// Records without a parseable timestamp are excluded by every range
/// except `All`.
pub fn filter_records(
    records: &[NormalizedRecord],
    range: DateRange,
    now: NaiveDateTime,
) -> Vec<NormalizedRecord> {
    if range == DateRange::All {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| range.contains(r.recorded_at, now))
        .cloned()
        .collect()
}

/// [`filter_records`] against the local clock.
pub fn filter_records_now(records: &[NormalizedRecord], range: DateRange) -> Vec<NormalizedRecord> {
    filter_records(records, range, Local::now().naive_local())
}
