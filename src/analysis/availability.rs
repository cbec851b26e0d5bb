//! Availability Aggregation
//! Turns the six weekday columns into a per-(day, period) count table.

use polars::prelude::*;
use serde::Serialize;
use std::fmt;

use super::AnalysisError;

/// Daily time blocks a respondent can mark, plus the catch-all bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Unavailable,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Morning,
        Period::Afternoon,
        Period::Evening,
        Period::Unavailable,
    ];

    /// The periods a respondent can actually list in a weekday cell.
    pub const VALID: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Evening];

    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
            Period::Unavailable => "Unavailable",
        }
    }

    /// Parse a trimmed cell token. Only the three valid period names match.
    pub fn from_token(token: &str) -> Option<Period> {
        match token {
            "Morning" => Some(Period::Morning),
            "Afternoon" => Some(Period::Afternoon),
            "Evening" => Some(Period::Evening),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Period::Morning => 0,
            Period::Afternoon => 1,
            Period::Evening => 2,
            Period::Unavailable => 3,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six survey weekdays, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Name of this weekday's column in the loaded table.
    pub fn column(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the availability fact table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotCount {
    pub day: Weekday,
    pub period: Period,
    pub students: u32,
}

/// Dense per-(day, period) count table: one row for every weekday and every
/// period, zero counts included.
#[derive(Debug, Clone)]
pub struct AvailabilitySummary {
    rows: Vec<SlotCount>,
}

impl AvailabilitySummary {
    pub fn rows(&self) -> &[SlotCount] {
        &self.rows
    }

    pub fn count(&self, day: Weekday, period: Period) -> u32 {
        self.rows
            .iter()
            .find(|slot| slot.day == day && slot.period == period)
            .map_or(0, |slot| slot.students)
    }

    /// The busiest slots, unavailable bucket excluded, descending by count.
    /// Ties keep day-major, period-minor table order.
    pub fn top_slots(&self, limit: usize) -> Vec<&SlotCount> {
        let mut slots: Vec<&SlotCount> = self
            .rows
            .iter()
            .filter(|slot| slot.period != Period::Unavailable)
            .collect();
        slots.sort_by(|a, b| b.students.cmp(&a.students));
        slots.truncate(limit);
        slots
    }
}

/// Count availability per (day, period) over the loaded survey table.
///
/// A weekday column missing from `df` still produces its four rows: zero for
/// the valid periods and the full respondent count under unavailable.
pub fn summarize_availability(df: &DataFrame) -> Result<AvailabilitySummary, AnalysisError> {
    let respondents = df.height() as u32;
    let mut rows = Vec::with_capacity(Weekday::ALL.len() * Period::ALL.len());

    for day in Weekday::ALL {
        let Ok(column) = df.column(day.column()) else {
            for period in Period::ALL {
                let students = if period == Period::Unavailable {
                    respondents
                } else {
                    0
                };
                rows.push(SlotCount {
                    day,
                    period,
                    students,
                });
            }
            continue;
        };

        let cells = column.cast(&DataType::String)?;
        let cells = cells.str()?;
        let mut counts = [0u32; 4];
        for cell in cells {
            tally_cell(cell.unwrap_or(Period::Unavailable.label()), &mut counts);
        }

        for period in Period::ALL {
            rows.push(SlotCount {
                day,
                period,
                students: counts[period.index()],
            });
        }
    }

    Ok(AvailabilitySummary { rows })
}

/// Count one respondent's cell for one day.
///
/// Each respondent adds one to the day's unavailable bucket after their
/// tokens are counted, whether or not any valid period matched. A fully
/// blank cell yields no tokens, so it lands at exactly one.
fn tally_cell(cell: &str, counts: &mut [u32; 4]) {
    if !cell.trim().is_empty() {
        for token in cell.split(',') {
            let token = token.trim();
            if let Some(period) = Period::from_token(token) {
                counts[period.index()] += 1;
            } else if token.is_empty() {
                counts[Period::Unavailable.index()] += 1;
            }
        }
    }
    counts[Period::Unavailable.index()] += 1;
}
