use std::fmt;
use std::io::Write;
use std::time::Instant;

use polars::prelude::ChunkAgg;

use crate::aggregation::{mode, pair_mode, value_counts, DurationBreakdown};
use crate::error::BikeshareError;
use crate::model::TripTable;
use crate::schema::*;

pub const SEPARATOR: &str = "----------------------------------------";
pub const NO_DATA: &str = "No trips match the selected filters.";

/// A statistic computed over a trip table and printed as one section.
pub trait Report: fmt::Display + Sized {
    /// Printed before the computation starts.
    const HEADING: &'static str;

    /// `None` when the table holds nothing to aggregate.
    fn compute(table: &TripTable) -> Result<Option<Self>, BikeshareError>;
}

/// Compute one report and print it, timed, followed by a separator.
pub fn print_report<R: Report, W: Write>(
    table: &TripTable,
    out: &mut W,
) -> Result<(), BikeshareError> {
    writeln!(out, "\n{}\n", R::HEADING)?;
    log::debug!("computing '{}' over {} rows", R::HEADING, table.height());

    let started = Instant::now();
    let report = if table.is_empty() {
        None
    } else {
        R::compute(table)?
    };
    match report {
        Some(r) => writeln!(out, "{r}")?,
        None => writeln!(out, "{NO_DATA}")?,
    }

    writeln!(
        out,
        "\nThis took {} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

/// Time, station, duration and user statistics, in that order.
pub fn print_all<W: Write>(table: &TripTable, out: &mut W) -> Result<(), BikeshareError> {
    print_report::<TimeStats, W>(table, out)?;
    print_report::<StationStats, W>(table, out)?;
    print_report::<DurationStats, W>(table, out)?;
    print_report::<UserStats, W>(table, out)?;
    Ok(())
}

// ── Time ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: &'static str,
    pub day: String,
    pub hour: i32,
}

impl Report for TimeStats {
    const HEADING: &'static str = "Calculating The Most Frequent Times of Travel...";

    fn compute(table: &TripTable) -> Result<Option<Self>, BikeshareError> {
        let month = mode(table.i32_column(derived::MONTH)?).and_then(calendar::month_name);
        let day = mode(table.str_column(derived::DAY_OF_WEEK)?);
        let hour = mode(table.i32_column(derived::HOUR)?);

        Ok(match (month, day, hour) {
            (Some(month), Some(day), Some(hour)) => Some(Self {
                month,
                day: day.to_string(),
                hour,
            }),
            _ => None,
        })
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The most common month is: {}", self.month)?;
        writeln!(f, "The most common day of the week is: {}", self.day)?;
        write!(f, "The most common start hour is: {}", self.hour)
    }
}

// ── Stations ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub trip: (String, String),
}

impl Report for StationStats {
    const HEADING: &'static str = "Calculating The Most Popular Stations and Trip...";

    fn compute(table: &TripTable) -> Result<Option<Self>, BikeshareError> {
        let starts = table.str_column(trip::START_STATION)?;
        let ends = table.str_column(trip::END_STATION)?;

        let start_station = mode(starts);
        let end_station = mode(ends);
        let trip = pair_mode(starts, ends);

        Ok(match (start_station, end_station, trip) {
            (Some(start), Some(end), Some(trip)) => Some(Self {
                start_station: start.to_string(),
                end_station: end.to_string(),
                trip,
            }),
            _ => None,
        })
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The most commonly used start station is: {}",
            self.start_station
        )?;
        writeln!(
            f,
            "The most commonly used end station is: {}",
            self.end_station
        )?;
        write!(
            f,
            "The most frequent combination of start/end stations is: {} and {}",
            self.trip.0, self.trip.1
        )
    }
}

// ── Trip duration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: DurationBreakdown,
    /// Mean trip duration in seconds.
    pub mean: f64,
}

impl Report for DurationStats {
    const HEADING: &'static str = "Calculating Trip Duration...";

    fn compute(table: &TripTable) -> Result<Option<Self>, BikeshareError> {
        let durations = table.f64_column(trip::TRIP_DURATION)?;
        // mean is None when every duration is missing
        let Some(mean) = durations.mean() else {
            return Ok(None);
        };
        Ok(Some(Self {
            total: DurationBreakdown::from_seconds(durations.sum().unwrap_or(0.0)),
            mean,
        }))
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The total travel time was: {}", self.total)?;
        // Debug keeps the fractional part on whole numbers ("500.0").
        write!(f, "\nThe mean travel time was: {:?} seconds", self.mean)
    }
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenderStats {
    /// The city's dataset has no gender column.
    Unavailable,
    Available {
        counts: Vec<(String, usize)>,
        /// `None` when no birth year is recorded.
        birth_years: Option<BirthYearStats>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub gender: GenderStats,
}

impl UserStats {
    fn birth_years(table: &TripTable) -> Result<Option<BirthYearStats>, BikeshareError> {
        if !table.has_birth_year() {
            return Ok(None);
        }
        let years = table.f64_column(demographics::BIRTH_YEAR)?;

        let earliest = years.min().map(|y| y.trunc() as i64);
        let most_recent = years.max().map(|y| y.trunc() as i64);
        let most_common = mode(years.into_iter().map(|y| y.map(|y| y.trunc() as i64)));

        Ok(match (earliest, most_recent, most_common) {
            (Some(earliest), Some(most_recent), Some(most_common)) => Some(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            }),
            _ => None,
        })
    }
}

impl Report for UserStats {
    const HEADING: &'static str = "Calculating User Stats...";

    fn compute(table: &TripTable) -> Result<Option<Self>, BikeshareError> {
        let user_types = value_counts(table.frame(), trip::USER_TYPE)?;

        let gender = if table.has_gender() {
            GenderStats::Available {
                counts: value_counts(table.frame(), demographics::GENDER)?,
                birth_years: Self::birth_years(table)?,
            }
        } else {
            GenderStats::Unavailable
        };

        Ok(Some(Self { user_types, gender }))
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Type counts are:\n")?;
        write_counts(f, trip::USER_TYPE, &self.user_types)?;

        writeln!(f, "\nGender counts are:\n")?;
        match &self.gender {
            GenderStats::Unavailable => write!(f, "There are no gender counts for this market"),
            GenderStats::Available {
                counts,
                birth_years,
            } => {
                write_counts(f, demographics::GENDER, counts)?;
                match birth_years {
                    Some(years) => {
                        writeln!(f, "\nThe earliest birth year is: {}", years.earliest)?;
                        writeln!(f, "\nThe most recent birth year is: {}", years.most_recent)?;
                        write!(f, "\nThe most common birth year is: {}", years.most_common)
                    }
                    None => write!(f, "\nThere is no birth year data for this market"),
                }
            }
        }
    }
}

/// Two-column (value, count) table.
fn write_counts(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    counts: &[(String, usize)],
) -> fmt::Result {
    let width = counts
        .iter()
        .map(|(value, _)| value.chars().count())
        .chain(std::iter::once(label.chars().count()))
        .max()
        .unwrap_or(0);

    writeln!(f, "{label:<width$}  Count")?;
    for (value, count) in counts {
        writeln!(f, "{value:<width$}  {count}")?;
    }
    Ok(())
}
