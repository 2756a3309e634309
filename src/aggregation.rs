use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use polars::prelude::*;

use crate::error::BikeshareError;

/// Name of the count column produced by [`value_counts`].
pub const COUNT: &str = "count";

const SECONDS_PER_DAY: u64 = 24 * 3600;
const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Most frequent value. Ties go to the value seen first.
///
/// Missing values (`None`) are skipped; returns `None` when nothing is left.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Option<T>>,
{
    // value → (count, first position)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().flatten().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Most frequent (start, end) pair. Rows missing either side are skipped.
pub fn pair_mode<'a, A, B>(starts: A, ends: B) -> Option<(String, String)>
where
    A: IntoIterator<Item = Option<&'a str>>,
    B: IntoIterator<Item = Option<&'a str>>,
{
    let pairs = starts.into_iter().zip(ends).map(|pair| match pair {
        (Some(start), Some(end)) => Some((start, end)),
        _ => None,
    });
    mode(pairs).map(|(start, end)| (start.to_string(), end.to_string()))
}

/// Occurrences of each distinct value of a string column, in ascending value order.
/// Missing values are not counted.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<(String, usize)>, BikeshareError> {
    let counts = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .sort([column], SortMultipleOptions::default())
        .collect()?;

    let values = counts.column(column)?.as_materialized_series().str()?;
    let totals = counts.column(COUNT)?.as_materialized_series().u64()?;

    Ok(values
        .into_iter()
        .zip(totals)
        .filter_map(|(value, total)| Some((value?.to_string(), total? as usize)))
        .collect())
}

/// A number of seconds split into whole days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    /// Fractional seconds are truncated before splitting.
    pub fn from_seconds(total: f64) -> Self {
        if !total.is_finite() || total < 0.0 {
            log::warn!("trip duration total {total} is not a non-negative number; reporting 0");
        }
        // saturating: negative and NaN become 0
        let total = total.trunc() as u64;
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes, and {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
