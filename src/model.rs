use std::path::Path;

use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;

use crate::error::BikeshareError;
use crate::filter::{City, FilterSelection};
use crate::registry::DatasetRegistry;
use crate::schema::*;

/// Trip records of one city, with month/day/hour derived from the start time
/// and the session's filters applied. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct TripTable {
    city: City,
    df: DataFrame,
}

impl TripTable {
    // ── Loading ─────────────────────────────────────────────────────────────

    /// Load the selected city's dataset and apply the month and day filters.
    ///
    /// Fails if the dataset is missing or unreadable, if a required column is
    /// absent, if any start time does not match `%Y-%m-%d %H:%M:%S`, or if a
    /// trip duration or birth year is not a number.
    /// Surviving rows keep their file order.
    pub fn load(
        registry: &DatasetRegistry,
        selection: &FilterSelection,
    ) -> Result<Self, BikeshareError> {
        let path = registry.resolve(selection.city)?;
        log::info!("loading {} trips from {}", selection.city, path.display());

        let raw = Self::read_csv_as_strings(&path)?;
        Self::require_columns(&raw, &trip::REQUIRED)?;
        let raw_height = raw.height();

        let mut parsed = Self::parse_datetime_column(raw, trip::START_TIME, TIMESTAMP_FORMAT)?;
        parsed = Self::parse_float_column(parsed, trip::TRIP_DURATION)?;
        if parsed.schema().contains(demographics::BIRTH_YEAR) {
            parsed = Self::parse_float_column(parsed, demographics::BIRTH_YEAR)?;
        }

        let mut lazy = parsed.lazy().with_columns([
            col(trip::START_TIME)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(derived::MONTH),
            col(trip::START_TIME)
                .dt()
                .strftime("%A")
                .alias(derived::DAY_OF_WEEK),
            col(trip::START_TIME)
                .dt()
                .hour()
                .cast(DataType::Int32)
                .alias(derived::HOUR),
        ]);

        if let Some(month) = selection.month.month_number() {
            lazy = lazy.filter(col(derived::MONTH).eq(lit(month)));
        }

        if let Some(day) = selection.day.day_name() {
            lazy = lazy.filter(col(derived::DAY_OF_WEEK).eq(lit(day)));
        }

        let df = lazy.collect()?;
        log::debug!(
            "{} of {} rows kept for {}",
            df.height(),
            raw_height,
            selection
        );

        Ok(Self {
            city: selection.city,
            df,
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn city(&self) -> City {
        self.city
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.schema().contains(name)
    }

    /// Washington's dataset carries no gender column.
    pub fn has_gender(&self) -> bool {
        self.has_column(demographics::GENDER)
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_column(demographics::BIRTH_YEAR)
    }

    pub fn str_column(&self, name: &str) -> Result<&StringChunked, BikeshareError> {
        let column = self
            .df
            .column(name)
            .map_err(|_| BikeshareError::MissingColumn(name.to_string()))?;
        Ok(column.as_materialized_series().str()?)
    }

    pub fn i32_column(&self, name: &str) -> Result<&Int32Chunked, BikeshareError> {
        let column = self
            .df
            .column(name)
            .map_err(|_| BikeshareError::MissingColumn(name.to_string()))?;
        Ok(column.as_materialized_series().i32()?)
    }

    pub fn f64_column(&self, name: &str) -> Result<&Float64Chunked, BikeshareError> {
        let column = self
            .df
            .column(name)
            .map_err(|_| BikeshareError::MissingColumn(name.to_string()))?;
        Ok(column.as_materialized_series().f64()?)
    }

    /// Rows `offset..offset + len`, clipped to the table; empty past the end.
    pub fn slice(&self, offset: usize, len: usize) -> DataFrame {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        self.df.slice(offset, len)
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

impl TripTable {
    /// Read a CSV file with all columns as String dtype.
    /// Trims whitespace from column names.
    fn read_csv_as_strings(path: &Path) -> Result<DataFrame, BikeshareError> {
        let not_found = |e: PolarsError| BikeshareError::DatasetNotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(not_found)?
            .finish()
            .map_err(not_found)?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        Ok(df)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), BikeshareError> {
        for &col_name in required {
            if df.column(col_name).is_err() {
                return Err(BikeshareError::MissingColumn(col_name.to_string()));
            }
        }
        Ok(())
    }

    /// Parse a string column to Datetime. Every value must parse.
    fn parse_datetime_column(
        df: DataFrame,
        column: &str,
        format: &str,
    ) -> Result<DataFrame, BikeshareError> {
        let malformed = |reason: String| BikeshareError::MalformedTimestamp {
            column: column.to_string(),
            reason,
        };

        let df = df
            .lazy()
            .with_columns([col(column)
                .str()
                .strip_chars(lit(" \t\r\n"))
                .str()
                .to_datetime(
                    Some(TimeUnit::Microseconds),
                    None,
                    StrptimeOptions {
                        format: Some(format.into()),
                        strict: true,
                        ..Default::default()
                    },
                    lit("raise"),
                )])
            .collect()
            .map_err(|e| malformed(e.to_string()))?;

        let null_count = df.column(column)?.null_count();
        if null_count > 0 {
            return Err(malformed(format!("{null_count} empty values")));
        }
        Ok(df)
    }

    /// Parse a string column to Float64. Blank cells become null; any other
    /// non-numeric value is an error.
    fn parse_float_column(df: DataFrame, column: &str) -> Result<DataFrame, BikeshareError> {
        let stripped = col(column).str().strip_chars(lit(" \t\r\n"));
        df.lazy()
            .with_columns([when(stripped.clone().eq(lit("")))
                .then(lit(NULL).cast(DataType::String))
                .otherwise(stripped)
                .strict_cast(DataType::Float64)
                .alias(column)])
            .collect()
            .map_err(|e| BikeshareError::MalformedNumber {
                column: column.to_string(),
                reason: e.to_string(),
            })
    }
}
