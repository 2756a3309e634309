/// Column-name constants for bikeshare trip tables.
/// Single source of truth for loader, reports and tests.

// ── Raw trip columns ────────────────────────────────────────────────────────
pub mod trip {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";

    /// Columns every city dataset must carry.
    pub const REQUIRED: [&str; 5] = [
        START_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
}

// ── Demographic columns (absent from the Washington dataset) ────────────────
pub mod demographics {
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";
}

// ── Columns derived from the start time at load ─────────────────────────────
pub mod derived {
    pub const MONTH: &str = "month";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const HOUR: &str = "hour";
}

// ── Timestamp format of the start/end columns ───────────────────────────────
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Calendar names ──────────────────────────────────────────────────────────
pub mod calendar {
    /// Months a user may filter by, in order. Index + 1 is the month number.
    pub const SELECTABLE_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

    pub const DAY_NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];

    /// Wildcard accepted for both the month and the day prompt.
    pub const ALL: &str = "all";

    /// Full month name for a 1-based month number.
    pub fn month_name(month: i32) -> Option<&'static str> {
        let month = u8::try_from(month).ok()?;
        chrono::Month::try_from(month).ok().map(|m| m.name())
    }
}
