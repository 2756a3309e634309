use std::fmt;
use std::str::FromStr;

use crate::schema::calendar;

/// The three cities with a bikeshare dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case key typed by the user.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        City::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| {
                format!("Invalid city: '{s}'. Must be Chicago, New York City, or Washington")
            })
    }
}

/// Month restriction: everything, or one of January through June.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number, always within the selectable range.
    Month(i32),
}

impl MonthFilter {
    pub fn month_number(&self) -> Option<i32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Month(m) => Some(*m),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month_number().and_then(calendar::month_name) {
            Some(name) => f.write_str(name),
            None => f.write_str(calendar::ALL),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        if key == calendar::ALL {
            return Ok(MonthFilter::All);
        }
        calendar::SELECTABLE_MONTHS
            .iter()
            .position(|m| *m == key)
            .map(|i| MonthFilter::Month(i as i32 + 1))
            .ok_or_else(|| format!("Invalid month: '{s}'. Must be January through June, or 'all'"))
    }
}

/// Day-of-week restriction. Holds the title-cased name used in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(&'static str),
}

impl DayFilter {
    pub fn day_name(&self) -> Option<&'static str> {
        match self {
            DayFilter::All => None,
            DayFilter::Day(name) => Some(*name),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.day_name().unwrap_or(calendar::ALL))
    }
}

impl FromStr for DayFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        if key == calendar::ALL {
            return Ok(DayFilter::All);
        }
        calendar::DAY_NAMES
            .iter()
            .find(|d| d.to_lowercase() == key)
            .map(|d| DayFilter::Day(*d))
            .ok_or_else(|| format!("Invalid day: '{s}'. Must be a day of the week, or 'all'"))
    }
}

/// One session's choice of city, month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={}, month={}, day={}", self.city, self.month, self.day)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_city_parse_is_case_insensitive() {
        assert_eq!("New York City".parse::<City>(), Ok(City::NewYorkCity));
        assert_eq!("WASHINGTON".parse::<City>(), Ok(City::Washington));
        assert_eq!(" chicago\n".parse::<City>(), Ok(City::Chicago));
        assert!("boston".parse::<City>().is_err());
        assert!("new york".parse::<City>().is_err());
    }

    #[test]
    fn test_month_parse_limited_to_first_half_year() {
        assert_eq!("all".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!("January".parse::<MonthFilter>(), Ok(MonthFilter::Month(1)));
        assert_eq!("march".parse::<MonthFilter>(), Ok(MonthFilter::Month(3)));
        assert_eq!("APRIL".parse::<MonthFilter>(), Ok(MonthFilter::Month(4)));
        assert_eq!("june".parse::<MonthFilter>(), Ok(MonthFilter::Month(6)));
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("jan".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_day_parse_normalizes_to_title_case() {
        assert_eq!("monday".parse::<DayFilter>(), Ok(DayFilter::Day("Monday")));
        assert_eq!("SunDay".parse::<DayFilter>(), Ok(DayFilter::Day("Sunday")));
        assert_eq!("All".parse::<DayFilter>(), Ok(DayFilter::All));
        assert!("mon".parse::<DayFilter>().is_err());
    }
}
