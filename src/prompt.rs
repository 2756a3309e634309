use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::BikeshareError;
use crate::filter::{City, DayFilter, FilterSelection, MonthFilter};
use crate::report::SEPARATOR;

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_QUESTION: &str =
    "Which city do you want to analyze? Your options are Chicago, New York City, or Washington";
const CITY_INVALID: &str =
    "Invalid response. Your options are Chicago, New York City, or Washington";
const MONTH_QUESTION: &str = "Which month do you want to analyze? Your options range from January through June. If you'd like all months, type 'all'";
const DAY_QUESTION: &str =
    "Which day do you want to analyze? If you'd like all days, type 'all'";
const INVALID: &str = "Invalid response.";

/// Filter fields fixed ahead of time; these are not asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPresets {
    pub city: Option<City>,
    pub month: Option<MonthFilter>,
    pub day: Option<DayFilter>,
}

/// Line-oriented question/answer exchange over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print the question and return the answer, trimmed and lower-cased.
    pub fn ask(&mut self, question: &str) -> Result<String, BikeshareError> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed(question.to_string()));
        }
        Ok(line.trim().to_lowercase())
    }

    /// True only for a "yes" answer, in any letter case.
    pub fn confirm(&mut self, question: &str) -> Result<bool, BikeshareError> {
        Ok(self.ask(question)? == "yes")
    }

    /// Ask until the answer parses, printing `invalid` after each rejected answer.
    /// Only the end of input stops the loop early.
    pub fn ask_until_valid<T: FromStr>(
        &mut self,
        question: &str,
        invalid: &str,
    ) -> Result<T, BikeshareError> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    log::debug!("rejected answer '{answer}'");
                    writeln!(self.output, "{invalid}")?;
                }
            }
        }
    }

    /// Obtain city, month and day, asking only for the fields not preset.
    pub fn collect_filters(
        &mut self,
        presets: &FilterPresets,
    ) -> Result<FilterSelection, BikeshareError> {
        writeln!(self.output, "{GREETING}")?;

        let city = match presets.city {
            Some(city) => city,
            None => self.ask_until_valid(CITY_QUESTION, CITY_INVALID)?,
        };
        let month = match presets.month {
            Some(month) => month,
            None => self.ask_until_valid(MONTH_QUESTION, INVALID)?,
        };
        let day = match presets.day {
            Some(day) => day,
            None => self.ask_until_valid(DAY_QUESTION, INVALID)?,
        };

        writeln!(self.output, "{SEPARATOR}")?;
        Ok(FilterSelection { city, month, day })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_collect_filters_normalizes_case() {
        let mut p = prompter("New York City\nMarch\nFRIDAY\n");

        let selection = p.collect_filters(&FilterPresets::default()).unwrap();

        assert_eq!(
            selection,
            FilterSelection {
                city: City::NewYorkCity,
                month: MonthFilter::Month(3),
                day: DayFilter::Day("Friday"),
            }
        );
    }

    #[test]
    fn test_collect_filters_reprompts_until_valid() {
        let mut p = prompter("boston\n\nwashington\njuly\nall\nfunday\nall\n");

        let selection = p.collect_filters(&FilterPresets::default()).unwrap();
        let output = String::from_utf8(p.into_output()).unwrap();

        assert_eq!(
            selection,
            FilterSelection {
                city: City::Washington,
                month: MonthFilter::All,
                day: DayFilter::All,
            }
        );
        assert_eq!(output.matches(CITY_INVALID).count(), 2);
        assert_eq!(output.matches(CITY_QUESTION).count(), 3);
        assert_eq!(output.matches(MONTH_QUESTION).count(), 2);
        assert_eq!(output.matches(DAY_QUESTION).count(), 2);
    }

    #[test]
    fn test_collect_filters_skips_presets() {
        let mut p = prompter("monday\n");
        let presets = FilterPresets {
            city: Some(City::Chicago),
            month: Some(MonthFilter::All),
            day: None,
        };

        let selection = p.collect_filters(&presets).unwrap();
        let output = String::from_utf8(p.into_output()).unwrap();

        assert_eq!(selection.day, DayFilter::Day("Monday"));
        assert!(!output.contains(CITY_QUESTION));
        assert!(!output.contains(MONTH_QUESTION));
    }

    #[test]
    fn test_end_of_input_stops_validation_loop() {
        let mut p = prompter("atlantis\n");

        let result = p.collect_filters(&FilterPresets::default());

        assert!(matches!(result, Err(BikeshareError::InputClosed(_))));
    }

    #[test]
    fn test_confirm_accepts_only_yes() {
        let mut p = prompter("YES\ny\nno\n");

        assert!(p.confirm("continue?").unwrap());
        assert!(!p.confirm("continue?").unwrap());
        assert!(!p.confirm("continue?").unwrap());
    }
}
