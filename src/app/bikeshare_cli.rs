use std::io::{BufRead, Write};

use clap::Parser;

use crate::error::BikeshareError;
use crate::filter::{City, DayFilter, MonthFilter};
use crate::prompt::FilterPresets;
use crate::registry::DatasetRegistry;
use crate::session::Session;

/// interactive explorer for US bikeshare trip data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct BikeshareArgs {
    /// directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short = 'd', long, default_value_t = String::from("."))]
    pub data_dir: String,
    /// analyze this city instead of asking (chicago, "new york city", washington)
    #[arg(long)]
    pub city: Option<City>,
    /// filter by this month instead of asking (january..june, or all)
    #[arg(long)]
    pub month: Option<MonthFilter>,
    /// filter by this day of week instead of asking (monday..sunday, or all)
    #[arg(long)]
    pub day: Option<DayFilter>,
    /// run a single report cycle without offering a restart
    #[arg(long, default_value_t = false)]
    pub once: bool,
}

impl BikeshareArgs {
    pub fn presets(&self) -> FilterPresets {
        FilterPresets {
            city: self.city,
            month: self.month,
            day: self.day,
        }
    }

    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<usize, BikeshareError> {
        let registry = DatasetRegistry::new(&self.data_dir);
        log::debug!("data directory: {}", registry.base_path().display());
        Session::new(registry, self.presets(), input, output)
            .with_once(self.once)
            .run()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_presets() {
        let args = BikeshareArgs::parse_from([
            "bikeshare",
            "--data-dir",
            "/data",
            "--city",
            "New York City",
            "--month",
            "June",
            "--once",
        ]);

        assert_eq!(args.data_dir, "/data");
        assert!(args.once);
        assert_eq!(
            args.presets(),
            FilterPresets {
                city: Some(City::NewYorkCity),
                month: Some(MonthFilter::Month(6)),
                day: None,
            }
        );
    }

    #[test]
    fn test_rejects_invalid_preset() {
        let result = BikeshareArgs::try_parse_from(["bikeshare", "--month", "december"]);
        assert!(result.is_err());
    }
}
