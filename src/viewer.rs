use std::io::{BufRead, Write};

use polars::prelude::DataFrame;

use crate::error::BikeshareError;
use crate::model::TripTable;
use crate::prompt::Prompter;

pub const PAGE_SIZE: usize = 5;

const FIRST_QUESTION: &str =
    "\nWould you like to view 5 rows of individual trip data? Enter yes or no";
const NEXT_QUESTION: &str = "Do you wish to continue?";

/// Pages through a trip table five rows at a time.
pub struct RawDataViewer<'a> {
    table: &'a TripTable,
    cursor: usize,
}

impl<'a> RawDataViewer<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self { table, cursor: 0 }
    }

    /// The next page; empty once the cursor has passed the last row.
    pub fn next_page(&mut self) -> DataFrame {
        let page = self.table.slice(self.cursor, PAGE_SIZE);
        self.cursor += PAGE_SIZE;
        page
    }

    /// Show pages for as long as the user answers "yes".
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<usize, BikeshareError> {
        let mut pages = 0;
        let mut question = FIRST_QUESTION;
        while prompter.confirm(question)? {
            let page = self.next_page();
            if page.height() == 0 {
                writeln!(prompter.output(), "No more rows to display.")?;
            } else {
                writeln!(prompter.output(), "{page}")?;
            }
            pages += 1;
            question = NEXT_QUESTION;
        }
        Ok(pages)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::City;
    use crate::model::test::load;
    use crate::schema::trip;
    use std::io::Cursor;

    const SEVEN_TRIPS: &str = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,100,A,B,Subscriber
2017-01-01 01:00:00,101,A,B,Subscriber
2017-01-01 02:00:00,102,A,B,Subscriber
2017-01-01 03:00:00,103,A,B,Subscriber
2017-01-01 04:00:00,104,A,B,Subscriber
2017-01-01 05:00:00,105,A,B,Subscriber
2017-01-01 06:00:00,106,A,B,Subscriber
";

    fn durations(page: &DataFrame) -> Vec<f64> {
        page.column(trip::TRIP_DURATION)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_pages_advance_by_five() {
        let table = load(City::Chicago, SEVEN_TRIPS, "all", "all");
        let mut viewer = RawDataViewer::new(&table);

        let first = viewer.next_page();
        let second = viewer.next_page();
        let third = viewer.next_page();

        assert_eq!(durations(&first), vec![100.0, 101.0, 102.0, 103.0, 104.0]);
        assert_eq!(durations(&second), vec![105.0, 106.0]);
        assert_eq!(third.height(), 0);
    }

    #[test]
    fn test_run_stops_on_anything_but_yes() {
        let table = load(City::Chicago, SEVEN_TRIPS, "all", "all");
        let mut prompter = Prompter::new(Cursor::new(b"yes\nYes\nyes\nnope\n".to_vec()), Vec::new());

        let pages = RawDataViewer::new(&table).run(&mut prompter).unwrap();
        let output = String::from_utf8(prompter.into_output()).unwrap();

        assert_eq!(pages, 3);
        assert_eq!(output.matches(NEXT_QUESTION).count(), 3);
        assert!(output.contains("No more rows to display."));
    }

    #[test]
    fn test_run_declined_shows_nothing() {
        let table = load(City::Chicago, SEVEN_TRIPS, "all", "all");
        let mut prompter = Prompter::new(Cursor::new(b"no\n".to_vec()), Vec::new());

        let pages = RawDataViewer::new(&table).run(&mut prompter).unwrap();

        assert_eq!(pages, 0);
    }
}
