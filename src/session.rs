use std::io::{BufRead, Write};

use crate::error::BikeshareError;
use crate::model::TripTable;
use crate::prompt::{FilterPresets, Prompter};
use crate::registry::DatasetRegistry;
use crate::report;
use crate::viewer::RawDataViewer;

const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.";

/// Drives report cycles: filters, load, four reports, raw view, restart.
pub struct Session<R, W> {
    registry: DatasetRegistry,
    presets: FilterPresets,
    prompter: Prompter<R, W>,
    /// Skip the restart question and stop after one cycle.
    once: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(registry: DatasetRegistry, presets: FilterPresets, input: R, output: W) -> Self {
        Self {
            registry,
            presets,
            prompter: Prompter::new(input, output),
            once: false,
        }
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run cycles until the user declines to restart. Returns the cycle count.
    pub fn run(&mut self) -> Result<usize, BikeshareError> {
        let mut cycles = 0;
        loop {
            self.run_cycle()?;
            cycles += 1;
            if self.once || !self.prompter.confirm(RESTART_QUESTION)? {
                break;
            }
            log::info!("restarting session");
        }
        Ok(cycles)
    }

    fn run_cycle(&mut self) -> Result<(), BikeshareError> {
        let selection = self.prompter.collect_filters(&self.presets)?;
        let table = TripTable::load(&self.registry, &selection)?;

        report::print_all(&table, self.prompter.output())?;
        RawDataViewer::new(&table).run(&mut self.prompter)?;
        Ok(())
    }
}
