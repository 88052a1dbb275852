//! Interactive question-and-answer loop on top of any reader and writer.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

use tracing::{error, info};

use crate::city::City;
use crate::filter::{DayOfWeek, FilterSpec, Month, Period};
use crate::loader::{LoadOptions, load_city};
use crate::output::{render_report, render_rows};
use crate::pager::RawPager;
use crate::report::CityReport;
use crate::source::TripSource;
use crate::table::TripTable;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `text` (no newline added) and reads one trimmed, lowercased
    /// answer. Fails once the input is closed.
    pub fn ask(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading answer")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_lowercase())
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Repeats `question` until `parse` accepts the answer.
    fn ask_until<T>(
        &mut self,
        question: &str,
        complaint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.say(complaint)?,
            }
        }
    }

    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        self.ask_until(
            question,
            "Invalid input. Please enter either \"yes\" or \"no\".",
            |a| match a {
                "yes" | "y" => Some(true),
                "no" | "n" => Some(false),
                _ => None,
            },
        )
    }

    /// Asks for a city and then an optional month or day filter.
    pub fn get_filters(&mut self) -> Result<FilterSpec> {
        self.say("Hello! Let's explore some US bikeshare data!")?;

        let city = self.ask_until(
            "Would you like to see data for Chicago, New York, or Washington? ",
            "Invalid input. Please enter a valid city name.",
            |a| a.parse::<City>().ok(),
        )?;

        let kind = self.ask_until(
            "Would you like to filter the data by month, day, or not at all? Enter month, day, or none: ",
            "Invalid input. Please enter \"month\", \"day\", or \"none\".",
            |a| match a {
                "month" | "day" | "none" => Some(a.to_string()),
                _ => None,
            },
        )?;

        let period = match kind.as_str() {
            "month" => self.ask_until(
                "Which month - January through December, or all? ",
                "Invalid input. Please enter a valid month.",
                |a| match a {
                    "all" => Some(Period::All),
                    _ => a.parse::<Month>().ok().map(Period::Month),
                },
            )?,
            "day" => self.ask_until(
                "Which day - Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or all? ",
                "Invalid input. Please enter a valid day.",
                |a| match a {
                    "all" => Some(Period::All),
                    _ => a.parse::<DayOfWeek>().ok().map(Period::Day),
                },
            )?,
            _ => Period::All,
        };

        self.say("----------------------------------------")?;
        Ok(FilterSpec { city, period })
    }

    /// The full session: filters, report, raw-data pager, then offer a
    /// restart. A selection that cannot be loaded or summarised is reported
    /// and the session carries on.
    pub fn explore(&mut self, source: &dyn TripSource, options: &LoadOptions) -> Result<()> {
        loop {
            let spec = self.get_filters()?;
            info!(spec = %spec, "Filters selected");

            let outcome = load_city(source, spec.city, &spec.trip_filter(), options)
                .and_then(|table| CityReport::build(&table).map(|report| (table, report)));
            match outcome {
                Ok((table, report)) => {
                    self.say(&render_report(&report))?;
                    self.display_raw_data(&table)?;
                }
                Err(e) => {
                    error!(error = %e, "Failed to summarise trip data");
                    self.say(&format!("Could not load data for {}: {e}", spec.city))?;
                }
            }

            if !self.ask_yes_no(
                "\nWould you like to restart and explore another city? Enter yes or no: ",
            )? {
                return Ok(());
            }
        }
    }

    /// Shows five raw rows each time the user answers "yes", until they
    /// answer "no" or the rows run out.
    pub fn display_raw_data(&mut self, table: &TripTable) -> Result<()> {
        let mut pager = RawPager::new(table);
        loop {
            if pager.is_exhausted() {
                self.say("\nNo more raw data to display.")?;
                return Ok(());
            }
            if !self.ask_yes_no("\nWould you like to see 5 lines of raw data? Enter yes or no: ")? {
                return Ok(());
            }
            let first = pager.offset();
            if let Some(page) = pager.next() {
                let text = render_rows(table, page, first);
                write!(self.output, "{text}")?;
            }
        }
    }
}
