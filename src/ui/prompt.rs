use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ProjectStatus;
use crate::ui::Console;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The input stream ended while a line was expected
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

impl<I: BufRead, O: Write> Console<I, O> {
    /// Print `label: ` and read one trimmed line
    pub(super) fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Prompt showing the current value in brackets; empty input keeps it
    pub(super) fn prompt_with_default<T: Display>(
        &mut self,
        label: &str,
        default: Option<&T>,
    ) -> Result<String> {
        match default {
            Some(value) => self.prompt(&format!("{} [{}]", label, value)),
            None => self.prompt(label),
        }
    }

    pub(super) fn prompt_text(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        let input = self.prompt_with_default(label, default.as_ref())?;
        Ok(match default {
            Some(value) if input.is_empty() => value.to_string(),
            _ => input,
        })
    }

    /// Read a `yyyy-mm-dd` date, asking again until one parses
    pub(super) fn prompt_date(
        &mut self,
        label: &str,
        default: Option<NaiveDate>,
    ) -> Result<NaiveDate> {
        let label = format!("{} (yyyy-mm-dd)", label);
        loop {
            let input = self.prompt_with_default(&label, default.as_ref())?;
            if let (true, Some(date)) = (input.is_empty(), default) {
                return Ok(date);
            }
            match NaiveDate::parse_from_str(&input, DATE_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.output, "Please enter a date as yyyy-mm-dd.")?,
            }
        }
    }

    /// Read a price; the sign is left for validation to judge
    pub(super) fn prompt_price(&mut self, label: &str, default: Option<f64>) -> Result<f64> {
        loop {
            let input = self.prompt_with_default(label, default.as_ref())?;
            if let (true, Some(price)) = (input.is_empty(), default) {
                return Ok(price);
            }
            match input.replace(',', ".").parse::<f64>() {
                Ok(price) if price.is_finite() => return Ok(price),
                _ => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    pub(super) fn prompt_status(&mut self, default: ProjectStatus) -> Result<ProjectStatus> {
        loop {
            let input = self.prompt_with_default(
                "Status (1-NotStarted / 2-Ongoing / 3-Completed)",
                Some(&default),
            )?;
            if input.is_empty() {
                return Ok(default);
            }
            match ProjectStatus::from_choice(&input) {
                Some(status) => return Ok(status),
                None => writeln!(self.output, "Please choose 1, 2 or 3.")?,
            }
        }
    }

    /// Only an explicit `y` counts as yes
    pub(super) fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{} (y/n)", question))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }
}
