//! Calendar date replacement formatter.

use super::strict::{detect_separator, parse_date_exact};
use crate::formatting::{
    domain::{FormatterError, FormatterPhase, FormatterResult},
    ports::MessageFormatter,
};
use chrono::NaiveDate;
use mockable::Clock;
use regex::{Captures, Regex};
use std::sync::Arc;

// yyyy.MM.dd, yyyy/MM/dd, yyyy-MM-dd
const YEAR_FIRST_PATTERN: &str = r"\b\d{4}[./-]\d{1,2}[./-]\d{1,2}\b";

// dd.MM.yyyy and MM.dd.yyyy share one shape; the strict parse decides.
const YEAR_LAST_PATTERN: &str = r"\b\d{1,2}[./-]\d{1,2}[./-]\d{4}\b";

/// Exact formats a candidate must satisfy before it is replaced.
const ACCEPTED_FORMATS: [&str; 9] = [
    "%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y.%m.%d", "%Y/%m/%d", "%Y-%m-%d", "%m.%d.%Y",
    "%m/%d/%Y", "%m-%d-%Y",
];

/// Replaces real calendar dates with today's date.
///
/// The replacement is rendered year first, using the separator found in the
/// matched text. Matches that do not parse as a real date under one of the
/// accepted formats, such as `2023-13-45`, are left untouched.
pub struct DateReplacer<C> {
    clock: Arc<C>,
    patterns: [Regex; 2],
}

impl<C> DateReplacer<C>
where
    C: Clock + Send + Sync,
{
    /// Stable formatter name.
    pub const NAME: &'static str = "Date replacer";

    /// Compiles the date patterns and binds the clock supplying "today".
    ///
    /// # Errors
    ///
    /// Returns [`FormatterError::InvalidPattern`] when a pattern fails to
    /// compile.
    pub fn new(clock: Arc<C>) -> FormatterResult<Self> {
        let compile = |pattern| {
            Regex::new(pattern).map_err(|err| FormatterError::invalid_pattern(Self::NAME, err))
        };
        Ok(Self {
            clock,
            patterns: [compile(YEAR_FIRST_PATTERN)?, compile(YEAR_LAST_PATTERN)?],
        })
    }

    fn replacement(matched: &str, today: NaiveDate) -> String {
        let is_date = ACCEPTED_FORMATS
            .iter()
            .any(|format| parse_date_exact(matched, format).is_some());
        if !is_date {
            return matched.to_owned();
        }
        let separator = detect_separator(matched);
        today
            .format(&format!("%Y{separator}%m{separator}%d"))
            .to_string()
    }
}

impl<C> MessageFormatter for DateReplacer<C>
where
    C: Clock + Send + Sync,
{
    fn name(&self) -> &str {
        Self::NAME
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, input: &str) -> FormatterResult<String> {
        let today = self.clock.local().date_naive();
        let mut result = input.to_owned();
        for pattern in &self.patterns {
            result = pattern
                .replace_all(&result, |captures: &Captures<'_>| {
                    let matched = captures.get(0).map_or("", |m| m.as_str());
                    Self::replacement(matched, today)
                })
                .into_owned();
        }
        Ok(result)
    }
}
