//! Date-and-time replacement formatter.

use super::strict::{detect_separator, parse_date_time_exact};
use crate::formatting::{
    domain::{FormatterError, FormatterPhase, FormatterResult},
    ports::MessageFormatter,
};
use chrono::NaiveDateTime;
use mockable::Clock;
use regex::{Captures, Regex};
use std::sync::Arc;

// Alternatives are ordered most specific first so that each timestamp is
// matched once, with its fractional seconds or seconds attached.
const DATE_TIME_PATTERN: &str = concat!(
    r"\b(?:",
    r"(?P<iso>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{3})?)",
    r"|(?P<delimited>(?:\d{4}[./-]\d{1,2}[./-]\d{1,2}|\d{1,2}[./-]\d{1,2}[./-]\d{4})",
    r"\s+\d{1,2}:\d{2}(?::\d{2})?)",
    r")\b"
);

/// Exact formats a candidate must satisfy before it is replaced.
const ACCEPTED_FORMATS: [&str; 16] = [
    "%d.%m.%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
    "%Y.%m.%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.3f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Rendering shape of a recognised timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimestampShape {
    Iso { fractional: bool },
    Delimited { separator: char, seconds: bool },
}

impl TimestampShape {
    fn classify(matched: &str) -> Self {
        if matched.contains('T') {
            return Self::Iso {
                fractional: matched.contains('.'),
            };
        }
        let time_part = matched.split_whitespace().last().unwrap_or_default();
        Self::Delimited {
            separator: detect_separator(matched),
            seconds: time_part.split(':').count() == 3,
        }
    }

    fn render(self, now: NaiveDateTime) -> String {
        let format = match self {
            Self::Iso { fractional: true } => "%Y-%m-%dT%H:%M:%S%.3f".to_owned(),
            Self::Iso { fractional: false } => "%Y-%m-%dT%H:%M:%S".to_owned(),
            Self::Delimited {
                separator,
                seconds: true,
            } => format!("%d{separator}%m{separator}%Y %H:%M:%S"),
            Self::Delimited {
                separator,
                seconds: false,
            } => format!("%d{separator}%m{separator}%Y %H:%M"),
        };
        now.format(&format).to_string()
    }
}

/// Replaces real timestamps with the current local time.
///
/// The replacement keeps the matched text's separator, whether it carried
/// seconds, and whether it was ISO-8601 with or without milliseconds.
/// Delimited timestamps are rendered day first. Matches that fail the
/// strict parse pass through unchanged.
pub struct DateTimeReplacer<C> {
    clock: Arc<C>,
    pattern: Regex,
}

impl<C> DateTimeReplacer<C>
where
    C: Clock + Send + Sync,
{
    /// Stable formatter name.
    pub const NAME: &'static str = "Datetime replacer";

    /// Compiles the timestamp pattern and binds the clock supplying "now".
    ///
    /// # Errors
    ///
    /// Returns [`FormatterError::InvalidPattern`] when the pattern fails to
    /// compile.
    pub fn new(clock: Arc<C>) -> FormatterResult<Self> {
        let pattern = Regex::new(DATE_TIME_PATTERN)
            .map_err(|err| FormatterError::invalid_pattern(Self::NAME, err))?;
        Ok(Self { clock, pattern })
    }

    fn replacement(matched: &str, now: NaiveDateTime) -> String {
        let is_timestamp = ACCEPTED_FORMATS
            .iter()
            .any(|format| parse_date_time_exact(matched, format).is_some());
        if is_timestamp {
            TimestampShape::classify(matched).render(now)
        } else {
            matched.to_owned()
        }
    }
}

impl<C> MessageFormatter for DateTimeReplacer<C>
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
        let now = self.clock.local().naive_local();
        let replaced = self
            .pattern
            .replace_all(input, |captures: &Captures<'_>| {
                let matched = captures.get(0).map_or("", |m| m.as_str());
                Self::replacement(matched, now)
            });
        Ok(replaced.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::TimestampShape;
    use rstest::rstest;

    #[rstest]
    #[case("2023-05-10T12:00:00.123", TimestampShape::Iso { fractional: true })]
    #[case("2023-05-10T12:00:00", TimestampShape::Iso { fractional: false })]
    #[case("10.05.2023 12:00", TimestampShape::Delimited { separator: '.', seconds: false })]
    #[case("10/05/2023 12:00:30", TimestampShape::Delimited { separator: '/', seconds: true })]
    #[case("2023-05-10 12:00:30", TimestampShape::Delimited { separator: '-', seconds: true })]
    fn classify_detects_shape(#[case] matched: &str, #[case] expected: TimestampShape) {
        assert_eq!(TimestampShape::classify(matched), expected);
    }
}
