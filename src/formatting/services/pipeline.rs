//! Ordered, fault-isolating formatter pipeline.

use crate::formatting::{
    domain::{FormatterError, FormatterFailure, FormatterResult},
    ports::MessageFormatter,
};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// Output of a pipeline run together with any formatter failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    output: String,
    failures: Vec<FormatterFailure>,
}

impl ProcessReport {
    /// Returns the processed text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the failures recorded during the run, in execution order.
    #[must_use]
    pub fn failures(&self) -> &[FormatterFailure] {
        &self.failures
    }

    /// Returns whether every formatter succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consumes the report, returning the processed text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

/// Ordered chain of shared formatters.
///
/// Insertion order is execution order. The list is append-only: formatters
/// are added while a configuration is assembled and the pipeline is then
/// shared read-only, so concurrent [`Self::process`] calls are safe.
///
/// # Examples
///
/// ```
/// use courier::formatting::{
///     adapters::JsonPrettyFormatter, ports::MessageFormatter, services::FormatterPipeline,
/// };
/// use std::sync::Arc;
///
/// let json: Arc<dyn MessageFormatter> = Arc::new(JsonPrettyFormatter::new());
/// let pipeline = FormatterPipeline::with_formatters([json]);
/// assert_eq!(pipeline.process(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
/// assert_eq!(pipeline.process("not json"), "not json");
/// ```
#[derive(Clone, Default)]
pub struct FormatterPipeline {
    formatters: Vec<Arc<dyn MessageFormatter>>,
}

impl FormatterPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline from an ordered list of formatters.
    #[must_use]
    pub fn with_formatters(
        formatters: impl IntoIterator<Item = Arc<dyn MessageFormatter>>,
    ) -> Self {
        let mut pipeline = Self::new();
        pipeline.add_formatters(formatters);
        pipeline
    }

    /// Appends formatters after the ones already configured.
    pub fn add_formatters(
        &mut self,
        formatters: impl IntoIterator<Item = Arc<dyn MessageFormatter>>,
    ) -> &mut Self {
        self.formatters.extend(formatters);
        self
    }

    /// Appends a single formatter.
    pub fn add_formatter(&mut self, formatter: Arc<dyn MessageFormatter>) -> &mut Self {
        self.formatters.push(formatter);
        self
    }

    /// Returns the number of configured formatters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Returns whether no formatter is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Returns formatter names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }

    /// Threads `input` through every formatter in order.
    ///
    /// Empty input is returned unchanged without invoking any formatter. A
    /// failing formatter is logged and skipped; the text it received flows
    /// on to the next formatter.
    #[must_use]
    pub fn process(&self, input: &str) -> String {
        self.process_with_report(input).into_output()
    }

    /// Like [`Self::process`], also returning the recorded failures.
    #[must_use]
    pub fn process_with_report(&self, input: &str) -> ProcessReport {
        let mut report = ProcessReport {
            output: input.to_owned(),
            failures: Vec::new(),
        };
        if input.is_empty() {
            return report;
        }

        for formatter in &self.formatters {
            match run_isolated(formatter.as_ref(), &report.output) {
                Ok(formatted) => report.output = formatted,
                Err(err) => {
                    error!(
                        formatter = formatter.name(),
                        error = %err,
                        "formatter failed, keeping previous text"
                    );
                    report
                        .failures
                        .push(FormatterFailure::new(formatter.name().to_owned(), err));
                }
            }
        }
        report
    }
}

impl fmt::Debug for FormatterPipeline {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FormatterPipeline")
            .field("formatters", &self.names())
            .finish()
    }
}

fn run_isolated(formatter: &dyn MessageFormatter, input: &str) -> FormatterResult<String> {
    panic::catch_unwind(AssertUnwindSafe(|| formatter.transform(input))).unwrap_or_else(|payload| {
        Err(FormatterError::Panicked {
            formatter: formatter.name().to_owned(),
            reason: panic_reason(payload.as_ref()),
        })
    })
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|reason| (*reason).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}
