//! Tests for ordered, fault-isolating pipeline execution.

use super::stubs::{Counting, Failing, Panicking, Suffix, Uppercase, shared};
use crate::formatting::{
    domain::FormatterError, ports::MessageFormatter, services::FormatterPipeline,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing_test::traced_test;

#[test]
fn empty_pipeline_returns_input() {
    assert_eq!(FormatterPipeline::new().process("hello"), "hello");
}

#[test]
fn formatters_run_in_insertion_order() {
    let pipeline = FormatterPipeline::with_formatters([shared(Suffix("-a")), shared(Suffix("-b"))]);
    assert_eq!(pipeline.process("x"), "x-a-b");
    assert_eq!(pipeline.names(), vec!["-a", "-b"]);
}

#[test]
fn add_formatters_appends_after_existing() {
    let mut pipeline = FormatterPipeline::with_formatters([shared(Suffix("-a"))]);
    pipeline
        .add_formatters([shared(Suffix("-b"))])
        .add_formatter(shared(Uppercase));

    assert_eq!(pipeline.len(), 3);
    assert_eq!(pipeline.process("x"), "X-A-B");
}

#[test]
#[traced_test]
fn failing_formatter_is_skipped() {
    let pipeline = FormatterPipeline::with_formatters([shared(Failing), shared(Uppercase)]);

    assert_eq!(pipeline.process("hi"), "HI");
    assert!(logs_contain("formatter failed"));
}

#[test]
fn report_records_failures_with_formatter_name() {
    let pipeline = FormatterPipeline::with_formatters([
        shared(Suffix("-a")),
        shared(Failing),
        shared(Suffix("-b")),
    ]);

    let report = pipeline.process_with_report("x");

    assert_eq!(report.output(), "x-a-b");
    assert!(!report.is_clean());
    let [failure] = report.failures() else {
        panic!("expected exactly one failure, got {:?}", report.failures());
    };
    assert_eq!(failure.formatter(), "failing");
    assert!(matches!(failure.error(), FormatterError::Transform { .. }));
}

#[test]
fn panicking_formatter_counts_as_failure() {
    let pipeline = FormatterPipeline::with_formatters([shared(Panicking), shared(Uppercase)]);

    let report = pipeline.process_with_report("hi");

    assert_eq!(report.output(), "HI");
    let [failure] = report.failures() else {
        panic!("expected exactly one failure");
    };
    assert_eq!(
        failure.error(),
        &FormatterError::Panicked {
            formatter: "panicking".to_owned(),
            reason: "formatter blew up".to_owned(),
        }
    );
}

#[test]
fn empty_input_skips_every_formatter() {
    let counting = Arc::new(Counting::default());
    let formatter: Arc<dyn MessageFormatter> = counting.clone();
    let pipeline = FormatterPipeline::with_formatters([formatter]);

    assert_eq!(pipeline.process(""), "");
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);

    assert_eq!(pipeline.process(" "), " ");
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn clean_run_reports_no_failures() {
    let pipeline = FormatterPipeline::with_formatters([shared(Uppercase)]);
    let report = pipeline.process_with_report("ok");
    assert!(report.is_clean());
    assert_eq!(report.into_output(), "OK");
}

#[test]
fn debug_lists_formatter_names() {
    let pipeline = FormatterPipeline::with_formatters([shared(Uppercase)]);
    assert_eq!(
        format!("{pipeline:?}"),
        r#"FormatterPipeline { formatters: ["uppercase"] }"#
    );
}
