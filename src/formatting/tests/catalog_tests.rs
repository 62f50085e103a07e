//! Tests for formatter registration and per-configuration selection.

use super::stubs::{Uppercase, shared};
use crate::formatting::{
    domain::{FormatterPhase, FormatterToggles},
    services::FormatterCatalog,
};
use crate::test_support::FixedClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn catalog() -> FormatterCatalog {
    FormatterCatalog::builtin(Arc::new(FixedClock::leap_day())).expect("built-ins compile")
}

fn toggles(entries: &[(&str, bool)]) -> FormatterToggles {
    entries
        .iter()
        .map(|(name, enabled)| ((*name).to_owned(), *enabled))
        .collect()
}

#[rstest]
fn builtin_registers_all_formatters_in_order(catalog: FormatterCatalog) {
    assert_eq!(
        catalog.names(),
        vec!["Json formatter", "Guid replacer", "Date replacer", "Datetime replacer"]
    );
}

#[rstest]
fn select_filters_by_phase_and_toggle(catalog: FormatterCatalog) {
    let enabled = toggles(&[
        ("Datetime replacer", true),
        ("Guid replacer", true),
        ("Date replacer", false),
        ("Json formatter", true),
    ]);

    let before_send = catalog.pipeline_for(FormatterPhase::BeforeSend, &enabled);
    let after_receive = catalog.pipeline_for(FormatterPhase::AfterReceive, &enabled);

    assert_eq!(before_send.names(), vec!["Guid replacer", "Datetime replacer"]);
    assert_eq!(after_receive.names(), vec!["Json formatter"]);
}

#[rstest]
fn missing_toggle_means_disabled(catalog: FormatterCatalog) {
    assert!(
        catalog
            .select(FormatterPhase::BeforeSend, &FormatterToggles::new())
            .is_empty()
    );
}

#[rstest]
fn get_finds_by_name(catalog: FormatterCatalog) {
    assert!(catalog.get("Guid replacer").is_some());
    assert!(catalog.get("unknown").is_none());
}

#[test]
fn registered_formatters_are_selectable() {
    let mut catalog = FormatterCatalog::empty();
    catalog.register(shared(Uppercase));

    let pipeline = catalog.pipeline_for(
        FormatterPhase::BeforeSend,
        &toggles(&[("uppercase", true)]),
    );

    assert_eq!(pipeline.process("abc"), "ABC");
}
