//! Tests for the date-and-time replacement formatter.

use crate::formatting::{adapters::DateTimeReplacer, ports::MessageFormatter};
use crate::test_support::FixedClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn replacer() -> DateTimeReplacer<FixedClock> {
    DateTimeReplacer::new(Arc::new(FixedClock::leap_day())).expect("pattern compiles")
}

#[rstest]
#[case("2023-05-10T12:00:00.123", "2024-02-29T09:08:07.654")]
#[case("2023-05-10T12:00:00", "2024-02-29T09:08:07")]
#[case("10.05.2023 12:00", "29.02.2024 09:08")]
#[case("10.05.2023 12:00:30", "29.02.2024 09:08:07")]
#[case("10/05/2023 23:59", "29/02/2024 09:08")]
#[case("2023-05-10 12:00:30", "29-02-2024 09:08:07")]
#[case("12/31/2023 08:15:00", "29/02/2024 09:08:07")]
fn replaces_timestamps_preserving_shape(
    replacer: DateTimeReplacer<FixedClock>,
    #[case] input: &str,
    #[case] expected: &str,
) {
    assert_eq!(replacer.transform(input).expect("transform succeeds"), expected);
}

#[rstest]
#[case("2023-05-10T25:00:00")]
#[case("2023-13-10T12:00:00")]
#[case("10.05.2023 24:30")]
#[case("just text")]
fn leaves_invalid_timestamps_unchanged(
    replacer: DateTimeReplacer<FixedClock>,
    #[case] input: &str,
) {
    assert_eq!(replacer.transform(input).expect("transform succeeds"), input);
}

#[rstest]
fn leaves_bare_dates_alone(replacer: DateTimeReplacer<FixedClock>) {
    assert_eq!(
        replacer.transform("2023-05-10").expect("transform succeeds"),
        "2023-05-10"
    );
}

#[rstest]
fn replaces_every_timestamp_in_text(replacer: DateTimeReplacer<FixedClock>) {
    let output = replacer
        .transform("start 2023-05-10T12:00:00 end 01.01.2020 00:00")
        .expect("transform succeeds");
    assert_eq!(output, "start 2024-02-29T09:08:07 end 29.02.2024 09:08");
}
