//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: DateTime<Local>,
}

impl FixedClock {
    /// Freezes the clock at the given local date and time.
    pub fn at(naive: NaiveDateTime) -> Self {
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("fixture time should exist in the local zone");
        Self { local }
    }

    /// Freezes the clock at 2024-02-29 09:08:07.654 local time.
    pub fn leap_day() -> Self {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|date| date.and_hms_milli_opt(9, 8, 7, 654))
            .expect("valid fixture time");
        Self::at(naive)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }
}
