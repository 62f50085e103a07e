//! Built-in formatters.
//!
//! Pattern-based formatters share one rule: a regex match alone never
//! triggers a substitution. Each candidate must also survive a strict
//! re-parse against an exact format before it is replaced.

mod date;
mod date_time;
mod guid;
mod json;
mod strict;

pub use date::DateReplacer;
pub use date_time::DateTimeReplacer;
pub use guid::GuidReplacer;
pub use json::JsonPrettyFormatter;
