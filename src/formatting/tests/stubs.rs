//! Stub formatters shared by pipeline and catalog tests.

use crate::formatting::{
    domain::{FormatterError, FormatterPhase, FormatterResult},
    ports::MessageFormatter,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Uppercases its input.
pub struct Uppercase;

impl MessageFormatter for Uppercase {
    fn name(&self) -> &str {
        "uppercase"
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, input: &str) -> FormatterResult<String> {
        Ok(input.to_uppercase())
    }
}

/// Appends a fixed suffix.
pub struct Suffix(pub &'static str);

impl MessageFormatter for Suffix {
    fn name(&self) -> &str {
        self.0
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, input: &str) -> FormatterResult<String> {
        Ok(format!("{input}{}", self.0))
    }
}

/// Always returns an error.
pub struct Failing;

impl MessageFormatter for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, _input: &str) -> FormatterResult<String> {
        Err(FormatterError::transform("failing", "boom"))
    }
}

/// Panics on every call.
pub struct Panicking;

impl MessageFormatter for Panicking {
    fn name(&self) -> &str {
        "panicking"
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, _input: &str) -> FormatterResult<String> {
        panic!("formatter blew up")
    }
}

/// Counts invocations and returns its input unchanged.
#[derive(Default)]
pub struct Counting {
    pub calls: AtomicUsize,
}

impl MessageFormatter for Counting {
    fn name(&self) -> &str {
        "counting"
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, input: &str) -> FormatterResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(input.to_owned())
    }
}

pub fn shared<F: MessageFormatter + 'static>(formatter: F) -> Arc<dyn MessageFormatter> {
    Arc::new(formatter)
}
