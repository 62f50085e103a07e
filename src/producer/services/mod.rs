//! Message production services.

mod producer;

pub use producer::MessageProducer;
