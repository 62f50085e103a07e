//! Callback-to-stream bridge for received messages.
//!
//! Transports deliver messages by invoking a registered callback. The
//! [`services::MessageConsumerBridge`] turns that push model into a single
//! ordered, cancellable [`futures::Stream`] that callers pull from, applying
//! the after-receive formatter pipeline on the way out.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
