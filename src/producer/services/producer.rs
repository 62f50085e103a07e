//! Formatting, encoding, and dispatch of outgoing messages.

use crate::cancellation::ResettableCancellationScope;
use crate::formatting::services::FormatterPipeline;
use crate::producer::{
    domain::{DispatchMode, ProducerError, ProducerResult, SendOutcome},
    ports::EncodingStrategy,
};
use crate::transport::{
    domain::Payload,
    ports::{ProducerTransport, TransportError},
};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Sends text through a transport after formatting and encoding it.
///
/// The encoding strategy and the before-send pipeline are fixed at
/// construction. Each call to [`Self::send_messages`] picks a
/// [`DispatchMode`] from its arguments.
pub struct MessageProducer<T> {
    transport: Arc<T>,
    pipeline: Arc<FormatterPipeline>,
    encoding: Arc<dyn EncodingStrategy>,
    scope: ResettableCancellationScope,
    disposed: AtomicBool,
    released: Mutex<bool>,
}

impl<T> MessageProducer<T>
where
    T: ProducerTransport,
{
    /// Creates a producer over `transport`.
    #[must_use]
    pub fn new(
        transport: Arc<T>,
        pipeline: Arc<FormatterPipeline>,
        encoding: Arc<dyn EncodingStrategy>,
    ) -> Self {
        Self {
            transport,
            pipeline,
            encoding,
            scope: ResettableCancellationScope::new(),
            disposed: AtomicBool::new(false),
            released: Mutex::new(false),
        }
    }

    /// Returns the before-send pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &FormatterPipeline {
        &self.pipeline
    }

    /// Returns the encoding strategy.
    #[must_use]
    pub fn encoding(&self) -> &dyn EncodingStrategy {
        self.encoding.as_ref()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Returns whether [`Self::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn ensure_live(&self) -> ProducerResult<()> {
        if self.is_disposed() {
            Err(ProducerError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Formats, encodes, and sends `number_of_messages` copies of `text`.
    ///
    /// Blank text is skipped without touching the transport. A single
    /// message is sent on its own; several messages go out as one batch
    /// unless a positive `delay` is given, in which case they are sent one
    /// at a time with `delay` between sends. Cancelling `cancellation` (or
    /// calling [`Self::cancel_pending`]) stops a delayed loop early; the
    /// messages already sent stay sent and the outcome reports
    /// [`SendOutcome::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::Disposed`] after [`Self::dispose`],
    /// [`ProducerError::Encoding`] when the encoding strategy rejects the
    /// text, or [`ProducerError::Transport`] when the transport fails, for
    /// example because a batch exceeds its capacity.
    pub async fn send_messages(
        &self,
        text: &str,
        number_of_messages: usize,
        delay: Option<Duration>,
        cancellation: &CancellationToken,
    ) -> ProducerResult<SendOutcome> {
        self.ensure_live()?;
        if text.trim().is_empty() {
            debug!("skipping blank message");
            return Ok(SendOutcome::Skipped);
        }

        let formatted = self.pipeline.process(text);
        let payload = self.encoding.encode(&formatted)?;
        let mode = DispatchMode::for_request(number_of_messages, delay);
        info!(%mode, number_of_messages, bytes = payload.len(), "dispatching messages");

        match mode {
            DispatchMode::Single => self.send_single(payload, cancellation).await,
            DispatchMode::Batch => {
                self.send_batch(vec![payload; number_of_messages], cancellation)
                    .await
            }
            DispatchMode::Delayed => {
                let payloads = vec![payload; number_of_messages];
                self.send_delayed(payloads, delay.unwrap_or_default(), cancellation)
                    .await
            }
        }
    }

    async fn send_single(
        &self,
        payload: Payload,
        cancellation: &CancellationToken,
    ) -> ProducerResult<SendOutcome> {
        let mode = DispatchMode::Single;
        let result = tokio::select! {
            biased;
            () = cancellation.cancelled() => Err(TransportError::Cancelled),
            result = self.transport.send_one(payload, cancellation) => result,
        };
        settle(mode, 1, result)
    }

    async fn send_batch(
        &self,
        payloads: Vec<Payload>,
        cancellation: &CancellationToken,
    ) -> ProducerResult<SendOutcome> {
        let mode = DispatchMode::Batch;
        let count = payloads.len();
        let result = tokio::select! {
            biased;
            () = cancellation.cancelled() => Err(TransportError::Cancelled),
            result = self.transport.send_batch(payloads, cancellation) => result,
        };
        settle(mode, count, result)
    }

    async fn send_delayed(
        &self,
        payloads: Vec<Payload>,
        delay: Duration,
        cancellation: &CancellationToken,
    ) -> ProducerResult<SendOutcome> {
        let mode = DispatchMode::Delayed;
        let session = self.scope.token()?.child_token();
        let send = self.transport.send_with_delay(payloads, delay, &session);
        tokio::pin!(send);
        let delivery = tokio::select! {
            biased;
            () = cancellation.cancelled() => {
                session.cancel();
                send.await?
            }
            result = &mut send => result?,
        };

        if delivery.cancelled {
            warn!(
                delivered = delivery.delivered,
                total = delivery.total,
                "delayed send cancelled"
            );
            return Ok(SendOutcome::Cancelled {
                mode,
                delivered: delivery.delivered,
            });
        }
        Ok(SendOutcome::Sent {
            mode,
            delivered: delivery.delivered,
        })
    }

    /// Cancels an in-flight delayed send without disposing the producer.
    ///
    /// Later sends are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::Disposed`] after [`Self::dispose`].
    pub fn cancel_pending(&self) -> ProducerResult<()> {
        self.scope.reset()?;
        Ok(())
    }

    /// Cancels pending work and releases the transport.
    ///
    /// Sends are rejected from the first call on. The transport is
    /// released exactly once; after a successful release later calls
    /// return `Ok` without touching it, while a failed release is retried
    /// by the next call.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::Transport`] when the transport fails to
    /// close.
    pub async fn dispose(&self) -> ProducerResult<()> {
        self.disposed.store(true, Ordering::Release);
        self.scope.dispose();
        let mut released = self.released.lock().await;
        if *released {
            return Ok(());
        }
        self.transport.dispose().await?;
        *released = true;
        info!("producer disposed");
        Ok(())
    }
}

fn settle(
    mode: DispatchMode,
    count: usize,
    result: Result<(), TransportError>,
) -> ProducerResult<SendOutcome> {
    match result {
        Ok(()) => Ok(SendOutcome::Sent {
            mode,
            delivered: count,
        }),
        Err(TransportError::Cancelled) => {
            warn!(%mode, "send cancelled");
            Ok(SendOutcome::Cancelled { mode, delivered: 0 })
        }
        Err(err) => Err(err.into()),
    }
}

impl<T> fmt::Debug for MessageProducer<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MessageProducer")
            .field("pipeline", &self.pipeline)
            .field("encoding", &self.encoding)
            .field("disposed", &self.disposed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
