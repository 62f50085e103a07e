//! Pull-side view of the bridge's receive queue.

use crate::formatting::services::FormatterPipeline;
use crate::transport::domain::{Payload, ReceivedMessage};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{Mutex, mpsc::UnboundedReceiver};
use tokio_util::sync::CancellationToken;

pub(super) type SharedReceiver = Arc<Mutex<UnboundedReceiver<ReceivedMessage>>>;

/// Ordered stream of received messages.
///
/// Text payloads have been through the after-receive pipeline. The stream
/// ends once the queue is closed and drained, or once its cancellation
/// token fires and nothing is left buffered.
pub struct MessageStream {
    inner: BoxStream<'static, ReceivedMessage>,
}

struct Cursor {
    receiver: SharedReceiver,
    pipeline: Arc<FormatterPipeline>,
    cancellation: CancellationToken,
}

impl Cursor {
    // Joined streams share the receiver; waiting for the lock observes
    // cancellation too.
    async fn next_message(&self) -> Option<ReceivedMessage> {
        let mut receiver = tokio::select! {
            biased;
            guard = self.receiver.lock() => guard,
            () = self.cancellation.cancelled() => {
                let mut receiver = self.receiver.try_lock().ok()?;
                return receiver.try_recv().ok();
            }
        };
        tokio::select! {
            biased;
            message = receiver.recv() => message,
            () = self.cancellation.cancelled() => receiver.try_recv().ok(),
        }
    }

    fn format(&self, mut message: ReceivedMessage) -> ReceivedMessage {
        if let Payload::Text(text) = message.payload_mut() {
            *text = self.pipeline.process(text);
        }
        message
    }
}

impl MessageStream {
    pub(super) fn new(
        receiver: SharedReceiver,
        pipeline: Arc<FormatterPipeline>,
        cancellation: CancellationToken,
    ) -> Self {
        let cursor = Cursor {
            receiver,
            pipeline,
            cancellation,
        };
        let inner = stream::unfold(cursor, |cursor| async move {
            let message = cursor.next_message().await?;
            Some((cursor.format(message), cursor))
        })
        .boxed();
        Self { inner }
    }
}

impl Stream for MessageStream {
    type Item = ReceivedMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for MessageStream {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("MessageStream").finish_non_exhaustive()
    }
}
