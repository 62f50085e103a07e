//! Push-to-pull adapter over a consumer transport.

use super::stream::{MessageStream, SharedReceiver};
use crate::cancellation::ResettableCancellationScope;
use crate::consumer::domain::{ConsumerError, ConsumerResult, ReceiveState};
use crate::formatting::services::FormatterPipeline;
use crate::transport::{
    domain::ReceivedMessage,
    ports::{ConsumerTransport, MessageHandler, TransportError},
};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{
    mpsc::{self, UnboundedSender},
    watch,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

type SenderSlot = Arc<Mutex<Option<UnboundedSender<ReceivedMessage>>>>;

#[derive(Clone)]
enum StartOutcome {
    Pending,
    Started,
    Failed(TransportError),
}

#[derive(Default)]
struct BridgeState {
    phase: ReceiveState,
    sender: Option<SenderSlot>,
    receiver: Option<SharedReceiver>,
    session: Option<CancellationToken>,
    starting: Option<watch::Receiver<StartOutcome>>,
    disposed: bool,
}

impl BridgeState {
    fn session_is_live(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.is_cancelled())
    }

    // Dropping the only sender closes the queue; buffered messages stay
    // readable.
    fn close_queue(&mut self) {
        if let Some(slot) = self.sender.take() {
            lock_slot(&slot).take();
        }
    }
}

fn lock_slot(
    slot: &Mutex<Option<UnboundedSender<ReceivedMessage>>>,
) -> MutexGuard<'_, Option<UnboundedSender<ReceivedMessage>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

enum StartPlan {
    Join {
        receiver: SharedReceiver,
        pending: Option<watch::Receiver<StartOutcome>>,
    },
    Register {
        slot: SenderSlot,
        receiver: SharedReceiver,
        session: CancellationToken,
        outcome: watch::Sender<StartOutcome>,
    },
}

/// Adapts a callback-driven transport into a pull-based message stream.
///
/// At most one transport registration is active at a time. Every stream
/// returned while a session is running reads from the same FIFO queue, so
/// messages are observed in delivery order.
pub struct MessageConsumerBridge<T> {
    transport: Arc<T>,
    pipeline: Arc<FormatterPipeline>,
    scope: ResettableCancellationScope,
    state: Mutex<BridgeState>,
}

impl<T> MessageConsumerBridge<T>
where
    T: ConsumerTransport,
{
    /// Creates an idle bridge over `transport`.
    #[must_use]
    pub fn new(transport: Arc<T>, pipeline: Arc<FormatterPipeline>) -> Self {
        Self {
            transport,
            pipeline,
            scope: ResettableCancellationScope::new(),
            state: Mutex::new(BridgeState::default()),
        }
    }

    // The state is only mutated in short critical sections that cannot
    // leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current receive state.
    #[must_use]
    pub fn state(&self) -> ReceiveState {
        self.lock().phase
    }

    /// Returns the after-receive pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &FormatterPipeline {
        &self.pipeline
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Returns whether [`Self::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    /// Starts receiving and returns a stream of messages.
    ///
    /// The first call registers a handler with the transport. Calls made
    /// while a session is starting or streaming do not register again;
    /// they return another stream over the same queue, once the pending
    /// registration has succeeded. The stream ends
    /// after draining buffered messages when `cancellation` fires or
    /// [`Self::stop_receiving`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError::StartFailed`] when the transport cannot
    /// start (the bridge returns to [`ReceiveState::Idle`]), including to
    /// callers that joined while that registration was pending, or
    /// [`ConsumerError::Disposed`] after [`Self::dispose`].
    pub async fn start_receiving(
        &self,
        cancellation: &CancellationToken,
    ) -> ConsumerResult<MessageStream> {
        let (slot, receiver, session, outcome) = match self.plan_start(cancellation)? {
            StartPlan::Join { receiver, pending } => {
                if let Some(pending) = pending {
                    await_registration(pending).await?;
                }
                debug!("joining running receive session");
                return Ok(self.stream(receiver, cancellation.child_token()));
            }
            StartPlan::Register {
                slot,
                receiver,
                session,
                outcome,
            } => (slot, receiver, session, outcome),
        };

        let handler: MessageHandler = Arc::new(move |message| {
            if let Some(sender) = lock_slot(&slot).as_ref()
                && sender.send(message).is_err()
            {
                debug!("receive queue dropped, discarding message");
            }
        });

        if let Err(err) = self
            .transport
            .start_receiving(handler, session.clone())
            .await
        {
            self.abandon_start(&session);
            outcome.send_replace(StartOutcome::Failed(err.clone()));
            return Err(ConsumerError::StartFailed(err));
        }

        let superseded = {
            let mut state = self.lock();
            if state.phase == ReceiveState::Starting {
                state.phase = ReceiveState::Streaming;
                state.starting = None;
                false
            } else {
                true
            }
        };
        if superseded {
            // Stopped or disposed while the registration was in flight.
            self.transport.stop_receiving().await?;
        } else {
            info!("receive session started");
        }
        outcome.send_replace(StartOutcome::Started);
        Ok(self.stream(receiver, session))
    }

    fn plan_start(&self, cancellation: &CancellationToken) -> ConsumerResult<StartPlan> {
        let mut state = self.lock();
        if state.disposed {
            return Err(ConsumerError::Disposed);
        }
        if state.phase.is_active()
            && state.session_is_live()
            && let Some(receiver) = state.receiver.clone()
        {
            let pending = match state.phase {
                ReceiveState::Starting => state.starting.clone(),
                _ => None,
            };
            return Ok(StartPlan::Join { receiver, pending });
        }

        state.close_queue();
        let (sender, receiver) = mpsc::unbounded_channel();
        let slot: SenderSlot = Arc::new(Mutex::new(Some(sender)));
        let receiver: SharedReceiver = Arc::new(tokio::sync::Mutex::new(receiver));
        let session = self.scope.reset_linked(cancellation)?;
        let (outcome, pending) = watch::channel(StartOutcome::Pending);

        state.phase = ReceiveState::Starting;
        state.starting = Some(pending);
        state.sender = Some(Arc::clone(&slot));
        state.receiver = Some(Arc::clone(&receiver));
        state.session = Some(session.clone());
        Ok(StartPlan::Register {
            slot,
            receiver,
            session,
            outcome,
        })
    }

    fn abandon_start(&self, session: &CancellationToken) {
        session.cancel();
        let mut state = self.lock();
        if state.phase == ReceiveState::Starting {
            state.phase = ReceiveState::Idle;
        }
        state.close_queue();
        state.receiver = None;
        state.session = None;
        state.starting = None;
    }

    fn stream(&self, receiver: SharedReceiver, cancellation: CancellationToken) -> MessageStream {
        MessageStream::new(receiver, Arc::clone(&self.pipeline), cancellation)
    }

    /// Stops the running receive session.
    ///
    /// The queue is closed, so open streams yield what is already buffered
    /// and then end. Stopping an idle or stopped bridge does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError::Transport`] when the transport fails to stop.
    pub async fn stop_receiving(&self) -> ConsumerResult<()> {
        let was_active = {
            let mut state = self.lock();
            let was_active = state.phase.is_active();
            if was_active {
                state.phase = ReceiveState::Stopped;
                state.close_queue();
            }
            was_active
        };
        if was_active {
            self.transport.stop_receiving().await?;
            info!("receive session stopped");
        }
        Ok(())
    }

    /// Stops receiving and retires the bridge.
    ///
    /// Safe to call on a bridge that never started; later calls have no
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError::Transport`] when the transport fails to stop.
    pub async fn dispose(&self) -> ConsumerResult<()> {
        let was_active = {
            let mut state = self.lock();
            if state.disposed {
                return Ok(());
            }
            state.disposed = true;
            let was_active = state.phase.is_active();
            if state.phase != ReceiveState::Idle {
                state.phase = ReceiveState::Stopped;
            }
            state.close_queue();
            was_active
        };
        self.scope.dispose();
        if was_active {
            self.transport.stop_receiving().await?;
        }
        debug!("consumer bridge disposed");
        Ok(())
    }
}

// A registration abandoned without reporting counts as cancelled.
async fn await_registration(mut pending: watch::Receiver<StartOutcome>) -> ConsumerResult<()> {
    let outcome = pending
        .wait_for(|outcome| !matches!(outcome, StartOutcome::Pending))
        .await
        .map(|outcome| outcome.clone());
    match outcome {
        Ok(StartOutcome::Failed(err)) => Err(ConsumerError::StartFailed(err)),
        Ok(_) => Ok(()),
        Err(_) => Err(ConsumerError::StartFailed(TransportError::Cancelled)),
    }
}

impl<T> fmt::Debug for MessageConsumerBridge<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = self
            .state
            .lock()
            .map_or(ReceiveState::Stopped, |state| state.phase);
        formatter
            .debug_struct("MessageConsumerBridge")
            .field("state", &phase)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}
