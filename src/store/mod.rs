//! Dispatch/selector bridge between the views and the state slices.
//!
//! [`Store`] owns the [`AppState`] and is the only place it is mutated.
//! Operations run as spawned tokio tasks; their settlements come back over
//! an unbounded channel and are applied on the caller's task by
//! [`Store::next_action`] or [`Store::drain`], so reducers never run
//! concurrently.
//!
//! ```ignore
//! let ticket = store.dispatch(Operation::GetAllBooks);
//! assert!(store.state().book.status.loading);
//! store.settle_all().await;
//! let books = store.select(|s| s.book.books.len());
//! ```

mod action;
mod operation;
mod subscription;

pub use action::{reduce, Action};
pub use operation::{OpKind, Operation, Payload};
pub use subscription::{Subscribers, Subscription};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::api::LibraryApi;
use crate::state::{AppState, StalePolicy};

/// Handle for a fire-and-forget dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: OpKind,
}

/// Result of an awaited dispatch: the payload, or the rejection message.
pub type Outcome = Result<Payload, String>;

/// Resolves once the store has applied the operation's settlement.
///
/// The store must keep being driven ([`Store::next_action`],
/// [`Store::drain`] or [`Store::settle_all`]) for this to resolve.
#[derive(Debug)]
pub struct Settlement {
    ticket: Ticket,
    rx: oneshot::Receiver<Outcome>,
}

impl Settlement {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Non-blocking check used by the event loop.
    pub fn try_take(&mut self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(dropped(self.ticket))),
        }
    }
}

fn dropped(ticket: Ticket) -> String {
    ticket.kind.default_error().to_string()
}

impl Future for Settlement {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome> {
        let ticket = self.ticket;
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(dropped(ticket))))
    }
}

/// A finished network call on its way back to the store.
struct Settled {
    ticket: Ticket,
    /// `Err(None)` when the task failed before producing a message.
    result: Result<Payload, Option<String>>,
    reply: Option<oneshot::Sender<Outcome>>,
}

/// Owner of the application state.
pub struct Store {
    state: AppState,
    api: LibraryApi,
    policy: StalePolicy,
    next_seq: u64,
    in_flight: usize,
    tx: mpsc::UnboundedSender<Settled>,
    rx: mpsc::UnboundedReceiver<Settled>,
    subscribers: Subscribers,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("policy", &self.policy)
            .field("next_seq", &self.next_seq)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(api: LibraryApi) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            policy: StalePolicy::default(),
            next_seq: 1,
            in_flight: 0,
            tx,
            rx,
            subscribers: Subscribers::default(),
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &LibraryApi {
        &self.api
    }

    /// Read a value derived from the state.
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.state)
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&self, callback: impl Fn(&AppState) + Send + 'static) -> Subscription {
        self.subscribers.add(callback)
    }

    /// Number of dispatched operations not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply an action synchronously. Returns whether the state changed.
    pub fn apply(&mut self, action: Action) -> bool {
        let changed = reduce(&mut self.state, action, self.policy);
        if changed {
            self.subscribers.notify(&self.state);
        }
        changed
    }

    /// Start an operation without waiting for it.
    ///
    /// The slice is marked loading before this returns.
    pub fn dispatch(&mut self, operation: Operation) -> Ticket {
        self.start(operation, None)
    }

    /// Start an operation and get a future for its outcome.
    pub fn dispatch_unwrap(&mut self, operation: Operation) -> Settlement {
        let (reply, rx) = oneshot::channel();
        let ticket = self.start(operation, Some(reply));
        Settlement { ticket, rx }
    }

    fn start(&mut self, operation: Operation, reply: Option<oneshot::Sender<Outcome>>) -> Ticket {
        let ticket = Ticket {
            seq: self.next_seq,
            kind: operation.kind(),
        };
        self.next_seq += 1;
        self.in_flight += 1;
        debug!(kind = ?ticket.kind, seq = ticket.seq, "dispatch");
        self.apply(ticket.kind.pending(ticket.seq));

        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(operation.run(api)).await {
                Ok(Ok(payload)) => Ok(payload),
                Ok(Err(err)) => Err(Some(err.into_message())),
                Err(join_error) => {
                    warn!(kind = ?ticket.kind, seq = ticket.seq, error = %join_error, "operation task failed");
                    Err(None)
                }
            };
            // The store may already be gone at shutdown.
            let _ = tx.send(Settled {
                ticket,
                result,
                reply,
            });
        });
        ticket
    }

    fn settle(&mut self, settled: Settled) -> bool {
        let Settled {
            ticket,
            result,
            reply,
        } = settled;
        self.in_flight = self.in_flight.saturating_sub(1);

        let (action, outcome) = match result {
            Ok(payload) => {
                let outcome = reply.as_ref().map(|_| Ok(payload.clone()));
                (payload.fulfilled(ticket.seq), outcome)
            }
            Err(error) => {
                let outcome = reply.as_ref().map(|_| {
                    Err(error
                        .clone()
                        .unwrap_or_else(|| ticket.kind.default_error().to_string()))
                });
                (ticket.kind.rejected(ticket.seq, error), outcome)
            }
        };

        let changed = self.apply(action);
        if let (Some(reply), Some(outcome)) = (reply, outcome) {
            // The caller may have stopped waiting.
            let _ = reply.send(outcome);
        }
        changed
    }

    /// Wait for the next settlement and apply it. Returns whether the state
    /// changed.
    ///
    /// Cancel safe: nothing is lost if the future is dropped before a
    /// settlement arrives.
    pub async fn next_action(&mut self) -> bool {
        match self.rx.recv().await {
            Some(settled) => self.settle(settled),
            None => false,
        }
    }

    /// Apply every settlement that has already arrived. Returns how many
    /// were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(settled) = self.rx.try_recv() {
            self.settle(settled);
            applied += 1;
        }
        applied
    }

    /// Wait until every dispatched operation has been applied.
    pub async fn settle_all(&mut self) {
        while self.in_flight > 0 {
            self.next_action().await;
        }
    }
}
