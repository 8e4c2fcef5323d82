//! Request status shared by every async slice.
//!
//! A slice tracks one request lifecycle at a time: `loading` plus at most
//! one piece of [`Feedback`]. Success and error text cannot coexist because
//! they are the same field.

use std::fmt;

/// Whether a settlement older than the slice's latest request is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Apply every settlement; the last one to arrive wins.
    #[default]
    AcceptAll,
    /// Drop settlements whose sequence number is older than the newest
    /// request dispatched to the same slice.
    DiscardStale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Outcome text of the last settled request, tagged with its operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback<Op> {
    pub kind: FeedbackKind,
    pub text: String,
    pub op: Op,
}

impl<Op> Feedback<Op> {
    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

/// `loading` / `error` / `message` for one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status<Op> {
    pub loading: bool,
    pub feedback: Option<Feedback<Op>>,
    latest_seq: u64,
}

impl<Op> Default for Status<Op> {
    fn default() -> Self {
        Self {
            loading: false,
            feedback: None,
            latest_seq: 0,
        }
    }
}

impl<Op: Copy> Status<Op> {
    /// Error text, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        self.feedback
            .as_ref()
            .filter(|f| f.kind == FeedbackKind::Error)
            .map(|f| f.text.as_str())
    }

    /// Success text, if the last request succeeded with a non-empty message.
    pub fn message(&self) -> Option<&str> {
        self.feedback
            .as_ref()
            .filter(|f| f.kind == FeedbackKind::Success && !f.text.is_empty())
            .map(|f| f.text.as_str())
    }

    /// Operation that produced the current feedback.
    pub fn feedback_op(&self) -> Option<Op> {
        self.feedback.as_ref().map(|f| f.op)
    }

    /// Sequence number of the newest request started on this slice.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub(crate) fn begin(&mut self, seq: u64) {
        self.loading = true;
        self.feedback = None;
        self.latest_seq = self.latest_seq.max(seq);
    }

    pub(crate) fn succeed(&mut self, op: Op, text: String) {
        self.loading = false;
        self.feedback = Some(Feedback {
            kind: FeedbackKind::Success,
            text,
            op,
        });
    }

    pub(crate) fn fail(&mut self, op: Op, text: String) {
        self.loading = false;
        self.feedback = Some(Feedback {
            kind: FeedbackKind::Error,
            text,
            op,
        });
    }

    /// Clear loading and feedback. Returns whether anything changed.
    pub(crate) fn reset(&mut self) -> bool {
        let changed = self.loading || self.feedback.is_some();
        self.loading = false;
        self.feedback = None;
        changed
    }

    fn is_stale(&self, seq: u64) -> bool {
        seq < self.latest_seq
    }
}

/// One lifecycle event of an async operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<Op, P> {
    Pending { op: Op, seq: u64 },
    Fulfilled { seq: u64, payload: P },
    /// `error` is `None` when the operation failed without a message.
    Rejected { op: Op, seq: u64, error: Option<String> },
}

impl<Op: Copy, P> Lifecycle<Op, P> {
    pub fn seq(&self) -> u64 {
        match self {
            Lifecycle::Pending { seq, .. }
            | Lifecycle::Fulfilled { seq, .. }
            | Lifecycle::Rejected { seq, .. } => *seq,
        }
    }
}

/// Payload of a fulfilled operation.
pub trait SlicePayload {
    type Op;

    fn op(&self) -> Self::Op;

    fn message(&self) -> &str;
}

/// A slice with an async request lifecycle.
///
/// Implementors supply the data merge and the per-operation fallback error;
/// [`AsyncSlice::settle`] runs the shared state machine.
pub trait AsyncSlice {
    type Op: Copy + fmt::Debug;
    type Payload: SlicePayload<Op = Self::Op>;

    fn status(&self) -> &Status<Self::Op>;

    fn status_mut(&mut self) -> &mut Status<Self::Op>;

    /// Error stored when a rejection carries no message.
    fn default_error(op: Self::Op) -> &'static str;

    /// Apply the data effect of a fulfilled operation.
    fn merge(&mut self, payload: Self::Payload);

    /// Apply one lifecycle event. Returns whether the state changed.
    fn settle(&mut self, event: Lifecycle<Self::Op, Self::Payload>, policy: StalePolicy) -> bool {
        let seq = event.seq();
        match event {
            Lifecycle::Pending { op, seq } => {
                tracing::debug!(?op, seq, "pending");
                self.status_mut().begin(seq);
                true
            }
            _ if policy == StalePolicy::DiscardStale && self.status().is_stale(seq) => {
                tracing::debug!(seq, latest = self.status().latest_seq(), "discarding stale settlement");
                false
            }
            Lifecycle::Fulfilled { payload, .. } => {
                let op = payload.op();
                let message = payload.message().to_string();
                tracing::debug!(?op, seq, "fulfilled");
                self.merge(payload);
                self.status_mut().succeed(op, message);
                true
            }
            Lifecycle::Rejected { op, error, .. } => {
                let text = error.unwrap_or_else(|| Self::default_error(op).to_string());
                tracing::debug!(?op, seq, error = %text, "rejected");
                self.status_mut().fail(op, text);
                true
            }
        }
    }

    /// Clear loading and feedback, keeping data.
    fn reset(&mut self) -> bool {
        self.status_mut().reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_feedback() {
        let mut status: Status<u8> = Status::default();
        status.fail(1, "boom".to_string());
        status.begin(1);
        assert!(status.loading);
        assert_eq!(status.error(), None);
        assert_eq!(status.message(), None);
    }

    #[test]
    fn test_success_and_error_are_exclusive() {
        let mut status: Status<u8> = Status::default();
        status.succeed(1, "ok".to_string());
        assert_eq!(status.message(), Some("ok"));
        assert_eq!(status.error(), None);

        status.fail(2, "bad".to_string());
        assert_eq!(status.message(), None);
        assert_eq!(status.error(), Some("bad"));
        assert_eq!(status.feedback_op(), Some(2));
    }

    #[test]
    fn test_empty_success_message_is_not_reported() {
        let mut status: Status<u8> = Status::default();
        status.succeed(1, String::new());
        assert_eq!(status.message(), None);
        assert!(status.feedback.is_some());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut status: Status<u8> = Status::default();
        status.begin(3);
        assert!(status.reset());
        assert!(!status.reset());
        assert_eq!(status, {
            let mut expected = Status::default();
            expected.latest_seq = 3;
            expected
        });
    }

    #[test]
    fn test_latest_seq_is_monotonic() {
        let mut status: Status<u8> = Status::default();
        status.begin(5);
        status.begin(2);
        assert_eq!(status.latest_seq(), 5);
        assert!(status.is_stale(4));
        assert!(!status.is_stale(5));
    }
}
