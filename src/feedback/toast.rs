//! Transient notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// Most toasts kept at once; the oldest is dropped first.
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
    pub created: Instant,
}

/// Queue of visible toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    next_id: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
            next_id: 0,
        }
    }

    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        self.push_at(kind, text, Instant::now())
    }

    pub fn push_at(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let text = text.into();
        tracing::debug!(?kind, %text, "toast");
        self.toasts.push_back(Toast {
            id,
            kind,
            text,
            created: now,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        id
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, text)
    }

    pub fn warning(&mut self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Warning, text)
    }

    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, text)
    }

    /// Drop expired toasts. Returns whether any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let ttl = self.ttl;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created) < ttl);
        before != self.toasts.len()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_after_ttl() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        let start = Instant::now();
        queue.push_at(ToastKind::Success, "saved", start);
        queue.push_at(ToastKind::Error, "failed", start + Duration::from_secs(3));

        assert!(!queue.prune(start + Duration::from_secs(4)));
        assert!(queue.prune(start + Duration::from_secs(5)));
        let left: Vec<_> = queue.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(left, vec!["failed"]);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::default();
        for n in 0..8 {
            queue.info(format!("n{n}"));
        }
        assert_eq!(queue.len(), MAX_TOASTS);
        assert_eq!(queue.iter().next().map(|t| t.text.as_str()), Some("n3"));
    }

    #[test]
    fn test_dismiss() {
        let mut queue = ToastQueue::default();
        let id = queue.warning("careful");
        queue.success("ok");
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert_eq!(queue.len(), 1);
    }
}
