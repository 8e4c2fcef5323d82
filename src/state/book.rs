//! Book inventory slice.

use super::status::{AsyncSlice, SlicePayload, Status};
use crate::api::{Book, Reply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookOp {
    Add,
    FetchAll,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookPayload {
    Added(Reply<Book>),
    Fetched(Reply<Vec<Book>>),
    Deleted(Reply<Option<Book>>),
}

impl SlicePayload for BookPayload {
    type Op = BookOp;

    fn op(&self) -> BookOp {
        match self {
            BookPayload::Added(_) => BookOp::Add,
            BookPayload::Fetched(_) => BookOp::FetchAll,
            BookPayload::Deleted(_) => BookOp::Delete,
        }
    }

    fn message(&self) -> &str {
        match self {
            BookPayload::Added(r) => &r.message,
            BookPayload::Fetched(r) => &r.message,
            BookPayload::Deleted(r) => &r.message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookState {
    pub status: Status<BookOp>,
    pub books: Vec<Book>,
}

impl BookState {
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }
}

impl AsyncSlice for BookState {
    type Op = BookOp;
    type Payload = BookPayload;

    fn status(&self) -> &Status<BookOp> {
        &self.status
    }

    fn status_mut(&mut self) -> &mut Status<BookOp> {
        &mut self.status
    }

    fn default_error(op: BookOp) -> &'static str {
        match op {
            BookOp::Add => "Add book failed",
            BookOp::FetchAll => "Fetch all books failed",
            BookOp::Delete => "Delete book failed",
        }
    }

    fn merge(&mut self, payload: BookPayload) {
        match payload {
            BookPayload::Added(reply) => self.books.push(reply.data),
            BookPayload::Fetched(reply) => self.books = reply.data,
            // Without the deleted record there is nothing to match on.
            BookPayload::Deleted(reply) => {
                if let Some(deleted) = reply.data {
                    self.books.retain(|b| b.id != deleted.id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::status::{Lifecycle, StalePolicy};

    fn book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Title {id}"),
            author: "Anon".to_string(),
            description: String::new(),
            price: 10.0,
            quantity: 1,
            availability: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn fulfil(state: &mut BookState, payload: BookPayload) {
        state.settle(Lifecycle::Fulfilled { seq: 1, payload }, StalePolicy::AcceptAll);
    }

    #[test]
    fn test_fetch_replaces_books() {
        let mut state = BookState {
            books: vec![book("old")],
            ..Default::default()
        };
        fulfil(
            &mut state,
            BookPayload::Fetched(Reply::new("Books fetched", vec![book("a"), book("b")])),
        );
        let ids: Vec<_> = state.books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(state.status.message(), Some("Books fetched"));
    }

    #[test]
    fn test_add_appends() {
        let mut state = BookState {
            books: vec![book("a")],
            ..Default::default()
        };
        fulfil(&mut state, BookPayload::Added(Reply::new("Book added", book("b"))));
        assert_eq!(state.books.len(), 2);
        assert_eq!(state.books[1].id, "b");
    }

    #[test]
    fn test_delete_removes_only_matching_id() {
        let mut state = BookState {
            books: vec![book("a"), book("id123"), book("c")],
            ..Default::default()
        };
        fulfil(
            &mut state,
            BookPayload::Deleted(Reply::new("Deleted", Some(book("id123")))),
        );
        assert_eq!(state.books, vec![book("a"), book("c")]);
    }

    #[test]
    fn test_delete_without_data_keeps_books() {
        let mut state = BookState {
            books: vec![book("a")],
            ..Default::default()
        };
        fulfil(&mut state, BookPayload::Deleted(Reply::new("Deleted", None)));
        assert_eq!(state.books.len(), 1);
        assert_eq!(state.status.message(), Some("Deleted"));
    }

    #[test]
    fn test_rejected_default_message() {
        let mut state = BookState::default();
        state.settle(
            Lifecycle::Rejected { op: BookOp::Delete, seq: 1, error: None },
            StalePolicy::AcceptAll,
        );
        assert_eq!(state.status.error(), Some("Delete book failed"));
    }
}
