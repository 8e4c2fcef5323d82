//! Borrow records slice.

use super::status::{AsyncSlice, SlicePayload, Status};
use crate::api::{BorrowRecord, Reply, UserBorrowedBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorrowOp {
    FetchMine,
    FetchAll,
    Record,
    Return,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BorrowPayload {
    MineFetched(Reply<Vec<UserBorrowedBook>>),
    AllFetched(Reply<Vec<BorrowRecord>>),
    Recorded(Reply<BorrowRecord>),
    Returned(Reply<()>),
}

impl SlicePayload for BorrowPayload {
    type Op = BorrowOp;

    fn op(&self) -> BorrowOp {
        match self {
            BorrowPayload::MineFetched(_) => BorrowOp::FetchMine,
            BorrowPayload::AllFetched(_) => BorrowOp::FetchAll,
            BorrowPayload::Recorded(_) => BorrowOp::Record,
            BorrowPayload::Returned(_) => BorrowOp::Return,
        }
    }

    fn message(&self) -> &str {
        match self {
            BorrowPayload::MineFetched(r) => &r.message,
            BorrowPayload::AllFetched(r) => &r.message,
            BorrowPayload::Recorded(r) => &r.message,
            BorrowPayload::Returned(r) => &r.message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorrowState {
    pub status: Status<BorrowOp>,
    pub user_borrowed_books: Vec<UserBorrowedBook>,
    pub all_borrowed_books: Vec<BorrowRecord>,
}

impl AsyncSlice for BorrowState {
    type Op = BorrowOp;
    type Payload = BorrowPayload;

    fn status(&self) -> &Status<BorrowOp> {
        &self.status
    }

    fn status_mut(&mut self) -> &mut Status<BorrowOp> {
        &mut self.status
    }

    fn default_error(op: BorrowOp) -> &'static str {
        match op {
            BorrowOp::FetchMine => "Could not fetch borrowed books",
            BorrowOp::FetchAll => "Could not fetch all borrowed books",
            BorrowOp::Record => "Failed to record borrowed book",
            BorrowOp::Return => "Failed to return borrowed book",
        }
    }

    fn merge(&mut self, payload: BorrowPayload) {
        match payload {
            BorrowPayload::MineFetched(reply) => self.user_borrowed_books = reply.data,
            BorrowPayload::AllFetched(reply) => self.all_borrowed_books = reply.data,
            BorrowPayload::Recorded(reply) => self.all_borrowed_books.push(reply.data),
            // The server does not return the updated record; callers re-fetch.
            BorrowPayload::Returned(_) => {}
        }
    }
}
