//! Users slice (admin only).

use super::status::{AsyncSlice, SlicePayload, Status};
use crate::api::{Reply, UserItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOp {
    FetchAll,
    AddAdmin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserPayload {
    Fetched(Reply<Vec<UserItem>>),
    AdminAdded(Reply<UserItem>),
}

impl SlicePayload for UserPayload {
    type Op = UserOp;

    fn op(&self) -> UserOp {
        match self {
            UserPayload::Fetched(_) => UserOp::FetchAll,
            UserPayload::AdminAdded(_) => UserOp::AddAdmin,
        }
    }

    fn message(&self) -> &str {
        match self {
            UserPayload::Fetched(r) => &r.message,
            UserPayload::AdminAdded(r) => &r.message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub status: Status<UserOp>,
    pub users: Vec<UserItem>,
}

impl AsyncSlice for UserState {
    type Op = UserOp;
    type Payload = UserPayload;

    fn status(&self) -> &Status<UserOp> {
        &self.status
    }

    fn status_mut(&mut self) -> &mut Status<UserOp> {
        &mut self.status
    }

    fn default_error(op: UserOp) -> &'static str {
        match op {
            UserOp::FetchAll => "Unable to fetch users",
            UserOp::AddAdmin => "Unable to add admin",
        }
    }

    fn merge(&mut self, payload: UserPayload) {
        match payload {
            UserPayload::Fetched(reply) => self.users = reply.data,
            UserPayload::AdminAdded(reply) => self.users.push(reply.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use crate::state::status::{Lifecycle, StalePolicy};

    fn item(id: &str) -> UserItem {
        UserItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            role: Role::User,
            email: format!("{id}@x.io"),
            borrowed_books: Vec::new(),
            created_at: String::new(),
        }
    }

    fn fetched(seq: u64, ids: &[&str]) -> Lifecycle<UserOp, UserPayload> {
        Lifecycle::Fulfilled {
            seq,
            payload: UserPayload::Fetched(Reply::new(
                "Users fetched",
                ids.iter().map(|id| item(id)).collect(),
            )),
        }
    }

    #[test]
    fn test_last_settlement_wins_by_default() {
        let mut state = UserState::default();
        state.settle(Lifecycle::Pending { op: UserOp::FetchAll, seq: 1 }, StalePolicy::AcceptAll);
        state.settle(Lifecycle::Pending { op: UserOp::FetchAll, seq: 2 }, StalePolicy::AcceptAll);
        state.settle(fetched(2, &["b"]), StalePolicy::AcceptAll);
        state.settle(fetched(1, &["a"]), StalePolicy::AcceptAll);
        assert_eq!(state.users, vec![item("a")]);
    }

    #[test]
    fn test_discard_stale_keeps_newest() {
        let policy = StalePolicy::DiscardStale;
        let mut state = UserState::default();
        state.settle(Lifecycle::Pending { op: UserOp::FetchAll, seq: 1 }, policy);
        state.settle(Lifecycle::Pending { op: UserOp::FetchAll, seq: 2 }, policy);
        assert!(state.settle(fetched(2, &["b"]), policy));
        assert!(!state.settle(fetched(1, &["a"]), policy));
        assert_eq!(state.users, vec![item("b")]);
        assert!(!state.status.loading);
    }

    #[test]
    fn test_add_admin_appends() {
        let mut state = UserState {
            users: vec![item("a")],
            ..Default::default()
        };
        state.settle(
            Lifecycle::Fulfilled {
                seq: 1,
                payload: UserPayload::AdminAdded(Reply::new("Admin added", item("z"))),
            },
            StalePolicy::AcceptAll,
        );
        assert_eq!(state.users.len(), 2);
        assert_eq!(state.status.message(), Some("Admin added"));
    }
}
