//! Modal visibility flags.
//!
//! Purely synchronous: one boolean per modal, flipped by the views and by
//! the feedback layer on successful submissions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupKind {
    Settings,
    AddBook,
    ReadBook,
    Record,
    ReturnBook,
    AddNewAdmin,
}

impl PopupKind {
    pub const ALL: [PopupKind; 6] = [
        PopupKind::Settings,
        PopupKind::AddBook,
        PopupKind::ReadBook,
        PopupKind::Record,
        PopupKind::ReturnBook,
        PopupKind::AddNewAdmin,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PopupKind::Settings => "Update Credentials",
            PopupKind::AddBook => "Add Book",
            PopupKind::ReadBook => "View Book Info",
            PopupKind::Record => "Record Book",
            PopupKind::ReturnBook => "Return Book",
            PopupKind::AddNewAdmin => "Add New Admin",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopupState {
    pub settings: bool,
    pub add_book: bool,
    pub read_book: bool,
    pub record: bool,
    pub return_book: bool,
    pub add_new_admin: bool,
}

/// Synchronous popup actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Toggle(PopupKind),
    Set(PopupKind, bool),
    CloseAll,
}

impl PopupState {
    fn flag_mut(&mut self, kind: PopupKind) -> &mut bool {
        match kind {
            PopupKind::Settings => &mut self.settings,
            PopupKind::AddBook => &mut self.add_book,
            PopupKind::ReadBook => &mut self.read_book,
            PopupKind::Record => &mut self.record,
            PopupKind::ReturnBook => &mut self.return_book,
            PopupKind::AddNewAdmin => &mut self.add_new_admin,
        }
    }

    pub fn is_open(&self, kind: PopupKind) -> bool {
        match kind {
            PopupKind::Settings => self.settings,
            PopupKind::AddBook => self.add_book,
            PopupKind::ReadBook => self.read_book,
            PopupKind::Record => self.record,
            PopupKind::ReturnBook => self.return_book,
            PopupKind::AddNewAdmin => self.add_new_admin,
        }
    }

    /// First open popup in declaration order. Only one is drawn at a time.
    pub fn topmost(&self) -> Option<PopupKind> {
        PopupKind::ALL.into_iter().find(|k| self.is_open(*k))
    }

    /// Apply an action. Returns whether any flag changed.
    pub fn reduce(&mut self, action: PopupAction) -> bool {
        let before = *self;
        match action {
            PopupAction::Toggle(kind) => {
                let flag = self.flag_mut(kind);
                *flag = !*flag;
            }
            PopupAction::Set(kind, value) => *self.flag_mut(kind) = value,
            PopupAction::CloseAll => *self = PopupState::default(),
        }
        before != *self
    }
}
