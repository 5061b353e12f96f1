//! View and prompt types shared by the session object.

use crate::types::BookId;

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppView {
    /// The list of books
    #[default]
    Shelf,
    /// A book's canvas
    Canvas(BookId),
}

impl AppView {
    pub fn is_canvas(&self) -> bool {
        matches!(self, AppView::Canvas(_))
    }

    pub fn open_book(&self) -> Option<&BookId> {
        match self {
            AppView::Canvas(id) => Some(id),
            AppView::Shelf => None,
        }
    }
}

/// The actions offered for a book on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Open,
    Rename,
    Delete,
}

/// A question the engine needs the user to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Ask for a new title, prefilled with the current one
    RenameBook { current_title: String },
    /// Ask for confirmation before deleting a book and its nodes
    ConfirmDelete { title: String },
    /// Ask which action to run on a book
    ChooseBookAction { title: String },
}

/// The user's answer to an [`ActionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Cancel,
    Confirm,
    Text(String),
    Action(BookAction),
}

/// The user prompt boundary (dialogs, menus).
pub trait Prompter {
    fn decide(&mut self, request: ActionRequest) -> Decision;
}

impl<F> Prompter for F
where
    F: FnMut(ActionRequest) -> Decision,
{
    fn decide(&mut self, request: ActionRequest) -> Decision {
        self(request)
    }
}
