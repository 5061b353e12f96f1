//! Book management methods - create, rename, delete and the prompt-driven flows

use super::{ActionRequest, BookAction, Decision, Ideashelf, Prompter};
use crate::error::{CoreError, CoreResult};
use crate::render::RenderSurface;
use crate::storage::Store;
use crate::types::{Book, BookId, HexColor};
use tracing::info;

const UNTITLED_BOOK: &str = "Untitled";

impl<S: Store, R: RenderSurface> Ideashelf<S, R> {
    fn require_book(&self, id: &BookId) -> CoreResult<Book> {
        self.system
            .store
            .book(id)?
            .ok_or_else(|| CoreError::UnknownBook(id.clone()))
    }

    /// Create a book. A blank title becomes "Untitled"; no color means the
    /// configured default.
    pub fn create_book(&mut self, title: &str, color: Option<HexColor>) -> CoreResult<Book> {
        let title = match title.trim() {
            "" => UNTITLED_BOOK,
            t => t,
        };
        let color = color.unwrap_or_else(|| self.system.config.default_book_color.clone());
        let book = Book::new(title, color, self.now());

        self.system.store.put_book(&book)?;
        info!(book = %book.id, title = %book.title, "Created book");
        self.mark_changed()?;
        Ok(book)
    }

    /// Rename a book. Returns false (and changes nothing) for a blank title.
    pub fn rename_book(&mut self, id: &BookId, title: &str) -> CoreResult<bool> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(false);
        }
        let mut book = self.require_book(id)?;
        book.title = title.to_string();
        book.touch(self.now());
        self.system.store.put_book(&book)?;

        if let Some(open) = self.canvas.book.as_mut().filter(|b| &b.id == id) {
            *open = book.clone();
        }
        info!(book = %id, title = %book.title, "Renamed book");
        self.mark_changed()?;
        Ok(true)
    }

    /// Delete a book and all of its nodes. Deleting the open book returns the
    /// view to the shelf. Returns the number of nodes removed.
    pub fn delete_book(&mut self, id: &BookId) -> CoreResult<usize> {
        self.require_book(id)?;
        let removed = self.system.store.delete_book(id)?;

        if self.navigation.view.open_book() == Some(id) {
            self.leave_canvas();
        }
        info!(book = %id, nodes = removed, "Deleted book");
        self.mark_changed()?;
        Ok(removed)
    }

    // ==================== Prompt-driven flows ====================

    /// Ask for a new title and apply it. Returns whether the book was renamed.
    pub fn request_rename(&mut self, id: &BookId, prompter: &mut dyn Prompter) -> CoreResult<bool> {
        let book = self.require_book(id)?;
        match prompter.decide(ActionRequest::RenameBook {
            current_title: book.title,
        }) {
            Decision::Text(title) => self.rename_book(id, &title),
            _ => Ok(false),
        }
    }

    /// Ask for confirmation and delete. Returns whether the book was deleted.
    pub fn request_delete(&mut self, id: &BookId, prompter: &mut dyn Prompter) -> CoreResult<bool> {
        let book = self.require_book(id)?;
        match prompter.decide(ActionRequest::ConfirmDelete { title: book.title }) {
            Decision::Confirm => {
                self.delete_book(id)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Offer the book action menu and run the chosen action.
    pub fn request_book_action(
        &mut self,
        id: &BookId,
        prompter: &mut dyn Prompter,
    ) -> CoreResult<Option<BookAction>> {
        let book = self.require_book(id)?;
        let action = match prompter.decide(ActionRequest::ChooseBookAction { title: book.title }) {
            Decision::Action(action) => action,
            _ => return Ok(None),
        };
        let applied = match action {
            BookAction::Open => {
                self.open_book(id)?;
                true
            }
            BookAction::Rename => self.request_rename(id, prompter)?,
            BookAction::Delete => self.request_delete(id, prompter)?,
        };
        Ok(applied.then_some(action))
    }
}
