// crates/locsearch-core/src/selection.rs

//! # Selection & Navigation
//!
//! The visible suggestion list, its highlight and its visibility.
//!
//! Invariants held after every method:
//! - `highlighted` is `None` or a valid index into `suggestions`;
//! - replacing the suggestions resets the highlight;
//! - the list is open only if it holds suggestions and was not dismissed;
//! - a dismissal hides the rows on screen, fresh non-empty results reopen it.

use crate::model::{SelectedLocation, SuggestionList};

/// Rendered state of the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Closed,
    /// A lookup is pending and nothing is shown yet.
    OpenEmpty,
    OpenWithResults { highlighted: Option<usize> },
}

#[derive(Debug, Clone)]
pub struct Selection {
    suggestions: SuggestionList,
    highlighted: Option<usize>,
    dismissed: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            suggestions: SuggestionList::empty(),
            highlighted: None,
            dismissed: false,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty() && !self.dismissed
    }

    pub fn state(&self, loading: bool) -> ListState {
        if self.is_open() {
            ListState::OpenWithResults {
                highlighted: self.highlighted,
            }
        } else if loading && !self.dismissed {
            ListState::OpenEmpty
        } else {
            ListState::Closed
        }
    }

    /// New results arrived. Non-empty results reopen a dismissed list.
    pub fn replace(&mut self, suggestions: SuggestionList) {
        if !suggestions.is_empty() {
            self.dismissed = false;
        }
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.replace(SuggestionList::empty());
    }

    /// Escape or a pointer interaction outside the component.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Editing or focusing lifts a previous dismissal.
    pub fn undismiss(&mut self) {
        self.dismissed = false;
    }

    /// Arrow-down. Holds at the last row, never wraps.
    pub fn move_down(&mut self) {
        if !self.is_open() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    /// Arrow-up. No-op on the first row or without a highlight.
    pub fn move_up(&mut self) {
        if !self.is_open() {
            return;
        }
        if let Some(i) = self.highlighted {
            self.highlighted = Some(i.saturating_sub(1));
        }
    }

    /// Pointer hovering row `index`.
    pub fn hover(&mut self, index: usize) {
        if self.is_open() && index < self.suggestions.len() {
            self.highlighted = Some(index);
        }
    }

    /// Enter. Commits only an explicit highlight.
    pub fn commit_highlighted(&mut self) -> Option<SelectedLocation> {
        if !self.is_open() {
            return None;
        }
        self.commit_at(self.highlighted?)
    }

    /// Pointer selection of row `index`, independent of the highlight.
    pub fn commit_at(&mut self, index: usize) -> Option<SelectedLocation> {
        if !self.is_open() {
            return None;
        }
        let selected = SelectedLocation::from(self.suggestions.get(index)?);
        self.clear();
        self.dismiss();
        Some(selected)
    }
}
