//! Pagination sync
//!
//! Keeps the visible page of a paginated playlist view aligned with the
//! current track. The page-action rules are pure functions of the index
//! *before* the pointer moves and the page state; [`PageView`] is the
//! interface of the external view they are applied to.

use serde::{Deserialize, Serialize};

/// Page transition required after a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageAction {
    /// Visible page already contains the new track
    None,

    /// Turn to the following page
    NextPage,

    /// Turn to the preceding page
    PreviousPage,

    /// Wrap to the first page
    FirstPage,

    /// Wrap to the last page
    LastPage,
}

/// Snapshot of a paginated view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Zero-based visible page
    pub page_index: usize,

    /// Rows per page
    pub page_size: usize,

    /// Total number of rows
    pub total_length: usize,
}

impl PageState {
    /// Number of pages (0 for an empty list)
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_length.div_ceil(self.page_size)
    }

    /// Whether a page follows the visible one
    pub fn has_next_page(&self) -> bool {
        let count = self.page_count();
        count != 0 && self.page_index < count - 1
    }

    /// Whether a page precedes the visible one
    pub fn has_previous_page(&self) -> bool {
        self.page_index >= 1 && self.page_size != 0
    }

    /// Page that contains `index`
    pub fn page_of(&self, index: usize) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        index / self.page_size
    }

    /// Row range of the visible page
    pub fn page_range(&self) -> std::ops::Range<usize> {
        let start = (self.page_index * self.page_size).min(self.total_length);
        let end = (start + self.page_size).min(self.total_length);
        start..end
    }

    /// Apply an action; returns whether the visible page changed
    pub fn apply(&mut self, action: PageAction) -> bool {
        let before = self.page_index;
        match action {
            PageAction::None => {}
            PageAction::NextPage => {
                if self.has_next_page() {
                    self.page_index += 1;
                }
            }
            PageAction::PreviousPage => {
                if self.has_previous_page() {
                    self.page_index -= 1;
                }
            }
            PageAction::FirstPage => self.page_index = 0,
            PageAction::LastPage => self.page_index = self.page_count().saturating_sub(1),
        }
        before != self.page_index
    }

    /// Update the row count, keeping the visible page in range
    pub fn set_length(&mut self, total_length: usize) {
        self.total_length = total_length;
        let last = self.page_count().saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }
}

/// Page action for moving forward from `current_index`
///
/// Turns when the current track is the last row of its page or the last
/// row overall; wraps to the first page when no page follows.
pub fn forward_action(current_index: usize, state: &PageState) -> PageAction {
    if state.page_size == 0 {
        return PageAction::None;
    }

    let at_page_end = (current_index + 1) % state.page_size == 0;
    let at_list_end = current_index + 1 == state.total_length;
    if !(at_page_end || at_list_end) {
        return PageAction::None;
    }

    if state.has_next_page() {
        PageAction::NextPage
    } else {
        PageAction::FirstPage
    }
}

/// Page action for moving backward from `current_index`
///
/// Turns when the current track is the first row of its page; wraps to the
/// last page when no page precedes.
pub fn backward_action(current_index: usize, state: &PageState) -> PageAction {
    if state.page_size == 0 {
        return PageAction::None;
    }

    let at_page_start = current_index % state.page_size == 0;
    if !(at_page_start || current_index == 0) {
        return PageAction::None;
    }

    if state.has_previous_page() {
        PageAction::PreviousPage
    } else {
        PageAction::LastPage
    }
}

/// Paginated list view collaborator
///
/// Implemented by the host's table widget; [`Paginator`] is the in-memory
/// implementation used when the host has none.
#[cfg_attr(test, mockall::automock)]
pub trait PageView: Send {
    /// Rows per page
    fn page_size(&self) -> usize;

    /// Total number of rows
    fn length(&self) -> usize;

    /// Zero-based visible page
    fn page_index(&self) -> usize;

    /// Whether a page follows the visible one
    fn has_next_page(&self) -> bool;

    /// Whether a page precedes the visible one
    fn has_previous_page(&self) -> bool;

    /// Turn to the following page
    fn next_page(&mut self);

    /// Turn to the preceding page
    fn previous_page(&mut self);

    /// Show the first page
    fn first_page(&mut self);

    /// Show the last page
    fn last_page(&mut self);

    /// Update the row count
    fn set_length(&mut self, length: usize);

    /// Change rows per page, keeping the first visible row on screen
    fn set_page_size(&mut self, page_size: usize);

    /// Snapshot for the pure page-action rules
    fn state(&self) -> PageState {
        PageState {
            page_index: self.page_index(),
            page_size: self.page_size(),
            total_length: self.length(),
        }
    }
}

/// Apply a page action to a view
pub fn apply_to_view(view: &mut dyn PageView, action: PageAction) {
    match action {
        PageAction::None => {}
        PageAction::NextPage => view.next_page(),
        PageAction::PreviousPage => view.previous_page(),
        PageAction::FirstPage => view.first_page(),
        PageAction::LastPage => view.last_page(),
    }
}

/// In-memory paginated view
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PageState,
}

impl Paginator {
    /// Create an empty paginator; a zero page size is raised to one
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PageState {
                page_index: 0,
                page_size: page_size.max(1),
                total_length: 0,
            },
        }
    }

    /// Row range of the visible page
    pub fn page_range(&self) -> std::ops::Range<usize> {
        self.state.page_range()
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PageView for Paginator {
    fn page_size(&self) -> usize {
        self.state.page_size
    }

    fn length(&self) -> usize {
        self.state.total_length
    }

    fn page_index(&self) -> usize {
        self.state.page_index
    }

    fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    fn has_previous_page(&self) -> bool {
        self.state.has_previous_page()
    }

    fn next_page(&mut self) {
        self.state.apply(PageAction::NextPage);
    }

    fn previous_page(&mut self) {
        self.state.apply(PageAction::PreviousPage);
    }

    fn first_page(&mut self) {
        self.state.apply(PageAction::FirstPage);
    }

    fn last_page(&mut self) {
        self.state.apply(PageAction::LastPage);
    }

    fn set_length(&mut self, length: usize) {
        self.state.set_length(length);
    }

    fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let first_row = self.state.page_index * self.state.page_size;
        self.state.page_size = page_size;
        self.state.page_index = first_row / page_size;
    }

    fn state(&self) -> PageState {
        self.state
    }
}
