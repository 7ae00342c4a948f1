//! # Page Window
//!
//! Pure pagination state plus the derived page count, boundary flags, and slicing.
//!
//! [`PageWindow`] does not clamp `page_index` when the item count shrinks. A
//! window left past the end simply yields an empty page; the orchestrator
//! decides when to go back to the first page.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub page_index: usize,
    /// Always at least 1.
    pub page_size: usize,
    /// Ascending, de-duplicated, no zeros.
    pub page_size_options: Vec<usize>,
    pub total_items: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS.to_vec())
    }
}

impl PageState {
    pub fn new(page_size: usize, page_size_options: Vec<usize>) -> Self {
        Self {
            page_index: 0,
            page_size: sanitize_page_size(page_size),
            page_size_options: sanitize_options(page_size_options),
            total_items: 0,
        }
    }
}

/// What the paging control reports when the user jumps to another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEvent {
    pub page_index: usize,
    pub page_size: usize,
    /// The item count the control was rendered with.
    pub length: usize,
}

/// A partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePatch {
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    pub page_size_options: Option<Vec<usize>>,
    pub total_items: Option<usize>,
}

fn sanitize_page_size(page_size: usize) -> usize {
    page_size.max(1)
}

fn sanitize_options(mut options: Vec<usize>) -> Vec<usize> {
    options.retain(|&size| size > 0);
    options.sort_unstable();
    options.dedup();
    options
}

#[derive(Debug, Clone, Default)]
pub struct PageWindow {
    state: PageState,
    defaults: PageState,
}

impl PageWindow {
    pub fn new(defaults: PageState) -> Self {
        Self {
            state: defaults.clone(),
            defaults,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn total_items(&self) -> usize {
        self.state.total_items
    }

    /// Resets to the configured defaults, then applies `config` on top.
    pub fn initialize(&mut self, config: Option<PagePatch>) {
        self.state = self.defaults.clone();
        if let Some(patch) = config {
            self.update_state(patch);
        }
    }

    /// Replaces index, size and total in one step.
    pub fn on_page_change(&mut self, event: PageEvent) {
        self.state.page_index = event.page_index;
        self.state.page_size = sanitize_page_size(event.page_size);
        self.state.total_items = event.length;
    }

    pub fn update_state(&mut self, patch: PagePatch) {
        if let Some(page_index) = patch.page_index {
            self.state.page_index = page_index;
        }
        if let Some(page_size) = patch.page_size {
            self.state.page_size = sanitize_page_size(page_size);
        }
        if let Some(options) = patch.page_size_options {
            self.state.page_size_options = sanitize_options(options);
        }
        if let Some(total_items) = patch.total_items {
            self.state.total_items = total_items;
        }
    }

    pub fn reset_to_first_page(&mut self) {
        self.state.page_index = 0;
    }

    pub fn set_total_items(&mut self, total_items: usize) {
        self.state.total_items = total_items;
    }

    /// The current page of `items`. Empty when the window starts past the end.
    pub fn paged_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.state.page_index.saturating_mul(self.state.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.state.page_size).min(items.len());
        &items[start..end]
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_items.div_ceil(self.state.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.state.page_index.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.state.page_index > 0
    }
}
