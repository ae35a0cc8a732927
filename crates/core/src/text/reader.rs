//! Reading-mode state: working text, page size, position and view mode.
//!
//! Every mutation reports which persisted values changed so the caller can
//! write exactly those keys.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::text::pages::{Page, PageSet, PageSize, paginate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Edit,
    Read,
}

impl ViewMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Edit => "edit",
            ViewMode::Read => "read",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "edit" => Some(ViewMode::Edit),
            "read" => Some(ViewMode::Read),
            _ => None,
        }
    }
}

/// Which of the four persisted reader values a mutation touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReaderChanges {
    pub text: bool,
    pub page_size: bool,
    pub page_index: bool,
    pub view_mode: bool,
}

impl ReaderChanges {
    pub const NONE: ReaderChanges = ReaderChanges {
        text: false,
        page_size: false,
        page_index: false,
        view_mode: false,
    };

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    fn text() -> Self {
        Self {
            text: true,
            ..Self::NONE
        }
    }

    fn page_size() -> Self {
        Self {
            page_size: true,
            ..Self::NONE
        }
    }

    fn page_index() -> Self {
        Self {
            page_index: true,
            ..Self::NONE
        }
    }

    fn view_mode() -> Self {
        Self {
            view_mode: true,
            ..Self::NONE
        }
    }
}

impl BitOr for ReaderChanges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            text: self.text || rhs.text,
            page_size: self.page_size || rhs.page_size,
            page_index: self.page_index || rhs.page_index,
            view_mode: self.view_mode || rhs.view_mode,
        }
    }
}

impl BitOrAssign for ReaderChanges {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    raw_text: String,
    page_size: PageSize,
    current_page: usize,
    view_mode: ViewMode,
    pages: PageSet,
}

impl Default for Reader {
    fn default() -> Self {
        Self::restore(String::new(), PageSize::DEFAULT, 0, ViewMode::Edit)
    }
}

impl Reader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild reader state from independently persisted values.
    ///
    /// The values may disagree with each other (e.g. an index past the last
    /// page); the index is clamped against the rebuilt pages.
    #[must_use]
    pub fn restore(
        raw_text: String,
        page_size: PageSize,
        current_page: usize,
        view_mode: ViewMode,
    ) -> Self {
        let mut reader = Self {
            pages: paginate(&raw_text, page_size),
            raw_text,
            page_size,
            current_page,
            view_mode,
        };
        reader.clamp_current_page();
        reader
    }

    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn current_page_index(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// The page to render, or `None` when the text has no sentences.
    #[must_use]
    pub fn current_page(&self) -> Option<&Page> {
        let index = self.pages.clamp_index(self.current_page);
        self.pages.page(index).ok()
    }

    /// 1-based position and total, e.g. `(2, 5)`; `None` when there are no pages.
    #[must_use]
    pub fn page_counter(&self) -> Option<(usize, usize)> {
        if self.pages.is_empty() {
            return None;
        }
        Some((self.current_page + 1, self.pages.len()))
    }

    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.current_page == 0
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 >= self.pages.len()
    }

    /// Replace the working text.
    pub fn set_text(&mut self, text: impl Into<String>) -> ReaderChanges {
        let text = text.into();
        if text == self.raw_text {
            return ReaderChanges::NONE;
        }
        self.raw_text = text;
        ReaderChanges::text() | self.rebuild()
    }

    /// Append pasted or dropped text to the end of the working text.
    pub fn append_text(&mut self, text: &str) -> ReaderChanges {
        if text.is_empty() {
            return ReaderChanges::NONE;
        }
        self.raw_text.push_str(text);
        ReaderChanges::text() | self.rebuild()
    }

    /// Empty the working text and return to the first page.
    pub fn clear(&mut self) -> ReaderChanges {
        let mut changes = ReaderChanges::NONE;
        if !self.raw_text.is_empty() {
            self.raw_text.clear();
            changes |= ReaderChanges::text() | self.rebuild();
        }
        if self.current_page != 0 {
            self.current_page = 0;
            changes |= ReaderChanges::page_index();
        }
        changes
    }

    /// Change the page size. The index is kept numerically and only clamped.
    pub fn set_page_size(&mut self, size: PageSize) -> ReaderChanges {
        if size == self.page_size {
            return ReaderChanges::NONE;
        }
        self.page_size = size;
        ReaderChanges::page_size() | self.rebuild()
    }

    pub fn enter_read_mode(&mut self) -> ReaderChanges {
        self.set_view_mode(ViewMode::Read)
    }

    pub fn enter_edit_mode(&mut self) -> ReaderChanges {
        self.set_view_mode(ViewMode::Edit)
    }

    /// Advance one page; a no-op on the last page.
    pub fn go_to_next_page(&mut self) -> ReaderChanges {
        if self.is_last_page() {
            return ReaderChanges::NONE;
        }
        self.current_page += 1;
        ReaderChanges::page_index()
    }

    /// Go back one page; a no-op on the first page.
    pub fn go_to_previous_page(&mut self) -> ReaderChanges {
        if self.is_first_page() {
            return ReaderChanges::NONE;
        }
        self.current_page -= 1;
        ReaderChanges::page_index()
    }

    fn set_view_mode(&mut self, mode: ViewMode) -> ReaderChanges {
        if self.view_mode == mode {
            return ReaderChanges::NONE;
        }
        self.view_mode = mode;
        ReaderChanges::view_mode()
    }

    fn rebuild(&mut self) -> ReaderChanges {
        self.pages = paginate(&self.raw_text, self.page_size);
        if self.clamp_current_page() {
            ReaderChanges::page_index()
        } else {
            ReaderChanges::NONE
        }
    }

    fn clamp_current_page(&mut self) -> bool {
        let clamped = self.pages.clamp_index(self.current_page);
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }
}
