use lingo_core::text::{PageSize, Reader, ReaderChanges, ViewMode};
use tracing::debug;

/// User actions on the text page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReaderIntent {
    SetText(String),
    AppendText(String),
    Clear,
    SetPageSize(usize),
    EnterRead,
    EnterEdit,
    NextPage,
    PreviousPage,
}

impl ReaderIntent {
    /// Apply the intent and report which persisted values changed.
    ///
    /// A page size of zero is ignored.
    pub fn apply(self, reader: &mut Reader) -> ReaderChanges {
        match self {
            ReaderIntent::SetText(text) => reader.set_text(text),
            ReaderIntent::AppendText(text) => reader.append_text(&text),
            ReaderIntent::Clear => reader.clear(),
            ReaderIntent::SetPageSize(size) => match PageSize::new(size) {
                Ok(size) => reader.set_page_size(size),
                Err(err) => {
                    debug!(error = %err, "ignoring page size");
                    ReaderChanges::NONE
                }
            },
            ReaderIntent::EnterRead => reader.enter_read_mode(),
            ReaderIntent::EnterEdit => reader.enter_edit_mode(),
            ReaderIntent::NextPage => reader.go_to_next_page(),
            ReaderIntent::PreviousPage => reader.go_to_previous_page(),
        }
    }
}

/// Everything the text page renders, flattened from the reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderVm {
    pub mode: ViewMode,
    pub raw_text: String,
    pub page_size: usize,
    pub sentences: Vec<String>,
    /// `"n / total"`, absent when there are no pages.
    pub counter: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl ReaderVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counter.is_none()
    }
}

#[must_use]
pub fn map_reader(reader: &Reader) -> ReaderVm {
    ReaderVm {
        mode: reader.view_mode(),
        raw_text: reader.raw_text().to_owned(),
        page_size: reader.page_size().get(),
        sentences: reader
            .current_page()
            .map(|page| page.sentences().to_vec())
            .unwrap_or_default(),
        counter: reader
            .page_counter()
            .map(|(current, total)| format!("{current} / {total}")),
        can_go_previous: !reader.is_first_page(),
        can_go_next: !reader.is_last_page(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_with(text: &str, size: usize) -> Reader {
        let mut reader = Reader::new();
        let _ = ReaderIntent::SetText(text.into()).apply(&mut reader);
        let _ = ReaderIntent::SetPageSize(size).apply(&mut reader);
        let _ = ReaderIntent::EnterRead.apply(&mut reader);
        reader
    }

    #[test]
    fn maps_first_page_with_counter() {
        let reader = reader_with("Hello world. How are you? Fine!", 1);
        let vm = map_reader(&reader);
        assert_eq!(vm.mode, ViewMode::Read);
        assert_eq!(vm.sentences, vec!["Hello world.".to_owned()]);
        assert_eq!(vm.counter.as_deref(), Some("1 / 3"));
        assert!(!vm.can_go_previous);
        assert!(vm.can_go_next);
    }

    #[test]
    fn navigation_updates_the_page() {
        let mut reader = reader_with("A. B. C. D. E.", 2);
        let changes = ReaderIntent::NextPage.apply(&mut reader);
        assert!(changes.page_index);

        let vm = map_reader(&reader);
        assert_eq!(vm.counter.as_deref(), Some("2 / 3"));
        assert!(vm.can_go_previous);
        assert!(vm.can_go_next);
    }

    #[test]
    fn zero_page_size_is_ignored() {
        let mut reader = reader_with("A. B.", 3);
        let changes = ReaderIntent::SetPageSize(0).apply(&mut reader);
        assert!(changes.is_empty());
        assert_eq!(reader.page_size().get(), 3);
    }

    #[test]
    fn empty_text_has_no_counter() {
        let reader = reader_with("   ", 5);
        let vm = map_reader(&reader);
        assert!(vm.is_empty());
        assert!(vm.sentences.is_empty());
        assert!(!vm.can_go_next);
    }
}
