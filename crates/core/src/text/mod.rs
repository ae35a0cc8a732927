pub mod fit;
pub mod markup;
pub mod pages;
pub mod reader;
pub mod selection;
pub mod sentences;

pub use fit::{FitMeasurement, MAX_AUTO_FIT_SENTENCES, suggest_page_size};
pub use markup::{HighlightEdit, Segment, highlight_segments, is_highlighted, toggle_highlight};
pub use pages::{Page, PageError, PageSet, PageSize, build_pages, paginate};
pub use reader::{Reader, ReaderChanges, ViewMode};
pub use selection::{
    ContextMenuEvent, FieldSelection, HighlightAction, MenuDecision, MenuPosition, OpenMenu,
    SelectionMenu, SelectionSource,
};
pub use sentences::{SENTENCE_TERMINATORS, sentences, split_into_sentences};
