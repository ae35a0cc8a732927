mod card_form_vm;
mod markup_vm;
mod reader_vm;
mod subtitle_vm;

pub use card_form_vm::{CardForm, FormError, Lookup, TEXT_FIELD, TRANSLATION_FIELD};
pub use markup_vm::{ContextLineVm, MarkupSpan, map_context_lines, map_markup};
pub use reader_vm::{ReaderIntent, ReaderVm, map_reader};
pub use subtitle_vm::{CueLineVm, SubtitleVm};
