mod capture;
mod scripts;
mod selection;
mod state;
mod subtitles;
mod text_page;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use subtitles::SubtitlesView;
pub use text_page::{RAW_TEXT_FIELD, TextView};
pub use state::{GENERIC_ERROR, ViewError, ViewState, view_state_from_resource};
