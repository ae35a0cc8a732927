use thiserror::Error;

use crate::model::{AccountError, CardError, FolderError, ParseIdError};
use crate::subtitles::SubtitleError;
use crate::text::PageError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Subtitle(#[from] SubtitleError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
