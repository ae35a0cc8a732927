pub mod account;
mod card;
mod folder;
mod ids;
mod language;
mod review;

pub use account::{AccountError, Credentials, Profile, ProfileUpdate, Registration};
pub use card::{Card, CardDraft, CardError, ValidatedCard};
pub use folder::{Folder, FolderError, FolderName, FolderOverview, Paged, ReviewDelay};
pub use ids::{CardId, FolderId, LanguageId, ParseIdError};
pub use language::{LanguageOption, UiLanguage, context_language_name};
pub use review::{Difficulty, ReviewDraw};
