use lingo_core::model::{CardDraft, FolderId};
use lingo_core::text::HighlightEdit;
use services::{ContextSentence, ServiceError};
use tracing::warn;

use crate::views::ViewError;

/// Element ids of the capture inputs, reported back by the selection menu.
pub const TEXT_FIELD: &str = "card-text";
pub const TRANSLATION_FIELD: &str = "card-translation";

/// Outstanding request kinds; each has its own busy flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Translate,
    Context,
    Pictures,
    Save,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Busy {
    translate: bool,
    context: bool,
    pictures: bool,
    save: bool,
}

impl Busy {
    fn get(&self, lookup: Lookup) -> bool {
        match lookup {
            Lookup::Translate => self.translate,
            Lookup::Context => self.context,
            Lookup::Pictures => self.pictures,
            Lookup::Save => self.save,
        }
    }

    fn flag(&mut self, lookup: Lookup) -> &mut bool {
        match lookup {
            Lookup::Translate => &mut self.translate,
            Lookup::Context => &mut self.context,
            Lookup::Pictures => &mut self.pictures,
            Lookup::Save => &mut self.save,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormError {
    /// Input the message belongs to; `None` shows it above the form.
    pub field: Option<String>,
    pub message: String,
}

impl FormError {
    #[must_use]
    pub fn from_service(err: &ServiceError) -> Self {
        Self {
            field: err.field().map(str::to_owned),
            message: ViewError::from_service(err).message(),
        }
    }
}

/// The new-card form opened from a captured selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardForm {
    folder_id: Option<FolderId>,
    text: String,
    translation: String,
    image_url: Option<String>,
    context: Vec<ContextSentence>,
    pictures: Vec<String>,
    busy: Busy,
    error: Option<FormError>,
}

impl CardForm {
    #[must_use]
    pub fn from_selection(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn folder_id(&self) -> Option<FolderId> {
        self.folder_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn context(&self) -> &[ContextSentence] {
        &self.context
    }

    #[must_use]
    pub fn pictures(&self) -> &[String] {
        &self.pictures
    }

    #[must_use]
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Error tied to `field`, for inline display next to that input.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|err| err.field.as_deref() == Some(field))
            .map(|err| err.message.as_str())
    }

    #[must_use]
    pub fn is_busy(&self, lookup: Lookup) -> bool {
        self.busy.get(lookup)
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn set_translation(&mut self, translation: String) {
        self.translation = translation;
    }

    /// Select a folder from the raw `<select>` value; blank means no folder.
    pub fn set_folder(&mut self, raw: &str) {
        self.folder_id = if raw.trim().is_empty() {
            None
        } else {
            match raw.parse::<FolderId>() {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(error = %err, "ignoring folder selection");
                    self.folder_id
                }
            }
        };
    }

    /// Use a picture as the card back instead of the translation; `None` reverts.
    pub fn select_image(&mut self, url: Option<String>) {
        self.image_url = url;
    }

    /// Apply a highlight toggle to the input it came from.
    ///
    /// Returns `false` when the edit belongs to some other field.
    pub fn apply_highlight(&mut self, field: Option<&str>, edit: HighlightEdit) -> bool {
        match field {
            Some(TEXT_FIELD) => self.text = edit.value,
            Some(TRANSLATION_FIELD) => self.translation = edit.value,
            _ => return false,
        }
        true
    }

    /// Mark `lookup` as outstanding. Returns `false` if it already was.
    pub fn begin(&mut self, lookup: Lookup) -> bool {
        let flag = self.busy.flag(lookup);
        if *flag {
            return false;
        }
        *flag = true;
        self.error = None;
        true
    }

    /// A translation always replaces the current one, even if the text changed
    /// while the request was in flight.
    pub fn finish_translation(&mut self, result: Result<String, ServiceError>) {
        self.busy.translate = false;
        match result {
            Ok(translation) => self.translation = translation,
            Err(err) => self.fail(&err),
        }
    }

    pub fn finish_context(&mut self, result: Result<Vec<ContextSentence>, ServiceError>) {
        self.busy.context = false;
        match result {
            Ok(sentences) => self.context = sentences,
            Err(err) => self.fail(&err),
        }
    }

    pub fn finish_pictures(&mut self, result: Result<Vec<String>, ServiceError>) {
        self.busy.pictures = false;
        match result {
            Ok(urls) => self.pictures = urls,
            Err(err) => self.fail(&err),
        }
    }

    /// Returns `true` when the card was stored and the form can close.
    pub fn finish_save(&mut self, result: Result<(), ServiceError>) -> bool {
        self.busy.save = false;
        match result {
            Ok(()) => true,
            Err(err) => {
                self.fail(&err);
                false
            }
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> CardDraft {
        match &self.image_url {
            Some(url) => CardDraft::image(self.folder_id, self.text.clone(), url.clone()),
            None => CardDraft {
                folder_id: self.folder_id,
                text: self.text.clone(),
                text_translation: self.translation.clone(),
                is_image: false,
            },
        }
    }

    fn fail(&mut self, err: &ServiceError) {
        warn!(error = %err, "card form request failed");
        self.error = Some(FormError::from_service(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::model::CardError;
    use lingo_core::text::toggle_highlight;

    #[test]
    fn prefilled_from_selection() {
        let form = CardForm::from_selection("bonjour");
        assert_eq!(form.text(), "bonjour");
        assert_eq!(form.translation(), "");
        assert_eq!(form.folder_id(), None);
    }

    #[test]
    fn busy_flags_are_independent() {
        let mut form = CardForm::from_selection("word");
        assert!(form.begin(Lookup::Translate));
        assert!(!form.begin(Lookup::Translate));
        assert!(form.begin(Lookup::Context));
        assert!(form.is_busy(Lookup::Translate));

        form.finish_translation(Ok("mot".into()));
        assert!(!form.is_busy(Lookup::Translate));
        assert!(form.is_busy(Lookup::Context));
        assert_eq!(form.translation(), "mot");
    }

    #[test]
    fn failed_lookup_keeps_the_input_and_shows_a_message() {
        let mut form = CardForm::from_selection("word");
        form.set_translation("kept".into());
        form.begin(Lookup::Translate);
        form.finish_translation(Err(ServiceError::NotConfigured("translation")));

        assert_eq!(form.translation(), "kept");
        assert_eq!(
            form.error().map(|err| err.message.as_str()),
            Some("The translation service is not available.")
        );
        assert!(!form.is_busy(Lookup::Translate));
    }

    #[test]
    fn validation_errors_surface_their_text() {
        let mut form = CardForm::from_selection("word");
        form.begin(Lookup::Save);
        let stored = form.finish_save(Err(ServiceError::Card(CardError::EmptyTranslation)));
        assert!(!stored);
        assert_eq!(
            form.error().map(|err| err.message.as_str()),
            Some("card translation cannot be empty")
        );
    }

    #[test]
    fn folder_selection_parses_ids() {
        let mut form = CardForm::default();
        form.set_folder("42");
        assert_eq!(form.folder_id(), Some(FolderId::new(42)));
        form.set_folder("not-a-number");
        assert_eq!(form.folder_id(), Some(FolderId::new(42)));
        form.set_folder("");
        assert_eq!(form.folder_id(), None);
    }

    #[test]
    fn highlight_applies_to_the_matching_field() {
        let mut form = CardForm::from_selection("I run daily");
        let edit = toggle_highlight(form.text(), 2, 5);
        assert!(form.apply_highlight(Some(TEXT_FIELD), edit));
        assert_eq!(form.text(), "I ==run== daily");

        let other = toggle_highlight("abc", 0, 1);
        assert!(!form.apply_highlight(Some("raw-text"), other));
    }

    #[test]
    fn image_selection_changes_the_draft() {
        let mut form = CardForm::from_selection("cat");
        form.set_translation("chat".into());
        assert!(!form.to_draft().is_image);

        form.select_image(Some("https://i.imgur.com/cat.png".into()));
        let draft = form.to_draft();
        assert!(draft.is_image);
        assert_eq!(draft.text_translation, "https://i.imgur.com/cat.png");

        form.select_image(None);
        assert_eq!(form.to_draft().text_translation, "chat");
    }
}
