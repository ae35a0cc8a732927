//! Custom context menu over a selection: open, capture, highlight, close.

use crate::text::markup::{HighlightEdit, is_highlighted, toggle_highlight};

/// Selection inside a text input or textarea. Offsets are in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    /// Which form field the selection belongs to, when known.
    pub field: Option<String>,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl FieldSelection {
    #[must_use]
    pub fn selected_text(&self) -> String {
        let (start, end) = (self.start.min(self.end), self.start.max(self.end));
        self.value
            .chars()
            .skip(start)
            .take(end - start)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSource {
    FormControl(FieldSelection),
    Document { text: String },
}

impl SelectionSource {
    /// Trimmed selected text; empty when nothing meaningful is selected.
    #[must_use]
    pub fn captured_text(&self) -> String {
        match self {
            SelectionSource::FormControl(selection) => selection.selected_text().trim().to_owned(),
            SelectionSource::Document { text } => text.trim().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuEvent {
    /// Whether the event target lies inside the menu's container element.
    pub inside_container: bool,
    pub position: MenuPosition,
    pub source: SelectionSource,
}

/// What the host should do with the native context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDecision {
    SuppressNative,
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightAction {
    Add,
    Remove,
}

impl HighlightAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HighlightAction::Add => "Highlight",
            HighlightAction::Remove => "Remove highlight",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenMenu {
    pub position: MenuPosition,
    pub source: SelectionSource,
    pub text: String,
}

impl OpenMenu {
    /// Highlight action offered for form-field selections; `None` for document text.
    #[must_use]
    pub fn highlight_action(&self) -> Option<HighlightAction> {
        match &self.source {
            SelectionSource::FormControl(sel) => {
                Some(if is_highlighted(&sel.value, sel.start, sel.end) {
                    HighlightAction::Remove
                } else {
                    HighlightAction::Add
                })
            }
            SelectionSource::Document { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionMenu {
    open: Option<OpenMenu>,
}

impl SelectionMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub fn open_menu(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }

    /// Open at the pointer when the event is inside the container and the
    /// selection is non-blank. Otherwise the menu closes and the native menu
    /// is left alone.
    pub fn on_context_menu(&mut self, event: ContextMenuEvent) -> MenuDecision {
        let text = event.source.captured_text();
        if !event.inside_container || text.is_empty() {
            self.open = None;
            return MenuDecision::PassThrough;
        }
        self.open = Some(OpenMenu {
            position: event.position,
            source: event.source,
            text,
        });
        MenuDecision::SuppressNative
    }

    pub fn on_outside_click(&mut self) {
        self.open = None;
    }

    /// Close the menu and hand out the selected text for a new card.
    pub fn take_capture(&mut self) -> Option<String> {
        self.open.take().map(|menu| menu.text)
    }

    /// Close the menu and toggle the highlight of a form-field selection.
    ///
    /// Document selections have no field to edit and yield `None`; the menu
    /// still closes.
    pub fn take_highlight_toggle(&mut self) -> Option<(Option<String>, HighlightEdit)> {
        match self.open.take()?.source {
            SelectionSource::FormControl(sel) => Some((
                sel.field,
                toggle_highlight(&sel.value, sel.start, sel.end),
            )),
            SelectionSource::Document { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: MenuPosition = MenuPosition { x: 10.0, y: 20.0 };

    fn document(text: &str, inside: bool) -> ContextMenuEvent {
        ContextMenuEvent {
            inside_container: inside,
            position: AT,
            source: SelectionSource::Document { text: text.into() },
        }
    }

    fn field(value: &str, start: usize, end: usize) -> ContextMenuEvent {
        ContextMenuEvent {
            inside_container: true,
            position: AT,
            source: SelectionSource::FormControl(FieldSelection {
                field: Some("text".into()),
                value: value.into(),
                start,
                end,
            }),
        }
    }

    #[test]
    fn opens_for_selection_inside_container() {
        let mut menu = SelectionMenu::new();
        assert_eq!(
            menu.on_context_menu(document("  bonjour ", true)),
            MenuDecision::SuppressNative
        );
        assert!(menu.is_open());
        assert_eq!(menu.open_menu().unwrap().position, AT);
        assert_eq!(menu.open_menu().unwrap().highlight_action(), None);
        assert_eq!(menu.take_capture().as_deref(), Some("bonjour"));
        assert!(!menu.is_open());
    }

    #[test]
    fn blank_or_outside_selection_passes_through() {
        let mut menu = SelectionMenu::new();
        assert_eq!(
            menu.on_context_menu(document("   ", true)),
            MenuDecision::PassThrough
        );
        assert_eq!(
            menu.on_context_menu(document("word", false)),
            MenuDecision::PassThrough
        );
        assert!(!menu.is_open());
        assert_eq!(menu.take_capture(), None);
    }

    #[test]
    fn outside_click_closes() {
        let mut menu = SelectionMenu::new();
        menu.on_context_menu(document("word", true));
        menu.on_outside_click();
        assert!(!menu.is_open());
    }

    #[test]
    fn form_field_selection_uses_char_offsets() {
        let mut menu = SelectionMenu::new();
        menu.on_context_menu(field("я люблю чай", 2, 7));
        let open = menu.open_menu().unwrap();
        assert_eq!(open.text, "люблю");
        assert_eq!(open.highlight_action(), Some(HighlightAction::Add));

        let (field, edit) = menu.take_highlight_toggle().unwrap();
        assert_eq!(field.as_deref(), Some("text"));
        assert_eq!(edit.value, "я ==люблю== чай");
        assert!(!menu.is_open());
    }

    #[test]
    fn highlight_toggle_on_document_selection_only_closes() {
        let mut menu = SelectionMenu::new();
        menu.on_context_menu(document("word", true));
        assert_eq!(menu.take_highlight_toggle(), None);
        assert!(!menu.is_open());
    }

    #[test]
    fn flanked_field_selection_offers_removal() {
        let mut menu = SelectionMenu::new();
        menu.on_context_menu(field("I ==like== tea", 4, 8));
        assert_eq!(
            menu.open_menu().unwrap().highlight_action(),
            Some(HighlightAction::Remove)
        );
    }
}
