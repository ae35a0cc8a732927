use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use lingo_core::text::HighlightEdit;
use services::Access;
use services::picture_service::DEFAULT_MAX_RESULTS;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CardForm, Lookup, MarkupSpan, TEXT_FIELD, TRANSLATION_FIELD, map_context_lines};

const SAVED_NOTICE_SECS: u64 = 3;
pub const SIGN_IN_NOTICE: &str =
    "Sign in to save cards: run `app login <username>`, then select the text again.";

/// Card capture state owned by a view that offers the selection menu.
#[derive(Clone, Copy, PartialEq)]
pub struct Capture {
    pub form: Signal<Option<CardForm>>,
    pub notice: Signal<Option<&'static str>>,
}

impl Capture {
    /// Open the panel pre-filled with `text`, replacing any open form.
    pub fn open(mut self, text: String) {
        self.notice.set(None);
        self.form.set(Some(CardForm::from_selection(text)));
    }

    /// Apply a highlight toggle to the open form.
    ///
    /// Edits for fields outside the form are handed back.
    pub fn apply_highlight(
        mut self,
        field: Option<String>,
        edit: HighlightEdit,
    ) -> Option<(Option<String>, HighlightEdit)> {
        let owned = matches!(field.as_deref(), Some(TEXT_FIELD | TRANSLATION_FIELD));
        if !owned {
            return Some((field, edit));
        }
        if let Some(form) = self.form.write().as_mut() {
            form.apply_highlight(field.as_deref(), edit);
        }
        None
    }
}

pub fn use_capture() -> Capture {
    Capture {
        form: use_signal(|| None),
        notice: use_signal(|| None),
    }
}

#[component]
pub fn CaptureArea(capture: Capture) -> Element {
    let mut notice = capture.notice;
    let is_open = capture.form.read().is_some();

    rsx! {
        if let Some(message) = notice() {
            div { class: "notice", "{message}" }
        }
        if is_open {
            CapturePanel {
                form: capture.form,
                on_saved: move |()| {
                    notice.set(Some("Card saved"));
                    spawn(async move {
                        tokio::time::sleep(Duration::from_secs(SAVED_NOTICE_SECS)).await;
                        notice.set(None);
                    });
                },
            }
        }
    }
}

/// Checks the session before showing the card form.
#[component]
fn CapturePanel(mut form: Signal<Option<CardForm>>, on_saved: EventHandler<()>) -> Element {
    let auth = use_context::<AppContext>().auth();
    let access = use_resource(move || {
        let auth = Arc::clone(&auth);
        async move { auth.guard().await }
    });

    let checked = *access.read();
    match checked {
        Some(Access::Granted) => rsx! { CardFormPanel { form, on_saved } },
        Some(Access::RedirectToLogin) => rsx! {
            section { class: "capture-panel",
                header { class: "capture-header",
                    h3 { "New card" }
                    button { class: "close", onclick: move |_| form.set(None), "Close" }
                }
                p { class: "form-error", "{SIGN_IN_NOTICE}" }
            }
        },
        None => rsx! {
            section { class: "capture-panel",
                p { class: "hint", "Checking your session..." }
            }
        },
    }
}

#[component]
fn CardFormPanel(mut form: Signal<Option<CardForm>>, on_saved: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let folder_service = ctx.folders();
    let folders = use_resource(move || {
        let folder_service = Arc::clone(&folder_service);
        async move {
            folder_service
                .all()
                .await
                .map_err(|err| ViewError::from_service(&err))
        }
    });
    let folder_state = view_state_from_resource(folders);

    let Some(current) = form.read().clone() else {
        return rsx! {};
    };

    let translate = ctx.translate();
    let on_translate = move |_| {
        let Some(text) = begin(form, Lookup::Translate, |f| f.text().to_owned()) else {
            return;
        };
        let translate = Arc::clone(&translate);
        spawn(async move {
            let result = translate.translate(&text).await;
            if let Some(f) = form.write().as_mut() {
                f.finish_translation(result);
            }
        });
    };

    let context = ctx.context();
    let on_context = move |_| {
        let Some(word) = begin(form, Lookup::Context, |f| f.text().to_owned()) else {
            return;
        };
        let context = Arc::clone(&context);
        spawn(async move {
            let result = context.sentences(&word).await;
            if let Some(f) = form.write().as_mut() {
                f.finish_context(result);
            }
        });
    };

    let pictures = ctx.pictures();
    let on_pictures = move |_| {
        let Some(query) = begin(form, Lookup::Pictures, |f| f.text().to_owned()) else {
            return;
        };
        let pictures = Arc::clone(&pictures);
        spawn(async move {
            let result = pictures.search(&query, DEFAULT_MAX_RESULTS).await;
            if let Some(f) = form.write().as_mut() {
                f.finish_pictures(result);
            }
        });
    };

    let cards = ctx.cards();
    let on_save = move |_| {
        let Some(draft) = begin(form, Lookup::Save, CardForm::to_draft) else {
            return;
        };
        let cards = Arc::clone(&cards);
        spawn(async move {
            let result = cards.create(draft).await;
            let stored = form.write().as_mut().is_some_and(|f| f.finish_save(result));
            if stored {
                form.set(None);
                on_saved.call(());
            }
        });
    };

    let context_lines = map_context_lines(current.context());
    let selected_image = current.image_url().map(str::to_owned);
    let text_error = current.field_error("text").map(str::to_owned);
    let translation_error = current.field_error("textTranslation").map(str::to_owned);
    let general_error = current
        .error()
        .filter(|err| err.field.is_none())
        .map(|err| err.message.clone());

    rsx! {
        section { class: "capture-panel",
            header { class: "capture-header",
                h3 { "New card" }
                button { class: "close", onclick: move |_| form.set(None), "Close" }
            }
            if let Some(message) = general_error {
                p { class: "form-error", "{message}" }
            }
            label { r#for: "card-folder", "Folder" }
            match folder_state {
                ViewState::Ready(folders) => rsx! {
                    select {
                        id: "card-folder",
                        onchange: move |evt: FormEvent| {
                            if let Some(f) = form.write().as_mut() {
                                f.set_folder(&evt.value());
                            }
                        },
                        option { value: "", selected: current.folder_id().is_none(), "No folder" }
                        for folder in folders {
                            option {
                                key: "{folder.id}",
                                value: "{folder.id}",
                                selected: current.folder_id() == Some(folder.id),
                                "{folder.name}"
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "hint", "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "hint", "Loading folders..." }
                },
            }
            label { r#for: TEXT_FIELD, "Text" }
            input {
                id: TEXT_FIELD,
                value: "{current.text()}",
                oninput: move |evt: FormEvent| {
                    if let Some(f) = form.write().as_mut() {
                        f.set_text(evt.value());
                    }
                },
            }
            if let Some(message) = text_error {
                p { class: "field-error", "{message}" }
            }
            label { r#for: TRANSLATION_FIELD, "Translation" }
            input {
                id: TRANSLATION_FIELD,
                value: "{current.translation()}",
                disabled: selected_image.is_some(),
                oninput: move |evt: FormEvent| {
                    if let Some(f) = form.write().as_mut() {
                        f.set_translation(evt.value());
                    }
                },
            }
            if let Some(message) = translation_error {
                p { class: "field-error", "{message}" }
            }
            div { class: "lookups",
                button {
                    disabled: current.is_busy(Lookup::Translate),
                    onclick: on_translate,
                    if current.is_busy(Lookup::Translate) { "Translating..." } else { "Translate" }
                }
                button {
                    disabled: current.is_busy(Lookup::Context),
                    onclick: on_context,
                    if current.is_busy(Lookup::Context) { "Searching..." } else { "Context" }
                }
                button {
                    disabled: current.is_busy(Lookup::Pictures),
                    onclick: on_pictures,
                    if current.is_busy(Lookup::Pictures) { "Searching..." } else { "Pictures" }
                }
            }
            if !context_lines.is_empty() {
                ul { class: "context-lines",
                    for (index, line) in context_lines.into_iter().enumerate() {
                        li { key: "{index}",
                            p { Markup { spans: line.original } }
                            p { class: "context-translation", Markup { spans: line.translation } }
                        }
                    }
                }
            }
            if !current.pictures().is_empty() {
                div { class: "pictures",
                    {current.pictures().iter().map(|url| {
                        let url = url.clone();
                        let pick = url.clone();
                        let chosen = selected_image.as_deref() == Some(url.as_str());
                        rsx! {
                            button {
                                key: "{url}",
                                class: if chosen { "picture chosen" } else { "picture" },
                                onclick: move |_| {
                                    if let Some(f) = form.write().as_mut() {
                                        f.select_image((!chosen).then(|| pick.clone()));
                                    }
                                },
                                img { src: "{url}" }
                            }
                        }
                    })}
                }
            }
            button {
                class: "primary",
                disabled: current.is_busy(Lookup::Save),
                onclick: on_save,
                if current.is_busy(Lookup::Save) { "Saving..." } else { "Save card" }
            }
        }
    }
}

#[component]
fn Markup(spans: Vec<MarkupSpan>) -> Element {
    rsx! {
        for (index, part) in spans.into_iter().enumerate() {
            if part.highlighted {
                mark { key: "{index}", "{part.text}" }
            } else {
                span { key: "{index}", "{part.text}" }
            }
        }
    }
}

// Flag `lookup` as outstanding and read what the request needs; `None` when
// the form is closed or the request is already running.
fn begin<T>(
    mut form: Signal<Option<CardForm>>,
    lookup: Lookup,
    read: impl FnOnce(&CardForm) -> T,
) -> Option<T> {
    let mut guard = form.write();
    let f = guard.as_mut()?;
    f.begin(lookup).then(|| read(f))
}
