use dioxus::prelude::*;
use lingo_core::text::{HighlightEdit, PageSize, ViewMode, suggest_page_size};
use tracing::debug;

use crate::context::ReaderState;
use crate::views::capture::{CaptureArea, use_capture};
use crate::views::scripts::{MeasurePayload, drop_script, listener_key, measure_script, resize_script};
use crate::views::selection::{SelectionMenuView, use_dom_listener, use_selection_menu};
use crate::vm::{ReaderIntent, ReaderVm, map_reader};

const TEXT_SCOPE_ID: &str = "text-scope";
const READING_AREA_ID: &str = "reading-area";
pub const RAW_TEXT_FIELD: &str = "raw-text";

#[component]
pub fn TextView() -> Element {
    let state = use_context::<ReaderState>();
    let reader = state.reader;
    let save_error = state.save_error;
    let dispatch = state.dispatcher();
    let mut fit_hint = use_signal(|| None::<PageSize>);
    let capture = use_capture();
    let menu = use_selection_menu(TEXT_SCOPE_ID);

    let drop_key = listener_key("drop", TEXT_SCOPE_ID);
    use_dom_listener(
        drop_key.clone(),
        || drop_script(&drop_key, TEXT_SCOPE_ID),
        move |text: String| dispatch.call(ReaderIntent::AppendText(text)),
    );

    let resize_key = listener_key("resize", READING_AREA_ID);
    use_dom_listener(
        resize_key.clone(),
        || resize_script(&resize_key, READING_AREA_ID),
        move |measurement: MeasurePayload| fit_hint.set(Some(suggest_page_size(measurement.into()))),
    );

    let mode = use_memo(move || reader.read().view_mode());
    use_effect(move || {
        if mode() != ViewMode::Read {
            return;
        }
        spawn(async move {
            let measured = document::eval(&measure_script(READING_AREA_ID))
                .join::<Option<MeasurePayload>>()
                .await;
            if let Ok(Some(measurement)) = measured {
                let suggestion = suggest_page_size(measurement.into());
                debug!(sentences = suggestion.get(), "auto-fit suggestion");
                fit_hint.set(Some(suggestion));
            }
        });
    });

    let vm = map_reader(&reader.read());

    rsx! {
        div { id: TEXT_SCOPE_ID, class: "page text-page",
            h2 { "Text" }
            if let Some(message) = save_error() {
                div { class: "banner error", "{message}" }
            }
            match vm.mode {
                ViewMode::Edit => rsx! { EditPane { vm: vm.clone(), dispatch } },
                ViewMode::Read => rsx! { ReadPane { vm: vm.clone(), dispatch, fit_hint: fit_hint() } },
            }
            SelectionMenuView {
                menu,
                on_capture: move |text: String| capture.open(text),
                on_highlight: move |(field, edit): (Option<String>, HighlightEdit)| {
                    if let Some((field, edit)) = capture.apply_highlight(field, edit) {
                        if field.as_deref() == Some(RAW_TEXT_FIELD) {
                            dispatch.call(ReaderIntent::SetText(edit.value));
                        }
                    }
                },
            }
            CaptureArea { capture }
        }
    }
}

#[component]
fn EditPane(vm: ReaderVm, dispatch: Callback<ReaderIntent>) -> Element {
    let has_text = !vm.raw_text.is_empty();
    rsx! {
        div { class: "editor",
            textarea {
                id: RAW_TEXT_FIELD,
                class: "raw-text",
                placeholder: "Paste or drop a text to read",
                value: "{vm.raw_text}",
                oninput: move |evt: FormEvent| dispatch.call(ReaderIntent::SetText(evt.value())),
            }
            div { class: "actions",
                button {
                    disabled: !has_text,
                    onclick: move |_| dispatch.call(ReaderIntent::Clear),
                    "Clear"
                }
                button {
                    class: "primary",
                    onclick: move |_| dispatch.call(ReaderIntent::EnterRead),
                    "Read mode"
                }
            }
        }
    }
}

#[component]
fn ReadPane(vm: ReaderVm, dispatch: Callback<ReaderIntent>, fit_hint: Option<PageSize>) -> Element {
    rsx! {
        div { class: "reader",
            div { class: "reader-toolbar",
                button { onclick: move |_| dispatch.call(ReaderIntent::EnterEdit), "Edit text" }
                label { r#for: "page-size", "Sentences per page" }
                select {
                    id: "page-size",
                    onchange: move |evt: FormEvent| {
                        match evt.value().parse::<usize>() {
                            Ok(size) => dispatch.call(ReaderIntent::SetPageSize(size)),
                            Err(err) => debug!(error = %err, "ignoring page size"),
                        }
                    },
                    if !PageSize::OPTIONS.contains(&vm.page_size) {
                        option { value: "{vm.page_size}", selected: true, "{vm.page_size}" }
                    }
                    for size in PageSize::OPTIONS {
                        option {
                            key: "{size}",
                            value: "{size}",
                            selected: size == vm.page_size,
                            "{size}"
                        }
                    }
                }
                if let Some(hint) = fit_hint {
                    span { class: "fit-hint", "About {hint.get()} sentences fit on screen" }
                }
            }
            div { id: READING_AREA_ID, class: "reading-area",
                if vm.is_empty() {
                    p { class: "empty", "There is no text to read yet." }
                } else {
                    for (index, sentence) in vm.sentences.iter().enumerate() {
                        p { key: "{index}", class: "sentence", "{sentence}" }
                    }
                }
            }
            div { class: "pager",
                button {
                    disabled: !vm.can_go_previous,
                    onclick: move |_| dispatch.call(ReaderIntent::PreviousPage),
                    "Previous"
                }
                if let Some(counter) = vm.counter.clone() {
                    span { class: "counter", "{counter}" }
                }
                button {
                    disabled: !vm.can_go_next,
                    onclick: move |_| dispatch.call(ReaderIntent::NextPage),
                    "Next"
                }
            }
        }
    }
}
