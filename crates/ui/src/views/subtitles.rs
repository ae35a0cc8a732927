use std::sync::Arc;

use dioxus::prelude::*;
use lingo_core::subtitles::WindowLayout;
use lingo_core::text::HighlightEdit;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::capture::{CaptureArea, use_capture};
use crate::views::selection::{SelectionMenuView, use_selection_menu};
use crate::vm::SubtitleVm;

const SUBTITLE_SCOPE_ID: &str = "subtitle-scope";

#[component]
pub fn SubtitlesView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut link = use_signal(String::new);
    let mut track = use_signal(|| None::<SubtitleVm>);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let capture = use_capture();
    let menu = use_selection_menu(SUBTITLE_SCOPE_ID);

    let subtitles = ctx.subtitles();
    let on_fetch = move |_| {
        if loading() {
            return;
        }
        loading.set(true);
        error.set(None);
        let subtitles = Arc::clone(&subtitles);
        let url = link();
        spawn(async move {
            match subtitles.fetch(&url).await {
                Ok(fetched) => track.set(Some(SubtitleVm::new(fetched))),
                Err(err) => error.set(Some(ViewError::from_service(&err).message())),
            }
            loading.set(false);
        });
    };

    let current = track.read().clone();

    rsx! {
        div { id: SUBTITLE_SCOPE_ID, class: "page subtitles-page",
            h2 { "Subtitles" }
            div { class: "subtitle-source",
                input {
                    r#type: "url",
                    placeholder: "YouTube video link",
                    value: "{link}",
                    oninput: move |evt: FormEvent| link.set(evt.value()),
                }
                button {
                    class: "primary",
                    disabled: loading() || link.read().trim().is_empty(),
                    onclick: on_fetch,
                    if loading() { "Loading..." } else { "Load subtitles" }
                }
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
            if let Some(vm) = current {
                SubtitleTrackView { vm, track }
            }
            SelectionMenuView {
                menu,
                on_capture: move |text: String| capture.open(text),
                on_highlight: move |(field, edit): (Option<String>, HighlightEdit)| {
                    let _ = capture.apply_highlight(field, edit);
                },
            }
            CaptureArea { capture }
        }
    }
}

#[component]
fn SubtitleTrackView(vm: SubtitleVm, mut track: Signal<Option<SubtitleVm>>) -> Element {
    let lines = vm.visible_lines(WindowLayout::DESKTOP);
    let duration = vm.duration();
    let position = vm.position();

    rsx! {
        div { class: "subtitle-track",
            p { class: "hint", "Video {vm.video_id()} ({vm.language()})" }
            div { class: "scrubber",
                input {
                    r#type: "range",
                    min: "0",
                    max: "{duration}",
                    step: "0.1",
                    value: "{position}",
                    oninput: move |evt: FormEvent| {
                        if let Ok(seconds) = evt.value().parse::<f64>() {
                            if let Some(vm) = track.write().as_mut() {
                                vm.seek(seconds);
                            }
                        }
                    },
                }
                span { class: "clock", "{vm.position_label()}" }
            }
            if lines.is_empty() {
                p { class: "empty", "This video has no subtitles." }
            }
            div { class: "cues",
                for (index, line) in lines.into_iter().enumerate() {
                    p {
                        key: "{index}",
                        class: if line.active { "cue active" } else { "cue" },
                        "{line.text}"
                    }
                }
            }
        }
    }
}
