use dioxus::prelude::*;
use lingo_core::text::{HighlightEdit, SelectionMenu};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::scripts::{
    ContextMenuPayload, context_menu_script, listener_key, outside_click_script,
    select_range_script, teardown_script,
};

pub const SELECTION_MENU_ID: &str = "selection-menu";

/// Run a listener script for the lifetime of the calling component.
///
/// `install` is evaluated once on mount; every value it sends is decoded and
/// handed to `on_event`. The listeners registered under `key` are removed on
/// unmount.
pub fn use_dom_listener<T, F>(key: String, install: impl FnOnce() -> String, mut on_event: F)
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let teardown_key = key.clone();
    use_hook(move || {
        let script = install();
        spawn(async move {
            let mut eval = document::eval(&script);
            while let Ok(payload) = eval.recv::<T>().await {
                on_event(payload);
            }
            debug!(key = %key, "listener channel closed");
        });
    });
    use_drop(move || {
        let _ = document::eval(&teardown_script(&teardown_key));
    });
}

/// Selection menu state fed by context-menu and outside-click listeners.
///
/// The menu opens for non-blank selections inside the element `scope_id`.
pub fn use_selection_menu(scope_id: &'static str) -> Signal<SelectionMenu> {
    let mut menu = use_signal(SelectionMenu::new);

    let context_key = listener_key("contextmenu", scope_id);
    use_dom_listener(
        context_key.clone(),
        || context_menu_script(&context_key, scope_id),
        move |payload: ContextMenuPayload| {
            let decision = menu.write().on_context_menu(payload.into_event());
            debug!(?decision, "context menu");
        },
    );

    let outside_key = listener_key("outside-click", scope_id);
    use_dom_listener(
        outside_key.clone(),
        || outside_click_script(&outside_key, SELECTION_MENU_ID),
        move |_: bool| menu.write().on_outside_click(),
    );

    menu
}

#[component]
pub fn SelectionMenuView(
    mut menu: Signal<SelectionMenu>,
    on_capture: EventHandler<String>,
    on_highlight: EventHandler<(Option<String>, HighlightEdit)>,
) -> Element {
    let Some(open) = menu.read().open_menu().cloned() else {
        return rsx! {};
    };
    let style = format!("left: {}px; top: {}px;", open.position.x, open.position.y);
    let highlight = open.highlight_action();

    rsx! {
        div { id: SELECTION_MENU_ID, class: "selection-menu", style: "{style}",
            button {
                onclick: move |_| {
                    let captured = menu.write().take_capture();
                    if let Some(text) = captured {
                        on_capture.call(text);
                    }
                },
                "Create card"
            }
            if let Some(action) = highlight {
                button {
                    onclick: move |_| {
                        let toggled = menu.write().take_highlight_toggle();
                        if let Some((field, edit)) = toggled {
                            if let Some(id) = field.as_deref() {
                                let _ = document::eval(&select_range_script(
                                    id,
                                    edit.selection.start,
                                    edit.selection.end,
                                ));
                            }
                            on_highlight.call((field, edit));
                        }
                    },
                    "{action.label()}"
                }
            }
        }
    }
}
