//! DOM listeners the rsx event system cannot express.
//!
//! Each listener script registers its handlers under a key in
//! `window.__lingoListeners`, replacing any previous registration with the
//! same key, and reports events back through `dioxus.send`. The matching
//! teardown script removes them.

use lingo_core::text::{ContextMenuEvent, FieldSelection, FitMeasurement, MenuPosition, SelectionSource};
use serde::Deserialize;

pub(crate) fn listener_key(kind: &str, scope_id: &str) -> String {
    format!("{kind}:{scope_id}")
}

// Wraps `install` so that the listeners it adds are removed by `remove`.
fn registered(key: &str, install: &str, remove: &str) -> String {
    format!(
        r#"
        const registry = window.__lingoListeners || (window.__lingoListeners = {{}});
        const key = {key:?};
        if (registry[key]) {{
            registry[key]();
        }}
        {install}
        registry[key] = () => {{
            {remove}
        }};
        "#
    )
}

pub(crate) fn context_menu_script(key: &str, scope_id: &str) -> String {
    let install = format!(
        r#"
        const onContextMenu = (event) => {{
            const scope = document.getElementById({scope_id:?});
            const inside = !!scope && scope.contains(event.target);
            const payload = {{
                inside,
                x: event.clientX,
                y: event.clientY,
                text: "",
                field: null,
                value: null,
                start: null,
                end: null,
            }};
            const target = event.target;
            const isField = target instanceof HTMLTextAreaElement
                || (target instanceof HTMLInputElement && typeof target.selectionStart === "number");
            if (isField) {{
                const value = target.value;
                const from = target.selectionStart ?? 0;
                const to = target.selectionEnd ?? 0;
                const chars = (offset) => Array.from(value.slice(0, offset)).length;
                payload.field = target.id || null;
                payload.value = value;
                payload.start = chars(from);
                payload.end = chars(to);
                payload.text = value.slice(Math.min(from, to), Math.max(from, to));
            }} else {{
                const selection = window.getSelection();
                payload.text = selection ? selection.toString() : "";
            }}
            if (inside && payload.text.trim() !== "") {{
                event.preventDefault();
            }}
            dioxus.send(payload);
        }};
        document.addEventListener("contextmenu", onContextMenu);
        "#
    );
    registered(
        key,
        &install,
        r#"document.removeEventListener("contextmenu", onContextMenu);"#,
    )
}

pub(crate) fn outside_click_script(key: &str, menu_id: &str) -> String {
    let install = format!(
        r#"
        const onPointerDown = (event) => {{
            const menu = document.getElementById({menu_id:?});
            if (!menu || menu.contains(event.target)) {{
                return;
            }}
            dioxus.send(true);
        }};
        document.addEventListener("mousedown", onPointerDown);
        "#
    );
    registered(
        key,
        &install,
        r#"document.removeEventListener("mousedown", onPointerDown);"#,
    )
}

/// Dropped text, or the contents of dropped files, is sent as one string.
pub(crate) fn drop_script(key: &str, scope_id: &str) -> String {
    let install = format!(
        r#"
        const insideScope = (event) => {{
            const scope = document.getElementById({scope_id:?});
            return !!scope && scope.contains(event.target);
        }};
        const onDragOver = (event) => {{
            if (insideScope(event)) {{
                event.preventDefault();
            }}
        }};
        const onDrop = (event) => {{
            if (!insideScope(event)) {{
                return;
            }}
            event.preventDefault();
            const transfer = event.dataTransfer;
            const files = transfer ? Array.from(transfer.files) : [];
            if (files.length > 0) {{
                Promise.all(files.map((file) => file.text()))
                    .then((texts) => dioxus.send(texts.join("\n")))
                    .catch(() => {{}});
                return;
            }}
            const text = transfer ? transfer.getData("text/plain") : "";
            if (text) {{
                dioxus.send(text);
            }}
        }};
        document.addEventListener("dragover", onDragOver);
        document.addEventListener("drop", onDrop);
        "#
    );
    registered(
        key,
        &install,
        r#"
            document.removeEventListener("dragover", onDragOver);
            document.removeEventListener("drop", onDrop);
        "#,
    )
}

fn measure_body(area_id: &str) -> String {
    format!(
        r#"
        const area = document.getElementById({area_id:?});
        if (!area) {{
            return null;
        }}
        const sentence = area.querySelector(".sentence");
        return {{
            containerHeight: area.clientHeight,
            sentenceHeight: sentence ? sentence.getBoundingClientRect().height : null,
        }};
        "#
    )
}

/// One-shot measurement of the reading area; resolves to `null` when absent.
pub(crate) fn measure_script(area_id: &str) -> String {
    measure_body(area_id)
}

pub(crate) fn resize_script(key: &str, area_id: &str) -> String {
    let measure = measure_body(area_id);
    let install = format!(
        r#"
        const measure = () => {{ {measure} }};
        const onResize = () => {{
            const measurement = measure();
            if (measurement) {{
                dioxus.send(measurement);
            }}
        }};
        window.addEventListener("resize", onResize);
        "#
    );
    registered(
        key,
        &install,
        r#"window.removeEventListener("resize", onResize);"#,
    )
}

pub(crate) fn teardown_script(key: &str) -> String {
    format!(
        r#"
        const registry = window.__lingoListeners || {{}};
        const key = {key:?};
        if (registry[key]) {{
            registry[key]();
            delete registry[key];
        }}
        "#
    )
}

/// Focus `field_id` and select `start..end`, given in chars.
pub(crate) fn select_range_script(field_id: &str, start: usize, end: usize) -> String {
    format!(
        r#"
        requestAnimationFrame(() => {{
            const el = document.getElementById({field_id:?});
            if (!el || typeof el.setSelectionRange !== "function") {{
                return;
            }}
            const units = (chars) => Array.from(el.value).slice(0, chars).join("").length;
            el.focus();
            el.setSelectionRange(units({start}), units({end}));
        }});
        "#
    )
}

// ─── Payloads ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ContextMenuPayload {
    pub inside: bool,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

impl ContextMenuPayload {
    pub fn into_event(self) -> ContextMenuEvent {
        let source = match (self.value, self.start, self.end) {
            (Some(value), Some(start), Some(end)) => SelectionSource::FormControl(FieldSelection {
                field: self.field,
                value,
                start,
                end,
            }),
            _ => SelectionSource::Document { text: self.text },
        };
        ContextMenuEvent {
            inside_container: self.inside,
            position: MenuPosition {
                x: self.x,
                y: self.y,
            },
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeasurePayload {
    pub container_height: f64,
    #[serde(default)]
    pub sentence_height: Option<f64>,
}

impl From<MeasurePayload> for FitMeasurement {
    fn from(payload: MeasurePayload) -> Self {
        FitMeasurement {
            container_height: payload.container_height,
            sentence_height: payload.sentence_height,
        }
    }
}
