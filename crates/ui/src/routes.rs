use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::use_reader_state_provider;
use crate::views::{SubtitlesView, TextView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", TextView)] Text {},
        #[route("/subtitles", SubtitlesView)] Subtitles {},
}

#[component]
fn Layout() -> Element {
    use_reader_state_provider();

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Lingo" }
            ul {
                li { Link { to: Route::Text {}, "Text" } }
                li { Link { to: Route::Subtitles {}, "Subtitles" } }
            }
        }
    }
}
