use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Lingo" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    section { class: "fatal",
                        h1 { "Lingo stopped working" }
                        p { "Your text is saved. Restart the app to continue reading." }
                        pre { class: "fatal-detail", "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
