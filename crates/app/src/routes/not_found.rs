use dioxus::prelude::*;

use crate::routes::Route;

/// 404 page for paths outside the routing table.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "centered-screen",
            div { class: "centered-card",
                div { class: "not-found-code", "404" }
                h1 { "Page Not Found" }
                p { class: "muted-text",
                    "The page "
                    code { "{path}" }
                    " could not be found."
                }
                Link { to: Route::Dashboard {}, class: "text-link", "Back to Dashboard" }
            }
        }
    }
}
