use crate::components::class_list;
use dioxus::prelude::*;

/// Pulsing placeholder shown while data loads.
#[component]
pub fn Skeleton(#[props(default)] class: Option<String>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: class_list("skeleton", class.as_deref()) }
    }
}

/// Centered spinner with a caption.
#[component]
pub fn LoadingState(message: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "loading-state",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}
