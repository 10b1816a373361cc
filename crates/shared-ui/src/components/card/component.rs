use crate::components::class_list;
use dioxus::prelude::*;

/// Bordered surface grouping related content.
#[component]
pub fn Card(#[props(default)] class: Option<String>, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: class_list("card", class.as_deref()), {children} }
    }
}

#[component]
pub fn CardHeader(#[props(default)] class: Option<String>, children: Element) -> Element {
    rsx! {
        div { class: class_list("card-header", class.as_deref()), {children} }
    }
}

#[component]
pub fn CardTitle(children: Element) -> Element {
    rsx! {
        h3 { class: "card-title", {children} }
    }
}

#[component]
pub fn CardDescription(children: Element) -> Element {
    rsx! {
        p { class: "card-description", {children} }
    }
}

#[component]
pub fn CardContent(#[props(default)] class: Option<String>, children: Element) -> Element {
    rsx! {
        div { class: class_list("card-content", class.as_deref()), {children} }
    }
}
