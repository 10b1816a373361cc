use crate::icons::AppIcon;
use dioxus::prelude::*;
use shared_types::{Icon, Tone};

/// Dashboard statistic: title and icon on top, big value, caption.
#[component]
pub fn StatCard(
    title: String,
    value: String,
    description: String,
    icon: Icon,
    tone: Tone,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "card stat-card",
            div { class: "stat-card-header",
                span { class: "stat-card-title", "{title}" }
                span { class: "stat-card-icon {tone.css_class()}",
                    AppIcon { icon, size: 16 }
                }
            }
            div { class: "stat-card-value", "{value}" }
            p { class: "stat-card-description", "{description}" }
        }
    }
}
