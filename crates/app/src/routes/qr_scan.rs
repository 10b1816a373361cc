use crate::auth::use_profile;
use crate::use_services;
use backend::pages::check_in;
use dioxus::prelude::*;
use shared_types::Icon;
use shared_ui::{
    use_toast, AppIcon, Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
    Label, PageDescription, PageHeader, PageTitle,
};

/// Check in to an attendance session with the code the teacher shares.
#[component]
pub fn QrScan() -> Element {
    let services = use_services();
    let profile = use_profile();
    let mut toasts = use_toast();
    let mut code = use_signal(String::new);
    let mut checking = use_signal(|| false);
    let mut last_checked_in = use_signal(|| None::<String>);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *checking.peek() {
            return;
        }
        let store = services.store.clone();
        let student = profile.clone();
        let entered = code.peek().clone();
        checking.set(true);
        spawn(async move {
            match check_in(store.as_ref(), &student, &entered).await {
                Ok(record) => {
                    toasts.show("Attendance recorded", "You are marked present.", false);
                    last_checked_in.set(Some(record.check_in_time));
                    code.set(String::new());
                }
                Err(e) => toasts.show("Check-in failed", e.friendly_message(), true),
            }
            checking.set(false);
        });
    };

    rsx! {
        div { class: "page",
            PageHeader {
                div {
                    PageTitle { "QR Scan" }
                    PageDescription { "Mark your attendance for the current session" }
                }
            }

            Card { class: "qr-card",
                CardHeader {
                    div { class: "qr-icon",
                        AppIcon { icon: Icon::QrCode, size: 40 }
                    }
                    CardTitle { "Enter session code" }
                    CardDescription { "Type the code shown by your teacher" }
                }
                CardContent {
                    form { class: "qr-form", onsubmit: handle_submit,
                        Label { html_for: "qr-code", "Session code" }
                        Input {
                            id: "qr-code",
                            value: code(),
                            placeholder: "e.g. 3f2c9a...",
                            required: true,
                            disabled: checking(),
                            oninput: move |e: FormEvent| code.set(e.value()),
                        }
                        Button { submit: true, disabled: checking(),
                            if checking() { "Checking in..." } else { "Check in" }
                        }
                    }
                    if let Some(time) = last_checked_in() {
                        p { class: "success-text", "Checked in {crate::format_helpers::format_datetime_human(&time)}" }
                    }
                }
            }
        }
    }
}
