use crate::auth::use_profile;
use crate::format_helpers::format_date_human;
use crate::use_services;
use backend::pages::{create_event, load_events};
use dioxus::prelude::*;
use shared_types::{EventRecord, Icon, NewEvent, Role};
use shared_ui::{
    use_toast, AppIcon, Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
    Label, LoadingState, PageDescription, PageHeader, PageTitle,
};

/// Upcoming events, plus a creation form for admins.
#[component]
pub fn Events() -> Element {
    let services = use_services();
    let profile = use_profile();

    let events = use_resource(move || {
        let store = services.store.clone();
        async move { load_events(store.as_ref(), &backend::today()).await }
    });

    let result = events.read().as_ref().cloned();
    let is_admin = profile.role() == Some(Role::Admin);

    rsx! {
        div { class: "page",
            PageHeader {
                div {
                    PageTitle { "Events" }
                    PageDescription { "What's coming up at school" }
                }
            }

            if is_admin {
                EventForm { events }
            }

            match result {
                None => rsx! { LoadingState { message: "Loading events..." } },
                Some(events) => rsx! {
                    if events.is_empty() {
                        Card {
                            CardContent {
                                p { class: "muted-text", "No upcoming events" }
                            }
                        }
                    } else {
                        div { class: "event-grid",
                            for event in events.rows().iter() {
                                EventCard { key: "{event.id}", event: event.clone() }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn EventCard(event: EventRecord) -> Element {
    rsx! {
        Card { class: "event-card",
            CardHeader {
                CardTitle { "{event.title}" }
                CardDescription {
                    span { class: "event-meta",
                        AppIcon { icon: Icon::Calendar, size: 14 }
                        "{format_date_human(&event.event_date)}"
                    }
                    if let Some(location) = &event.location {
                        span { class: "event-meta", " · {location}" }
                    }
                }
            }
            if let Some(description) = &event.description {
                CardContent {
                    p { "{description}" }
                }
            }
        }
    }
}

#[component]
fn EventForm(events: Resource<backend::ReadOutcome<EventRecord>>) -> Element {
    let mut events = events;
    let services = use_services();
    let profile = use_profile();
    let mut toasts = use_toast();
    let mut draft = use_signal(NewEvent::default);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *saving.peek() {
            return;
        }
        let store = services.store.clone();
        let admin = profile.clone();
        let event = draft.peek().clone();
        saving.set(true);
        spawn(async move {
            match create_event(store.as_ref(), &admin, event).await {
                Ok(created) => {
                    toasts.show("Event created", created.title, false);
                    draft.set(NewEvent::default());
                    events.restart();
                }
                Err(e) => toasts.show("Could not create event", e.friendly_message(), true),
            }
            saving.set(false);
        });
    };

    let current = draft.read().clone();

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Create Event" }
            }
            CardContent {
                form { class: "event-form", onsubmit: handle_submit,
                    div { class: "form-field",
                        Label { html_for: "event-title", "Title" }
                        Input {
                            id: "event-title",
                            value: current.title.clone(),
                            required: true,
                            disabled: saving(),
                            oninput: move |e: FormEvent| draft.write().title = e.value(),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "event-date", "Date" }
                        Input {
                            id: "event-date",
                            kind: "date",
                            value: current.event_date.clone(),
                            required: true,
                            disabled: saving(),
                            oninput: move |e: FormEvent| draft.write().event_date = e.value(),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "event-location", "Location" }
                        Input {
                            id: "event-location",
                            value: current.location.clone().unwrap_or_default(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| draft.write().location = Some(e.value()),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "event-description", "Description" }
                        textarea {
                            id: "event-description",
                            class: "textarea",
                            value: current.description.clone().unwrap_or_default(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| draft.write().description = Some(e.value()),
                        }
                    }
                    Button { submit: true, disabled: saving(), "Create Event" }
                }
            }
        }
    }
}
