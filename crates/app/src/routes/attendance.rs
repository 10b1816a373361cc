use crate::auth::use_profile;
use crate::format_helpers::{format_date_human, format_datetime_human, format_status};
use crate::routes::PageError;
use crate::use_services;
use backend::pages::{close_attendance_session, load_attendance, start_attendance_session, AttendanceView};
use backend::ReadOutcome;
use dioxus::prelude::*;
use shared_types::{AttendanceRecord, AttendanceSession, ClassRecord};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Label, LoadingState, PageDescription, PageHeader, PageTitle,
};

#[component]
pub fn Attendance() -> Element {
    let services = use_services();
    let profile = use_profile();

    let load_for = profile.clone();
    let attendance = use_resource(move || {
        let store = services.store.clone();
        let profile = load_for.clone();
        async move { load_attendance(store.as_ref(), &profile).await }
    });

    let result = attendance.read().as_ref().cloned();

    rsx! {
        div { class: "page",
            match result {
                None => rsx! { LoadingState { message: "Loading attendance..." } },
                Some(Err(error)) => rsx! { PageError { error } },
                Some(Ok(AttendanceView::Own { records, rate })) => rsx! {
                    PageHeader {
                        div {
                            PageTitle { "My Attendance" }
                            PageDescription { "Your check-ins across all sessions" }
                        }
                    }
                    RateCard { rate, count: records.len() }
                    RecordTable { records, show_student: false }
                },
                Some(Ok(AttendanceView::All { records, rate })) => rsx! {
                    PageHeader {
                        div {
                            PageTitle { "Attendance" }
                            PageDescription { "Every check-in recorded in the system" }
                        }
                    }
                    RateCard { rate, count: records.len() }
                    RecordTable { records, show_student: true }
                },
                Some(Ok(AttendanceView::Sessions { sessions, classes })) => rsx! {
                    PageHeader {
                        div {
                            PageTitle { "Attendance" }
                            PageDescription { "Open a session and share its code with your class" }
                        }
                    }
                    SessionManager { sessions, classes, attendance }
                },
            }
        }
    }
}

#[component]
fn RateCard(rate: u32, count: usize) -> Element {
    rsx! {
        Card { class: "rate-card",
            CardHeader {
                CardTitle { "Attendance Rate" }
                CardDescription { "Based on {count} records" }
            }
            CardContent {
                div { class: "rate-value", "{rate}%" }
                div { class: "rate-bar",
                    div { class: "rate-bar-fill", style: "width: {rate}%;" }
                }
            }
        }
    }
}

#[component]
fn RecordTable(records: ReadOutcome<AttendanceRecord>, show_student: bool) -> Element {
    rsx! {
        Card {
            CardContent {
                if records.is_empty() {
                    p { class: "muted-text", "No attendance records yet" }
                } else {
                    table { class: "data-table",
                        thead {
                            tr {
                                if show_student {
                                    th { "Student" }
                                }
                                th { "Date" }
                                th { "Checked in" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for record in records.rows().iter() {
                                tr { key: "{record.id}",
                                    if show_student {
                                        td { class: "mono", "{record.student_id}" }
                                    }
                                    td { "{format_date_human(&record_date(record))}" }
                                    td { "{format_datetime_human(&record.check_in_time)}" }
                                    td {
                                        Badge {
                                            variant: if record.is_present() { BadgeVariant::Primary } else { BadgeVariant::Secondary },
                                            "{format_status(&record.status)}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The session date when embedded, else the record's own date.
fn record_date(record: &AttendanceRecord) -> String {
    record
        .attendance_sessions
        .as_ref()
        .map(|s| s.session_date.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| record.attendance_date.clone())
}

fn class_label(classes: &[ClassRecord], class_id: &str) -> String {
    classes
        .iter()
        .find(|c| c.id == class_id)
        .map(|c| {
            if c.section.is_empty() {
                c.class_name.clone()
            } else {
                format!("{} ({})", c.class_name, c.section)
            }
        })
        .unwrap_or_else(|| class_id.to_string())
}

/// Start and close sessions for the teacher's classes.
#[component]
fn SessionManager(
    sessions: ReadOutcome<AttendanceSession>,
    classes: ReadOutcome<ClassRecord>,
    attendance: Resource<Result<AttendanceView, shared_types::AppError>>,
) -> Element {
    let mut attendance = attendance;
    let services = use_services();
    let profile = use_profile();
    let mut toasts = use_toast();
    let mut class_id = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let start = move |_| {
        let store = services.store.clone();
        let teacher = profile.clone();
        let chosen = class_id.peek().clone();
        busy.set(true);
        spawn(async move {
            match start_attendance_session(store.as_ref(), &teacher, &chosen).await {
                Ok(session) => {
                    toasts.show(
                        "Attendance session started",
                        format!("Share code {} with your class.", session.qr_code),
                        false,
                    );
                    attendance.restart();
                }
                Err(e) => toasts.show("Could not start session", e.friendly_message(), true),
            }
            busy.set(false);
        });
    };

    let class_rows = classes.rows().to_vec();
    let session_rows = sessions.rows().to_vec();

    rsx! {
        Card {
            CardHeader {
                CardTitle { "New Session" }
                CardDescription { "Students check in with the generated code" }
            }
            CardContent {
                div { class: "session-form",
                    Label { html_for: "class", "Class" }
                    select {
                        id: "class",
                        class: "select",
                        value: "{class_id}",
                        onchange: move |e: FormEvent| class_id.set(e.value()),
                        option { value: "", "Choose a class" }
                        for class in class_rows.iter() {
                            option { key: "{class.id}", value: "{class.id}", "{class_label(&class_rows, &class.id)}" }
                        }
                    }
                    Button { disabled: busy() || class_id.read().is_empty(), onclick: start,
                        "Start attendance session"
                    }
                }
            }
        }

        Card {
            CardHeader {
                CardTitle { "Sessions" }
            }
            CardContent {
                if session_rows.is_empty() {
                    p { class: "muted-text", "No sessions yet" }
                } else {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Class" }
                                th { "Date" }
                                th { "Code" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for session in session_rows.iter() {
                                tr { key: "{session.id}",
                                    td { "{class_label(&class_rows, &session.class_id)}" }
                                    td { "{format_date_human(&session.session_date)}" }
                                    td { class: "mono",
                                        if session.is_active() { "{session.qr_code}" } else { "-" }
                                    }
                                    td {
                                        Badge {
                                            variant: if session.is_active() { BadgeVariant::Primary } else { BadgeVariant::Outline },
                                            "{format_status(&session.status)}"
                                        }
                                    }
                                    td {
                                        if session.is_active() {
                                            CloseSessionButton { session_id: session.id.clone(), attendance }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CloseSessionButton(
    session_id: String,
    attendance: Resource<Result<AttendanceView, shared_types::AppError>>,
) -> Element {
    let mut attendance = attendance;
    let services = use_services();
    let profile = use_profile();
    let mut toasts = use_toast();
    let mut busy = use_signal(|| false);

    let close = move |_| {
        let store = services.store.clone();
        let teacher = profile.clone();
        let id = session_id.clone();
        busy.set(true);
        spawn(async move {
            match close_attendance_session(store.as_ref(), &teacher, &id).await {
                Ok(_) => {
                    toasts.show("Session closed", "The code no longer accepts check-ins.", false);
                    attendance.restart();
                }
                Err(e) => toasts.show("Could not close session", e.friendly_message(), true),
            }
            busy.set(false);
        });
    };

    rsx! {
        Button { variant: ButtonVariant::Outline, disabled: busy(), onclick: close, "Close" }
    }
}
