use dioxus::prelude::*;
use shared_types::Notice;

/// How many toasts stay on screen at once.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// How long a toast stays up before it dismisses itself.
pub const TOAST_DURATION_MS: i64 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub destructive: bool,
    /// Unix milliseconds after which the entry is dropped.
    pub expires_at: i64,
}

impl ToastEntry {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        destructive: bool,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            destructive,
            expires_at: now_ms + TOAST_DURATION_MS,
        }
    }
}

/// Remove entries whose time is up at `now_ms`.
pub fn drop_expired(entries: &mut Vec<ToastEntry>, now_ms: i64) {
    entries.retain(|t| t.expires_at > now_ms);
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn sleep_ms(ms: i64) {
    let js = format!("await new Promise(r => setTimeout(r, {ms})); return null;");
    if let Err(e) = document::eval(&js).await {
        tracing::warn!(error = ?e, "Toast timer failed");
    }
}

/// Append `entry`, dropping the oldest entries beyond `limit`.
pub fn push_toast(entries: &mut Vec<ToastEntry>, entry: ToastEntry, limit: usize) {
    entries.push(entry);
    if entries.len() > limit {
        let overflow = entries.len() - limit;
        entries.drain(..overflow);
    }
}

/// Toast queue provided as context by [`ToastProvider`].
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    entries: Signal<Vec<ToastEntry>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn show(&mut self, title: impl Into<String>, description: impl Into<String>, destructive: bool) {
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        let entry = ToastEntry::new(id, title, description, destructive, now_ms());
        push_toast(&mut self.entries.write(), entry, MAX_VISIBLE_TOASTS);
    }

    pub fn notify(&mut self, notice: &Notice) {
        self.show(
            notice.title.clone(),
            notice.description.clone(),
            notice.is_destructive(),
        );
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.write().retain(|t| t.id != id);
    }

    /// Drop every entry whose time is up.
    pub fn expire(&mut self) {
        drop_expired(&mut self.entries.write(), now_ms());
    }

    pub fn entries(&self) -> Vec<ToastEntry> {
        self.entries.read().clone()
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] to its children and renders the stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        entries: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        {children}
        div { class: "toast-viewport", role: "status",
            for entry in toasts.entries() {
                ToastItem { key: "{entry.id}", entry }
            }
        }
    }
}

#[component]
fn ToastItem(entry: ToastEntry) -> Element {
    let mut toasts = use_toast();
    let id = entry.id;
    let remaining = entry.expires_at - now_ms();

    use_future(move || async move {
        sleep_ms(remaining.max(0)).await;
        toasts.expire();
    });

    rsx! {
        div {
            class: "toast",
            "data-variant": if entry.destructive { "destructive" } else { "default" },
            div { class: "toast-body",
                p { class: "toast-title", "{entry.title}" }
                if !entry.description.is_empty() {
                    p { class: "toast-description", "{entry.description}" }
                }
            }
            button {
                class: "toast-close",
                r#type: "button",
                "aria-label": "Dismiss",
                onclick: move |_| toasts.dismiss(id),
                "×"
            }
        }
    }
}
