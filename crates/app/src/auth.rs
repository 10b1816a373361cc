use crate::use_services;
use async_trait::async_trait;
use backend::{
    resolve_profile, root_view, sign_out_with_notice, AuthProvider, MountedSession, ProfileLookup,
    RootView, SessionResolver, SessionStorage,
};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use shared_types::{Identity, Profile, Session};
use shared_ui::Toasts;
use std::sync::Arc;

/// Global authentication state, fed by the session subscription.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    /// Set once the initial session fetch has settled.
    pub resolved: Signal<bool>,
    pub identity: Signal<Option<Identity>>,
    pub lookup: Signal<ProfileLookup>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            resolved: Signal::new(false),
            identity: Signal::new(None),
            lookup: Signal::new(ProfileLookup::Loading),
        }
    }

    pub fn view(&self) -> RootView {
        root_view(
            *self.resolved.read(),
            self.identity.read().as_ref(),
            &self.lookup.read(),
        )
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// The signed-in user's profile, provided by the root gate once resolved.
pub fn use_profile() -> Profile {
    use_context::<Profile>()
}

/// `window.location.origin`, or an empty string when unavailable.
pub async fn page_origin() -> String {
    match document::eval("return window.location.origin;").join::<String>().await {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!(error = ?e, "Could not read the page origin");
            String::new()
        }
    }
}

/// Mount the session resolver, follow identity changes and look up the
/// profile for each new identity.
pub fn use_session_sync() {
    let services = use_services();
    let mut state = use_auth();

    let auth = services.auth.clone();
    use_future(move || {
        let auth = auth.clone();
        async move {
            let MountedSession {
                initial,
                mut subscription,
            } = SessionResolver::mount(auth.as_ref()).await;
            state.identity.set(initial);
            state.resolved.set(true);

            while let Some(identity) = subscription.changed().await {
                tracing::debug!(signed_in = identity.is_some(), "Session changed");
                state.identity.set(identity);
            }
        }
    });

    let store = services.store.clone();
    use_effect(move || {
        state.lookup.set(ProfileLookup::Loading);
        let Some(identity) = state.identity.read().clone() else {
            return;
        };
        let store = store.clone();
        spawn(async move {
            let lookup = resolve_profile(store.as_ref(), &identity).await;
            let current = state.identity.peek().as_ref().map(|i| i.id.clone());
            if current.as_deref() == Some(identity.id.as_str()) {
                state.lookup.set(lookup);
            }
        });
    });
}

/// Sign out and show the resulting notice.
///
/// The session flips to signed-out before the remote call returns, which
/// unmounts the layout, so the task is detached from the calling scope.
pub fn sign_out_detached(auth: Arc<dyn AuthProvider>, mut toasts: Toasts) {
    spawn_forever(async move {
        if let Some(notice) = sign_out_with_notice(auth.as_ref()).await {
            toasts.notify(&notice);
        }
    });
}

const STORAGE_KEY: &str = "smart-class.session";

/// Keeps the session in the webview's `localStorage`.
pub struct LocalStorageSession;

#[async_trait(?Send)]
impl SessionStorage for LocalStorageSession {
    async fn load(&self) -> Option<Session> {
        let js = format!("return window.localStorage.getItem('{STORAGE_KEY}');");
        let raw: Option<String> = match document::eval(&js).join().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = ?e, "Could not read the stored session");
                return None;
            }
        };
        serde_json::from_str(&raw?)
            .inspect_err(|e| tracing::warn!(error = %e, "Discarding unreadable stored session"))
            .ok()
    }

    async fn save(&self, session: &Session) {
        let json = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Could not encode the session");
                return;
            }
        };
        let eval = document::eval(&format!(
            "window.localStorage.setItem('{STORAGE_KEY}', await dioxus.recv());"
        ));
        if let Err(e) = eval.send(json) {
            tracing::warn!(error = ?e, "Could not store the session");
            return;
        }
        if let Err(e) = eval.await {
            tracing::warn!(error = ?e, "localStorage write failed, session not persisted");
        }
    }

    async fn clear(&self) {
        let js = format!("window.localStorage.removeItem('{STORAGE_KEY}');");
        if let Err(e) = document::eval(&js).await {
            tracing::warn!(error = ?e, "Could not clear the stored session");
        }
    }
}
