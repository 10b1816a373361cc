use backend::{AuthProvider, DataStore, SessionStorage};
use dioxus::prelude::*;
use shared_types::AppError;
use std::sync::Arc;

mod auth;
mod format_helpers;
mod routes;
use auth::{use_session_sync, AuthState};
use routes::Route;

/// Backend collaborators shared by every page.
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn DataStore>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.auth, &other.auth) && Arc::ptr_eq(&self.store, &other.store)
    }
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

fn main() {
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

fn connect_backend() -> Result<AppServices, AppError> {
    let config = backend::config::backend_config()?;
    let storage: Arc<dyn SessionStorage> = Arc::new(auth::LocalStorageSession);
    let supabase = backend::supabase::connect(config, storage)?;
    tracing::info!(platform = client_platform(), "Backend client ready");
    Ok(AppServices {
        auth: supabase.auth,
        store: supabase.store,
    })
}

fn connect_or_log() -> Result<AppServices, AppError> {
    connect_backend().inspect_err(|e| tracing::error!(error = %e, "Backend is not configured"))
}

#[component]
fn App() -> Element {
    use_context_provider(|| backend::config::feature_flags().clone());
    let connection = use_hook(connect_or_log);

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        shared_ui::ToastProvider {
            match connection {
                Ok(services) => rsx! { Connected { services } },
                Err(err) => rsx! { ConfigError { message: err.friendly_message() } },
            }
        }
    }
}

/// Provides the backend and auth state, then hands over to the router.
#[component]
fn Connected(services: AppServices) -> Element {
    use_context_provider(|| services.clone());
    use_context_provider(AuthState::new);
    use_session_sync();

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn ConfigError(message: String) -> Element {
    rsx! {
        div { class: "centered-screen",
            div { class: "centered-card",
                h1 { "Smart Class" }
                p { class: "error-text", "{message}" }
                p { class: "muted-text",
                    "Set SUPABASE_URL and SUPABASE_ANON_KEY and reload."
                }
            }
        }
    }
}
