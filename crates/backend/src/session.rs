//! Current-session ownership and change notification.
//!
//! The auth client is the only writer. Everything else reads through
//! [`SessionProvider`] or waits on a [`SessionSubscription`].

use crate::auth::AuthProvider;
use async_trait::async_trait;
use shared_types::{Identity, Session};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

struct Inner {
    tx: watch::Sender<Option<Session>>,
    resolved: AtomicBool,
}

/// Shared handle to the current session.
#[derive(Clone)]
pub struct SessionProvider {
    inner: Arc<Inner>,
}

impl SessionProvider {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                resolved: AtomicBool::new(false),
            }),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.tx.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.tx.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.tx.borrow().as_ref().map(|s| s.access_token.clone())
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.inner.tx.subscribe(),
        }
    }

    /// True once the initial session fetch has settled.
    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.load(Ordering::Acquire)
    }

    /// Store a new session. Subscribers are only woken when the identity
    /// changes; a token refresh for the same user is silent.
    pub(crate) fn publish(&self, session: Option<Session>) -> bool {
        self.inner.tx.send_if_modified(|current| {
            let changed = current.as_ref().map(|s| &s.user) != session.as_ref().map(|s| &s.user);
            *current = session;
            changed
        })
    }

    /// Returns `true` only for the first call.
    pub(crate) fn mark_resolved(&self) -> bool {
        !self.inner.resolved.swap(true, Ordering::AcqRel)
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("user", &self.identity().map(|i| i.id))
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Receives identity changes until dropped.
pub struct SessionSubscription {
    rx: watch::Receiver<Option<Session>>,
}

impl SessionSubscription {
    /// Wait for the next distinct identity. `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<Option<Identity>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().as_ref().map(|s| s.user.clone()))
    }

    pub fn identity(&self) -> Option<Identity> {
        self.rx.borrow().as_ref().map(|s| s.user.clone())
    }

    fn mark_seen(&mut self) {
        self.rx.borrow_and_update();
    }
}

/// Result of mounting the resolver: the initial identity plus a
/// subscription that has already seen it.
pub struct MountedSession {
    pub initial: Option<Identity>,
    pub subscription: SessionSubscription,
}

pub struct SessionResolver;

impl SessionResolver {
    /// Subscribe, then fetch the session once. A failed fetch leaves the
    /// user signed out.
    pub async fn mount(auth: &dyn AuthProvider) -> MountedSession {
        let provider = auth.sessions();
        let mut subscription = provider.subscribe();

        let initial = match auth.get_session().await {
            Ok(session) => session.map(|s| s.user),
            Err(e) => {
                tracing::warn!(error = %e, "Initial session fetch failed, continuing signed out");
                provider.publish(None);
                None
            }
        };
        subscription.mark_seen();
        if provider.mark_resolved() {
            tracing::debug!(signed_in = initial.is_some(), "Session resolved");
        }

        MountedSession {
            initial,
            subscription,
        }
    }
}

/// Where a session survives page reloads.
#[async_trait(?Send)]
pub trait SessionStorage {
    async fn load(&self) -> Option<Session>;
    async fn save(&self, session: &Session);
    async fn clear(&self);
}

/// Process-local storage, used natively and in tests.
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    pub fn peek(&self) -> Option<Session> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

#[async_trait(?Send)]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> Option<Session> {
        self.peek()
    }

    async fn save(&self, session: &Session) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
    }

    async fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
