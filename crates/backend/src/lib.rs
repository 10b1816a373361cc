//! Client-side access to the hosted auth and table services, plus the
//! session, profile and dashboard logic built on top of them.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error_convert;
pub mod pages;
pub mod profile;
pub mod query;
pub mod session;
pub mod store;
pub mod supabase;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::{sign_out_with_notice, submit_auth, AuthProvider};
pub use dashboard::{fetch_dashboard, summarize, DashboardGuard, DashboardReads, ReadOutcome};
pub use profile::{resolve_profile, ProfileLookup};
pub use query::{Filter, FilterOp, Order, Query, Table};
pub use session::{
    MemorySessionStorage, MountedSession, SessionProvider, SessionResolver, SessionStorage,
    SessionSubscription,
};
pub use store::DataStore;
pub use view::{root_view, RootView};

/// Today's date as `YYYY-MM-DD`, the format the `*_date` columns use.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Current time in unix seconds.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
