use crate::profile::ProfileLookup;
use shared_types::{Identity, Profile};

/// What the top of the app shows for the current auth state.
#[derive(Debug, Clone, PartialEq)]
pub enum RootView {
    /// The initial session fetch has not settled.
    Resolving,
    SignedOut,
    LoadingProfile,
    ProfileMissing,
    Ready(Profile),
}

pub const PROFILE_MISSING_MESSAGE: &str = "Profile not found. Please contact support.";

/// session → profile → dashboard handoff.
pub fn root_view(resolved: bool, identity: Option<&Identity>, lookup: &ProfileLookup) -> RootView {
    if !resolved {
        return RootView::Resolving;
    }
    let Some(identity) = identity else {
        return RootView::SignedOut;
    };
    match lookup {
        ProfileLookup::Loading => RootView::LoadingProfile,
        ProfileLookup::NotFound => RootView::ProfileMissing,
        ProfileLookup::Found(profile) if profile.user_id == identity.id => {
            RootView::Ready(profile.clone())
        }
        // Profile of a previous identity still held; wait for the new lookup.
        ProfileLookup::Found(_) => RootView::LoadingProfile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::profile;
    use shared_types::Role;

    fn identity(id: &str) -> Identity {
        Identity {
            id: id.into(),
            email: None,
        }
    }

    #[test]
    fn unresolved_session_waits() {
        assert_eq!(root_view(false, None, &ProfileLookup::Loading), RootView::Resolving);
    }

    #[test]
    fn no_session_is_signed_out() {
        let found = ProfileLookup::Found(profile("p1", "u1", Role::Student));
        assert_eq!(root_view(true, None, &found), RootView::SignedOut);
    }

    #[test]
    fn session_without_profile() {
        let id = identity("u1");
        assert_eq!(root_view(true, Some(&id), &ProfileLookup::Loading), RootView::LoadingProfile);
        assert_eq!(root_view(true, Some(&id), &ProfileLookup::NotFound), RootView::ProfileMissing);
    }

    #[test]
    fn session_with_profile_is_ready() {
        let p = profile("p1", "u1", Role::Admin);
        let view = root_view(true, Some(&identity("u1")), &ProfileLookup::Found(p.clone()));
        assert_eq!(view, RootView::Ready(p));
    }

    #[test]
    fn profile_of_other_identity_is_not_shown() {
        let p = profile("p1", "u1", Role::Admin);
        let view = root_view(true, Some(&identity("u2")), &ProfileLookup::Found(p));
        assert_eq!(view, RootView::LoadingProfile);
    }
}
