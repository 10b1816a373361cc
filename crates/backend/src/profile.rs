use crate::query::{Query, Table};
use crate::store::{select_as, DataStore};
use shared_types::{Identity, Profile};

/// State of the profile lookup for the signed-in identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProfileLookup {
    #[default]
    Loading,
    Found(Profile),
    NotFound,
}

impl ProfileLookup {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            ProfileLookup::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ProfileLookup::Loading)
    }
}

/// Read the profile belonging to `identity`. Failures are logged and
/// reported as `NotFound`.
#[tracing::instrument(skip(store), fields(user_id = %identity.id))]
pub async fn resolve_profile(store: &dyn DataStore, identity: &Identity) -> ProfileLookup {
    let query = Query::table(Table::Profiles)
        .eq("user_id", identity.id.as_str())
        .limit(1);
    match select_as::<Profile>(store, &query).await {
        Ok(profiles) => match profiles.into_iter().next() {
            Some(profile) => ProfileLookup::Found(profile),
            None => {
                tracing::warn!("No profile row for user");
                ProfileLookup::NotFound
            }
        },
        Err(e) => {
            tracing::warn!(table = "profiles", error = %e, "Error fetching profile");
            ProfileLookup::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{profile_row, MemoryStore};
    use shared_types::Role;

    fn identity(id: &str) -> Identity {
        Identity {
            id: id.into(),
            email: None,
        }
    }

    #[tokio::test]
    async fn finds_profile_by_user_id() {
        let store = MemoryStore::new();
        store.seed(Table::Profiles, vec![
            profile_row("p1", "u1", "Ada", Role::Teacher),
            profile_row("p2", "u2", "Grace", Role::Student),
        ]);
        let lookup = resolve_profile(&store, &identity("u2")).await;
        assert_eq!(lookup.profile().unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(resolve_profile(&store, &identity("u9")).await, ProfileLookup::NotFound);
    }

    #[tokio::test]
    async fn failed_read_is_not_found() {
        let store = MemoryStore::new();
        store.seed(Table::Profiles, vec![profile_row("p1", "u1", "Ada", Role::Admin)]);
        store.fail_table(Table::Profiles);
        assert_eq!(resolve_profile(&store, &identity("u1")).await, ProfileLookup::NotFound);
    }
}
