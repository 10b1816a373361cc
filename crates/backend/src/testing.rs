//! In-memory auth and table collaborators with failure injection.

use crate::auth::AuthProvider;
use crate::query::{FilterOp, Query, Table};
use crate::session::SessionProvider;
use crate::store::DataStore;
use async_trait::async_trait;
use serde_json::{json, Value};
use shared_types::{AppError, Identity, Profile, Role, Session, SignInRequest, SignUpRequest};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
struct MemoryUser {
    id: String,
    email: String,
    password: String,
}

/// Auth provider backed by a user list.
///
/// When linked to a [`MemoryStore`], sign-up also creates the matching
/// `profiles` row the way the hosted backend's trigger does.
#[derive(Default)]
pub struct MemoryAuth {
    users: Mutex<Vec<MemoryUser>>,
    sessions: SessionProvider,
    stored: Mutex<Option<Session>>,
    last_sign_up: Mutex<Option<SignUpRequest>>,
    profiles: Option<Arc<MemoryStore>>,
    fail_get_session: AtomicBool,
    fail_sign_out: AtomicBool,
    issued: AtomicU64,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(store: Arc<MemoryStore>) -> Self {
        Self {
            profiles: Some(store),
            ..Self::default()
        }
    }

    /// Add a confirmed user directly. Returns the user id.
    pub fn register(&self, email: &str, password: &str, name: &str, role: Role) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        lock(&self.users).push(MemoryUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
        });
        if let Some(store) = &self.profiles {
            let profile_id = format!("profile-{id}");
            store.seed(Table::Profiles, vec![profile_row(&profile_id, &id, name, role)]);
        }
        id
    }

    /// Pretend a session survived a reload.
    pub fn restore(&self, session: Session) {
        *lock(&self.stored) = Some(session);
    }

    pub fn last_sign_up(&self) -> Option<SignUpRequest> {
        lock(&self.last_sign_up).clone()
    }

    pub fn fail_get_session(&self, fail: bool) {
        self.fail_get_session.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    fn issue(&self, user: Identity) -> Session {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        Session {
            access_token: format!("access-{}-{n}", user.id),
            refresh_token: format!("refresh-{}-{n}", user.id),
            expires_at: 0,
            user,
        }
    }
}

#[async_trait(?Send)]
impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AppError> {
        *lock(&self.last_sign_up) = Some(request.clone());
        if request.password.len() < shared_types::PASSWORD_MIN_LEN {
            return Err(AppError::validation(
                "Password should be at least 6 characters.",
                HashMap::new(),
            ));
        }
        if lock(&self.users).iter().any(|u| u.email == request.email) {
            return Err(AppError::bad_request("User already registered"));
        }
        self.register(
            &request.email,
            &request.password,
            &request.metadata.name,
            request.metadata.role,
        );
        Ok(())
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session, AppError> {
        let user = lock(&self.users)
            .iter()
            .find(|u| u.email == request.email && u.password == request.password)
            .cloned()
            .ok_or_else(|| AppError::bad_request("Invalid login credentials"))?;
        let session = self.issue(Identity {
            id: user.id,
            email: Some(user.email),
        });
        *lock(&self.stored) = Some(session.clone());
        self.sessions.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        *lock(&self.stored) = None;
        self.sessions.publish(None);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AppError::network("Could not reach the server"));
        }
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        if self.fail_get_session.load(Ordering::SeqCst) {
            return Err(AppError::network("Could not reach the server"));
        }
        let session = self.sessions.current().or_else(|| lock(&self.stored).clone());
        self.sessions.publish(session.clone());
        Ok(session)
    }

    async fn refresh_session(&self) -> Result<Session, AppError> {
        let current = self
            .sessions
            .current()
            .ok_or_else(|| AppError::unauthorized("No session to refresh"))?;
        let session = self.issue(current.user);
        self.sessions.publish(Some(session.clone()));
        Ok(session)
    }

    fn sessions(&self) -> &SessionProvider {
        &self.sessions
    }
}

/// Table store over JSON rows, understanding the same query subset the
/// hosted service is sent.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
    failing: Mutex<HashSet<Table>>,
    reads: Mutex<Vec<Query>>,
}

fn cell(row: &Value, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters.iter().all(|f| match cell(row, &f.column) {
        Some(v) => match f.op {
            FilterOp::Eq => v == f.value,
            FilterOp::Gte => v >= f.value,
        },
        None => false,
    })
}

/// Column on the outer row that points at an embedded table's `id`.
fn foreign_key(embedded: Table) -> Option<&'static str> {
    match embedded {
        Table::AttendanceSessions => Some("session_id"),
        Table::Tests => Some("test_id"),
        Table::Classes => Some("class_id"),
        _ => None,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, table: Table, rows: Vec<Value>) {
        lock(&self.tables).entry(table).or_default().extend(rows);
    }

    pub fn rows(&self, table: Table) -> Vec<Value> {
        lock(&self.tables).get(&table).cloned().unwrap_or_default()
    }

    /// Make every call touching `table` fail.
    pub fn fail_table(&self, table: Table) {
        lock(&self.failing).insert(table);
    }

    pub fn heal_table(&self, table: Table) {
        lock(&self.failing).remove(&table);
    }

    pub fn read_log(&self) -> Vec<Query> {
        lock(&self.reads).clone()
    }

    pub fn was_read(&self, table: Table) -> bool {
        lock(&self.reads).iter().any(|q| q.table == table)
    }

    fn check(&self, table: Table) -> Result<(), AppError> {
        if lock(&self.failing).contains(&table) {
            return Err(AppError::network(format!("{table} is unavailable")));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DataStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, AppError> {
        lock(&self.reads).push(query.clone());
        self.check(query.table)?;

        let tables = lock(&self.tables);
        let mut rows: Vec<Value> = tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| matches(r, query)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by_key(|r| cell(r, &order.column));
            if !order.ascending {
                rows.reverse();
            }
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        for embedded in query.embedded() {
            let Some(fk) = foreign_key(embedded) else {
                continue;
            };
            let targets = tables.get(&embedded);
            for row in rows.iter_mut() {
                let linked = cell(row, fk)
                    .and_then(|id| {
                        targets?
                            .iter()
                            .find(|t| cell(t, "id").as_deref() == Some(id.as_str()))
                            .cloned()
                    })
                    .unwrap_or(Value::Null);
                if let Value::Object(map) = &mut *row {
                    map.insert(embedded.as_str().to_string(), linked);
                }
            }
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>, AppError> {
        self.check(table)?;
        let now = chrono::Utc::now().to_rfc3339();
        let stored: Vec<Value> = rows
            .into_iter()
            .map(|mut row| {
                if let Value::Object(map) = &mut row {
                    map.entry("id")
                        .or_insert_with(|| json!(uuid::Uuid::new_v4().to_string()));
                    map.entry("created_at").or_insert_with(|| json!(now));
                }
                row
            })
            .collect();
        lock(&self.tables)
            .entry(table)
            .or_default()
            .extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, AppError> {
        self.check(query.table)?;
        let Value::Object(patch) = patch else {
            return Err(AppError::bad_request("Patch must be an object"));
        };
        let mut tables = lock(&self.tables);
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(&query.table) {
            for row in rows.iter_mut().filter(|r| matches(r, query)) {
                if let Value::Object(map) = &mut *row {
                    for (k, v) in &patch {
                        map.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }
}

/// A typed profile for tests.
pub fn profile(id: &str, user_id: &str, role: Role) -> Profile {
    Profile {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: format!("{} {id}", role.label()),
        email: format!("{user_id}@school.test"),
        phone: None,
        raw_role: role.as_str().to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn profile_row(id: &str, user_id: &str, name: &str, role: Role) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "name": name,
        "email": format!("{user_id}@school.test"),
        "phone": null,
        "role": role.as_str(),
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
    })
}

pub fn attendance_row(id: &str, student_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "session_id": "session-1",
        "student_id": student_id,
        "status": status,
        "attendance_date": "2024-02-01",
        "check_in_time": "2024-02-01T09:00:00Z",
    })
}

pub fn event_row(id: &str, event_date: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Event {id}"),
        "event_date": event_date,
        "created_by": "admin-user",
    })
}

pub fn test_row(id: &str, created_by: &str) -> Value {
    json!({
        "id": id,
        "class_id": "class-1",
        "created_by": created_by,
        "subject": "Maths",
        "test_name": format!("Test {id}"),
        "test_date": "2024-02-10",
        "total_marks": 100,
    })
}
