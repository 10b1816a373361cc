use backend::testing::{MemoryAuth, MemoryStore};
use backend::Table;
use serde_json::{json, Value};
use shared_types::{AuthFormState, AuthMode, Role};
use std::sync::Arc;

/// Auth and store wired together so sign-up creates a profile row.
pub struct School {
    pub auth: MemoryAuth,
    pub store: Arc<MemoryStore>,
}

pub fn school() -> School {
    let store = Arc::new(MemoryStore::new());
    School {
        auth: MemoryAuth::with_profiles(store.clone()),
        store,
    }
}

pub fn student_row(id: &str, enrollment: &str) -> Value {
    json!({
        "id": id,
        "user_id": format!("user-{id}"),
        "enrollment_number": enrollment,
        "class": "8",
        "section": "A",
    })
}

pub fn class_row(id: &str, teacher_id: &str) -> Value {
    json!({
        "id": id,
        "class_name": "Grade 8",
        "section": "A",
        "subject": "Science",
        "teacher_id": teacher_id,
    })
}

pub fn sign_up_form(email: &str, password: &str, name: &str, role: Role) -> AuthFormState {
    AuthFormState {
        mode: AuthMode::SignUp,
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
        role,
        submitting: false,
    }
}

impl School {
    pub fn seed_students(&self, count: usize) {
        let rows = (0..count)
            .map(|i| student_row(&format!("s{i}"), &format!("EN-{i:03}")))
            .collect();
        self.store.seed(Table::Students, rows);
    }
}
