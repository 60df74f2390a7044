use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// User model
///
/// `id` is assigned by storage on creation and never changes afterwards.
/// `updated_at` is `None` until the record is first modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating a user.
///
/// Never persisted as a whole; the repository spreads them over columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub password_confirm: String,
}

impl UserFields {
    pub fn passwords_match(&self) -> bool {
        self.password == self.password_confirm
    }
}
