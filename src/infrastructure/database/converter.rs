//! Storage <-> domain conversion helpers

use tracing::warn;

use super::entities::user::{ROLE_ADMIN, ROLE_USER};
use super::models::{NewUserRow, UserRow};
use crate::domain::{Role, User, UserFields};

/// Decode a stored role code. Unknown codes fall back to `Role::User`.
pub fn role_from_code(code: i16) -> Role {
    match code {
        ROLE_USER => Role::User,
        ROLE_ADMIN => Role::Admin,
        unknown => {
            warn!(role_code = unknown, "Unknown stored role code, treating as user");
            Role::User
        }
    }
}

pub fn role_to_code(role: Role) -> i16 {
    match role {
        Role::User => ROLE_USER,
        Role::Admin => ROLE_ADMIN,
    }
}

pub fn user_row_to_domain(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.fullname,
        email: row.email,
        role: role_from_code(row.role),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn user_fields_to_row(fields: UserFields) -> NewUserRow {
    NewUserRow {
        fullname: fields.name,
        email: fields.email,
        password: fields.password,
        password_confirm: fields.password_confirm,
        role: role_to_code(fields.role),
    }
}
