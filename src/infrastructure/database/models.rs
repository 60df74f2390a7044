//! Storage-side record shapes
//!
//! These mirror the column layout of `users` rather than the domain model.

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;

/// Row produced by the six-column user projection.
///
/// `updated_at` is `None` when the column is SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserRow {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub role: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Column values written by a user insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRow {
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role: i16,
}
