//! User entity for database
//!
//! Single source of truth for the `users` table and column names. The
//! repository builds its statements against `Entity` and `Column`.

use sea_orm::entity::prelude::*;

/// Role codes as stored in the `role` column.
pub const ROLE_USER: i16 = 0;
pub const ROLE_ADMIN: i16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role: i16,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
