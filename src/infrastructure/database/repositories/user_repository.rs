use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult};
use tracing::{debug, error};

use crate::domain::{
    DomainError, DomainResult, StorageError, User, UserFields, UserRepositoryInterface,
};
use crate::infrastructure::database::converter::{user_fields_to_row, user_row_to_domain};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::models::UserRow;

/// Shares the pool with the health check, hence the `Arc`.
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get database connection reference
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn db_err(e: DbErr) -> DomainError {
    StorageError::Database(e.to_string()).into()
}

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create(&self, fields: UserFields) -> DomainResult<i64> {
        let row = user_fields_to_row(fields);

        let mut insert = Query::insert();
        insert
            .into_table(user::Entity)
            .columns([
                user::Column::Fullname,
                user::Column::Email,
                user::Column::Password,
                user::Column::PasswordConfirm,
                user::Column::Role,
            ])
            .values([
                SimpleExpr::from(row.fullname),
                SimpleExpr::from(row.email),
                SimpleExpr::from(row.password),
                SimpleExpr::from(row.password_confirm),
                SimpleExpr::from(row.role),
            ])
            .map_err(|e| DomainError::QueryBuild(e.to_string()))?
            .returning_col(user::Column::Id);

        let stmt = self.db.get_database_backend().build(&insert);
        debug!(sql = %stmt.sql, "Inserting user");

        let returned = self.db.query_one(stmt).await.map_err(|e| {
            error!(error = %e, "Failed to insert user");
            db_err(e)
        })?;

        let Some(returned) = returned else {
            error!("Insert returned no id");
            return Err(StorageError::Database("insert returned no id".into()).into());
        };

        let id: i64 = returned.try_get("", "id").map_err(db_err)?;
        Ok(id)
    }

    async fn get(&self, id: i64) -> DomainResult<User> {
        let select = Query::select()
            .columns([
                user::Column::Id,
                user::Column::Fullname,
                user::Column::Email,
                user::Column::Role,
                user::Column::CreatedAt,
                user::Column::UpdatedAt,
            ])
            .from(user::Entity)
            .and_where(Expr::col(user::Column::Id).eq(id))
            .limit(1)
            .to_owned();

        let stmt = self.db.get_database_backend().build(&select);
        debug!(sql = %stmt.sql, user_id = id, "Selecting user");

        let row = UserRow::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(error = %e, user_id = id, "Failed to select user");
                db_err(e)
            })?;

        let Some(row) = row else {
            return Err(StorageError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            }
            .into());
        };

        Ok(user_row_to_domain(row))
    }
}
