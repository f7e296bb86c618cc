//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{GroupId, NewUser, User, UserId, UserPatch};
use crate::outbound::messages;

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Name the missing group when the foreign key rejects a write.
fn map_write_error(error: DieselError, group_id: GroupId) -> RepositoryError {
    if is_foreign_key_violation(&error) {
        debug!(%group_id, "user write referenced a missing group");
        return messages::group_missing(group_id);
    }
    map_diesel_error(error)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| messages::user_not_found(id))?;

        User::try_from(row)
    }

    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.group_id))?;

        debug!(user_id = row.id, "user inserted");
        User::try_from(row)
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            async move {
                let row = users::table
                    .find(id.get())
                    .select(UserRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| messages::user_not_found(id))?;

                if patch.is_empty() {
                    return Ok(());
                }
                let mut merged = User::try_from(row)?;
                merged.apply(patch);

                diesel::update(users::table.find(id.get()))
                    .set(UserChangeset::from(&merged))
                    .execute(conn)
                    .await
                    .map_err(|err| map_write_error(err, merged.group_id()))?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(messages::user_not_found(id));
        }
        Ok(())
    }
}
