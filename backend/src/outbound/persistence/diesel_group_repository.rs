//! PostgreSQL-backed `GroupRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{GroupRepository, RepositoryError};
use crate::domain::{Group, GroupId, GroupPatch, NewGroup, User};
use crate::outbound::messages;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{GroupChangeset, GroupRow, NewGroupRow, UserRow};
use super::pool::DbPool;
use super::schema::{groups, users};

/// Diesel implementation of [`GroupRepository`].
///
/// Groups are loaded with their members in a single read transaction so a
/// listing never mixes snapshots.
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attach members to each group row, preserving group order.
fn assemble(group_rows: Vec<GroupRow>, user_rows: Vec<UserRow>) -> Result<Vec<Group>, RepositoryError> {
    let members = user_rows.grouped_by(&group_rows);
    group_rows
        .into_iter()
        .zip(members)
        .map(|(group, rows)| {
            let users = rows
                .into_iter()
                .map(User::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            group.into_domain(users)
        })
        .collect()
}

async fn load_members(
    conn: &mut AsyncPgConnection,
    group_rows: &[GroupRow],
) -> Result<Vec<UserRow>, diesel::result::Error> {
    UserRow::belonging_to(group_rows)
        .select(UserRow::as_select())
        .order_by(users::id)
        .load(conn)
        .await
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (group_rows, user_rows) = conn
            .transaction(|conn| {
                async move {
                    let group_rows: Vec<GroupRow> = groups::table
                        .select(GroupRow::as_select())
                        .order_by(groups::id)
                        .load(conn)
                        .await?;
                    let user_rows = load_members(conn, &group_rows).await?;
                    Ok((group_rows, user_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        assemble(group_rows, user_rows)
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Group, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let Some(row) = groups::table
                        .find(id.get())
                        .select(GroupRow::as_select())
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };
                    let user_rows = load_members(conn, std::slice::from_ref(&row)).await?;
                    Ok(Some((row, user_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let (row, user_rows) = loaded.ok_or_else(|| messages::group_not_found(id))?;
        assemble(vec![row], user_rows)?
            .pop()
            .ok_or_else(|| messages::group_not_found(id))
    }

    async fn create(&self, group: &NewGroup) -> Result<Group, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(groups::table)
            .values(NewGroupRow::from(group))
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(group_id = row.id, "group inserted");
        row.into_domain(Vec::new())
    }

    async fn update(&self, id: GroupId, patch: &GroupPatch) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            async move {
                let row = groups::table
                    .find(id.get())
                    .select(GroupRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| messages::group_not_found(id))?;

                if patch.is_empty() {
                    return Ok(());
                }
                let mut merged = row.into_domain(Vec::new())?;
                merged.apply(patch);

                diesel::update(groups::table.find(id.get()))
                    .set(GroupChangeset::from(&merged))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: GroupId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(groups::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| match map_diesel_error(err) {
                mapped if mapped.is_constraint_violation() => messages::group_still_referenced(id),
                mapped => mapped,
            })?;

        if deleted == 0 {
            return Err(messages::group_not_found(id));
        }
        Ok(())
    }
}
