use crate::{
    abstract_trait::user::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::user::{CreateUserRequest, FindAllUsers, UpdateUserRequest},
    errors::RepositoryError,
    model::user::User as UserModel,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(Debug, FromRow)]
struct UserRow {
    user_id: i32,
    username: String,
    email: String,
    password: String,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
    total_count: i64,
}

impl From<UserRow> for UserModel {
    fn from(row: UserRow) -> Self {
        UserModel {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        info!("🔍 Fetching users with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size.max(1) as i64;
        let offset = ((req.page - 1).max(0) as i64) * limit;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.as_str())
        };

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                u.user_id,
                u.username,
                u.email,
                u.password,
                u.created_at,
                u.updated_at,
                COUNT(*) OVER() AS total_count
            FROM users u
            WHERE ($1::TEXT IS NULL
                OR u.username ILIKE '%' || $1 || '%'
                OR u.email ILIKE '%' || $1 || '%')
            ORDER BY u.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch users: {e:?}");
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        let users = rows.into_iter().map(UserModel::from).collect();

        Ok((users, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, username, email, password, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(user)
    }
}

#[derive(Clone)]
pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (username, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, current_timestamp, current_timestamp)
            RETURNING user_id, username, email, password, created_at, updated_at
            "#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .bind(&req.password)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user {}: {err:?}", req.username);
            RepositoryError::from(err)
        })?;

        info!("✅ Created user ID {}", user.user_id);
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateUserRequest,
    ) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET username   = $2,
                email      = $3,
                password   = COALESCE($4, password),
                updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING user_id, username, email, password, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&req.username)
        .bind(&req.email)
        .bind(req.password.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update user ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated user ID {id}");
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete user ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted user ID {id}");
        Ok(())
    }
}
