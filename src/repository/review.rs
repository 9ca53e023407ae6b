use crate::{
    abstract_trait::review::{ReviewCommandRepositoryTrait, ReviewQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::review::{CreateReviewRequest, FindProductReviews},
    errors::RepositoryError,
    model::review::Review as ReviewModel,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(Debug, FromRow)]
struct ReviewRow {
    review_id: i32,
    product_id: i32,
    user_id: i32,
    rating: i32,
    comment: Option<String>,
    created_at: Option<NaiveDateTime>,
    total_count: i64,
}

impl From<ReviewRow> for ReviewModel {
    fn from(row: ReviewRow) -> Self {
        ReviewModel {
            review_id: row.review_id,
            product_id: row.product_id,
            user_id: row.user_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct ReviewQueryRepository {
    db: ConnectionPool,
}

impl ReviewQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewQueryRepositoryTrait for ReviewQueryRepository {
    async fn find_by_product(
        &self,
        product_id: i32,
        req: &FindProductReviews,
    ) -> Result<(Vec<ReviewModel>, i64), RepositoryError> {
        info!("🔍 Fetching reviews for product {product_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size.max(1) as i64;
        let offset = ((req.page - 1).max(0) as i64) * limit;

        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT
                r.review_id,
                r.product_id,
                r.user_id,
                r.rating,
                r.comment,
                r.created_at,
                COUNT(*) OVER() AS total_count
            FROM reviews r
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch reviews for product {product_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        let reviews = rows.into_iter().map(ReviewModel::from).collect();

        Ok((reviews, total))
    }
}

#[derive(Clone)]
pub struct ReviewCommandRepository {
    db: ConnectionPool,
}

impl ReviewCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewCommandRepositoryTrait for ReviewCommandRepository {
    async fn create(
        &self,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ReviewModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let review = sqlx::query_as::<_, ReviewModel>(
            r#"
            INSERT INTO reviews (product_id, user_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp)
            RETURNING review_id, product_id, user_id, rating, comment, created_at
            "#,
        )
        .bind(product_id)
        .bind(req.user_id)
        .bind(req.rating)
        .bind(req.comment.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create review for product {product_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("✅ Created review ID {}", review.review_id);
        Ok(review)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete review ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted review ID {id}");
        Ok(())
    }
}
