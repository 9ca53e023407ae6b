use crate::{
    abstract_trait::order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::order::{CreateOrderRecordRequest, FindAllOrders},
    errors::RepositoryError,
    model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(Debug, FromRow)]
struct OrderRow {
    order_id: i32,
    user_id: i32,
    total_amount: f64,
    status: String,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
    total_count: i64,
}

impl From<OrderRow> for OrderModel {
    fn from(row: OrderRow) -> Self {
        OrderModel {
            order_id: row.order_id,
            user_id: row.user_id,
            total_amount: row.total_amount,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!("🔍 Fetching orders | user filter: {:?}", req.user_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let limit = req.page_size.max(1) as i64;
        let offset = ((req.page - 1).max(0) as i64) * limit;

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                o.order_id,
                o.user_id,
                o.total_amount,
                o.status,
                o.created_at,
                o.updated_at,
                COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE ($1::INT IS NULL OR o.user_id = $1)
            ORDER BY o.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(req.user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {e:?}");
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        let orders = rows.into_iter().map(OrderModel::from).collect();

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT order_id, user_id, total_amount, status, created_at, updated_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(order)
    }

    async fn find_items_for_orders(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemModel>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItemModel>(
            r#"
            SELECT order_item_id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_item_id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order items: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(items)
    }
}

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        // Order and items land atomically or not at all.
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (user_id, total_amount, status, created_at, updated_at)
            VALUES ($1, $2, $3, current_timestamp, current_timestamp)
            RETURNING order_id, user_id, total_amount, status, created_at, updated_at
            "#,
        )
        .bind(req.user_id)
        .bind(req.total_amount)
        .bind(&req.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create order for user {}: {err:?}", req.user_id);
            RepositoryError::from(err)
        })?;

        let mut items = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let inserted = sqlx::query_as::<_, OrderItemModel>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                RETURNING order_item_id, order_id, product_id, quantity, price
                "#,
            )
            .bind(order.order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to insert item (product {}) for order {}: {err:?}",
                    item.product_id, order.order_id
                );
                RepositoryError::from(err)
            })?;

            items.push(inserted);
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order ID {} with {} item(s) for user {}",
            order.order_id,
            items.len(),
            order.user_id
        );
        Ok((order, items))
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status     = $2,
                updated_at = current_timestamp
            WHERE order_id = $1
            RETURNING order_id, user_id, total_amount, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update status of order ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🔄 Order ID {id} moved to status '{status}'");
        Ok(order)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete order ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted order ID {id}");
        Ok(())
    }
}
