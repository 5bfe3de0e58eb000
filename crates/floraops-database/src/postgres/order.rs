//! PostgreSQL order store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use floraops_core::error::{AppError, ErrorKind};
use floraops_core::result::AppResult;
use floraops_core::types::pagination::{PageRequest, PageResponse};
use floraops_entity::order::{CreateOrder, Order, OrderStatus, UpdateOrderDetails};

use crate::stores::OrderStore;

/// Order persistence backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Create a new order store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create_order(&self, data: &CreateOrder) -> AppResult<Order> {
        // UUIDv7 keeps ids roughly ordered by creation time.
        let id = Uuid::now_v7();

        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, organization_id, customer_name, customer_phone, \
                                 delivery_address, items, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'new') \
             RETURNING *",
        )
        .bind(id)
        .bind(data.organization_id)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(&data.delivery_address)
        .bind(Json(&data.items))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create order", e))
    }

    async fn find_order(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }

    async fn list_orders(
        &self,
        organization_id: Uuid,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        let (total, orders) = match status {
            Some(status) => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM orders WHERE organization_id = $1 AND status = $2",
                )
                .bind(organization_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count orders", e)
                })?;

                let orders = sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE organization_id = $1 AND status = $2 \
                     ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
                )
                .bind(organization_id)
                .bind(status)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list orders", e)
                })?;

                (total, orders)
            }
            None => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE organization_id = $1")
                        .bind(organization_id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            AppError::with_source(ErrorKind::Database, "Failed to count orders", e)
                        })?;

                let orders = sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE organization_id = $1 \
                     ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
                )
                .bind(organization_id)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list orders", e)
                })?;

                (total, orders)
            }
        };

        Ok(PageResponse::new(
            orders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn update_details(
        &self,
        organization_id: Uuid,
        id: Uuid,
        changes: &UpdateOrderDetails,
    ) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET customer_name = COALESCE($3, customer_name), \
                               customer_phone = COALESCE($4, customer_phone), \
                               delivery_address = COALESCE($5, delivery_address), \
                               updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(organization_id)
        .bind(&changes.customer_name)
        .bind(&changes.customer_phone)
        .bind(&changes.delivery_address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order", e))
    }

    async fn transition_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        // Compare-and-set: the status predicate makes racing transitions
        // mutually exclusive at the database level.
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $4, updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 AND status = $3 \
             RETURNING *",
        )
        .bind(id)
        .bind(organization_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to transition order", e))
    }
}
