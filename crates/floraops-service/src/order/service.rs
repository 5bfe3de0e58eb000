//! Order lifecycle operations, always scoped to the caller's organization.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use floraops_core::error::AppError;
use floraops_core::result::AppResult;
use floraops_core::types::pagination::{PageRequest, PageResponse};
use floraops_database::stores::OrderStore;
use floraops_entity::order::{CreateOrder, Order, OrderItem, OrderStatus, UpdateOrderDetails};

use crate::context::RequestContext;

/// Data for a new order, as accepted from the caller. The organization
/// is taken from the request context, never from here.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewOrder {
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact phone.
    pub customer_phone: Option<String>,
    /// Delivery address.
    pub delivery_address: Option<String>,
    /// Line items.
    pub items: Vec<OrderItem>,
}

/// Handles order creation, querying, and status transitions.
#[derive(Clone)]
pub struct OrderService {
    /// Order persistence.
    orders: Arc<dyn OrderStore>,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService").finish()
    }
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Creates an order in the caller's organization with status `new`.
    pub async fn create(&self, ctx: &RequestContext, data: NewOrder) -> AppResult<Order> {
        if data.customer_name.trim().is_empty() {
            return Err(AppError::validation("Customer name cannot be empty"));
        }
        for item in &data.items {
            if item.name.trim().is_empty() {
                return Err(AppError::validation("Item name cannot be empty"));
            }
            if item.quantity <= 0 {
                return Err(AppError::validation("Item quantity must be positive"));
            }
            if item.price_cents < 0 {
                return Err(AppError::validation("Item price cannot be negative"));
            }
        }

        let order = self
            .orders
            .create_order(&CreateOrder {
                organization_id: ctx.organization_id(),
                customer_name: data.customer_name,
                customer_phone: data.customer_phone,
                delivery_address: data.delivery_address,
                items: data.items,
            })
            .await?;

        info!(order_id = %order.id, organization_id = %order.organization_id, "Order created");
        Ok(order)
    }

    /// Fetches one order. An order of another tenant is reported as
    /// missing, never as forbidden, so its existence is not confirmed.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Order> {
        self.orders
            .find_order(ctx.organization_id(), id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    /// Lists the organization's orders, newest first, optionally filtered
    /// by status.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        self.orders
            .list_orders(ctx.organization_id(), status, page)
            .await
    }

    /// Updates an order's delivery details. These fields are plain
    /// last-write-wins; only the status column has transition rules.
    pub async fn update_details(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UpdateOrderDetails,
    ) -> AppResult<Order> {
        if let Some(name) = &changes.customer_name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Customer name cannot be empty"));
            }
        }

        self.orders
            .update_details(ctx.organization_id(), id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    /// Moves an order to a new status:
    ///
    /// 1. Fetch the order within the caller's organization
    /// 2. Check the transition against the state machine
    /// 3. Compare-and-set on the observed status
    /// 4. On a CAS miss, re-read to tell a concurrent transition from a
    ///    deleted row
    ///
    /// Two racing transitions cannot both succeed: the storage write in
    /// step 3 applies only while the status still equals the one observed
    /// in step 1, so the loser fails with `Conflict` and the stored status
    /// is always one the state machine permitted.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        to: OrderStatus,
    ) -> AppResult<Order> {
        // Step 1: Observe the current status (404s cross-tenant access).
        let current = self.get(ctx, id).await?;

        // Step 2: State machine check.
        if !current.status.can_transition_to(to) {
            return Err(AppError::invalid_transition(format!(
                "Cannot move order from '{}' to '{}'",
                current.status, to
            )));
        }

        // Step 3: Compare-and-set.
        let updated = self
            .orders
            .transition_status(ctx.organization_id(), id, current.status, to)
            .await?;

        match updated {
            Some(order) => {
                info!(
                    order_id = %order.id,
                    from = %current.status,
                    to = %order.status,
                    "Order status changed"
                );
                Ok(order)
            }
            // Step 4: The write matched no row. Either the order vanished
            // or a concurrent transition moved the status first.
            None => match self.orders.find_order(ctx.organization_id(), id).await? {
                Some(now) => Err(AppError::conflict(format!(
                    "Order status changed concurrently (now '{}')",
                    now.status
                ))),
                None => Err(AppError::not_found("Order not found")),
            },
        }
    }
}
