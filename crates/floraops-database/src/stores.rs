//! Storage contracts.
//!
//! Absence is always expressed as `Ok(None)`, never as an error — callers
//! decide the failure kind (a cross-tenant miss becomes `NotFound`, a
//! missing session becomes `Unauthenticated`, and so on). Errors from
//! these traits mean the storage itself failed.

use async_trait::async_trait;
use uuid::Uuid;

use floraops_core::result::AppResult;
use floraops_core::types::pagination::{PageRequest, PageResponse};
use floraops_entity::order::{CreateOrder, Order, OrderStatus, UpdateOrderDetails};
use floraops_entity::organization::Organization;
use floraops_entity::session::{CreateSession, Session};
use floraops_entity::user::{CreateUser, User};

/// Persistence of organizations and users.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user by email, case-insensitively.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Create a new user. Fails with `DuplicateEmail` if the lowercased
    /// email is already taken.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Create a new organization.
    async fn create_organization(&self, name: &str) -> AppResult<Organization>;

    /// Find an organization by primary key.
    async fn find_organization(&self, id: Uuid) -> AppResult<Option<Organization>>;

    /// Delete an organization. Used as a compensating action when the
    /// owner insert of a fresh registration fails; returns whether a row
    /// was removed.
    async fn delete_organization(&self, id: Uuid) -> AppResult<bool>;

    /// List the users of one organization, newest first.
    async fn list_users(
        &self,
        organization_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>>;

    /// Set a user's active flag, scoped to the organization. Returns
    /// `None` when the user does not exist in that organization.
    async fn set_user_active(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        is_active: bool,
    ) -> AppResult<Option<User>>;
}

/// Persistence of login sessions. Only token digests ever reach this layer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session.
    async fn create_session(&self, data: &CreateSession) -> AppResult<Session>;

    /// Find a session by its token digest. Expired rows are still
    /// returned; expiry is the caller's check.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>>;

    /// Delete a session by its token digest. Idempotent; returns whether
    /// a row was removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool>;

    /// Delete all sessions whose expiry is in the past. Returns the
    /// number of rows removed.
    async fn purge_expired(&self) -> AppResult<u64>;
}

/// Persistence of orders. Every operation is scoped by organization id;
/// an order of another tenant is indistinguishable from a missing one.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order with status `new`.
    async fn create_order(&self, data: &CreateOrder) -> AppResult<Order>;

    /// Find an order by id within the organization.
    async fn find_order(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Order>>;

    /// List the organization's orders, newest first, optionally filtered
    /// by status.
    async fn list_orders(
        &self,
        organization_id: Uuid,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>>;

    /// Update an order's delivery details (last-write-wins fields).
    /// Returns `None` when no such order exists in the organization.
    async fn update_details(
        &self,
        organization_id: Uuid,
        id: Uuid,
        changes: &UpdateOrderDetails,
    ) -> AppResult<Option<Order>>;

    /// Compare-and-set status transition: the write applies only if the
    /// order still has status `from` at write time. Returns `None` when
    /// no row matched (order absent, other tenant, or status moved) —
    /// the caller re-reads to decide which.
    async fn transition_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>>;
}
