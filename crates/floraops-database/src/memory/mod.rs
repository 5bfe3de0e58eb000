//! In-memory implementation of the storage contracts.
//!
//! Backs the test suite and lets the auth and order logic run without a
//! database. One mutex guards all four maps: registration compensation
//! and the order status compare-and-set need cross-map atomicity, which
//! independent per-map locks would not give.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use floraops_core::error::AppError;
use floraops_core::result::AppResult;
use floraops_core::types::pagination::{PageRequest, PageResponse};
use floraops_entity::order::{CreateOrder, Order, OrderStatus, UpdateOrderDetails};
use floraops_entity::organization::Organization;
use floraops_entity::session::{CreateSession, Session};
use floraops_entity::user::{CreateUser, User};

use crate::stores::{CredentialStore, OrderStore, SessionStore};

#[derive(Debug, Default)]
struct MemoryInner {
    organizations: HashMap<Uuid, Organization>,
    users: HashMap<Uuid, User>,
    sessions: HashMap<Uuid, Session>,
    orders: HashMap<Uuid, Order>,
}

/// All four stores over in-process maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("Memory store lock poisoned"))
    }

    /// Number of session rows currently held, including expired ones.
    /// Deactivation must invalidate sessions without deleting them, and
    /// tests assert that through this.
    pub fn session_count(&self) -> usize {
        self.inner.lock().map(|i| i.sessions.len()).unwrap_or(0)
    }

    /// Number of organization rows currently held. Lets tests assert that
    /// a failed registration leaves no orphaned organization behind.
    pub fn organization_count(&self) -> usize {
        self.inner.lock().map(|i| i.organizations.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let inner = self.lock()?;
        let email = email.to_lowercase();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut inner = self.lock()?;
        let email = data.email.to_lowercase();

        if inner.users.values().any(|u| u.email == email) {
            return Err(AppError::duplicate_email(format!(
                "Email '{email}' is already registered"
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            organization_id: data.organization_id,
            email,
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            role: data.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn create_organization(&self, name: &str) -> AppResult<Organization> {
        let mut inner = self.lock()?;
        let organization = Organization {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        inner
            .organizations
            .insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn find_organization(&self, id: Uuid) -> AppResult<Option<Organization>> {
        Ok(self.lock()?.organizations.get(&id).cloned())
    }

    async fn delete_organization(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.lock()?.organizations.remove(&id).is_some())
    }

    async fn list_users(
        &self,
        organization_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let inner = self.lock()?;
        let mut users: Vec<User> = inner
            .users
            .values()
            .filter(|u| u.organization_id == organization_id)
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = users.len() as u64;
        let users = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(users, page.page, page.page_size, total))
    }

    async fn set_user_active(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        is_active: bool,
    ) -> AppResult<Option<User>> {
        let mut inner = self.lock()?;
        match inner.users.get_mut(&user_id) {
            Some(user) if user.organization_id == organization_id => {
                user.is_active = is_active;
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, data: &CreateSession) -> AppResult<Session> {
        let mut inner = self.lock()?;
        let session = Session {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            token_hash: data.token_hash.clone(),
            created_at: Utc::now(),
            expires_at: data.expires_at,
        };
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        let inner = self.lock()?;
        // Constant-time digest comparison, so lookup timing reveals
        // nothing about stored hashes.
        Ok(inner
            .sessions
            .values()
            .find(|s| {
                s.token_hash
                    .as_bytes()
                    .ct_eq(token_hash.as_bytes())
                    .into()
            })
            .cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        let mut inner = self.lock()?;
        let id = inner
            .sessions
            .values()
            .find(|s| s.token_hash.as_bytes().ct_eq(token_hash.as_bytes()).into())
            .map(|s| s.id);
        match id {
            Some(id) => Ok(inner.sessions.remove(&id).is_some()),
            None => Ok(false),
        }
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - inner.sessions.len()) as u64)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, data: &CreateOrder) -> AppResult<Order> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            organization_id: data.organization_id,
            customer_name: data.customer_name.clone(),
            customer_phone: data.customer_phone.clone(),
            delivery_address: data.delivery_address.clone(),
            items: Json(data.items.clone()),
            status: OrderStatus::New,
            created_at: now,
            updated_at: now,
        };
        inner.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_order(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Order>> {
        let inner = self.lock()?;
        Ok(inner
            .orders
            .get(&id)
            .filter(|o| o.organization_id == organization_id)
            .cloned())
    }

    async fn list_orders(
        &self,
        organization_id: Uuid,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        let inner = self.lock()?;
        let mut orders: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| o.organization_id == organization_id)
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        // Order ids are UUIDv7, so the id tiebreak still follows creation.
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = orders.len() as u64;
        let orders = orders
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(orders, page.page, page.page_size, total))
    }

    async fn update_details(
        &self,
        organization_id: Uuid,
        id: Uuid,
        changes: &UpdateOrderDetails,
    ) -> AppResult<Option<Order>> {
        let mut inner = self.lock()?;
        match inner.orders.get_mut(&id) {
            Some(order) if order.organization_id == organization_id => {
                if let Some(name) = &changes.customer_name {
                    order.customer_name = name.clone();
                }
                if let Some(phone) = &changes.customer_phone {
                    order.customer_phone = Some(phone.clone());
                }
                if let Some(address) = &changes.delivery_address {
                    order.delivery_address = Some(address.clone());
                }
                order.updated_at = Utc::now();
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn transition_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        // The check and the write happen under one lock acquisition, so
        // racing transitions see each other's effects.
        let mut inner = self.lock()?;
        match inner.orders.get_mut(&id) {
            Some(order) if order.organization_id == organization_id && order.status == from => {
                order.status = to;
                order.updated_at = Utc::now();
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }
}
