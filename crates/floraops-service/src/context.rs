//! Request context carrying the authenticated user, session, and organization.

use uuid::Uuid;

use floraops_auth::session::AuthSession;
use floraops_entity::organization::Organization;
use floraops_entity::session::Session;
use floraops_entity::user::User;

/// Context for the current authenticated request.
///
/// Extracted by the API layer's auth extractor and passed into service
/// methods so that every operation knows *who* is acting and within
/// *which* organization. The organization here is resolved from the
/// session's user, never from client input.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user.
    pub user: User,
    /// The user's organization.
    pub organization: Organization,
    /// The session the request presented.
    pub session: Session,
}

impl RequestContext {
    /// The tenant boundary every data access must be filtered by.
    pub fn organization_id(&self) -> Uuid {
        self.organization.id
    }

    /// Whether the acting user may invite, activate, or deactivate staff.
    pub fn can_manage_staff(&self) -> bool {
        self.user.role.can_manage_staff()
    }
}

impl From<AuthSession> for RequestContext {
    fn from(auth: AuthSession) -> Self {
        Self {
            user: auth.user,
            organization: auth.organization,
            session: auth.session,
        }
    }
}
