use staffhq_auth::Principal;
use staffhq_core::TenantId;

/// Tenant context for a request.
///
/// Resolved through the user directory (never taken from the token) and
/// immutable for the request's lifetime; every tenant-scoped route requires
/// it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Principal context for a request (authenticated identity + role + status).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> staffhq_core::UserId {
        self.principal.user_id
    }

    pub fn role(&self) -> staffhq_auth::Role {
        self.principal.role
    }
}
