use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use staffhq_auth::{Principal, TokenVerifier};
use staffhq_infra::{CompanyRepository, UserDirectory};

use crate::app::errors;
use crate::context::{PrincipalContext, TenantContext};

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub users: Arc<dyn UserDirectory>,
    pub companies: Arc<dyn CompanyRepository>,
}

/// Authenticate the request and resolve its tenant.
///
/// Order matters: token first (any verification failure is uniformly
/// "unauthenticated"), then the directory lookup (a verified token whose
/// subject no longer exists is a stale account, reported distinctly), then
/// account status. The role and tenant placed in the request contexts come
/// from the directory, not the token, so a role change takes effect without
/// waiting for the old token to expire.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers())?;

    let claims = state.verifier.verify(token, Utc::now()).map_err(|err| {
        errors::json_error(
            axum::http::StatusCode::UNAUTHORIZED,
            "unauthenticated",
            err.to_string(),
        )
    })?;

    let user = state.users.get_user(claims.sub).ok_or_else(|| {
        errors::json_error(
            axum::http::StatusCode::UNAUTHORIZED,
            "principal_not_found",
            "account no longer exists",
        )
    })?;

    if !user.is_active {
        return Err(errors::json_error(
            axum::http::StatusCode::FORBIDDEN,
            "account_suspended",
            "account is suspended",
        ));
    }

    // A user whose company record is gone has no tenant to act within; every
    // tenant-scoped operation is blocked.
    if state.companies.get(user.tenant_id).is_none() {
        return Err(errors::json_error(
            axum::http::StatusCode::FORBIDDEN,
            "no_company",
            "user is not associated with any company. Please contact an administrator",
        ));
    }

    let principal = Principal {
        user_id: user.user_id,
        role: user.role,
        tenant_id: user.tenant_id,
        is_active: user.is_active,
    };

    req.extensions_mut().insert(TenantContext::new(user.tenant_id));
    req.extensions_mut().insert(PrincipalContext::new(principal));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let unauthorized = |msg: &'static str| {
        errors::json_error(axum::http::StatusCode::UNAUTHORIZED, "unauthenticated", msg)
    };

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("missing authorization header"))?;

    let header = header
        .to_str()
        .map_err(|_| unauthorized("malformed authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("missing bearer token"))?
        .trim();

    if token.is_empty() {
        return Err(unauthorized("missing bearer token"));
    }

    Ok(token)
}
