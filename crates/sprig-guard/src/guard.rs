//! The guard every route handler calls before touching domain data.
//!
//! # Purpose
//! Resolves the request's principal, asks the decision engine, and converts
//! the outcome: an allow continues into the handler with the resolved
//! principal attached, a deny becomes a standardized failure response.
use crate::error::{api_forbidden, api_unauthorized, api_unavailable, ApiError};
use axum::http::HeaderMap;
use sprig_authz::{Action, Allowed, Decision, DenyReason, Engine, IdentityResolver, ResourceRef};
use std::future::Future;

/// Pull the opaque session credential off the request.
///
/// The guard does not interpret the token; it is handed to the identity
/// provider collaborator as-is.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?;
    let value = value.to_str().ok()?;
    value.strip_prefix("Bearer ")
}

/// Request-facing entry point into the authorization core.
#[derive(Clone)]
pub struct Guard {
    resolver: IdentityResolver,
    engine: Engine,
}

impl Guard {
    pub fn new(resolver: IdentityResolver, engine: Engine) -> Self {
        Self { resolver, engine }
    }

    /// Authorize or fail with the standardized outward response.
    ///
    /// Missing authentication maps to 401; every other deny maps to 403
    /// with an identical body, so a caller cannot tell wrong-role from
    /// wrong-tenant from not-found. Infrastructure failures map to 503 and
    /// never to an allow.
    pub async fn check(
        &self,
        headers: &HeaderMap,
        action: Action,
        resource: &ResourceRef,
    ) -> Result<Allowed, ApiError> {
        let credential = extract_bearer(headers);
        let principal = self
            .resolver
            .resolve(credential)
            .await
            .map_err(|err| api_unavailable(&err))?;
        match self
            .engine
            .authorize(principal.as_ref(), action, resource)
            .await
        {
            Decision::Allow(allowed) => Ok(allowed),
            Decision::Deny(DenyReason::Unauthenticated) => Err(api_unauthorized()),
            Decision::Deny(_) => Err(api_forbidden()),
        }
    }

    /// [`check`](Guard::check), then run the domain operation on allow.
    pub async fn run<F, Fut, T>(
        &self,
        headers: &HeaderMap,
        action: Action,
        resource: &ResourceRef,
        next: F,
    ) -> Result<T, ApiError>
    where
        F: FnOnce(Allowed) -> Fut,
        Fut: Future<Output = T>,
    {
        let allowed = self.check(headers, action, resource).await?;
        Ok(next(allowed).await)
    }
}
