//! Principal model and request-scoped identity resolution.
//!
//! # Purpose
//! Turns an opaque inbound credential into a [`Principal`] by composing the
//! deployment's credential validator and profile store.
//!
//! # Key invariants
//! - A missing, invalid, or expired credential is unauthenticated.
//! - A valid credential with no profile record is unauthenticated too
//!   (provisioning race), never a default role.
//! - Resolution reads only; it never mutates authorization state.
use crate::{AuthzError, AuthzResult, Role, TenantId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The authenticated actor for the duration of one request.
///
/// `tenant_id` is `None` only for the platform role. The principal is a
/// request-scoped value; the underlying account lives in the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub tenant_id: Option<TenantId>,
    pub active: bool,
}

/// Profile record the store keeps per user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: Role,
    pub tenant_id: Option<TenantId>,
    pub active: bool,
}

/// Validates an opaque session credential against the identity provider.
///
/// `Ok(None)` means the credential is invalid or expired; `Err` is an
/// infrastructure failure (provider unreachable) and must never be read as
/// "valid".
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    async fn validate(&self, credential: &str) -> AuthzResult<Option<UserId>>;
}

/// Looks up the authorization profile for a validated user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &UserId) -> AuthzResult<Option<Profile>>;
}

/// Composes credential validation and profile lookup into one resolver.
#[derive(Clone)]
pub struct IdentityResolver {
    validator: Arc<dyn CredentialValidator>,
    profiles: Arc<dyn ProfileStore>,
}

impl IdentityResolver {
    pub fn new(validator: Arc<dyn CredentialValidator>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { validator, profiles }
    }

    /// Resolve a credential to a principal, or `None` when unauthenticated.
    ///
    /// # Errors
    /// - [`AuthzError::CredentialStore`] / [`AuthzError::ProfileStore`] when
    ///   a collaborator fails; callers must treat that as a denial, never an
    ///   allow.
    pub async fn resolve(&self, credential: Option<&str>) -> AuthzResult<Option<Principal>> {
        let Some(credential) = credential else {
            return Ok(None);
        };
        let Some(user_id) = self.validator.validate(credential).await? else {
            return Ok(None);
        };
        let Some(profile) = self.profiles.get_profile(&user_id).await? else {
            // Account exists at the IdP but has no profile yet. Treat as
            // unauthenticated rather than inventing a role.
            tracing::debug!(user = %user_id, "credential valid but profile missing");
            return Ok(None);
        };
        if profile.role.is_platform() && profile.tenant_id.is_some() {
            return Err(AuthzError::ProfileStore(anyhow::anyhow!(
                "platform profile {user_id} must not carry a tenant"
            )));
        }
        if !profile.role.is_platform() && profile.tenant_id.is_none() {
            return Err(AuthzError::ProfileStore(anyhow::anyhow!(
                "tenant profile {user_id} is missing its tenant"
            )));
        }
        Ok(Some(Principal {
            id: user_id,
            role: profile.role,
            tenant_id: profile.tenant_id,
            active: profile.active,
        }))
    }
}
