//! Tenant scope resolution: which tenant owns the thing being touched.
//!
//! # Purpose
//! Compares the tenant a resource belongs to against the principal's own
//! tenant. Ownership of existing resources comes from the deployment's
//! resource directory; creates validate the caller-supplied target tenant
//! instead, since no resource exists yet.
//!
//! # Key invariants
//! - Read-only with respect to authorization state.
//! - A directory failure or timeout degrades to [`TenantDecision::ResourceMissing`],
//!   never to an allow.
use crate::{AuthzResult, Principal, ResourceId, ResourceRef, ResourceType, TenantId};
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of scoping a principal against a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantDecision {
    SameTenant,
    CrossTenant(TenantId),
    NoTenantOwner,
    ResourceMissing,
}

/// Per-deployment lookup of a resource's owning tenant.
///
/// `Ok(None)` means the resource does not exist. `Err` is an infrastructure
/// failure; the resolver treats it like a missing resource so an outage can
/// never widen access.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    async fn owning_tenant(
        &self,
        resource_type: ResourceType,
        resource_id: &ResourceId,
    ) -> AuthzResult<Option<TenantId>>;
}

#[derive(Clone)]
pub struct TenantScopeResolver {
    directory: Arc<dyn ResourceDirectory>,
}

impl TenantScopeResolver {
    pub fn new(directory: Arc<dyn ResourceDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve the tenant relationship between a principal and a resource.
    pub async fn scope(&self, principal: &Principal, resource: &ResourceRef) -> TenantDecision {
        if resource.resource_type.is_platform() {
            return TenantDecision::NoTenantOwner;
        }

        let Some(resource_id) = &resource.resource_id else {
            return self.scope_create(principal, resource);
        };

        let owner = match self
            .directory
            .owning_tenant(resource.resource_type, resource_id)
            .await
        {
            Ok(owner) => owner,
            Err(err) => {
                // Deny-by-default on uncertainty: an unreachable directory
                // must look like a missing resource, not an open door.
                tracing::warn!(
                    error = %err,
                    resource_type = %resource.resource_type,
                    "resource directory lookup failed"
                );
                return TenantDecision::ResourceMissing;
            }
        };
        match owner {
            None => TenantDecision::ResourceMissing,
            Some(owner) if principal.tenant_id.as_ref() == Some(&owner) => {
                TenantDecision::SameTenant
            }
            Some(owner) => TenantDecision::CrossTenant(owner),
        }
    }

    /// Creates carry the intended tenant in the reference itself.
    ///
    /// A tenant principal with no explicit target creates in its own tenant;
    /// the platform principal must name the tenant explicitly.
    fn scope_create(&self, principal: &Principal, resource: &ResourceRef) -> TenantDecision {
        let target = resource
            .target_tenant
            .clone()
            .or_else(|| principal.tenant_id.clone());
        match target {
            None => TenantDecision::ResourceMissing,
            Some(target) if principal.tenant_id.as_ref() == Some(&target) => {
                TenantDecision::SameTenant
            }
            Some(target) => TenantDecision::CrossTenant(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDirectory;
    use crate::{Role, UserId};

    fn teacher_in(tenant: &str) -> Principal {
        Principal {
            id: UserId::new("u-t"),
            role: Role::Teacher,
            tenant_id: Some(TenantId::new(tenant)),
            active: true,
        }
    }

    fn super_admin() -> Principal {
        Principal {
            id: UserId::new("u-root"),
            role: Role::SuperAdmin,
            tenant_id: None,
            active: true,
        }
    }

    fn resolver_with(entries: &[(ResourceType, &str, &str)]) -> TenantScopeResolver {
        let directory = Arc::new(MemoryDirectory::new());
        for &(rt, id, tenant) in entries {
            directory.insert(rt, ResourceId::new(id), TenantId::new(tenant));
        }
        TenantScopeResolver::new(directory)
    }

    #[tokio::test]
    async fn same_tenant_resource() {
        let resolver = resolver_with(&[(ResourceType::Child, "42", "school-a")]);
        let decision = resolver
            .scope(
                &teacher_in("school-a"),
                &ResourceRef::existing(ResourceType::Child, "42"),
            )
            .await;
        assert_eq!(decision, TenantDecision::SameTenant);
    }

    #[tokio::test]
    async fn cross_tenant_resource() {
        let resolver = resolver_with(&[(ResourceType::Child, "99", "school-b")]);
        let decision = resolver
            .scope(
                &teacher_in("school-a"),
                &ResourceRef::existing(ResourceType::Child, "99"),
            )
            .await;
        assert_eq!(decision, TenantDecision::CrossTenant(TenantId::new("school-b")));
    }

    #[tokio::test]
    async fn missing_resource() {
        let resolver = resolver_with(&[]);
        let decision = resolver
            .scope(
                &teacher_in("school-a"),
                &ResourceRef::existing(ResourceType::Child, "404"),
            )
            .await;
        assert_eq!(decision, TenantDecision::ResourceMissing);
    }

    #[tokio::test]
    async fn platform_type_has_no_owner() {
        let resolver = resolver_with(&[]);
        let decision = resolver
            .scope(
                &super_admin(),
                &ResourceRef::existing(ResourceType::School, "7"),
            )
            .await;
        assert_eq!(decision, TenantDecision::NoTenantOwner);
    }

    #[tokio::test]
    async fn create_defaults_to_own_tenant() {
        let resolver = resolver_with(&[]);
        let reference = ResourceRef {
            resource_type: ResourceType::Message,
            resource_id: None,
            target_tenant: None,
        };
        let decision = resolver.scope(&teacher_in("school-a"), &reference).await;
        assert_eq!(decision, TenantDecision::SameTenant);
    }

    #[tokio::test]
    async fn create_into_other_tenant_is_cross() {
        let resolver = resolver_with(&[]);
        let reference =
            ResourceRef::create_in(ResourceType::Message, TenantId::new("school-b"));
        let decision = resolver.scope(&teacher_in("school-a"), &reference).await;
        assert_eq!(decision, TenantDecision::CrossTenant(TenantId::new("school-b")));
    }

    #[tokio::test]
    async fn platform_create_requires_explicit_target() {
        let resolver = resolver_with(&[]);
        let reference = ResourceRef {
            resource_type: ResourceType::Child,
            resource_id: None,
            target_tenant: None,
        };
        let decision = resolver.scope(&super_admin(), &reference).await;
        assert_eq!(decision, TenantDecision::ResourceMissing);

        let explicit = ResourceRef::create_in(ResourceType::Child, TenantId::new("school-b"));
        let decision = resolver.scope(&super_admin(), &explicit).await;
        assert_eq!(decision, TenantDecision::CrossTenant(TenantId::new("school-b")));
    }

    #[tokio::test]
    async fn directory_failure_reads_as_missing() {
        struct FailingDirectory;

        #[async_trait]
        impl ResourceDirectory for FailingDirectory {
            async fn owning_tenant(
                &self,
                _resource_type: ResourceType,
                _resource_id: &ResourceId,
            ) -> AuthzResult<Option<TenantId>> {
                Err(crate::AuthzError::ResourceDirectory(anyhow::anyhow!(
                    "timed out"
                )))
            }
        }

        let resolver = TenantScopeResolver::new(Arc::new(FailingDirectory));
        let decision = resolver
            .scope(
                &teacher_in("school-a"),
                &ResourceRef::existing(ResourceType::Child, "42"),
            )
            .await;
        assert_eq!(decision, TenantDecision::ResourceMissing);
    }
}
