//! The authorization decision engine.
//!
//! # Purpose
//! Composes the policy table and tenant scope resolver into one ordered,
//! short-circuiting decision function. Authentication and activity are
//! checked before any policy lookup, and policy before any resource I/O, so
//! a doomed request neither leaks resource existence nor costs a directory
//! round-trip.
//!
//! # Key invariants
//! - Denial is a value, not an error; the engine itself is infallible.
//! - A missing resource and a cross-tenant resource are indistinguishable in
//!   the returned decision; only the audit trail records which it was.
//! - At most one audit event is emitted per call: one for every deny and one
//!   for every cross-tenant-capable allow.
use crate::{
    Action, AuditEvent, AuditOutcome, AuditSink, Principal, PolicyTable, ResourceRef,
    TenantDecision, TenantId, TenantScopeResolver,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Closed set of denial reasons.
///
/// `ResourceNotFound` is audit-internal: the engine reports a missing
/// resource to callers as `TenantMismatch` so probing cannot reveal whether
/// a foreign resource exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    Unauthenticated,
    InactivePrincipal,
    RoleNotPermitted,
    TenantMismatch,
    ResourceNotFound,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "unauthenticated",
            DenyReason::InactivePrincipal => "inactive_principal",
            DenyReason::RoleNotPermitted => "role_not_permitted",
            DenyReason::TenantMismatch => "tenant_mismatch",
            DenyReason::ResourceNotFound => "resource_not_found",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful decision, carrying what downstream handlers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowed {
    pub principal: Principal,
    /// Tenant the resource belongs (or will belong) to; `None` only for
    /// platform-level resources.
    pub resource_tenant: Option<TenantId>,
    /// True when the allow crossed a tenant boundary (platform role only).
    pub cross_tenant: bool,
}

/// Outcome of [`Engine::authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Allowed),
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}

/// Stateless-per-request decision engine over process-wide read-only policy.
#[derive(Clone)]
pub struct Engine {
    policy: Arc<PolicyTable>,
    scope: TenantScopeResolver,
    audit: Arc<dyn AuditSink>,
}

impl Engine {
    pub fn new(
        policy: Arc<PolicyTable>,
        scope: TenantScopeResolver,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            policy,
            scope,
            audit,
        }
    }

    /// Decide whether `principal` may perform `action` on `resource`.
    ///
    /// `principal` is `None` for unauthenticated callers; the engine then
    /// denies without touching any collaborator.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: &ResourceRef,
    ) -> Decision {
        let Some(principal) = principal else {
            return self.deny(None, action, resource, DenyReason::Unauthenticated, None);
        };
        if !principal.active {
            return self.deny(
                Some(principal),
                action,
                resource,
                DenyReason::InactivePrincipal,
                None,
            );
        }

        let Some(rule) = self
            .policy
            .lookup(principal.role, resource.resource_type, action)
        else {
            return self.deny(
                Some(principal),
                action,
                resource,
                DenyReason::RoleNotPermitted,
                None,
            );
        };

        match self.scope.scope(principal, resource).await {
            TenantDecision::SameTenant => self.allow(
                principal,
                action,
                resource,
                principal.tenant_id.clone(),
                false,
            ),
            TenantDecision::CrossTenant(owner) if rule.tenant_scoped => self.deny_visible(
                Some(principal),
                action,
                resource,
                DenyReason::TenantMismatch,
                DenyReason::TenantMismatch,
                Some(owner),
            ),
            TenantDecision::CrossTenant(owner) => {
                self.allow(principal, action, resource, Some(owner), true)
            }
            TenantDecision::ResourceMissing => self.deny_visible(
                Some(principal),
                action,
                resource,
                DenyReason::TenantMismatch,
                DenyReason::ResourceNotFound,
                None,
            ),
            TenantDecision::NoTenantOwner if rule.tenant_scoped => self.deny(
                Some(principal),
                action,
                resource,
                DenyReason::RoleNotPermitted,
                None,
            ),
            TenantDecision::NoTenantOwner => self.allow(principal, action, resource, None, true),
        }
    }

    fn allow(
        &self,
        principal: &Principal,
        action: Action,
        resource: &ResourceRef,
        resource_tenant: Option<TenantId>,
        cross_tenant: bool,
    ) -> Decision {
        metrics::counter!("sprig_authz_decisions_total", "decision" => "allow").increment(1);
        if cross_tenant {
            // Platform access across (or outside) tenant boundaries is
            // always on the record.
            self.audit.record(AuditEvent {
                principal: Some(principal.id.clone()),
                role: Some(principal.role),
                action,
                resource_type: resource.resource_type,
                resource_id: resource.resource_id.clone(),
                resource_tenant: resource_tenant.clone(),
                outcome: AuditOutcome::Allowed,
                reason: None,
                cross_tenant,
                timestamp: Utc::now(),
            });
        }
        Decision::Allow(Allowed {
            principal: principal.clone(),
            resource_tenant,
            cross_tenant,
        })
    }

    fn deny(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: &ResourceRef,
        reason: DenyReason,
        resource_tenant: Option<TenantId>,
    ) -> Decision {
        self.deny_visible(principal, action, resource, reason, reason, resource_tenant)
    }

    /// Deny with a caller-visible reason that may differ from the audited one.
    fn deny_visible(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: &ResourceRef,
        visible: DenyReason,
        audited: DenyReason,
        resource_tenant: Option<TenantId>,
    ) -> Decision {
        metrics::counter!(
            "sprig_authz_decisions_total",
            "decision" => "deny",
            "reason" => audited.as_str()
        )
        .increment(1);
        let cross_tenant = resource_tenant.is_some();
        self.audit.record(AuditEvent {
            principal: principal.map(|p| p.id.clone()),
            role: principal.map(|p| p.role),
            action,
            resource_type: resource.resource_type,
            resource_id: resource.resource_id.clone(),
            resource_tenant,
            outcome: AuditOutcome::Denied,
            reason: Some(audited),
            cross_tenant,
            timestamp: Utc::now(),
        });
        Decision::Deny(visible)
    }
}
