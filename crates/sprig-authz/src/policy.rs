//! Role policy table: the single allow-list every decision consults.
//!
//! # Purpose
//! Maps `(role, resource_type, action)` to an explicit grant. The table is
//! built once at process start and is read-only afterwards.
//!
//! # Key invariants
//! - Default-deny: any triple absent from the table is not permitted. New
//!   resource types must be allow-listed per role, never implicitly granted.
//! - Rules for the platform role are never tenant-scoped; rules for every
//!   other role always are. Cross-tenant capability is a property of the
//!   role, not something a row can opt into.
//!
//! # Important configuration
//! Deployments may replace [`default_policy`] with rows loaded from static
//! config via [`PolicyTable::from_rows`]; the default-deny invariant holds
//! either way because absent rows simply stay absent.
use crate::{Action, AuthzError, AuthzResult, ResourceType, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyRule {
    /// Permitted only within the principal's own tenant.
    pub tenant_scoped: bool,
}

/// Serde-able row for supplying the table as static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRow {
    pub role: Role,
    pub resource: ResourceType,
    pub actions: Vec<Action>,
}

/// Immutable allow-list over role/resource/action triples.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    rules: HashMap<(Role, ResourceType, Action), PolicyRule>,
}

impl PolicyTable {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Build a table from configuration rows.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidPolicy`] when the row set is empty or a row
    ///   grants a non-platform role rights on a platform resource type.
    pub fn from_rows(rows: &[PolicyRow]) -> AuthzResult<Self> {
        if rows.is_empty() {
            return Err(AuthzError::InvalidPolicy("policy table is empty".to_string()));
        }
        let mut builder = PolicyTable::builder();
        for row in rows {
            if row.resource == ResourceType::School && !row.role.is_platform() {
                return Err(AuthzError::InvalidPolicy(format!(
                    "role {} may not be granted platform resource {}",
                    row.role, row.resource
                )));
            }
            builder = builder.grant(row.role, row.resource, &row.actions);
        }
        Ok(builder.build())
    }

    /// Look up the rule for a triple, falling back to the action's class.
    ///
    /// An `Assign` request with no explicit `Assign` row is evaluated as
    /// `Update`; a triple with neither row is simply not permitted.
    pub fn lookup(&self, role: Role, resource: ResourceType, action: Action) -> Option<PolicyRule> {
        self.rules
            .get(&(role, resource, action))
            .or_else(|| self.rules.get(&(role, resource, action.class())))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Accumulates grants before freezing them into a [`PolicyTable`].
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    rules: HashMap<(Role, ResourceType, Action), PolicyRule>,
}

impl PolicyBuilder {
    /// Grant `role` the listed actions on `resource`.
    ///
    /// Tenant scoping is derived from the role: platform rules act across
    /// tenants, everything else is confined to the principal's own tenant.
    pub fn grant(mut self, role: Role, resource: ResourceType, actions: &[Action]) -> Self {
        let rule = PolicyRule {
            tenant_scoped: !role.is_platform(),
        };
        for action in actions {
            self.rules.insert((role, resource, *action), rule);
        }
        self
    }

    pub fn build(self) -> PolicyTable {
        PolicyTable { rules: self.rules }
    }
}

const CRUD: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];
const CRU: [Action; 3] = [Action::Read, Action::Create, Action::Update];

/// The product's shipped role matrix.
///
/// Admin runs the school day to day; the secondary principal is the deputy
/// head and gets the same surface minus deletes and minus staff/billing
/// administration. Teachers log classroom activity; parents read and
/// message. The platform role holds every pair including the school
/// registry itself.
pub fn default_policy() -> PolicyTable {
    let mut builder = PolicyTable::builder();

    for resource in ResourceType::ALL {
        builder = builder.grant(Role::SuperAdmin, resource, &Action::ALL);
    }

    for resource in [
        ResourceType::Child,
        ResourceType::Classroom,
        ResourceType::Attendance,
        ResourceType::Meal,
        ResourceType::Nap,
        ResourceType::Incident,
        ResourceType::Message,
        ResourceType::Notification,
    ] {
        builder = builder.grant(Role::Admin, resource, &CRUD);
        builder = builder.grant(Role::SecondaryPrincipal, resource, &CRU);
    }
    builder = builder
        .grant(Role::Admin, ResourceType::User, &CRUD)
        .grant(Role::Admin, ResourceType::User, &[Action::Invite])
        .grant(Role::Admin, ResourceType::Classroom, &[Action::Assign])
        .grant(Role::Admin, ResourceType::Subscription, &[Action::Read])
        .grant(
            Role::SecondaryPrincipal,
            ResourceType::Classroom,
            &[Action::Assign],
        );

    builder = builder
        .grant(Role::Teacher, ResourceType::Child, &[Action::Read])
        .grant(Role::Teacher, ResourceType::Classroom, &[Action::Read])
        .grant(Role::Teacher, ResourceType::Attendance, &CRU)
        .grant(Role::Teacher, ResourceType::Meal, &CRU)
        .grant(Role::Teacher, ResourceType::Nap, &CRU)
        .grant(Role::Teacher, ResourceType::Incident, &CRU)
        .grant(
            Role::Teacher,
            ResourceType::Message,
            &[Action::Read, Action::Create],
        );

    builder = builder
        .grant(Role::Parent, ResourceType::Child, &[Action::Read])
        .grant(
            Role::Parent,
            ResourceType::Message,
            &[Action::Read, Action::Create],
        )
        .grant(Role::Parent, ResourceType::Notification, &[Action::Read]);

    builder.build()
}
