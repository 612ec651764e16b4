use crate::{ResourceId, TenantId};
use serde::{Deserialize, Serialize};

/// Closed set of resource classes subject to access control.
///
/// `School` is the platform registry entry itself and has no owning tenant;
/// every other type belongs to exactly one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    School,
    Child,
    Classroom,
    Attendance,
    Meal,
    Nap,
    Incident,
    Message,
    User,
    Subscription,
    Notification,
}

impl ResourceType {
    pub const ALL: [ResourceType; 11] = [
        ResourceType::School,
        ResourceType::Child,
        ResourceType::Classroom,
        ResourceType::Attendance,
        ResourceType::Meal,
        ResourceType::Nap,
        ResourceType::Incident,
        ResourceType::Message,
        ResourceType::User,
        ResourceType::Subscription,
        ResourceType::Notification,
    ];

    /// Platform-level resource classes have no owning tenant and are only
    /// reachable by the platform role.
    pub fn is_platform(self) -> bool {
        matches!(self, ResourceType::School)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::School => "school",
            ResourceType::Child => "child",
            ResourceType::Classroom => "classroom",
            ResourceType::Attendance => "attendance",
            ResourceType::Meal => "meal",
            ResourceType::Nap => "nap",
            ResourceType::Incident => "incident",
            ResourceType::Message => "message",
            ResourceType::User => "user",
            ResourceType::Subscription => "subscription",
            ResourceType::Notification => "notification",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == value)
            .ok_or(())
    }
}

/// Opaque descriptor of the object an action targets.
///
/// For create-type actions no resource exists yet, so `resource_id` is
/// absent and `target_tenant` carries the tenant the caller wants the new
/// resource created under. For existing resources the owning tenant is
/// resolved through the deployment's resource directory, never trusted
/// from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub resource_type: ResourceType,
    pub resource_id: Option<ResourceId>,
    pub target_tenant: Option<TenantId>,
}

impl ResourceRef {
    /// Reference an existing resource by id.
    pub fn existing(resource_type: ResourceType, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource_id: Some(ResourceId::new(resource_id)),
            target_tenant: None,
        }
    }

    /// Reference a resource about to be created under `tenant`.
    pub fn create_in(resource_type: ResourceType, tenant: TenantId) -> Self {
        Self {
            resource_type,
            resource_id: None,
            target_tenant: Some(tenant),
        }
    }
}
