//! Strongly typed identifiers used across the authorization core.
//!
//! # Purpose
//! Wraps string identifiers to reduce accidental mix-ups between tenant,
//! user, and resource identifiers.
//!
//! # How it fits
//! These types flow through identity resolution, tenant scoping, and audit
//! records; collaborator implementations key their lookups on them.
//!
//! # Key invariants
//! - Each wrapper contains a non-empty string (not validated here).
//! - `Display` and `as_str` must return the original value.
//!
//! # Common pitfalls
//! - Constructing these types with empty strings; validate at the API boundary.
//! - Treating `Display` as sanitized output; it is a raw passthrough.
use serde::{Deserialize, Serialize};

/// Tenant (school/organization) identifier wrapper.
///
/// # Summary
/// Newtype around a tenant string ID; the unit of data isolation.
///
/// # Invariants
/// - The inner string is preserved exactly.
///
/// # Example
/// ```rust
/// use sprig_authz::TenantId;
///
/// let tenant = TenantId::new("school-a");
/// assert_eq!(tenant.as_str(), "school-a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// Construct a new tenant ID wrapper.
    ///
    /// # Parameters
    /// - `value`: raw tenant identifier string.
    ///
    /// # Returns
    /// - A new [`TenantId`].
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the inner tenant string.
    ///
    /// # Returns
    /// - The raw tenant identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User identifier wrapper.
///
/// # Summary
/// Newtype around the identity-provider's stable user ID.
///
/// # Example
/// ```rust
/// use sprig_authz::UserId;
///
/// let user = UserId::new("u-1042");
/// assert_eq!(user.to_string(), "u-1042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Construct a new user ID wrapper.
    ///
    /// # Parameters
    /// - `value`: raw user identifier string.
    ///
    /// # Returns
    /// - A new [`UserId`].
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the inner user string.
    ///
    /// # Returns
    /// - The raw user identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resource identifier wrapper.
///
/// # Summary
/// Newtype around a resource's identifier within its resource type.
///
/// # Example
/// ```rust
/// use sprig_authz::ResourceId;
///
/// let child = ResourceId::new("42");
/// assert_eq!(child.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Construct a new resource ID wrapper.
    ///
    /// # Parameters
    /// - `value`: raw resource identifier string.
    ///
    /// # Returns
    /// - A new [`ResourceId`].
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the inner resource string.
    ///
    /// # Returns
    /// - The raw resource identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
