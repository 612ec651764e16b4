//! Sprig tenant-isolation and RBAC primitives shared by every API surface.
//!
//! # Purpose
//! Centralizes the authorization model of the Sprig school platform: the
//! mapping from an authenticated identity to a school tenant and a permitted
//! action set, enforced in one place instead of being re-derived by every
//! route handler.
//!
//! # How it fits
//! Route handlers and page loaders call the guard layer, which resolves a
//! [`Principal`] through the [`IdentityResolver`] and asks the [`Engine`]
//! for a [`Decision`]. Domain CRUD, persistence, and delivery of
//! notifications all live behind collaborator traits and stay outside this
//! crate.
//!
//! # Key invariants
//! - Default-deny: a `(role, resource_type, action)` triple not present in
//!   the [`PolicyTable`] is never permitted.
//! - No cross-tenant leakage: a non-platform principal can neither act on
//!   nor learn about another tenant's resources; a missing resource and a
//!   foreign resource deny identically.
//! - Every cross-tenant-capable allow and every deny is audited.
//!
//! # Examples
//! ```rust
//! use sprig_authz::{default_policy, Action, Role, ResourceType};
//!
//! let table = default_policy();
//! assert!(table.lookup(Role::Teacher, ResourceType::Child, Action::Read).is_some());
//! assert!(table.lookup(Role::Parent, ResourceType::Classroom, Action::Delete).is_none());
//! ```
//!
//! # Common pitfalls
//! - Comparing role strings at call sites instead of consulting the engine;
//!   that is exactly the drift this crate exists to remove.
//! - Returning distinct errors for "missing" and "wrong tenant" at the HTTP
//!   layer; use the guard adapter, which keeps them indistinguishable.

mod action;
mod audit;
mod engine;
mod errors;
pub mod memory;
mod policy;
mod principal;
mod resource;
mod role;
mod scope;
mod types;

pub use action::Action;
pub use audit::{AuditEvent, AuditOutcome, AuditSink, ChannelAuditSink, MemoryAuditSink};
pub use engine::{Allowed, Decision, DenyReason, Engine};
pub use errors::{AuthzError, AuthzResult};
pub use policy::{default_policy, PolicyBuilder, PolicyRow, PolicyRule, PolicyTable};
pub use principal::{CredentialValidator, IdentityResolver, Principal, Profile, ProfileStore};
pub use resource::{ResourceRef, ResourceType};
pub use role::Role;
pub use scope::{ResourceDirectory, TenantDecision, TenantScopeResolver};
pub use types::{ResourceId, TenantId, UserId};
