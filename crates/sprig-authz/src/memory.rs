//! In-memory collaborator implementations.
//!
//! # Purpose
//! Implements the credential, profile, and resource-directory collaborators
//! over `RwLock`-guarded maps. These back local development and the test
//! suites; production deployments supply their own implementations against
//! the real session store and database.
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: write locks for mutations, read locks
//!   for lookups.
use crate::{
    AuthzResult, CredentialValidator, Profile, ProfileStore, ResourceDirectory, ResourceId,
    ResourceType, TenantId, UserId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Credential validator over a static token → user map.
#[derive(Default)]
pub struct MemoryCredentialValidator {
    tokens: RwLock<HashMap<String, UserId>>,
}

impl MemoryCredentialValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, credential: impl Into<String>, user_id: UserId) {
        self.tokens
            .write()
            .expect("token map lock")
            .insert(credential.into(), user_id);
    }

    /// Drop a credential, as logout or revocation would.
    pub fn revoke(&self, credential: &str) {
        self.tokens.write().expect("token map lock").remove(credential);
    }
}

#[async_trait]
impl CredentialValidator for MemoryCredentialValidator {
    async fn validate(&self, credential: &str) -> AuthzResult<Option<UserId>> {
        Ok(self.tokens.read().expect("token map lock").get(credential).cloned())
    }
}

/// Profile store over a user → profile map.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: UserId, profile: Profile) {
        self.profiles
            .write()
            .expect("profile map lock")
            .insert(user_id, profile);
    }

    /// Flip the active flag, as an administrative deactivation would.
    pub fn set_active(&self, user_id: &UserId, active: bool) {
        if let Some(profile) = self
            .profiles
            .write()
            .expect("profile map lock")
            .get_mut(user_id)
        {
            profile.active = active;
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> AuthzResult<Option<Profile>> {
        Ok(self
            .profiles
            .read()
            .expect("profile map lock")
            .get(user_id)
            .cloned())
    }
}

/// Resource directory over a (type, id) → owning-tenant map.
#[derive(Default)]
pub struct MemoryDirectory {
    owners: RwLock<HashMap<(ResourceType, ResourceId), TenantId>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resource_type: ResourceType, resource_id: ResourceId, owner: TenantId) {
        self.owners
            .write()
            .expect("owner map lock")
            .insert((resource_type, resource_id), owner);
    }
}

#[async_trait]
impl ResourceDirectory for MemoryDirectory {
    async fn owning_tenant(
        &self,
        resource_type: ResourceType,
        resource_id: &ResourceId,
    ) -> AuthzResult<Option<TenantId>> {
        Ok(self
            .owners
            .read()
            .expect("owner map lock")
            .get(&(resource_type, resource_id.clone()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[tokio::test]
    async fn validator_roundtrip_and_revoke() {
        let validator = MemoryCredentialValidator::new();
        validator.insert("tok", UserId::new("u-1"));
        assert_eq!(
            validator.validate("tok").await.unwrap(),
            Some(UserId::new("u-1"))
        );
        validator.revoke("tok");
        assert_eq!(validator.validate("tok").await.unwrap(), None);
    }

    #[tokio::test]
    async fn profile_store_set_active() {
        let store = MemoryProfileStore::new();
        let user = UserId::new("u-1");
        store.insert(
            user.clone(),
            Profile {
                role: Role::Admin,
                tenant_id: Some(TenantId::new("school-a")),
                active: true,
            },
        );
        store.set_active(&user, false);
        let profile = store.get_profile(&user).await.unwrap().unwrap();
        assert!(!profile.active);
    }

    #[tokio::test]
    async fn directory_lookup() {
        let directory = MemoryDirectory::new();
        directory.insert(
            ResourceType::Child,
            ResourceId::new("42"),
            TenantId::new("school-a"),
        );
        let owner = directory
            .owning_tenant(ResourceType::Child, &ResourceId::new("42"))
            .await
            .unwrap();
        assert_eq!(owner, Some(TenantId::new("school-a")));
        let missing = directory
            .owning_tenant(ResourceType::Child, &ResourceId::new("404"))
            .await
            .unwrap();
        assert_eq!(missing, None);
    }
}
