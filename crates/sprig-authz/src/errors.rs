use thiserror::Error;

/// Infrastructure failures raised by the authorization core.
///
/// Ordinary denials are never errors; they are [`crate::Decision::Deny`]
/// values. These variants are reserved for broken collaborators and
/// malformed startup configuration, and the guard layer converts them to a
/// generic "service unavailable" response, never to an allow.
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("credential store failure: {0}")]
    CredentialStore(anyhow::Error),
    #[error("profile store failure: {0}")]
    ProfileStore(anyhow::Error),
    #[error("resource directory failure: {0}")]
    ResourceDirectory(anyhow::Error),
    #[error("invalid policy configuration: {0}")]
    InvalidPolicy(String),
}

pub type AuthzResult<T> = Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::AuthzError;

    #[test]
    fn error_display_variants() {
        let errors = vec![
            AuthzError::CredentialStore(anyhow::anyhow!("down")),
            AuthzError::ProfileStore(anyhow::anyhow!("down")),
            AuthzError::ResourceDirectory(anyhow::anyhow!("down")),
            AuthzError::InvalidPolicy("empty table".to_string()),
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
