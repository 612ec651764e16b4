use anyhow::{Context, Result};
use serde::Deserialize;
use sprig_authz::{default_policy, PolicyRow, PolicyTable};
use std::fs;

// Guard configuration sourced from environment variables, with an optional
// YAML override file (SPRIG_GUARD_CONFIG).
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Path to a YAML policy-row file; `None` uses the shipped role matrix.
    pub policy_path: Option<String>,
    /// Depth of the bounded audit queue.
    pub audit_queue_depth: usize,
}

#[derive(Debug, Deserialize)]
struct GuardConfigOverride {
    policy_path: Option<String>,
    audit_queue_depth: Option<usize>,
}

const DEFAULT_AUDIT_QUEUE_DEPTH: usize = 1024;

impl GuardConfig {
    pub fn from_env() -> Result<Self> {
        let policy_path = std::env::var("SPRIG_POLICY_FILE").ok();
        let audit_queue_depth = match std::env::var("SPRIG_AUDIT_QUEUE_DEPTH") {
            Ok(value) => value
                .parse()
                .with_context(|| "parse SPRIG_AUDIT_QUEUE_DEPTH")?,
            Err(_) => DEFAULT_AUDIT_QUEUE_DEPTH,
        };
        Ok(Self {
            policy_path,
            audit_queue_depth,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("SPRIG_GUARD_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read SPRIG_GUARD_CONFIG: {path}"))?;
            let override_cfg: GuardConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse guard config yaml")?;
            if let Some(value) = override_cfg.policy_path {
                config.policy_path = Some(value);
            }
            if let Some(value) = override_cfg.audit_queue_depth {
                config.audit_queue_depth = value;
            }
        }
        Ok(config)
    }

    /// Build the policy table this deployment runs with.
    ///
    /// Malformed policy files fail startup; a half-loaded table must never
    /// serve traffic.
    pub fn load_policy(&self) -> Result<PolicyTable> {
        let Some(path) = &self.policy_path else {
            return Ok(default_policy());
        };
        let contents =
            fs::read_to_string(path).with_context(|| format!("read policy file: {path}"))?;
        let rows: Vec<PolicyRow> =
            serde_yaml::from_str(&contents).with_context(|| "parse policy rows yaml")?;
        let table = PolicyTable::from_rows(&rows).with_context(|| "validate policy rows")?;
        Ok(table)
    }
}
