//! Append-only audit trail for security-relevant decisions.
//!
//! # Purpose
//! Records denials and every cross-tenant-capable allow. The sink is
//! fire-and-forget: a broken audit path degrades observability, never
//! authorization correctness or availability.
//!
//! # Key invariants
//! - `record` must not block and must not fail the caller.
//! - An event that cannot be queued is written to the local log instead of
//!   being silently dropped.
use crate::{Action, DenyReason, ResourceId, ResourceType, Role, TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Allowed,
    Denied,
}

/// One authorization-relevant event.
///
/// `reason` carries the true internal deny reason; in particular it may be
/// [`DenyReason::ResourceNotFound`] even though the caller-visible decision
/// was a tenant mismatch. That distinction exists for boundary-probing
/// monitoring and stays inside the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub principal: Option<UserId>,
    pub role: Option<Role>,
    pub action: Action,
    pub resource_type: ResourceType,
    pub resource_id: Option<ResourceId>,
    pub resource_tenant: Option<TenantId>,
    pub outcome: AuditOutcome,
    pub reason: Option<DenyReason>,
    pub cross_tenant: bool,
    pub timestamp: DateTime<Utc>,
}

/// Consumer of audit events; implementations must be non-blocking.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Sink backed by a bounded queue drained by an external reporter.
///
/// `try_send` keeps the authorization path allocation-bounded and makes
/// overload observable; a full or closed queue falls back to a structured
/// log line so no event disappears without trace.
pub struct ChannelAuditSink {
    tx: mpsc::Sender<AuditEvent>,
}

impl ChannelAuditSink {
    pub fn new(depth: usize) -> (Self, mpsc::Receiver<AuditEvent>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { tx }, rx)
    }
}

impl AuditSink for ChannelAuditSink {
    fn record(&self, event: AuditEvent) {
        if let Err(err) = self.tx.try_send(event) {
            let event = match &err {
                mpsc::error::TrySendError::Full(event) => event,
                mpsc::error::TrySendError::Closed(event) => event,
            };
            metrics::counter!("sprig_audit_fallback_total").increment(1);
            tracing::warn!(
                principal = ?event.principal,
                action = %event.action,
                resource_type = %event.resource_type,
                outcome = ?event.outcome,
                reason = ?event.reason,
                "audit queue unavailable, event logged locally"
            );
        }
    }
}

/// In-memory sink for tests and local development.
#[derive(Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit events lock").clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("audit events lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events.lock().expect("audit events lock").push(event);
    }
}
