// crates/accessctl-core/src/audit.rs
// ============================================================================
// Module: Access Control Audit Logging
// Description: Structured audit events for registration and evaluation.
// Purpose: Emit JSON-line audit records without hard logging dependencies.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for access control.
//! Deployments route events to their own logging pipeline by choosing a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::BuiltInRole;
use crate::core::OrgId;
use crate::core::UserId;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event-specific detail.
    #[serde(flatten)]
    pub detail: AuditDetail,
}

/// Event-specific audit detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditDetail {
    /// An evaluator was checked for a principal.
    Evaluation {
        /// Organization of the principal.
        org_id: OrgId,
        /// User identifier of the principal.
        user_id: UserId,
        /// Display form of the evaluator.
        evaluator: String,
        /// Decision outcome.
        allowed: bool,
    },
    /// A role body was kept because the stored version is not lower.
    RoleVersionSkipped {
        /// Role name.
        role: String,
        /// Version already stored.
        stored_version: u64,
        /// Version that was discarded.
        incoming_version: u64,
    },
    /// A grant was already present and was not re-added.
    GrantAlreadyAssigned {
        /// Role name.
        role: String,
        /// Built-in role holding the grant.
        built_in_role: BuiltInRole,
    },
    /// A declaration batch failed validation.
    DeclarationRejected {
        /// Role name of the first invalid entry.
        role: String,
        /// Validation failure.
        reason: String,
    },
    /// Resource metadata was computed.
    MetadataLookup {
        /// Organization of the principal.
        org_id: OrgId,
        /// User identifier of the principal.
        user_id: UserId,
        /// Resource type.
        resource: String,
        /// Number of resource ids requested.
        requested: usize,
        /// Number of resource ids with at least one action.
        matched: usize,
    },
}

impl AccessAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(detail: AuditDetail) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "access_audit",
            timestamp_ms,
            detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for access control events.
pub trait AccessAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &AccessAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AccessAuditSink for StderrAuditSink {
    fn record(&self, event: &AccessAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AccessAuditSink for FileAuditSink {
    fn record(&self, event: &AccessAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AccessAuditSink for NoopAuditSink {
    fn record(&self, _event: &AccessAuditEvent) {}
}
