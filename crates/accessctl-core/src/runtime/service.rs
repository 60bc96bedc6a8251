// crates/accessctl-core/src/runtime/service.rs
// ============================================================================
// Module: Access Control Service
// Description: Aggregates fixed and stored permissions for decisions.
// Purpose: Provide the evaluation and metadata entry points.
// Dependencies: crate::{audit, core, interfaces, runtime, telemetry}, tokio
// ============================================================================

//! ## Overview
//! The service owns the registry handle and its collaborators. Evaluation uses
//! fixed permissions only; metadata listing also consults the permission store.
//!
//! ## Invariants
//! - Each call builds its own permission index; calls never share state.
//! - Store failures discard everything computed for that call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use crate::audit::AccessAuditEvent;
use crate::audit::AccessAuditSink;
use crate::audit::AuditDetail;
use crate::core::BuiltInRole;
use crate::core::Metadata;
use crate::core::Permission;
use crate::core::Principal;
use crate::core::RoleRegistration;
use crate::core::WILDCARD;
use crate::core::resource_all_id_scope;
use crate::core::resource_all_scope;
use crate::core::resource_scope;
use crate::interfaces::PermissionStore;
use crate::interfaces::StoreError;
use crate::interfaces::UsageStats;
use crate::interfaces::UserResourcePermissionsQuery;
use crate::runtime::error::AccessControlError;
use crate::runtime::hierarchy::built_in_roles;
use crate::runtime::permissions::PermissionEvaluator;
use crate::runtime::permissions::PermissionIndex;
use crate::runtime::registry::FixedRoleRegistry;
use crate::runtime::resolver::ScopeResolver;
use crate::telemetry::AccessMetrics;
use crate::telemetry::EvaluationOutcome;
use crate::telemetry::NoopMetrics;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Usage metric reporting whether access control is enabled.
pub const USAGE_METRIC_ENABLED: &str = "stats.oss.accesscontrol.enabled.count";

/// Default bound on permission store calls.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime settings for the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessControlSettings {
    /// Whether access control is enabled.
    pub enabled: bool,
    /// Bound on permission store calls; `None` waits indefinitely.
    pub store_timeout: Option<Duration>,
}

impl Default for AccessControlSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            store_timeout: Some(DEFAULT_STORE_TIMEOUT),
        }
    }
}

/// Metadata per resource identifier.
pub type ResourcesMetadata = BTreeMap<String, Metadata>;

// ============================================================================
// SECTION: Service
// ============================================================================

/// Access control entry points.
pub struct AccessControlService {
    /// Runtime settings.
    settings: AccessControlSettings,
    /// Fixed role registry.
    registry: Arc<FixedRoleRegistry>,
    /// Keyword scope resolver.
    resolver: ScopeResolver,
    /// Stored permission backend.
    store: Arc<dyn PermissionStore>,
    /// Audit sink.
    audit: Arc<dyn AccessAuditSink>,
    /// Metrics sink.
    metrics: Arc<dyn AccessMetrics>,
}

impl AccessControlService {
    /// Creates a service with a fresh registry and no-op metrics.
    #[must_use]
    pub fn new(
        settings: AccessControlSettings,
        store: Arc<dyn PermissionStore>,
        audit: Arc<dyn AccessAuditSink>,
    ) -> Self {
        let registry = Arc::new(FixedRoleRegistry::new(settings.enabled, Arc::clone(&audit)));
        Self {
            settings,
            registry,
            resolver: ScopeResolver::new(),
            store,
            audit,
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Creates a service and registers its usage metrics provider.
    #[must_use]
    pub fn provide(
        settings: AccessControlSettings,
        store: Arc<dyn PermissionStore>,
        audit: Arc<dyn AccessAuditSink>,
        usage: &dyn UsageStats,
    ) -> Self {
        let service = Self::new(settings, store, audit);
        service.register_usage_metrics(usage);
        service
    }

    /// Replaces the registry, for sharing one registry between services.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<FixedRoleRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn AccessMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns the registry handle.
    #[must_use]
    pub fn registry(&self) -> &Arc<FixedRoleRegistry> {
        &self.registry
    }

    /// Returns the permission store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn PermissionStore> {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Configuration and usage
    // ------------------------------------------------------------------------

    /// Returns true when access control is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        !self.settings.enabled
    }

    /// Returns the usage metrics of this service.
    #[must_use]
    pub fn usage_metrics(&self) -> BTreeMap<String, i64> {
        usage_report(self.settings.enabled)
    }

    /// Registers the usage metrics provider with a usage collaborator.
    pub fn register_usage_metrics(&self, usage: &dyn UsageStats) {
        let enabled = self.settings.enabled;
        usage.register_metrics_fn(Box::new(move || usage_report(enabled)));
    }

    // ------------------------------------------------------------------------
    // Fixed roles
    // ------------------------------------------------------------------------

    /// Validates and queues fixed role declarations.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Validation`] when any entry is invalid.
    pub fn declare_fixed_roles(
        &self,
        registrations: &[RoleRegistration],
    ) -> Result<(), AccessControlError> {
        if self.is_disabled() {
            return Ok(());
        }
        self.registry.declare(registrations)
    }

    /// Applies every queued declaration to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when registry state is poisoned.
    pub fn register_fixed_roles(&self) -> Result<(), AccessControlError> {
        if self.is_disabled() {
            return Ok(());
        }
        self.registry.apply()
    }

    // ------------------------------------------------------------------------
    // Decisions
    // ------------------------------------------------------------------------

    /// Returns the built-in roles of a principal.
    #[must_use]
    pub fn built_in_roles(&self, principal: &Principal) -> BTreeSet<BuiltInRole> {
        built_in_roles(principal)
    }

    /// Returns the resolved fixed permissions of a principal.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Resolution`] when a keyword scope cannot
    /// be resolved and [`AccessControlError::Registry`] on poisoned state.
    pub fn user_permissions(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Permission>, AccessControlError> {
        let started = Instant::now();
        let roles = built_in_roles(principal);
        let fixed = self.registry.fixed_permissions(&roles)?;
        let resolved = self.resolver.resolve_all(principal, &fixed)?;
        self.metrics.record_permissions_lookup(started.elapsed());
        Ok(resolved)
    }

    /// Evaluates an evaluator tree for a principal.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError`] only when permission retrieval fails; a
    /// denial is `Ok(false)`.
    pub fn evaluate(
        &self,
        principal: &Principal,
        evaluator: &PermissionEvaluator,
    ) -> Result<bool, AccessControlError> {
        let started = Instant::now();
        let permissions = match self.user_permissions(principal) {
            Ok(permissions) => permissions,
            Err(err) => {
                self.metrics.record_evaluation(EvaluationOutcome::Error, started.elapsed());
                return Err(err);
            }
        };
        let index = PermissionIndex::new(&permissions);
        let allowed = evaluator.evaluate(&index);
        let outcome = if allowed { EvaluationOutcome::Allowed } else { EvaluationOutcome::Denied };
        self.metrics.record_evaluation(outcome, started.elapsed());
        self.audit.record(&AccessAuditEvent::new(AuditDetail::Evaluation {
            org_id: principal.org_id,
            user_id: principal.user_id,
            evaluator: evaluator.to_string(),
            allowed,
        }));
        Ok(allowed)
    }

    /// Returns the actions a principal holds on each requested resource id.
    /// Resource ids without any action are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Store`] when the store fails or exceeds the
    /// configured timeout, and resolution or registry errors from fixed
    /// permission retrieval.
    pub async fn resources_metadata(
        &self,
        principal: &Principal,
        resource: &str,
        resource_ids: &[String],
    ) -> Result<ResourcesMetadata, AccessControlError> {
        let mut permissions = self.user_permissions(principal)?;
        let query = UserResourcePermissionsQuery {
            built_in_roles: built_in_roles(principal).into_iter().collect(),
            resource: resource.to_string(),
            resource_ids: resource_ids.to_vec(),
        };
        permissions.extend(self.stored_permissions(principal, &query).await?);

        let mut metadata = ResourcesMetadata::new();
        let all_scope = resource_all_scope(resource);
        let all_id_scope = resource_all_id_scope(resource);
        for resource_id in resource_ids {
            let id_scope = resource_scope(resource, resource_id);
            let candidates = [WILDCARD, all_scope.as_str(), all_id_scope.as_str(), id_scope.as_str()];
            let actions: Metadata = permissions
                .iter()
                .filter(|permission| candidates.contains(&permission.scope.as_str()))
                .map(|permission| (permission.action.clone(), true))
                .collect();
            if !actions.is_empty() {
                metadata.insert(resource_id.clone(), actions);
            }
        }

        self.audit.record(&AccessAuditEvent::new(AuditDetail::MetadataLookup {
            org_id: principal.org_id,
            user_id: principal.user_id,
            resource: resource.to_string(),
            requested: resource_ids.len(),
            matched: metadata.len(),
        }));
        Ok(metadata)
    }

    /// Queries the store, bounded by the configured timeout.
    async fn stored_permissions(
        &self,
        principal: &Principal,
        query: &UserResourcePermissionsQuery,
    ) -> Result<Vec<Permission>, StoreError> {
        let started = Instant::now();
        let lookup =
            self.store.get_user_resource_permissions(principal.org_id, principal.user_id, query);
        let result = match self.settings.store_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup).await.map_err(|_| {
                StoreError::Timeout {
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })?,
            None => lookup.await,
        };
        self.metrics.record_permissions_lookup(started.elapsed());
        result
    }
}

/// Builds the usage report for an enabled flag.
fn usage_report(enabled: bool) -> BTreeMap<String, i64> {
    BTreeMap::from([(USAGE_METRIC_ENABLED.to_string(), i64::from(enabled))])
}
