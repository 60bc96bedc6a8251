// crates/accessctl-core/src/telemetry.rs
// ============================================================================
// Module: Access Control Telemetry
// Description: Observability hooks for evaluation and permission retrieval.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A thin metrics interface for evaluation counters and latency histograms.
//! Downstream deployments plug in Prometheus or OpenTelemetry by implementing
//! [`AccessMetrics`].

use std::time::Duration;

use serde::Serialize;

/// Default latency buckets in milliseconds for access control histograms.
pub const ACCESS_LATENCY_BUCKETS_MS: &[u64] = &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000];

/// Evaluation outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvaluationOutcome {
    /// Evaluator satisfied.
    Allowed,
    /// Evaluator not satisfied.
    Denied,
    /// Permission retrieval failed before evaluation.
    Error,
}

impl EvaluationOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::Error => "error",
        }
    }
}

/// Metrics sink for access control.
pub trait AccessMetrics: Send + Sync {
    /// Records one evaluation and its latency.
    fn record_evaluation(&self, outcome: EvaluationOutcome, latency: Duration);
    /// Records the latency of a permission retrieval.
    fn record_permissions_lookup(&self, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl AccessMetrics for NoopMetrics {
    fn record_evaluation(&self, _outcome: EvaluationOutcome, _latency: Duration) {}

    fn record_permissions_lookup(&self, _latency: Duration) {}
}
