// crates/accessctl-core/src/runtime/usage.rs
// ============================================================================
// Module: In-Memory Usage Stats
// Description: Usage stats collaborator that evaluates providers on demand.
// Purpose: Collect usage metrics from registered providers for reporting.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! Providers are evaluated only when a report is requested; later providers
//! overwrite earlier values for the same metric name.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::interfaces::UsageMetricsFn;
use crate::interfaces::UsageStats;

/// Usage stats collaborator backed by a provider list.
#[derive(Default)]
pub struct InMemoryUsageStats {
    /// Registered providers.
    providers: Mutex<Vec<UsageMetricsFn>>,
}

impl InMemoryUsageStats {
    /// Creates a collaborator with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates every provider and merges the results.
    #[must_use]
    pub fn usage_report(&self) -> BTreeMap<String, i64> {
        let providers = self.providers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut report = BTreeMap::new();
        for provider in providers.iter() {
            report.extend(provider());
        }
        report
    }
}

impl UsageStats for InMemoryUsageStats {
    fn register_metrics_fn(&self, provider: UsageMetricsFn) {
        self.providers.lock().unwrap_or_else(PoisonError::into_inner).push(provider);
    }
}
