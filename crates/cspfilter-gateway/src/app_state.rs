//! Shared application state.
//!
//! The current [`PolicyConfig`] is an `Arc` snapshot behind a `RwLock` that
//! is only held to clone or swap the pointer, so evaluations never read a
//! half-updated config and never block each other.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use cspfilter_core::error::Result;
use cspfilter_core::{NonceGenerator, PolicyConfig, PolicyEngine};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    engine: PolicyEngine,
    policy: RwLock<Arc<PolicyConfig>>,
    config_path: Option<PathBuf>,
}

impl AppState {
    /// Build application state. Fails when the nonce source is unusable;
    /// the gateway must not start without it.
    pub fn new(policy: PolicyConfig, config_path: Option<PathBuf>) -> Result<Self> {
        let engine = PolicyEngine::new(NonceGenerator::new()?);
        Ok(Self {
            inner: Arc::new(AppStateInner {
                engine,
                policy: RwLock::new(Arc::new(policy)),
                config_path,
            }),
        })
    }

    pub fn engine(&self) -> &PolicyEngine {
        &self.inner.engine
    }

    /// Current snapshot.
    pub fn policy(&self) -> Arc<PolicyConfig> {
        // A poisoned lock still holds a complete snapshot.
        match self.inner.policy.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a new snapshot. Readers holding the old one keep it.
    pub fn replace_policy(&self, next: PolicyConfig) {
        let next = Arc::new(next);
        match self.inner.policy.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.inner.config_path.as_deref()
    }
}
