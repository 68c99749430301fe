//! Distributor key → adapter lookup, composed once at start-up.

use std::collections::HashMap;
use std::sync::Arc;

use tastebuddy_core::AppConfig;

use crate::adapter::DistributorAdapter;
use crate::edeka::EdekaAdapter;
use crate::error::DistributorError;
use crate::fetch::Fetcher;
use crate::sink::LogSink;

/// Plain mapping from distributor key to adapter instance.
///
/// Adding a distributor means one new adapter and one line in
/// [`Registry::with_default_adapters`].
#[derive(Default, Clone)]
pub struct Registry {
    adapters: HashMap<&'static str, Arc<dyn DistributorAdapter>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every distributor this build knows about, wired to
    /// the given fetcher and sink.
    #[must_use]
    pub fn with_default_adapters(
        config: &AppConfig,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(EdekaAdapter::with_base_url(
            fetcher,
            sink,
            &config.edeka_base_url,
        )));
        registry
    }

    /// Adds `adapter` under its own key, replacing any adapter already
    /// registered for that key.
    pub fn register(&mut self, adapter: Arc<dyn DistributorAdapter>) {
        let key = adapter.key();
        if self.adapters.insert(key, adapter).is_some() {
            tracing::debug!(key, "replaced previously registered distributor adapter");
        }
    }

    /// Resolves the adapter registered for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::UnknownDistributor`] for an unregistered key.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn DistributorAdapter>, DistributorError> {
        self.adapters
            .get(key)
            .cloned()
            .ok_or_else(|| DistributorError::UnknownDistributor {
                key: key.to_owned(),
            })
    }

    /// A registry holding only the adapter for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::UnknownDistributor`] for an unregistered key.
    pub fn restricted_to(&self, key: &str) -> Result<Self, DistributorError> {
        let adapter = self.resolve(key)?;
        let mut only = Self::new();
        only.register(adapter);
        Ok(only)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.adapters.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Registered adapters, sorted by key.
    #[must_use]
    pub fn adapters(&self) -> Vec<Arc<dyn DistributorAdapter>> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.adapters.get(key).cloned())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.keys())
            .finish()
    }
}
