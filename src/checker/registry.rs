//! Check registry
//!
//! Maps a check's declared name to a factory function. The registry is built
//! at startup; adding a check means registering one factory, the dispatcher
//! itself never changes. Unknown names fail loudly — the caller must not
//! proceed without an instance.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::checker::{Checker, CheckerError};
use crate::config::Settings;
use crate::notify::NotificationChannel;
use crate::storage::MetadataStore;

/// Collaborators injected into check constructors.
///
/// Construction owns no global state: the store handle, the notification
/// channel, and settings are scoped to one invocation.
#[derive(Clone)]
pub struct CheckerContext {
    pub store: Arc<dyn MetadataStore>,
    pub notifier: Arc<dyn NotificationChannel>,
    pub settings: Settings,
}

/// Constructs a fresh check instance from the invocation context
pub type CheckerFactory = fn(&CheckerContext) -> Box<dyn Checker>;

/// Name-to-factory map for all known checks
#[derive(Default)]
pub struct CheckerRegistry {
    factories: BTreeMap<&'static str, CheckerFactory>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under the check's declared name
    pub fn register(&mut self, name: &'static str, factory: CheckerFactory) {
        self.factories.insert(name, factory);
    }

    /// Construct the check registered under `name`.
    ///
    /// Returns `CheckerError::Resolution` for unknown names.
    pub fn resolve(
        &self,
        name: &str,
        ctx: &CheckerContext,
    ) -> Result<Box<dyn Checker>, CheckerError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CheckerError::Resolution(name.to_string()))?;

        Ok(factory(ctx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
