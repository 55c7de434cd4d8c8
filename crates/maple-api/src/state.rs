//! Shared application state.

use std::sync::Arc;

use maple_core::clock::Clock;
use maple_core::content::ContentStore;
use maple_core::identity::IdentityProvider;
use maple_core::ids::SaveIdGenerator;
use maple_core::ledger::SaveLedger;
use maple_progression::application::policy::ProgressionPolicy;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for save timestamps.
    pub clock: Arc<dyn Clock>,
    /// Source of save ids.
    pub ids: Arc<dyn SaveIdGenerator>,
    /// Scene content.
    pub content: Arc<dyn ContentStore>,
    /// Append-only save ledger.
    pub ledger: Arc<dyn SaveLedger>,
    /// Bearer-token resolution.
    pub identity: Arc<dyn IdentityProvider>,
    /// Retry and timeout bounds.
    pub policy: ProgressionPolicy,
    /// Scene new players are seeded into.
    pub start_scene_id: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn SaveIdGenerator>,
        content: Arc<dyn ContentStore>,
        ledger: Arc<dyn SaveLedger>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            clock,
            ids,
            content,
            ledger,
            identity,
            policy: ProgressionPolicy::default(),
            start_scene_id: Arc::from("intro"),
        }
    }

    /// Replaces the retry and timeout bounds.
    #[must_use]
    pub fn with_policy(mut self, policy: ProgressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the starting scene.
    #[must_use]
    pub fn with_start_scene(mut self, scene_id: &str) -> Self {
        self.start_scene_id = Arc::from(scene_id);
        self
    }
}
