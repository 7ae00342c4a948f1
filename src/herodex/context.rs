//! Per-session wiring.
//!
//! An [`AppContext`] is built once per application session and handed to the
//! screen controllers. It owns every piece of shared state, so two sessions (or
//! two tests) never see each other's store, busy flag or preferences.

use std::sync::Arc;

use crate::busy::BusyGate;
use crate::collab::{
    DialogHost, MemoryPreferences, Navigator, PreferenceStore, RecordingNavigator,
    ScriptedDialogs,
};
use crate::config::HerodexConfig;
use crate::store::memory::{MockHeroStore, StoreLatency};
use crate::store::HeroBackend;

pub struct AppContext<B: HeroBackend> {
    pub store: Arc<B>,
    /// The gate `store` signals through.
    pub busy: BusyGate,
    pub dialogs: Arc<dyn DialogHost>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub navigator: Arc<dyn Navigator>,
    pub config: HerodexConfig,
}

impl<B: HeroBackend> Clone for AppContext<B> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            busy: self.busy.clone(),
            dialogs: Arc::clone(&self.dialogs),
            preferences: Arc::clone(&self.preferences),
            navigator: Arc::clone(&self.navigator),
            config: self.config.clone(),
        }
    }
}

impl<B: HeroBackend> AppContext<B> {
    /// A context with inert collaborators: every dialog is cancelled,
    /// preferences live in memory and navigation is only recorded.
    pub fn new(store: Arc<B>, busy: BusyGate, config: HerodexConfig) -> Self {
        Self {
            store,
            busy,
            dialogs: Arc::new(ScriptedDialogs::new()),
            preferences: Arc::new(MemoryPreferences::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            config,
        }
    }

    pub fn with_dialogs(mut self, dialogs: Arc<dyn DialogHost>) -> Self {
        self.dialogs = dialogs;
        self
    }

    pub fn with_preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }
}

impl AppContext<MockHeroStore> {
    /// The seeded mock store, with latencies and watchdog taken from `config`.
    pub fn mock(config: HerodexConfig) -> Self {
        let busy = BusyGate::new(config.busy_watchdog());
        let store = MockHeroStore::seeded(StoreLatency::from_config(&config), busy.clone());
        Self::new(Arc::new(store), busy, config)
    }
}
