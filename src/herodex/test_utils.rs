use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::busy::BusyGate;
use crate::collab::{MemoryPreferences, RecordingNavigator, ScriptedDialogs};
use crate::config::HerodexConfig;
use crate::context::AppContext;
use crate::store::memory::fixtures::StoreFixture;
use crate::store::memory::{MockHeroStore, StoreLatency};
use crate::view::ViewOrchestrator;

/// Routes `tracing` output to the test harness. Filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session over a mock store whose collaborators stay inspectable.
pub struct TestApp {
    pub context: AppContext<MockHeroStore>,
    pub store: Arc<MockHeroStore>,
    pub dialogs: Arc<ScriptedDialogs>,
    pub preferences: Arc<MemoryPreferences>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestApp {
    pub fn new(fixture: StoreFixture) -> Self {
        let store = Arc::new(fixture.store);
        let dialogs = Arc::new(ScriptedDialogs::new());
        let preferences = Arc::new(MemoryPreferences::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let context = AppContext::new(
            Arc::clone(&store),
            store.busy().clone(),
            HerodexConfig::default(),
        )
        .with_dialogs(dialogs.clone())
        .with_preferences(preferences.clone())
        .with_navigator(navigator.clone());
        Self {
            context,
            store,
            dialogs,
            preferences,
            navigator,
        }
    }

    /// The seed catalogue, with no store latency.
    pub fn seeded() -> Self {
        Self::new(StoreFixture {
            store: MockHeroStore::seeded(StoreLatency::zero(), BusyGate::default()),
        })
    }

    pub fn orchestrator(&self) -> ViewOrchestrator<MockHeroStore> {
        ViewOrchestrator::new(&self.context)
    }
}
