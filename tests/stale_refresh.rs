use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use herodex::collab::{DialogResult, ScriptedDialogs};
use herodex::config::HerodexConfig;
use herodex::context::AppContext;
use herodex::model::{Hero, HeroDraft, HeroId};
use herodex::store::memory::{MockHeroStore, StoreLatency};
use herodex::store::HeroBackend;
use herodex::test_utils::init_tracing;
use herodex::view::ViewOrchestrator;

/// Holds back the first listing until released, so it resolves after later ones.
struct GatedBackend {
    inner: MockHeroStore,
    hold_next_list: AtomicBool,
    release: Notify,
}

impl GatedBackend {
    fn new() -> Self {
        Self {
            inner: MockHeroStore::seeded(StoreLatency::zero(), Default::default()),
            hold_next_list: AtomicBool::new(true),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl HeroBackend for GatedBackend {
    async fn list(&self) -> Vec<Hero> {
        let heroes = self.inner.list().await;
        if self.hold_next_list.swap(false, Ordering::SeqCst) {
            self.release.notified().await;
        }
        heroes
    }

    async fn get_by_id(&self, id: HeroId) -> Option<Hero> {
        self.inner.get_by_id(id).await
    }

    async fn find_by_name(&self, term: &str) -> Vec<Hero> {
        self.inner.find_by_name(term).await
    }

    async fn add(&self, draft: HeroDraft) -> Hero {
        self.inner.add(draft).await
    }

    async fn update(&self, hero: Hero) -> Hero {
        self.inner.update(hero).await
    }

    async fn remove(&self, id: HeroId) -> bool {
        self.inner.remove(id).await
    }
}

fn context(store: &Arc<GatedBackend>) -> AppContext<GatedBackend> {
    AppContext::new(
        Arc::clone(store),
        store.inner.busy().clone(),
        HerodexConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_older_listing_cannot_overwrite_newer_mutation() {
    init_tracing();
    let store = Arc::new(GatedBackend::new());
    let dialogs = Arc::new(ScriptedDialogs::new());
    dialogs.respond(DialogResult::Draft(HeroDraft::new("Storm")));
    let view = ViewOrchestrator::new(&context(&store).with_dialogs(dialogs.clone()));

    let (applied, added) = tokio::join!(view.refresh(), async {
        let added = view.add_hero().await;
        store.release.notify_one();
        added
    });

    assert!(!applied);
    assert_eq!(added.map(|h| h.id), Some(16));
    let snapshot = view.snapshot();
    assert_eq!(snapshot.total_heroes, 16);
    assert!(snapshot.filtered.iter().any(|h| h.name == "Storm"));
}

#[tokio::test(start_paused = true)]
async fn test_latest_issued_refresh_wins() {
    let store = Arc::new(GatedBackend::new());
    let view = ViewOrchestrator::new(&context(&store));

    let (first, second) = tokio::join!(view.refresh(), async {
        let applied = view.refresh().await;
        store.release.notify_one();
        applied
    });

    assert!(!first);
    assert!(second);
    assert_eq!(view.snapshot().total_heroes, 15);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_refreshes_all_apply() {
    let store = Arc::new(GatedBackend::new());
    store.hold_next_list.store(false, Ordering::SeqCst);
    let view = ViewOrchestrator::new(&context(&store));

    assert!(view.refresh().await);
    assert!(view.refresh().await);
    assert_eq!(view.snapshot().total_heroes, 15);
}
