use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use super::{seed, HeroBackend};
use crate::busy::BusyGate;
use crate::config::HerodexConfig;
use crate::model::{Hero, HeroDraft, HeroId};

/// Simulated round-trip times of the mock store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLatency {
    /// list / get_by_id / find_by_name
    pub read: Duration,
    /// add / update / remove
    pub write: Duration,
}

impl Default for StoreLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(800),
            write: Duration::from_millis(1000),
        }
    }
}

impl StoreLatency {
    pub fn from_config(config: &HerodexConfig) -> Self {
        Self {
            read: config.read_latency(),
            write: config.write_latency(),
        }
    }

    pub fn zero() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

struct Catalogue {
    heroes: Vec<Hero>,
    /// Highest id ever handed out, including removed heroes.
    last_id: HeroId,
}

/// Volatile, single-process hero store with artificial latency.
///
/// Mutations take effect when their latency elapses, i.e. when the simulated
/// server would have answered. The lock is never held across a sleep.
pub struct MockHeroStore {
    catalogue: Mutex<Catalogue>,
    latency: StoreLatency,
    busy: BusyGate,
}

impl MockHeroStore {
    pub fn new(heroes: Vec<Hero>, latency: StoreLatency, busy: BusyGate) -> Self {
        let last_id = heroes.iter().map(|h| h.id).max().unwrap_or(0);
        Self {
            catalogue: Mutex::new(Catalogue { heroes, last_id }),
            latency,
            busy,
        }
    }

    /// A store holding the [`seed::catalogue`].
    pub fn seeded(latency: StoreLatency, busy: BusyGate) -> Self {
        Self::new(seed::catalogue(), latency, busy)
    }

    pub fn busy(&self) -> &BusyGate {
        &self.busy
    }

    /// The canonical sequence right now, without latency or busy signalling.
    pub fn snapshot(&self) -> Vec<Hero> {
        self.catalogue.lock().heroes.clone()
    }

    pub fn len(&self) -> usize {
        self.catalogue.lock().heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of heroes per non-empty publisher, ascending by publisher.
    pub fn facet_counts(&self) -> BTreeMap<String, usize> {
        let catalogue = self.catalogue.lock();
        let mut counts = BTreeMap::new();
        for publisher in catalogue.heroes.iter().filter_map(Hero::facet) {
            *counts.entry(publisher.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

#[async_trait]
impl HeroBackend for MockHeroStore {
    async fn list(&self) -> Vec<Hero> {
        let _busy = self.busy.engage();
        sleep(self.latency.read).await;
        let heroes = self.snapshot();
        debug!(count = heroes.len(), "listed heroes");
        heroes
    }

    async fn get_by_id(&self, id: HeroId) -> Option<Hero> {
        let _busy = self.busy.engage();
        sleep(self.latency.read).await;
        let found = self
            .catalogue
            .lock()
            .heroes
            .iter()
            .find(|h| h.id == id)
            .cloned();
        debug!(id, found = found.is_some(), "looked up hero");
        found
    }

    async fn find_by_name(&self, term: &str) -> Vec<Hero> {
        let _busy = self.busy.engage();
        sleep(self.latency.read).await;
        let term_lower = term.to_lowercase();
        let matches: Vec<Hero> = self
            .catalogue
            .lock()
            .heroes
            .iter()
            .filter(|h| h.name.to_lowercase().contains(&term_lower))
            .cloned()
            .collect();
        debug!(term, count = matches.len(), "searched heroes by name");
        matches
    }

    async fn add(&self, draft: HeroDraft) -> Hero {
        let _busy = self.busy.engage();
        sleep(self.latency.write).await;
        let hero = {
            let mut catalogue = self.catalogue.lock();
            let max_existing = catalogue.heroes.iter().map(|h| h.id).max().unwrap_or(0);
            let id = catalogue.last_id.max(max_existing) + 1;
            catalogue.last_id = id;
            let hero = draft.into_hero(id);
            catalogue.heroes.push(hero.clone());
            hero
        };
        info!(id = hero.id, name = %hero.name, "hero added");
        hero
    }

    async fn update(&self, hero: Hero) -> Hero {
        let _busy = self.busy.engage();
        sleep(self.latency.write).await;
        let replaced = {
            let mut catalogue = self.catalogue.lock();
            match catalogue.heroes.iter_mut().find(|h| h.id == hero.id) {
                Some(slot) => {
                    *slot = hero.clone();
                    true
                }
                None => false,
            }
        };
        if replaced {
            info!(id = hero.id, name = %hero.name, "hero updated");
        } else {
            debug!(id = hero.id, "update ignored, no hero with this id");
        }
        hero
    }

    async fn remove(&self, id: HeroId) -> bool {
        let _busy = self.busy.engage();
        sleep(self.latency.write).await;
        let removed = {
            let mut catalogue = self.catalogue.lock();
            let before = catalogue.heroes.len();
            catalogue.heroes.retain(|h| h.id != id);
            catalogue.heroes.len() < before
        };
        if removed {
            info!(id, "hero removed");
        } else {
            debug!(id, "remove ignored, no hero with this id");
        }
        removed
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: MockHeroStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// An empty store with zero latency.
        pub fn new() -> Self {
            Self {
                store: MockHeroStore::new(Vec::new(), StoreLatency::zero(), BusyGate::default()),
            }
        }

        /// The seed catalogue with the default latencies.
        pub fn seeded() -> Self {
            Self {
                store: MockHeroStore::seeded(StoreLatency::default(), BusyGate::default()),
            }
        }

        pub fn with_hero(self, name: &str, publisher: Option<&str>) -> Self {
            let mut catalogue = self.store.catalogue.lock();
            let id = catalogue.last_id + 1;
            catalogue.last_id = id;
            let mut draft = HeroDraft::new(name);
            draft.publisher = publisher.map(str::to_string);
            catalogue.heroes.push(draft.into_hero(id));
            drop(catalogue);
            self
        }

        pub fn with_heroes(mut self, count: usize, publisher: Option<&str>) -> Self {
            for i in 0..count {
                self = self.with_hero(&format!("Test Hero {}", i + 1), publisher);
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::store::seed::{DC_COMICS, MARVEL_COMICS};
    use std::future::Future;
    use std::pin::Pin;
    use std::task::Poll;

    #[tokio::test(start_paused = true)]
    async fn test_list_takes_read_latency() {
        let fixture = StoreFixture::seeded();
        let start = tokio::time::Instant::now();
        let heroes = fixture.store.list().await;
        assert_eq!(heroes.len(), 15);
        assert_eq!(start.elapsed(), Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_found_and_missing() {
        let fixture = StoreFixture::seeded();
        let hero = fixture.store.get_by_id(1).await.unwrap();
        assert_eq!(hero.name, "Superman");
        assert!(fixture.store.get_by_id(999).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_find_by_name_is_case_insensitive() {
        let fixture = StoreFixture::seeded();
        let heroes = fixture.store.find_by_name("MAN").await;
        assert_eq!(heroes.len(), 6);
        assert!(heroes.iter().all(|h| h.name.to_lowercase().contains("man")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_assigns_next_id_after_write_latency() {
        let fixture = StoreFixture::seeded();
        let start = tokio::time::Instant::now();
        let hero = fixture
            .store
            .add(HeroDraft::new("Test Hero").with_powers(["Testing"]))
            .await;
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
        assert_eq!(hero.id, 16);
        assert_eq!(hero.name, "Test Hero");
        assert_eq!(fixture.store.len(), 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_to_empty_store_starts_at_one() {
        let fixture = StoreFixture::new();
        let hero = fixture.store.add(HeroDraft::new("First")).await;
        assert_eq!(hero.id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_never_reused_after_remove() {
        let fixture = StoreFixture::new();
        let mut seen = Vec::new();
        for round in 0..4 {
            let hero = fixture.store.add(HeroDraft::new(format!("Hero {}", round))).await;
            seen.push(hero.id);
            // Always remove the newest, which is also the highest id
            assert!(fixture.store.remove(hero.id).await);
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert!(fixture.store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_then_get_returns_submitted_record() {
        let fixture = StoreFixture::seeded();
        let mut hero = fixture.store.get_by_id(1).await.unwrap();
        hero.name = "Updated Hero Name".into();
        hero.powers.push("Heat vision".into());
        hero.publisher = None;

        let returned = fixture.store.update(hero.clone()).await;
        assert_eq!(returned, hero);
        assert_eq!(fixture.store.get_by_id(1).await, Some(hero));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_unknown_id_is_a_noop() {
        let fixture = StoreFixture::seeded();
        let before = fixture.store.snapshot();
        let ghost = HeroDraft::new("Ghost").into_hero(999);
        let returned = fixture.store.update(ghost.clone()).await;
        assert_eq!(returned, ghost);
        assert_eq!(fixture.store.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_reports_whether_removed() {
        let fixture = StoreFixture::seeded();
        assert!(fixture.store.remove(1).await);
        assert!(!fixture.store.remove(1).await);
        assert_eq!(fixture.store.len(), 14);
        assert!(fixture.store.get_by_id(1).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_facet_counts_follow_mutations() {
        let fixture = StoreFixture::seeded();
        let counts = fixture.store.facet_counts();
        assert_eq!(counts.get(DC_COMICS), Some(&7));
        assert_eq!(counts.get(MARVEL_COMICS), Some(&8));

        fixture
            .store
            .add(HeroDraft::new("Invincible").with_publisher("Image Comics"))
            .await;
        fixture.store.add(HeroDraft::new("No Publisher")).await;

        let counts = fixture.store.facet_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get("Image Comics"), Some(&1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_engage_busy_gate() {
        let fixture = StoreFixture::seeded();
        let busy = fixture.store.busy().clone();
        assert!(!busy.is_busy());

        let mut list = fixture.store.list();
        assert!(poll_once(&mut list).await.is_none());
        assert!(busy.is_busy());

        let heroes = list.await;
        assert_eq!(heroes.len(), 15);
        assert!(!busy.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_operation_releases_busy_gate() {
        let fixture = StoreFixture::seeded();
        let busy = fixture.store.busy().clone();
        let _ = tokio::time::timeout(Duration::from_millis(10), fixture.store.list()).await;
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_fixture_builders() {
        let fixture = StoreFixture::default()
            .with_heroes(2, Some(DC_COMICS))
            .with_hero("Loner", None);
        let heroes = fixture.store.snapshot();
        assert_eq!(heroes.len(), 3);
        assert_eq!(heroes[2].id, 3);
        assert_eq!(fixture.store.facet_counts().get(DC_COMICS), Some(&2));
    }

    /// Polls a future exactly once.
    async fn poll_once<F: Future + Unpin>(mut fut: F) -> Option<F::Output> {
        std::future::poll_fn(|cx| match Pin::new(&mut fut).poll(cx) {
            Poll::Ready(value) => Poll::Ready(Some(value)),
            Poll::Pending => Poll::Ready(None),
        })
        .await
    }
}
