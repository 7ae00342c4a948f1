//! # Catalogue View
//!
//! [`ViewOrchestrator`] keeps four pieces of state mutually consistent:
//!
//! ```text
//!   store.list() ──► heroes ──► facets
//!                       │
//!        FilterState ───┤
//!                       ▼
//!                   filtered ──► PageWindow.total_items
//!                       │
//!        PageWindow ────┤
//!                       ▼
//!                   displayed
//! ```
//!
//! Every change goes through the orchestrator, which recomputes whatever lies
//! downstream of it and publishes a fresh [`ViewSnapshot`] on a `watch`
//! channel. Nothing else holds a second copy of the catalogue.
//!
//! ## Transitions
//!
//! | Event | Effect |
//! |-------|--------|
//! | mount / mutation settled | re-list, refilter, set total items, repage |
//! | committed search term, facet toggle, clear | update filter, reset to page 0, refilter |
//! | page control | forward to [`PageWindow::on_page_change`], repage only |
//!
//! The page index is *not* clamped when a refresh shrinks the filtered set.
//! A page left past the end renders empty until the user pages back or the
//! filter changes.
//!
//! ## Stale listings
//!
//! Listings may overlap, and an older one may resolve last. Every
//! [`ViewOrchestrator::refresh`] takes a sequence number when it is issued and
//! its result is applied only if no later refresh was issued meanwhile.

mod filter;

pub use filter::{facets, Facet, FilterState};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::{watch, Mutex as AsyncMutex};
use tracing::{debug, info, warn};

use crate::busy::BusyGate;
use crate::collab::{DialogHost, DialogRequest, DialogResult, Navigator, PreferenceStore};
use crate::context::AppContext;
use crate::debounce::{CommittedTerms, SearchDebouncer};
use crate::model::{Hero, HeroId, ViewMode};
use crate::paging::{PageEvent, PageState, PageWindow};
use crate::store::HeroBackend;

/// Preference key the chosen [`ViewMode`] is stored under.
pub const VIEW_MODE_KEY: &str = "hero_view_mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A listing is in flight.
    Loading,
    Ready,
}

/// Everything a renderer needs, as of one settled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub phase: LoadPhase,
    pub view_mode: ViewMode,
    pub filter: FilterState,
    /// Publishers of the whole catalogue, not just of `filtered`.
    pub facets: Vec<Facet>,
    pub filtered: Vec<Hero>,
    pub displayed: Vec<Hero>,
    pub page: PageState,
    pub total_heroes: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl ViewSnapshot {
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_active()
    }

    pub fn publishers(&self) -> Vec<&str> {
        self.facets.iter().map(|f| f.publisher.as_str()).collect()
    }
}

struct ViewState {
    phase: LoadPhase,
    view_mode: ViewMode,
    heroes: Vec<Hero>,
    facets: Vec<Facet>,
    filter: FilterState,
    filtered: Vec<Hero>,
    window: PageWindow,
}

impl ViewState {
    fn new(window: PageWindow) -> Self {
        Self {
            phase: LoadPhase::Idle,
            view_mode: ViewMode::default(),
            heroes: Vec::new(),
            facets: Vec::new(),
            filter: FilterState::default(),
            filtered: Vec::new(),
            window,
        }
    }

    fn set_heroes(&mut self, heroes: Vec<Hero>) {
        self.heroes = heroes;
        self.facets = facets(&self.heroes);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.heroes);
        self.window.set_total_items(self.filtered.len());
    }

    /// Applies a filter change. Returns whether anything changed.
    fn change_filter(&mut self, change: impl FnOnce(&mut FilterState)) -> bool {
        let before = self.filter.clone();
        change(&mut self.filter);
        if self.filter == before {
            return false;
        }
        self.window.reset_to_first_page();
        self.refilter();
        true
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            phase: self.phase,
            view_mode: self.view_mode,
            filter: self.filter.clone(),
            facets: self.facets.clone(),
            filtered: self.filtered.clone(),
            displayed: self.window.paged_items(&self.filtered).to_vec(),
            page: self.window.state().clone(),
            total_heroes: self.heroes.len(),
            total_pages: self.window.total_pages(),
            has_next_page: self.window.has_next_page(),
            has_previous_page: self.window.has_previous_page(),
        }
    }
}

/// Controller of the catalogue screen.
///
/// Must be created inside a Tokio runtime: it spawns the search debouncer.
pub struct ViewOrchestrator<B: HeroBackend> {
    store: Arc<B>,
    busy: BusyGate,
    dialogs: Arc<dyn DialogHost>,
    preferences: Arc<dyn PreferenceStore>,
    navigator: Arc<dyn Navigator>,
    search: SearchDebouncer,
    committed: AsyncMutex<CommittedTerms>,
    state: Mutex<ViewState>,
    /// Sequence number of the most recently issued refresh.
    issued: AtomicU64,
    tx: watch::Sender<ViewSnapshot>,
}

impl<B: HeroBackend> ViewOrchestrator<B> {
    pub fn new(context: &AppContext<B>) -> Self {
        let (search, committed) = SearchDebouncer::spawn(context.config.search_debounce());
        let state = ViewState::new(PageWindow::new(context.config.initial_page_state()));
        let (tx, _) = watch::channel(state.snapshot());
        Self {
            store: Arc::clone(&context.store),
            busy: context.busy.clone(),
            dialogs: Arc::clone(&context.dialogs),
            preferences: Arc::clone(&context.preferences),
            navigator: Arc::clone(&context.navigator),
            search,
            committed: AsyncMutex::new(committed),
            state: Mutex::new(state),
            issued: AtomicU64::new(0),
            tx,
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.tx.borrow().clone()
    }

    /// Receives a new snapshot whenever the view changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.tx.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn busy(&self) -> &BusyGate {
        &self.busy
    }

    fn update<R>(&self, change: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut state = self.state.lock();
        let result = change(&mut *state);
        let next = state.snapshot();
        self.tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        result
    }

    // --- Loading ---

    /// Restores the remembered view mode, then loads the catalogue.
    pub async fn mount(&self) -> bool {
        let mode = self.restore_view_mode();
        self.update(|state| state.view_mode = mode);
        self.refresh().await
    }

    fn restore_view_mode(&self) -> ViewMode {
        let Some(raw) = self.preferences.get(VIEW_MODE_KEY) else {
            return ViewMode::default();
        };
        raw.parse().unwrap_or_else(|err: String| {
            debug!(error = %err, "ignoring stored view mode");
            ViewMode::default()
        })
    }

    /// Re-lists the catalogue and reapplies the filter and page window.
    ///
    /// Returns `false` when the listing was superseded by a later refresh and
    /// therefore discarded.
    pub async fn refresh(&self) -> bool {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|state| state.phase = LoadPhase::Loading);

        let heroes = self.store.list().await;

        self.update(|state| {
            let latest = self.issued.load(Ordering::SeqCst);
            if seq != latest {
                debug!(seq, latest, "discarding stale listing");
                return false;
            }
            state.set_heroes(heroes);
            state.phase = LoadPhase::Ready;
            debug!(
                seq,
                total = state.heroes.len(),
                filtered = state.filtered.len(),
                "listing applied"
            );
            true
        })
    }

    // --- Search & facets ---

    /// Feeds the raw search box content to the debouncer.
    pub fn keystroke(&self, raw: &str) {
        self.search.push(raw);
    }

    /// Waits for the debouncer to commit a term, then applies it.
    ///
    /// Returns `None` once the debouncer has stopped.
    pub async fn apply_next_search(&self) -> Option<String> {
        let term = self.committed.lock().await.next().await?;
        self.apply_search_term(&term);
        Some(term)
    }

    /// Applies committed search terms until the debouncer stops.
    pub async fn follow_search(&self) {
        while self.apply_next_search().await.is_some() {}
    }

    /// Sets the committed search term directly, bypassing the debouncer.
    ///
    /// A keystroke still pending in the debouncer is discarded.
    pub fn set_search_term(&self, term: &str) {
        self.search.reset(term);
        self.apply_search_term(term);
    }

    fn apply_search_term(&self, term: &str) {
        self.update(|state| {
            state.change_filter(|filter| {
                if filter.search_term != term {
                    filter.search_term = term.to_string();
                }
            })
        });
    }

    /// Selects `publisher`, or clears the facet when it is already selected.
    pub fn filter_by_publisher(&self, publisher: &str) {
        self.update(|state| state.change_filter(|filter| filter.toggle_publisher(publisher)));
    }

    pub fn clear_publisher_filter(&self) {
        self.update(|state| state.change_filter(|filter| filter.publisher = None));
    }

    /// Clears the search term now. A pending keystroke is discarded, and
    /// typing the old term again commits it.
    pub fn clear_search_filter(&self) {
        self.search.reset("");
        self.update(|state| state.change_filter(|filter| filter.search_term.clear()));
    }

    pub fn clear_all_filters(&self) {
        self.search.reset("");
        self.update(|state| state.change_filter(|filter| *filter = FilterState::default()));
    }

    // --- Paging & layout ---

    /// Forwards a page control event; the filtered set is left alone.
    pub fn on_page_change(&self, event: PageEvent) {
        self.update(|state| state.window.on_page_change(event));
    }

    /// Switches layout and remembers it for the next session.
    pub fn switch_view(&self, mode: ViewMode) {
        self.update(|state| state.view_mode = mode);
        if let Err(err) = self.preferences.set(VIEW_MODE_KEY, mode.as_str()) {
            warn!(error = %err, mode = %mode, "could not persist view mode");
        }
    }

    // --- Mutations ---

    /// Opens the hero form and adds what it returns.
    pub async fn add_hero(&self) -> Option<Hero> {
        let handle = self.dialogs.open(DialogRequest::HeroForm { hero: None });
        let draft = match handle.after_closed().await? {
            DialogResult::Draft(draft) => draft,
            other => {
                warn!(result = ?other, "hero form returned an unexpected result for add");
                return None;
            }
        };
        let hero = self.store.add(draft).await;
        info!(id = hero.id, "added from form");
        self.refresh().await;
        Some(hero)
    }

    /// Opens the hero form prefilled with `hero` and stores the result.
    ///
    /// The edited hero always keeps `hero.id`.
    pub async fn edit_hero(&self, hero: &Hero) -> Option<Hero> {
        let handle = self.dialogs.open(DialogRequest::HeroForm {
            hero: Some(hero.clone()),
        });
        let edited = match handle.after_closed().await? {
            DialogResult::Hero(mut edited) => {
                edited.id = hero.id;
                edited
            }
            DialogResult::Draft(draft) => draft.into_hero(hero.id),
            other => {
                warn!(result = ?other, id = hero.id, "hero form returned an unexpected result for edit");
                return None;
            }
        };
        let updated = self.store.update(edited).await;
        info!(id = updated.id, "updated from form");
        self.refresh().await;
        Some(updated)
    }

    /// Asks for confirmation, then removes `hero`.
    ///
    /// Returns whether a hero was removed. Every confirmed delete refreshes,
    /// even when the hero was already gone.
    pub async fn delete_hero(&self, hero: &Hero) -> bool {
        let handle = self.dialogs.open(DialogRequest::ConfirmDelete { hero: hero.clone() });
        match handle.after_closed().await {
            Some(DialogResult::Confirmed(true)) => {}
            Some(DialogResult::Confirmed(false)) | None => return false,
            Some(other) => {
                warn!(result = ?other, id = hero.id, "delete confirmation returned an unexpected result");
                return false;
            }
        }
        let removed = self.store.remove(hero.id).await;
        self.refresh().await;
        removed
    }

    pub fn view_hero_detail(&self, id: HeroId) {
        self.navigator
            .navigate(&["heroes".to_string(), id.to_string()]);
    }
}
