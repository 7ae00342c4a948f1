//! # Storage Layer
//!
//! This module defines the record store contract for herodex. The [`HeroBackend`]
//! trait lets the view layer work against any store that honours it.
//!
//! ## Contract
//!
//! - **Asynchronous**: every operation is a suspension point. The mock store
//!   simulates network latency; a real backend would have real latency.
//! - **Total**: operations never fail. Absence is a value, not a fault:
//!   `get_by_id` yields `None`, `remove` yields `false`, and `update` of an
//!   unknown id is a silent no-op. The orchestrator relies on this.
//! - **Busy signalling**: each operation engages the session's
//!   [`crate::busy::BusyGate`] on entry and releases it on settlement.
//! - **Snapshots**: results are owned values. Nothing outside the store can
//!   mutate the canonical sequence in place.
//!
//! ## Identity
//!
//! `add` assigns `id = max(highest id ever assigned, 0) + 1`. Ids therefore
//! strictly increase and never repeat, even after the highest one is removed.
//!
//! ## Implementations
//!
//! - [`memory::MockHeroStore`]: volatile, latency-simulating store.
//! - [`seed`]: the catalogue the mock store starts with.

use async_trait::async_trait;

use crate::model::{Hero, HeroDraft, HeroId};

pub mod memory;
pub mod seed;

/// Abstract interface for the hero store.
#[async_trait]
pub trait HeroBackend: Send + Sync {
    /// All heroes, in canonical order.
    async fn list(&self) -> Vec<Hero>;

    async fn get_by_id(&self, id: HeroId) -> Option<Hero>;

    /// Case-insensitive substring match on the name.
    async fn find_by_name(&self, term: &str) -> Vec<Hero>;

    /// Appends a new hero and returns it with its assigned id.
    async fn add(&self, draft: HeroDraft) -> Hero;

    /// Replaces the hero with the same id. Unknown ids are ignored.
    async fn update(&self, hero: Hero) -> Hero;

    /// Returns whether a hero was removed.
    async fn remove(&self, id: HeroId) -> bool;
}
