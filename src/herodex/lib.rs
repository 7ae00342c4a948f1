//! # Herodex Architecture
//!
//! Herodex is the **core of a hero catalogue screen**: a searchable, faceted,
//! paginated view over a record store that answers asynchronously. It has no
//! rendering of its own. A UI subscribes to [`view::ViewSnapshot`]s and feeds
//! user events back in.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Screen Controllers (view/, detail.rs)                      │
//! │  - ViewOrchestrator: filter, facets, pages, CRUD flows      │
//! │  - HeroDetail: a single hero, edit and delete               │
//! │  - Publish settled state on watch channels                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Building Blocks                                            │
//! │  - paging.rs: PageWindow (pure)                             │
//! │  - debounce.rs: SearchDebouncer (timer task)                │
//! │  - busy.rs: BusyGate (flag + watchdog)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract HeroBackend trait                               │
//! │  - MockHeroStore: seeded, latency-simulating, in memory     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collaborators the controllers do not own (modal dialogs, preference
//! storage, navigation) sit behind the traits in [`collab`].
//!
//! ## Sessions
//!
//! There is no global state. An [`context::AppContext`] is built once per
//! session and owns the store, the busy gate, the collaborators and the
//! configuration. Controllers are created from it.
//!
//! ## Totality
//!
//! The core never fails. Missing records are values (`None`, `false`), a
//! cancelled dialog is a no-op, and the busy flag always clears eventually.
//! [`error::HerodexError`] exists for the edges only: loading configuration,
//! persisting preferences and validating drafts.
//!
//! ## Logging
//!
//! Everything logs through `tracing`. The library never installs a
//! subscriber; that is the host's job.
//!
//! ## Module Overview
//!
//! - [`view`]: Catalogue screen controller and its snapshot type
//! - [`detail`]: Single hero screen controller
//! - [`store`]: Storage abstraction and the mock store
//! - [`paging`]: Page window state and slicing
//! - [`debounce`]: Search input debouncing
//! - [`busy`]: Busy indicator with watchdog
//! - [`collab`]: Dialog, preference and navigation contracts
//! - [`model`]: Core data types (`Hero`, `HeroDraft`, `ViewMode`)
//! - [`context`]: Per-session wiring
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod busy;
pub mod collab;
pub mod config;
pub mod context;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod model;
pub mod paging;
pub mod store;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
