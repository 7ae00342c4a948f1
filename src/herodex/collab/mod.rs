//! # External Collaborators
//!
//! The view layer talks to the outside world through three narrow contracts.
//! Each comes with an in-process implementation, used by tests and by hosts
//! that do not need anything fancier.
//!
//! | Contract | Purpose | Implementations |
//! |----------|---------|-----------------|
//! | [`DialogHost`] | Modal add/edit form and delete confirmation | [`ScriptedDialogs`] |
//! | [`PreferenceStore`] | Remembers the last view mode | [`MemoryPreferences`], [`JsonFilePreferences`] |
//! | [`Navigator`] | Fire-and-forget route changes | [`RecordingNavigator`] |
//!
//! A dialog closing without a value means *cancelled*. The orchestrator treats
//! that as a no-op, never as an error.

pub mod dialog;
pub mod nav;
pub mod prefs;

pub use dialog::{DialogCloser, DialogHandle, DialogHost, DialogRequest, DialogResult, ScriptedDialogs};
pub use nav::{Navigator, RecordingNavigator};
pub use prefs::{JsonFilePreferences, MemoryPreferences, PreferenceStore};
