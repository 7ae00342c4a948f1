//! # Domain Model
//!
//! This module defines the record type herodex manages: [`Hero`], its creation
//! form [`HeroDraft`], and the persisted display preference [`ViewMode`].
//!
//! ## Ownership
//!
//! Heroes are owned by the store (see [`crate::store`]). Every other component
//! works on clones handed out by the store, so nothing outside the store can
//! mutate the canonical sequence in place.
//!
//! ## Identity
//!
//! A [`HeroId`] is a positive integer assigned by the store on `add`. It is never
//! reassigned while the hero exists, and never reused after deletion for the
//! lifetime of the store.
//!
//! ## Validation
//!
//! Validation belongs to the form boundary: [`HeroDraft::validate`] is what a
//! dialog calls before submitting. The store itself accepts whatever it is given.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type HeroId = u64;

/// Minimum number of characters in a hero name, after trimming.
pub const MIN_NAME_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    #[serde(default)]
    pub alter_ego: Option<String>,
    #[serde(default)]
    pub powers: Vec<String>,
    /// The facet heroes are grouped by. Compared exactly, case-sensitive.
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub first_appearance: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Hero {
    /// Copy of this hero's fields without its identity, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> HeroDraft {
        HeroDraft {
            name: self.name.clone(),
            alter_ego: self.alter_ego.clone(),
            powers: self.powers.clone(),
            publisher: self.publisher.clone(),
            first_appearance: self.first_appearance,
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Returns the publisher only when it is present and non-empty.
    pub fn facet(&self) -> Option<&str> {
        self.publisher.as_deref().filter(|p| !p.is_empty())
    }
}

/// A hero that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDraft {
    pub name: String,
    #[serde(default)]
    pub alter_ego: Option<String>,
    #[serde(default)]
    pub powers: Vec<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub first_appearance: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl HeroDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_powers<I, S>(mut self, powers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for power in powers {
            self.add_power(power.as_ref());
        }
        self
    }

    /// Adds a power, trimmed. Blank and duplicate powers are ignored.
    ///
    /// Returns whether the power was added.
    pub fn add_power(&mut self, power: &str) -> bool {
        let power = power.trim();
        if power.is_empty() || self.powers.iter().any(|p| p == power) {
            return false;
        }
        self.powers.push(power.to_string());
        true
    }

    /// Returns whether the power was present.
    pub fn remove_power(&mut self, power: &str) -> bool {
        match self.powers.iter().position(|p| p == power) {
            Some(index) => {
                self.powers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Checks the rules the hero form enforces before submitting.
    pub fn validate(&self) -> Result<(), HeroValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(HeroValidationError::NameRequired);
        }
        let len = name.chars().count();
        if len < MIN_NAME_LEN {
            return Err(HeroValidationError::NameTooShort {
                min: MIN_NAME_LEN,
                actual: len,
            });
        }
        Ok(())
    }

    pub fn into_hero(self, id: HeroId) -> Hero {
        Hero {
            id,
            name: self.name,
            alter_ego: self.alter_ego,
            powers: self.powers,
            publisher: self.publisher,
            first_appearance: self.first_appearance,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeroValidationError {
    #[error("name is required")]
    NameRequired,

    #[error("name must be at least {min} characters, found {actual}")]
    NameTooShort { min: usize, actual: usize },
}

/// How the catalogue is laid out. Remembered across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}
