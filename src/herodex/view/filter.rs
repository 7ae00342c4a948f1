use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Hero;

/// The active search term and publisher facet.
///
/// The two fields are independent. Changing one never touches the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    /// Matched case-insensitively against hero names. Empty matches everything.
    pub search_term: String,
    /// Matched exactly against the publisher. `None` matches everything.
    pub publisher: Option<String>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.publisher.is_some()
    }

    pub fn matches(&self, hero: &Hero) -> bool {
        self.matches_term(hero) && self.matches_publisher(hero)
    }

    fn matches_term(&self, hero: &Hero) -> bool {
        self.search_term.is_empty()
            || hero
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    fn matches_publisher(&self, hero: &Hero) -> bool {
        match &self.publisher {
            None => true,
            Some(publisher) => hero.publisher.as_deref() == Some(publisher.as_str()),
        }
    }

    /// Selects `publisher`, or clears the facet if it is already selected.
    pub fn toggle_publisher(&mut self, publisher: &str) {
        if self.publisher.as_deref() == Some(publisher) {
            self.publisher = None;
        } else {
            self.publisher = Some(publisher.to_string());
        }
    }

    /// The matching heroes, in their original order.
    pub fn apply(&self, heroes: &[Hero]) -> Vec<Hero> {
        heroes.iter().filter(|h| self.matches(h)).cloned().collect()
    }
}

/// One selectable publisher and how many heroes carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub publisher: String,
    pub count: usize,
}

/// Distinct non-empty publishers of `heroes`, ascending.
pub fn facets(heroes: &[Hero]) -> Vec<Facet> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for publisher in heroes.iter().filter_map(Hero::facet) {
        *counts.entry(publisher).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(publisher, count)| Facet {
            publisher: publisher.to_string(),
            count,
        })
        .collect()
}
