//! Controller of the single-hero screen.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::collab::{DialogHost, DialogRequest, DialogResult, Navigator};
use crate::context::AppContext;
use crate::model::{Hero, HeroId};
use crate::store::HeroBackend;

pub struct HeroDetail<B: HeroBackend> {
    store: Arc<B>,
    dialogs: Arc<dyn DialogHost>,
    navigator: Arc<dyn Navigator>,
    hero: Option<Hero>,
}

impl<B: HeroBackend> HeroDetail<B> {
    pub fn new(context: &AppContext<B>) -> Self {
        Self {
            store: Arc::clone(&context.store),
            dialogs: Arc::clone(&context.dialogs),
            navigator: Arc::clone(&context.navigator),
            hero: None,
        }
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    /// Fetches the hero. An unknown id sends the user back to the catalogue.
    pub async fn load(&mut self, id: HeroId) -> Option<&Hero> {
        self.hero = self.store.get_by_id(id).await;
        if self.hero.is_none() {
            debug!(id, "hero not found, leaving detail screen");
            self.go_back();
        }
        self.hero.as_ref()
    }

    /// Opens the edit form for the loaded hero and stores the result.
    pub async fn edit(&mut self) -> Option<&Hero> {
        let current = self.hero.clone()?;
        let handle = self.dialogs.open(DialogRequest::HeroForm {
            hero: Some(current.clone()),
        });
        let edited = match handle.after_closed().await? {
            DialogResult::Hero(mut edited) => {
                edited.id = current.id;
                edited
            }
            DialogResult::Draft(draft) => draft.into_hero(current.id),
            other => {
                warn!(result = ?other, id = current.id, "hero form returned an unexpected result for edit");
                return None;
            }
        };
        self.hero = Some(self.store.update(edited).await);
        self.hero.as_ref()
    }

    /// Asks for confirmation, then removes the loaded hero.
    ///
    /// Leaves the screen only when a hero was actually removed.
    pub async fn delete(&mut self) -> bool {
        let Some(current) = self.hero.clone() else {
            return false;
        };
        let handle = self.dialogs.open(DialogRequest::ConfirmDelete {
            hero: current.clone(),
        });
        if handle.after_closed().await != Some(DialogResult::Confirmed(true)) {
            return false;
        }
        let removed = self.store.remove(current.id).await;
        if removed {
            self.hero = None;
            self.go_back();
        }
        removed
    }

    pub fn go_back(&self) {
        self.navigator.navigate(&["heroes".to_string()]);
    }
}
