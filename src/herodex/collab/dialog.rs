use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::model::{Hero, HeroDraft};

/// Which modal to show, and what to prefill it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogRequest {
    /// The add/edit form. `hero` is `Some` when editing.
    HeroForm { hero: Option<Hero> },
    ConfirmDelete { hero: Hero },
}

/// What a dialog can close with, besides being cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// A submitted form without an id (add).
    Draft(HeroDraft),
    /// A submitted form that kept the edited hero's id.
    Hero(Hero),
    Confirmed(bool),
}

/// Yields exactly one close event.
#[derive(Debug)]
pub struct DialogHandle {
    rx: oneshot::Receiver<DialogResult>,
}

/// The dialog side of a [`DialogHandle`]. Dropping it cancels the dialog.
#[derive(Debug)]
pub struct DialogCloser {
    tx: oneshot::Sender<DialogResult>,
}

impl DialogCloser {
    pub fn close(self, result: DialogResult) {
        // The opener may have stopped waiting; nothing to deliver to then.
        let _ = self.tx.send(result);
    }

    pub fn cancel(self) {}
}

impl DialogHandle {
    pub fn channel() -> (DialogCloser, DialogHandle) {
        let (tx, rx) = oneshot::channel();
        (DialogCloser { tx }, DialogHandle { rx })
    }

    /// A handle whose dialog has already closed with `result`.
    pub fn closed(result: Option<DialogResult>) -> Self {
        let (closer, handle) = Self::channel();
        match result {
            Some(result) => closer.close(result),
            None => closer.cancel(),
        }
        handle
    }

    /// `None` when the dialog was cancelled.
    pub async fn after_closed(self) -> Option<DialogResult> {
        self.rx.await.ok()
    }
}

pub trait DialogHost: Send + Sync {
    fn open(&self, request: DialogRequest) -> DialogHandle;
}

/// Answers dialogs from a queue of prepared results, in order.
///
/// An exhausted queue cancels every further dialog.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    responses: Mutex<VecDeque<Option<DialogResult>>>,
    opened: Mutex<Vec<DialogRequest>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, result: DialogResult) -> &Self {
        self.responses.lock().push_back(Some(result));
        self
    }

    pub fn cancel_next(&self) -> &Self {
        self.responses.lock().push_back(None);
        self
    }

    /// Every request opened so far.
    pub fn opened(&self) -> Vec<DialogRequest> {
        self.opened.lock().clone()
    }
}

impl DialogHost for ScriptedDialogs {
    fn open(&self, request: DialogRequest) -> DialogHandle {
        self.opened.lock().push(request);
        let response = self.responses.lock().pop_front().flatten();
        DialogHandle::closed(response)
    }
}
