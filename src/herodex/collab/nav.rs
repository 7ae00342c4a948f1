use parking_lot::Mutex;

/// Route changes. Fire-and-forget: nothing is returned.
pub trait Navigator: Send + Sync {
    fn navigate(&self, segments: &[String]);
}

/// Remembers every route it was asked to go to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Vec<String>> {
        self.routes.lock().clone()
    }

    pub fn last(&self) -> Option<Vec<String>> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, segments: &[String]) {
        tracing::debug!(route = %segments.join("/"), "navigate");
        self.routes.lock().push(segments.to_vec());
    }
}
