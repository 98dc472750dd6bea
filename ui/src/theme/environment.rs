use std::sync::Arc;
use tokio::sync::watch;

/// The environment's preferred color scheme (`true` = dark).
///
/// Cloning shares the same channel, so the host can keep one handle to push
/// changes while the controller subscribes through another.
#[derive(Debug, Clone)]
pub struct EnvironmentSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl EnvironmentSignal {
    pub fn new(initial: bool) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Publish a new preference. Subscribers are only woken on change.
    pub fn set(&self, dark: bool) {
        self.tx.send_if_modified(|current| {
            if *current == dark {
                false
            } else {
                *current = dark;
                true
            }
        });
    }

    pub fn current(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for EnvironmentSignal {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_changes_only() {
        let signal = EnvironmentSignal::new(false);
        let mut rx = signal.subscribe();

        signal.set(false);
        assert!(!rx.has_changed().unwrap());

        signal.clone().set(true);
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
        assert!(signal.current());
    }
}
