use std::future::Future;

use tokio::sync::mpsc;

use crate::tui_event::{AppEvent, BackendEvent, OperationKind};

/// Runs one background operation at a time and feeds its outcome back into
/// the app event channel.
#[derive(Clone)]
pub struct Launcher {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl Launcher {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Spawn `op` and deliver its event when it finishes.
    ///
    /// A panicking operation still produces a `Failed` event of `kind`.
    pub fn launch<F>(&self, kind: OperationKind, op: F)
    where
        F: Future<Output = BackendEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match tokio::spawn(op).await {
                Ok(event) => event,
                Err(e) => BackendEvent::Failed {
                    kind,
                    error: format!("background task failed: {e}"),
                },
            };
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(AppEvent::Backend(event));
        });
    }
}
