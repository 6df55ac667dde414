use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::debug;

use super::{SaveTrigger, SessionCore};

/// Debounce loop of one session.
///
/// Every edit signal restarts the quiet window. When the window elapses the
/// save is spawned, not awaited, so edits arriving while it is in flight open
/// the next cycle. The loop ends when the session drops its sender.
pub(super) async fn run(core: Arc<SessionCore>, mut edits: mpsc::UnboundedReceiver<()>, quiet: Duration) {
    while edits.recv().await.is_some() {
        loop {
            match timeout(quiet, edits.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => {
                    debug!("Autosave stopped with pending edits");
                    return;
                }
                Err(_) => break,
            }
        }

        let core = Arc::clone(&core);
        tokio::spawn(async move {
            core.save(SaveTrigger::Auto).await;
        });
    }
    debug!("Autosave stopped");
}
