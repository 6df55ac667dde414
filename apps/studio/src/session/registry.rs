use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::{EditorSession, SaveOutcome, SessionError};

struct Tracked {
    session: Arc<EditorSession>,
    last_seen: Instant,
}

/// Open editing sessions, keyed by session id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Tracked>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: EditorSession) -> Arc<EditorSession> {
        let session = Arc::new(session);
        self.sessions.write().await.insert(
            session.id(),
            Tracked {
                session: Arc::clone(&session),
                last_seen: Instant::now(),
            },
        );
        session
    }

    /// Looks a session up and marks it as active.
    pub async fn get(&self, id: Uuid) -> Result<Arc<EditorSession>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let tracked = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        tracked.last_seen = Instant::now();
        Ok(Arc::clone(&tracked.session))
    }

    /// Dropping the last handle stops the session's autosave loop.
    pub async fn remove(&self, id: Uuid) -> Result<Arc<EditorSession>, SessionError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|tracked| tracked.session)
            .ok_or(SessionError::NotFound(id))
    }

    /// Removes and returns the sessions nobody touched for `idle`.
    pub async fn expire_idle(&self, idle: Duration) -> Vec<Arc<EditorSession>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let expired: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, tracked)| now.duration_since(tracked.last_seen) >= idle)
            .map(|(id, _)| *id)
            .collect();
        expired
            .into_iter()
            .filter_map(|id| sessions.remove(&id))
            .map(|tracked| tracked.session)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically closes idle sessions, saving their pending edits first.
pub async fn run_sweeper(registry: Arc<SessionRegistry>, idle: Duration) {
    let mut ticker = tokio::time::interval((idle / 4).max(Duration::from_secs(1)));
    loop {
        ticker.tick().await;
        for session in registry.expire_idle(idle).await {
            let id = session.id();
            match session.flush().await {
                Some(SaveOutcome::Failed) => {
                    warn!("Expired idle session {id}; its last edits could not be saved")
                }
                Some(outcome) => info!("Expired idle session {id} after saving ({outcome:?})"),
                None => info!("Expired idle session {id}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::models::resume::{Resume, SaveStatus};
    use crate::models::section::{ProfileData, Section, SectionBody};
    use crate::session::SessionSettings;

    fn session(backend: &Arc<MockBackend>) -> EditorSession {
        EditorSession::open(
            backend.clone(),
            SessionSettings::default(),
            Resume::new("r1", "CV"),
        )
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let registry = SessionRegistry::new();
        let session = session(&Arc::new(MockBackend::new()));
        let id = session.id();

        registry.insert(session).await;
        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.get(id).await.unwrap().id(), id);

        registry.remove(id).await.unwrap();
        assert!(matches!(
            registry.get(id).await,
            Err(SessionError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_untouched_sessions_expire() {
        let backend = Arc::new(MockBackend::new());
        let registry = SessionRegistry::new();
        let quiet = registry.insert(session(&backend)).await.id();
        let busy = registry.insert(session(&backend)).await.id();

        tokio::time::advance(Duration::from_secs(50)).await;
        registry.get(busy).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        let expired = registry.expire_idle(Duration::from_secs(60)).await;
        let ids: Vec<Uuid> = expired.iter().map(|session| session.id()).collect();
        assert_eq!(ids, vec![quiet]);
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(busy).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_saves_pending_edits_of_idle_session() {
        let backend = Arc::new(MockBackend::new());
        let registry = Arc::new(SessionRegistry::new());
        // debounce longer than the idle window, so only the sweeper can save
        let session = EditorSession::open(
            backend.clone(),
            SessionSettings {
                debounce: Duration::from_secs(3600),
                rollback_failed_reorder: false,
            },
            Resume::new("r1", "CV"),
        );
        session
            .load_draft(vec![Section::new(SectionBody::Profile {
                data: ProfileData::named("Jane Doe"),
            })])
            .unwrap();
        assert_eq!(session.status(), SaveStatus::Unsaved);
        let session = registry.insert(session).await;

        tokio::spawn(run_sweeper(Arc::clone(&registry), Duration::from_secs(60)));
        tokio::time::sleep(Duration::from_secs(61)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(registry.len().await, 0);
        assert_eq!(session.status(), SaveStatus::Saved);
        assert_eq!(backend.saves()[0].personal_information.full_name, "Jane Doe");
    }
}
