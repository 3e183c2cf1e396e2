use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{PersistentStore, Storage};
use crate::search::{BrowseSession, TipRequest};
use crate::services::{FallbackLocation, TipService};
use crate::store::{DomainStore, StoreEvent};

pub type SharedStore = Arc<RwLock<DomainStore>>;
pub type SessionMap = Arc<RwLock<HashMap<Uuid, BrowseSession>>>;

/// Bounds on the browse session map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionLimits {
    /// Sessions untouched for this long are dropped.
    pub idle: Duration,
    pub max: usize,
}

impl SessionLimits {
    pub fn from_config() -> Self {
        SessionLimits {
            idle: Duration::from_secs(Config::session_idle_minutes() * 60),
            max: Config::max_browse_sessions().max(1),
        }
    }
}

/// Drops idle sessions, then the least recently used ones until a new
/// session fits under `limits.max`. Returns how many were removed.
pub fn prune_sessions(sessions: &mut HashMap<Uuid, BrowseSession>, limits: SessionLimits, now: Instant) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| now.saturating_duration_since(session.last_seen()) < limits.idle);

    if sessions.len() >= limits.max {
        let mut by_age: Vec<(Instant, Uuid)> = sessions.iter().map(|(id, s)| (s.last_seen(), *id)).collect();
        by_age.sort();
        let excess = sessions.len() + 1 - limits.max;
        for (_, id) in by_age.into_iter().take(excess) {
            sessions.remove(&id);
        }
    }

    before - sessions.len()
}

/// Everything the routes share, managed by Rocket.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub sessions: SessionMap,
    pub session_limits: SessionLimits,
    pub tips: TipService,
    pub fallback: FallbackLocation,
}

fn log_event(event: &StoreEvent) {
    match event {
        StoreEvent::WorkerAdded(id) => info!("Worker {} added", id),
        StoreEvent::WorkerUpdated(id) => info!("Worker {} updated", id),
        StoreEvent::WorkerDeleted(id) => info!("Worker {} deleted", id),
        other => debug!("Store event: {:?}", other),
    }
}

impl AppState {
    pub fn new(
        storage: impl Storage + 'static,
        tips: TipService,
        fallback: FallbackLocation,
        session_limits: SessionLimits,
    ) -> Self {
        let mut store = DomainStore::open(PersistentStore::new(storage), fallback.as_pair());
        store.subscribe(log_event);

        AppState {
            store: Arc::new(RwLock::new(store)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_limits,
            tips,
            fallback,
        }
    }

    pub fn from_config(storage: impl Storage + 'static) -> Self {
        Self::new(
            storage,
            TipService::from_config(),
            FallbackLocation::from_config(),
            SessionLimits::from_config(),
        )
    }

    /// Registers a new browse session, evicting idle or excess ones first.
    pub async fn insert_session(&self, session: BrowseSession) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        let removed = prune_sessions(&mut sessions, self.session_limits, Instant::now());
        if removed > 0 {
            debug!("Evicted {} browse sessions", removed);
        }
        sessions.insert(id, session);
        id
    }

    /// Fetches the tip in the background and hands it to the session if the
    /// session still shows the list it was requested for.
    pub fn spawn_tip(&self, session_id: Uuid, request: TipRequest) -> JoinHandle<()> {
        let tips = self.tips.clone();
        let sessions = self.sessions.clone();

        tokio::spawn(async move {
            let tip = tips.tip_for(&request.category_name).await;
            let mut sessions = sessions.write().await;
            let applied = sessions
                .get_mut(&session_id)
                .map(|session| session.apply_tip(request.token, tip))
                .unwrap_or(false);
            if !applied {
                debug!("Discarded stale tip for session {}", session_id);
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::search::Coordinates;
    use crate::services::tip::{TipAdvisor, TipError};

    /// Advisor answering "<category> tip" immediately.
    pub struct EchoAdvisor;

    #[rocket::async_trait]
    impl TipAdvisor for EchoAdvisor {
        async fn fetch_tip(&self, category_name: &str) -> Result<String, TipError> {
            Ok(format!("{} tip", category_name))
        }
    }

    pub const TEST_MAX_SESSIONS: usize = 8;

    pub fn test_state(storage: MemoryStorage) -> AppState {
        AppState::new(
            storage,
            TipService::new(Arc::new(EchoAdvisor), Duration::from_millis(200)),
            FallbackLocation {
                coords: Coordinates::new(17.385, 78.4867),
                city: "Hyderabad".to_string(),
            },
            SessionLimits {
                idle: Duration::from_secs(30 * 60),
                max: TEST_MAX_SESSIONS,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::test_state;
    use super::*;
    use crate::db::MemoryStorage;
    use crate::models::find_category;
    use crate::search::Coordinates;

    #[tokio::test]
    async fn spawned_tip_lands_on_current_list() {
        let state = test_state(MemoryStorage::new());
        let id = Uuid::new_v4();
        let workers = state.store.read().await.workers().to_vec();

        let mut session = BrowseSession::new(state.fallback.coords, state.fallback.city.clone());
        let category = *find_category("plumber").expect("plumber");
        let request = session.select_category(&workers, category);
        state.sessions.write().await.insert(id, session);

        state.spawn_tip(id, request).await.expect("tip task");

        let sessions = state.sessions.read().await;
        let view = sessions.get(&id).expect("session").view();
        assert_eq!(view.tip.as_deref(), Some("Plumbers tip"));
        assert!(!view.tip_loading);
    }

    #[tokio::test]
    async fn superseded_tip_is_dropped() {
        let state = test_state(MemoryStorage::new());
        let id = Uuid::new_v4();
        let workers = state.store.read().await.workers().to_vec();

        let mut session = BrowseSession::new(state.fallback.coords, state.fallback.city.clone());
        let stale = session.select_category(&workers, *find_category("plumber").expect("plumber"));
        let fresh = session.select_category(&workers, *find_category("doctor").expect("doctor"));
        state.sessions.write().await.insert(id, session);

        state.spawn_tip(id, stale).await.expect("tip task");
        assert!(state.sessions.read().await.get(&id).expect("session").view().tip_loading);

        state.spawn_tip(id, fresh).await.expect("tip task");
        let sessions = state.sessions.read().await;
        assert_eq!(sessions.get(&id).expect("session").view().tip.as_deref(), Some("Doctors tip"));
    }

    fn session() -> BrowseSession {
        BrowseSession::new(Coordinates::new(17.385, 78.4867), "Hyderabad")
    }

    #[test]
    fn idle_sessions_are_pruned() {
        let now = Instant::now();
        let limits = SessionLimits { idle: Duration::from_secs(60), max: 100 };
        let Some(long_ago) = now.checked_sub(Duration::from_secs(120)) else {
            return;
        };

        let mut sessions = HashMap::new();
        let mut stale = session();
        stale.touch_at(long_ago);
        let stale_id = Uuid::new_v4();
        sessions.insert(stale_id, stale);
        let fresh_id = Uuid::new_v4();
        sessions.insert(fresh_id, session());

        assert_eq!(prune_sessions(&mut sessions, limits, now), 1);
        assert!(!sessions.contains_key(&stale_id));
        assert!(sessions.contains_key(&fresh_id));
    }

    #[test]
    fn full_map_drops_least_recently_used() {
        let now = Instant::now();
        let limits = SessionLimits { idle: Duration::from_secs(3600), max: 3 };
        let mut sessions = HashMap::new();
        let mut ids = Vec::new();
        for age in [30u64, 20, 10] {
            let Some(at) = now.checked_sub(Duration::from_secs(age)) else {
                return;
            };
            let mut s = session();
            s.touch_at(at);
            let id = Uuid::new_v4();
            sessions.insert(id, s);
            ids.push(id);
        }

        assert_eq!(prune_sessions(&mut sessions, limits, now), 1);
        assert!(!sessions.contains_key(&ids[0]));
        assert_eq!(sessions.len(), 2);
    }

    #[tokio::test]
    async fn opening_sessions_stays_bounded() {
        let state = test_state(MemoryStorage::new());
        for _ in 0..50 {
            state.insert_session(session()).await;
        }
        assert_eq!(state.sessions.read().await.len(), state.session_limits.max);
    }
}
