use crate::services::{CartStore, WishlistStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Header carrying the opaque session id
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Session used when the client sends no id
pub const DEFAULT_SESSION: &str = "guest";

const DEFAULT_MAX_SESSIONS: u64 = 10_000;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Per-session shopping state
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: CartStore,
    pub wishlist: WishlistStore,
}

/// Registry of sessions, bounded in size and expired after inactivity
///
/// A session is only created by a mutation that always succeeds (adding to
/// the cart or wishlist). Reads and mutations that can fail never create one.
pub struct SessionRegistry {
    sessions: moka::future::Cache<String, Arc<Mutex<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_IDLE_TIMEOUT_SECS)
    }

    pub fn with_limits(max_sessions: u64, idle_timeout_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(idle_timeout_secs))
            .build();

        Self { sessions }
    }

    /// Run `f` against the session's state, creating it on first use
    pub async fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let session = self
            .sessions
            .get_with(session_id.to_string(), async { Arc::new(Mutex::new(Session::default())) })
            .await;
        let mut session = session.lock().await;
        f(&mut session)
    }

    /// Run `f` only if the session already exists
    pub async fn with_existing<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        let session = self.sessions.get(session_id).await?;
        let mut session = session.lock().await;
        Some(f(&mut session))
    }

    /// Read-only snapshot; unknown sessions read as empty
    pub async fn snapshot(&self, session_id: &str) -> Session {
        let Some(session) = self.sessions.get(session_id).await else {
            return Session::default();
        };
        let snapshot = session.lock().await.clone();
        snapshot
    }

    pub async fn len(&self) -> usize {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count() as usize
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Session id from the request header, falling back to the guest session
pub fn session_id(req: &actix_web::HttpRequest) -> String {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}
