//! Per-user dialogue sessions.
//!
//! Process-lifetime only: sessions are materialized lazily on first contact
//! and never deleted. A restart deliberately forgets everyone.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::PoolId;

/// Resting dialogue states. Transient actions (fun facts, explore, about,
/// help, feedback) are not states — they fire and return the user to Menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    #[default]
    Menu,
    Directions,
    Businesses,
}

impl std::fmt::Display for DialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Menu => "menu",
            Self::Directions => "directions",
            Self::Businesses => "businesses",
        };
        write!(f, "{s}")
    }
}

/// One user's dialogue context.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub state: DialogState,
    /// While set, the next quick reply is a disambiguation choice and is
    /// emitted verbatim instead of being re-parsed.
    pub clarifying: bool,
    /// Indices already shown to this user, one set per content pool.
    shown: HashMap<PoolId, HashSet<usize>>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            state: DialogState::Menu,
            clarifying: false,
            shown: HashMap::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Number of items already shown from a pool.
    pub fn shown_len(&self, pool: PoolId) -> usize {
        self.shown.get(&pool).map_or(0, HashSet::len)
    }

    /// Whether a specific index was already shown from a pool.
    pub fn was_shown(&self, pool: PoolId, index: usize) -> bool {
        self.shown.get(&pool).is_some_and(|s| s.contains(&index))
    }
}

/// In-memory session store keyed by user id.
///
/// Every operation silently materializes a default session for an unseen
/// user; nothing here can fail. There is no deletion API.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a snapshot of the user's session, creating it on first contact.
    pub fn get(&self, user_id: &str) -> Session {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(user = %user_id, "materializing fresh session");
                Session::new(user_id)
            })
            .clone()
    }

    pub fn set_state(&self, user_id: &str, state: DialogState) {
        self.with_session(user_id, |s| s.state = state);
    }

    pub fn set_clarifying(&self, user_id: &str, clarifying: bool) {
        self.with_session(user_id, |s| s.clarifying = clarifying);
    }

    pub fn record_shown(&self, user_id: &str, pool: PoolId, index: usize) {
        self.with_session(user_id, |s| {
            s.shown.entry(pool).or_default().insert(index);
        });
    }

    pub fn reset_pool(&self, user_id: &str, pool: PoolId) {
        self.with_session(user_id, |s| {
            s.shown.entry(pool).or_default().clear();
        });
    }

    pub fn shown_len(&self, user_id: &str, pool: PoolId) -> usize {
        let mut out = 0;
        self.with_session(user_id, |s| out = s.shown_len(pool));
        out
    }

    pub fn was_shown(&self, user_id: &str, pool: PoolId, index: usize) -> bool {
        let mut out = false;
        self.with_session(user_id, |s| out = s.was_shown(pool, index));
        out
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .expect("session store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_session(&self, user_id: &str, f: impl FnOnce(&mut Session)) {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        let session = sessions
            .entry(user_id.to_string())
            .or_insert_with(|| Session::new(user_id));
        f(session);
        session.last_active = Utc::now();
    }
}
