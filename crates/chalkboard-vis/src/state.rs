//! Shared server state.

use std::collections::HashMap;

use chalkboard_sorting::SequenceConfig;
use chalkboard_transit::TransitNetwork;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;

use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::workbench::Workbench;

/// Longest accepted session id.
pub const MAX_SESSION_ID: usize = 128;

/// Shared application state.
pub struct AppState {
    /// Built once and only read afterwards.
    pub network: TransitNetwork,
    pub sessions: RwLock<SessionStore>,
    pub config: VisConfig,
}

impl AppState {
    pub fn new(config: VisConfig) -> Self {
        Self {
            network: TransitNetwork::metro_manila(),
            sessions: RwLock::new(SessionStore::new(&config)),
            config,
        }
    }
}

/// A workbench with the tick of its last use.
struct Session {
    workbench: Workbench,
    last_used: u64,
}

/// Workbenches keyed by session id, plus the RNG every session draws from.
///
/// At most `max_sessions` workbenches are kept. Opening a new session at the
/// cap drops the one that has gone unused longest.
pub struct SessionStore {
    sessions: HashMap<String, Session>,
    rng: StdRng,
    sequence: SequenceConfig,
    max_sessions: usize,
    clock: u64,
}

impl SessionStore {
    pub fn new(config: &VisConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            sessions: HashMap::new(),
            rng,
            sequence: config.sequence,
            max_sessions: config.max_sessions.max(1),
            clock: 0,
        }
    }

    /// The session's workbench, created on first use, with the shared RNG.
    pub fn open(&mut self, session: &str) -> Result<(&mut Workbench, &mut StdRng)> {
        if session.is_empty() || session.len() > MAX_SESSION_ID {
            return Err(Error::InvalidInput(format!(
                "session id must be 1 to {MAX_SESSION_ID} bytes"
            )));
        }

        if !self.sessions.contains_key(session) {
            while self.sessions.len() >= self.max_sessions {
                self.evict_idlest();
            }
        }

        self.clock += 1;
        let (tick, sequence) = (self.clock, self.sequence);
        let entry = self
            .sessions
            .entry(session.to_string())
            .or_insert_with(|| {
                tracing::debug!(session, "session created");
                Session {
                    workbench: Workbench::new(sequence),
                    last_used: tick,
                }
            });
        entry.last_used = tick;
        Ok((&mut entry.workbench, &mut self.rng))
    }

    /// Read-only access to an existing session. Does not count as a use.
    pub fn get(&self, session: &str) -> Option<&Workbench> {
        self.sessions.get(session).map(|s| &s.workbench)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn evict_idlest(&mut self) {
        let idlest = self
            .sessions
            .iter()
            .min_by_key(|(_, s)| s.last_used)
            .map(|(id, _)| id.clone());
        if let Some(id) = idlest {
            self.sessions.remove(&id);
            tracing::debug!(session = %id, "idle session evicted");
        }
    }
}
