use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::role::Role;

/// Storage key for the bearer token entry.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized user entry.
pub const USER_KEY: &str = "user";

/// The authenticated user as the client holds it between navigations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

/// Client-held authentication state.
///
/// Invariant: `token` and `user` are present or absent together; the
/// store writes and clears them as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            token: None,
            user: None,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Loading
        } else if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

/// Observable lifecycle of the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticated,
    Anonymous,
}

/// Durable string-keyed storage for the two session entries, the
/// counterpart of the browser's localStorage. Injectable so tests run
/// against an in-memory double.
pub trait SessionVault: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, VaultError>;
    fn put(&self, key: &str, value: &str) -> Result<(), VaultError>;
    fn delete(&self, key: &str) -> Result<(), VaultError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("session vault unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error("failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Process-wide session state backed by a durable vault.
///
/// Reads and writes go through one lock so no reader ever observes a
/// token without its user or the reverse.
pub struct SessionStore {
    vault: Arc<dyn SessionVault>,
    state: Mutex<Session>,
}

impl SessionStore {
    /// A fresh store reports `loading` until [`hydrate`](Self::hydrate)
    /// has run, mirroring the shell's startup check.
    pub fn new(vault: Arc<dyn SessionVault>) -> Self {
        Self {
            vault,
            state: Mutex::new(Session {
                token: None,
                user: None,
                loading: true,
            }),
        }
    }

    /// Re-load the persisted session at startup.
    ///
    /// A malformed or half-written pair self-heals: both entries are
    /// removed and an anonymous session is returned. Corruption never
    /// surfaces to callers. The persisted role string is re-normalized
    /// as part of user decoding.
    pub fn hydrate(&self) -> Result<Session, SessionStoreError> {
        let token = self.vault.get(TOKEN_KEY)?;
        let raw_user = self.vault.get(USER_KEY)?;

        let session = match (token, raw_user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    debug!(user = %user.email, "session restored from vault");
                    Session {
                        token: Some(token),
                        user: Some(user),
                        loading: false,
                    }
                }
                Err(err) => {
                    warn!(%err, "persisted user record unreadable, clearing session");
                    self.wipe_vault()?;
                    Session::anonymous()
                }
            },
            (None, None) => Session::anonymous(),
            // One entry without the other breaks the pairing invariant;
            // treat it as corruption and start over.
            _ => {
                warn!("half-written session entries found, clearing session");
                self.wipe_vault()?;
                Session::anonymous()
            }
        };

        let mut guard = self.state.lock().expect("session mutex poisoned");
        *guard = session.clone();
        Ok(session)
    }

    /// Persist a new authenticated session, replacing any previous one.
    pub fn save(&self, token: &str, user: &User) -> Result<(), SessionStoreError> {
        let encoded = serde_json::to_string(user)?;
        let mut guard = self.state.lock().expect("session mutex poisoned");
        self.vault.put(TOKEN_KEY, token)?;
        self.vault.put(USER_KEY, &encoded)?;
        *guard = Session {
            token: Some(token.to_string()),
            user: Some(user.clone()),
            loading: false,
        };
        Ok(())
    }

    /// Drop the session from memory and from the vault.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        let mut guard = self.state.lock().expect("session mutex poisoned");
        self.wipe_vault()?;
        *guard = Session::anonymous();
        Ok(())
    }

    /// Snapshot of the in-memory session.
    pub fn current(&self) -> Session {
        self.state.lock().expect("session mutex poisoned").clone()
    }

    /// Bearer token for outbound requests, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.state
            .lock()
            .expect("session mutex poisoned")
            .token
            .clone()
    }

    fn wipe_vault(&self) -> Result<(), VaultError> {
        self.vault.delete(TOKEN_KEY)?;
        self.vault.delete(USER_KEY)
    }
}
