use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use recrutement::api::ApiClient;
use recrutement::auth::gateway::{AuthError, AuthGateway, HttpAuthTransport};
use recrutement::auth::session::{SessionStore, SessionStoreError, SessionVault, VaultError};
use recrutement::config::AppConfig;
use recrutement::error::AppError;
use recrutement::telemetry;

/// Shared wiring behind every command: configuration, the hydrated
/// session store, and the authenticated HTTP clients.
pub(crate) struct App {
    pub(crate) config: AppConfig,
    pub(crate) session: Arc<SessionStore>,
    pub(crate) api: Arc<ApiClient>,
    pub(crate) auth: AuthGateway<HttpAuthTransport>,
}

impl App {
    pub(crate) fn init() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;

        let vault = FileSessionVault::open(&config.storage.session_file)
            .map_err(SessionStoreError::from)?;
        let session = Arc::new(SessionStore::new(Arc::new(vault)));
        session.hydrate()?;

        let api = Arc::new(ApiClient::new(&config.api, session.clone())?);
        let transport = HttpAuthTransport::new(&config.api).map_err(AuthError::from)?;
        let auth = AuthGateway::new(Arc::new(transport), session.clone());

        Ok(Self {
            config,
            session,
            api,
            auth,
        })
    }
}

/// Durable session vault kept as a small JSON object on disk, the
/// console's stand-in for the browser's localStorage.
///
/// Writes go through a sibling temp file and a rename so a crash never
/// leaves a torn file behind. An unreadable file starts empty; the
/// token/user pairing checks live in the session store, not here.
pub(crate) struct FileSessionVault {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionVault {
    pub(crate) fn open(path: &Path) -> Result<Self, VaultError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| VaultError::Unavailable(err.to_string()))?;
        }

        let entries = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(%err, path = %path.display(), "session file unreadable, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(VaultError::Unavailable(err.to_string())),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), VaultError> {
        let encoded = serde_json::to_string_pretty(entries)
            .map_err(|err| VaultError::Unavailable(err.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(|err| VaultError::Unavailable(err.to_string()))?;
        fs::rename(&staging, &self.path).map_err(|err| VaultError::Unavailable(err.to_string()))
    }
}

impl SessionVault for FileSessionVault {
    fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        Ok(self
            .entries
            .lock()
            .expect("vault mutex poisoned")
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), VaultError> {
        let mut guard = self.entries.lock().expect("vault mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn delete(&self, key: &str) -> Result<(), VaultError> {
        let mut guard = self.entries.lock().expect("vault mutex poisoned");
        guard.remove(key);
        self.persist(&guard)
    }
}

/// Parses a backend enum value from CLI input through its wire name,
/// accepting lowercase and dashes ("en-cours-examen").
pub(crate) fn parse_wire_enum<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, String> {
    let canonical = raw.trim().to_uppercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(canonical))
        .map_err(|_| format!("valeur inconnue '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recrutement::api::candidatures::StatutCandidature;
    use recrutement::api::offres::StatutOffre;

    #[test]
    fn vault_round_trips_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let vault = FileSessionVault::open(&path).expect("open succeeds");
        vault.put("token", "jwt-abc").expect("put succeeds");
        vault.put("user", "{\"userId\":\"u-1\"}").expect("put succeeds");

        let reopened = FileSessionVault::open(&path).expect("reopen succeeds");
        assert_eq!(
            reopened.get("token").expect("get succeeds").as_deref(),
            Some("jwt-abc")
        );
    }

    #[test]
    fn delete_is_durable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let vault = FileSessionVault::open(&path).expect("open succeeds");
        vault.put("token", "jwt-abc").expect("put succeeds");
        vault.delete("token").expect("delete succeeds");

        let reopened = FileSessionVault::open(&path).expect("reopen succeeds");
        assert_eq!(reopened.get("token").expect("get succeeds"), None);
    }

    #[test]
    fn unreadable_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "]]not json[[").expect("write succeeds");

        let vault = FileSessionVault::open(&path).expect("open tolerates corruption");
        assert_eq!(vault.get("token").expect("get succeeds"), None);
    }

    #[test]
    fn persist_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let vault = FileSessionVault::open(&path).expect("open succeeds");
        vault.put("token", "jwt-abc").expect("put succeeds");

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn wire_enum_parser_accepts_relaxed_input() {
        assert_eq!(
            parse_wire_enum::<StatutCandidature>("en-revision"),
            Ok(StatutCandidature::EnRevision)
        );
        assert_eq!(
            parse_wire_enum::<StatutOffre>("publiee"),
            Ok(StatutOffre::Publiee)
        );
        assert!(parse_wire_enum::<StatutOffre>("publie").is_err());
    }
}
