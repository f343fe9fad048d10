//! Wire-level checks for the API client: bearer injection, the 401
//! session-drop policy, and backend error extraction, against a
//! one-shot HTTP server on a loopback socket.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use recrutement::auth::role::Role;
    use recrutement::auth::session::{SessionStore, SessionVault, User, VaultError};

    #[derive(Default)]
    pub struct MemoryVault {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryVault {
        pub fn len(&self) -> usize {
            self.entries.lock().expect("vault mutex poisoned").len()
        }
    }

    impl SessionVault for MemoryVault {
        fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
            Ok(self
                .entries
                .lock()
                .expect("vault mutex poisoned")
                .get(key)
                .cloned())
        }

        fn put(&self, key: &str, value: &str) -> Result<(), VaultError> {
            self.entries
                .lock()
                .expect("vault mutex poisoned")
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<(), VaultError> {
            self.entries
                .lock()
                .expect("vault mutex poisoned")
                .remove(key);
            Ok(())
        }
    }

    pub fn authenticated_store(token: &str) -> (Arc<MemoryVault>, Arc<SessionStore>) {
        let vault = Arc::new(MemoryVault::default());
        let store = Arc::new(SessionStore::new(vault.clone()));
        store.hydrate().expect("hydrate succeeds");
        store
            .save(
                token,
                &User {
                    user_id: "u-9".to_string(),
                    email: "marc.petit@example.com".to_string(),
                    nom: "Petit".to_string(),
                    prenom: "Marc".to_string(),
                    role: Role::Recruteur,
                },
            )
            .expect("save succeeds");
        (vault, store)
    }

    /// Serves exactly one request with the given status and JSON body,
    /// then resolves to the raw request text for header assertions.
    pub async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback");
        let base_url = format!("http://{}/api", listener.local_addr().expect("local addr"));
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let read = socket.read(&mut buf).await.expect("read request");
                request.extend_from_slice(&buf[..read]);
                if read == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }
}

use std::sync::Arc;

use recrutement::api::{ApiClient, ApiError, Page};
use recrutement::api::offres::Offre;
use recrutement::auth::session::{SessionState, SessionStore};
use recrutement::config::ApiConfig;

use common::{authenticated_store, serve_once, MemoryVault};

fn client(base_url: String, session: Arc<SessionStore>) -> ApiClient {
    let config = ApiConfig {
        base_url,
        timeout_secs: 5,
    };
    ApiClient::new(&config, session).expect("client builds")
}

#[tokio::test]
async fn bearer_token_is_attached_to_requests() {
    let (_vault, session) = authenticated_store("jwt-bearer-check");
    let (base_url, server) = serve_once("200 OK", "[]").await;

    let offres: Vec<Offre> = client(base_url, session)
        .get("/offres")
        .await
        .expect("request succeeds");
    assert!(offres.is_empty());

    let request = server.await.expect("server task").to_lowercase();
    assert!(request.starts_with("get /api/offres http/1.1"));
    assert!(request.contains("authorization: bearer jwt-bearer-check"));
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization_header() {
    let vault = Arc::new(MemoryVault::default());
    let session = Arc::new(SessionStore::new(vault));
    session.hydrate().expect("hydrate succeeds");
    let (base_url, server) = serve_once("200 OK", "[]").await;

    let _: Vec<Offre> = client(base_url, session)
        .get("/offres/actives")
        .await
        .expect("request succeeds");

    let request = server.await.expect("server task").to_lowercase();
    assert!(!request.contains("authorization:"));
}

#[tokio::test]
async fn response_401_drops_the_session_and_reports_unauthorized() {
    let (vault, session) = authenticated_store("jwt-expired");
    let (base_url, _server) = serve_once("401 Unauthorized", "{\"error\":\"expiré\"}").await;

    let err = client(base_url, session.clone())
        .get::<Vec<Offre>>("/offres")
        .await
        .expect_err("request fails");

    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(session.current().state(), SessionState::Anonymous);
    assert_eq!(vault.len(), 0, "durable entries removed too");
}

#[tokio::test]
async fn backend_error_payload_becomes_the_user_message() {
    let (_vault, session) = authenticated_store("jwt-ok");
    let (base_url, _server) =
        serve_once("400 Bad Request", "{\"error\":\"Titre obligatoire\"}").await;

    let err = client(base_url, session)
        .get::<Vec<Offre>>("/offres")
        .await
        .expect_err("request fails");

    match &err {
        ApiError::Status { status, .. } => assert_eq!(*status, 400),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Titre obligatoire");
}

#[tokio::test]
async fn paginated_payload_parses_into_a_page() {
    let (_vault, session) = authenticated_store("jwt-ok");
    let body = r#"{
        "content": [{"id": "o-1", "titre": "Développeur Rust"}],
        "totalElements": 1,
        "totalPages": 1,
        "number": 0,
        "size": 10
    }"#;
    let (base_url, _server) = serve_once("200 OK", body).await;

    let page: Page<Offre> = client(base_url, session)
        .get_query("/offres/paginated", &[("page", "0".to_string())])
        .await
        .expect("request succeeds");

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].titre, "Développeur Rust");
}
