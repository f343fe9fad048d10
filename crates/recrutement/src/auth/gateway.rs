use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;

use super::role::Role;
use super::session::{SessionStore, SessionStoreError, User};

/// Credentials sent to `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration form sent to `POST /auth/register`. The selected role
/// is already canonical: callers build it through [`Role::normalize`].
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    pub role: Role,
}

/// Payload shared by the login and register endpoints. `email` is only
/// present on register responses; `role` stays raw until the gateway
/// folds it through the normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure at the wire level, before any session mutation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("authentication rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("network failure: {0}")]
    Network(String),
}

/// Seam between the gateway and the wire so tests can authenticate
/// against an in-memory backend.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, TransportError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, TransportError>;
}

/// Production transport hitting the recruitment backend over HTTP.
pub struct HttpAuthTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AuthResponse, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "auth request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<AuthResponse>()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))
        } else {
            let message = response
                .json::<BackendError>()
                .await
                .ok()
                .and_then(|payload| payload.error);
            Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Error body the backend attaches to auth rejections.
#[derive(Debug, Deserialize)]
struct BackendError {
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl AuthTransport for HttpAuthTransport {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, TransportError> {
        self.post("/auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, TransportError> {
        self.post("/auth/register", request).await
    }
}

const LOGIN_FALLBACK_MESSAGE: &str = "Erreur de connexion";
const REGISTER_FALLBACK_MESSAGE: &str = "Erreur lors de l'inscription";

/// Login/register failure surfaced to the user as an inline message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{message}")]
    Rejected { message: String },
    #[error(transparent)]
    Session(#[from] SessionStoreError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl AuthError {
    fn from_transport(err: TransportError, fallback: &str) -> Self {
        let message = match err {
            TransportError::Rejected { message, .. } => {
                message.unwrap_or_else(|| fallback.to_string())
            }
            TransportError::Network(_) => fallback.to_string(),
        };
        AuthError::Rejected { message }
    }
}

/// Entry point for the login and register views. On success the
/// session store holds the new session; on failure it is untouched.
pub struct AuthGateway<T> {
    transport: Arc<T>,
    session: Arc<SessionStore>,
}

impl<T: AuthTransport> AuthGateway<T> {
    pub fn new(transport: Arc<T>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .transport
            .login(&request)
            .await
            .map_err(|err| {
                warn!(%email, "login rejected");
                AuthError::from_transport(err, LOGIN_FALLBACK_MESSAGE)
            })?;

        // The login endpoint echoes no email back; keep the submitted one.
        let user = build_user(&response, email);
        self.session.save(&response.token, &user)?;
        info!(user = %user.email, role = user.role.as_str(), "login succeeded");
        Ok(user)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let response = self
            .transport
            .register(&request)
            .await
            .map_err(|err| AuthError::from_transport(err, REGISTER_FALLBACK_MESSAGE))?;

        let user = build_user(&response, &request.email);
        self.session.save(&response.token, &user)?;
        info!(user = %user.email, role = user.role.as_str(), "registration succeeded");
        Ok(user)
    }

    /// Local-only: drops the session, no backend call.
    pub fn logout(&self) -> Result<(), SessionStoreError> {
        info!("logout");
        self.session.clear()
    }
}

fn build_user(response: &AuthResponse, submitted_email: &str) -> User {
    User {
        user_id: response.user_id.clone(),
        email: response
            .email
            .clone()
            .unwrap_or_else(|| submitted_email.to_string()),
        nom: response.nom.clone(),
        prenom: response.prenom.clone(),
        role: Role::normalize(response.role.as_deref()),
    }
}
