use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};

/// Kind of email notification the backend dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeNotification {
    CandidatureRecue,
    CandidatureAcceptee,
    CandidatureRefusee,
    EntretienPlanifie,
    EntretienRappel,
    EntretienAnnule,
    EntretienReporte,
    OffreEmploi,
    Bienvenue,
    Autre,
}

impl TypeNotification {
    pub const fn label(self) -> &'static str {
        match self {
            TypeNotification::CandidatureRecue => "Candidature reçue",
            TypeNotification::CandidatureAcceptee => "Candidature acceptée",
            TypeNotification::CandidatureRefusee => "Candidature refusée",
            TypeNotification::EntretienPlanifie => "Entretien planifié",
            TypeNotification::EntretienRappel => "Rappel entretien",
            TypeNotification::EntretienAnnule => "Entretien annulé",
            TypeNotification::EntretienReporte => "Entretien reporté",
            TypeNotification::OffreEmploi => "Offre d'emploi",
            TypeNotification::Bienvenue => "Bienvenue",
            TypeNotification::Autre => "Autre",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            TypeNotification::CandidatureRecue => "blue",
            TypeNotification::CandidatureAcceptee => "success",
            TypeNotification::CandidatureRefusee | TypeNotification::EntretienAnnule => "error",
            TypeNotification::EntretienPlanifie => "green",
            TypeNotification::EntretienRappel => "warning",
            TypeNotification::EntretienReporte => "orange",
            TypeNotification::OffreEmploi => "purple",
            TypeNotification::Bienvenue => "cyan",
            TypeNotification::Autre => "default",
        }
    }
}

/// Delivery state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutNotification {
    EnAttente,
    Envoye,
    Echec,
}

impl StatutNotification {
    pub const fn label(self) -> &'static str {
        match self {
            StatutNotification::EnAttente => "En attente",
            StatutNotification::Envoye => "Envoyé",
            StatutNotification::Echec => "Échec",
        }
    }
}

/// A dispatched (or pending) notification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub type_notification: TypeNotification,
    #[serde(default)]
    pub statut: Option<StatutNotification>,
    #[serde(default)]
    pub destinataire: Option<String>,
    #[serde(default)]
    pub sujet: Option<String>,
    #[serde(default)]
    pub date_creation: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_envoi: Option<NaiveDateTime>,
}

/// Client for the `/notifications` resource family. Dispatch itself is
/// the backend's job; these calls only request it.
pub struct NotificationClient {
    api: Arc<ApiClient>,
}

impl NotificationClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.api.get("/notifications").await
    }

    pub async fn recent(&self) -> Result<Vec<Notification>, ApiError> {
        self.api.get("/notifications/recent").await
    }

    pub async fn statistics(&self) -> Result<serde_json::Value, ApiError> {
        self.api.get("/notifications/statistics").await
    }

    pub async fn send_test(&self, email: &str, nom: &str) -> Result<serde_json::Value, ApiError> {
        self.api
            .post(
                "/notifications/test",
                &serde_json::json!({ "email": email, "nom": nom }),
            )
            .await
    }

    pub async fn candidature_recue(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.api.post("/notifications/candidature-recue", payload).await
    }

    pub async fn invitation_entretien(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.api
            .post("/notifications/invitation-entretien", payload)
            .await
    }

    pub async fn rappel_entretien(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.api.post("/notifications/rappel-entretien", payload).await
    }

    pub async fn acceptation(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.api.post("/notifications/acceptation", payload).await
    }
}
