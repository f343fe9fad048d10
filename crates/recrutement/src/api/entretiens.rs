use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::candidatures::Candidature;
use super::client::{ApiClient, ApiError};
use super::Page;

/// Kind of interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeEntretien {
    EntretienRh,
    EntretienTechnique,
    EntretienManager,
    EntretienFinal,
    TestTechnique,
    AssessmentCenter,
    Autre,
}

impl TypeEntretien {
    pub const fn label(self) -> &'static str {
        match self {
            TypeEntretien::EntretienRh => "Entretien RH",
            TypeEntretien::EntretienTechnique => "Entretien Technique",
            TypeEntretien::EntretienManager => "Entretien Manager",
            TypeEntretien::EntretienFinal => "Entretien Final",
            TypeEntretien::TestTechnique => "Test Technique",
            TypeEntretien::AssessmentCenter => "Assessment Center",
            TypeEntretien::Autre => "Autre",
        }
    }
}

impl Default for TypeEntretien {
    fn default() -> Self {
        TypeEntretien::EntretienRh
    }
}

/// Scheduling lifecycle of an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutEntretien {
    Planifie,
    Confirme,
    EnCours,
    Termine,
    Evalue,
    Annule,
    Reporte,
}

impl StatutEntretien {
    pub const fn label(self) -> &'static str {
        match self {
            StatutEntretien::Planifie => "Planifié",
            StatutEntretien::Confirme => "Confirmé",
            StatutEntretien::EnCours => "En cours",
            StatutEntretien::Termine => "Terminé",
            StatutEntretien::Evalue => "Évalué",
            StatutEntretien::Annule => "Annulé",
            StatutEntretien::Reporte => "Reporté",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatutEntretien::Planifie => "PLANIFIE",
            StatutEntretien::Confirme => "CONFIRME",
            StatutEntretien::EnCours => "EN_COURS",
            StatutEntretien::Termine => "TERMINE",
            StatutEntretien::Evalue => "EVALUE",
            StatutEntretien::Annule => "ANNULE",
            StatutEntretien::Reporte => "REPORTE",
        }
    }
}

impl Default for StatutEntretien {
    fn default() -> Self {
        StatutEntretien::Planifie
    }
}

/// Where the interview takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeLieu {
    Presentiel,
    Visio,
    Telephonique,
}

impl Default for TypeLieu {
    fn default() -> Self {
        TypeLieu::Presentiel
    }
}

/// An interview as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entretien {
    pub id: String,
    pub candidature_id: String,
    #[serde(default)]
    pub candidat_id: Option<String>,
    #[serde(default)]
    pub offre_id: Option<String>,
    #[serde(default)]
    pub candidat_nom: Option<String>,
    #[serde(default)]
    pub candidat_prenom: Option<String>,
    #[serde(default)]
    pub candidat_email: Option<String>,
    #[serde(default)]
    pub offre_titre: Option<String>,
    #[serde(rename = "type", default)]
    pub type_entretien: TypeEntretien,
    #[serde(default)]
    pub titre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_debut: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_fin: Option<NaiveDateTime>,
    #[serde(default)]
    pub duree_minutes: Option<u32>,
    #[serde(default)]
    pub type_lieu: TypeLieu,
    #[serde(default)]
    pub lieu: Option<String>,
    #[serde(default)]
    pub salle: Option<String>,
    #[serde(default)]
    pub interviewers_ids: Vec<String>,
    #[serde(default)]
    pub interviewers_noms: Vec<String>,
    #[serde(default)]
    pub statut: StatutEntretien,
    #[serde(default)]
    pub evaluation_globale: Option<u8>,
}

/// An interview joined with the candidacy it belongs to, produced by
/// the client-side merge for candidate views.
#[derive(Debug, Clone, PartialEq)]
pub struct EntretienAvecCandidature {
    pub entretien: Entretien,
    pub candidature: Candidature,
}

/// Scheduling payload for creating or rescheduling an interview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntretienRequest {
    pub candidature_id: String,
    #[serde(rename = "type")]
    pub type_entretien: TypeEntretien,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_debut: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree_minutes: Option<u32>,
    pub type_lieu: TypeLieu,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lieu: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interviewers_ids: Vec<String>,
}

/// Client for the `/entretiens` resource family.
pub struct EntretienClient {
    api: Arc<ApiClient>,
}

impl EntretienClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &EntretienRequest) -> Result<Entretien, ApiError> {
        self.api.post("/entretiens", request).await
    }

    pub async fn list(&self) -> Result<Vec<Entretien>, ApiError> {
        self.api.get("/entretiens").await
    }

    pub async fn get(&self, id: &str) -> Result<Entretien, ApiError> {
        self.api.get(&format!("/entretiens/{id}")).await
    }

    pub async fn update(&self, id: &str, request: &EntretienRequest) -> Result<Entretien, ApiError> {
        self.api.put(&format!("/entretiens/{id}"), request).await
    }

    pub async fn delete(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.api.delete(&format!("/entretiens/{id}")).await
    }

    pub async fn by_candidature(&self, candidature_id: &str) -> Result<Vec<Entretien>, ApiError> {
        self.api
            .get(&format!("/entretiens/candidature/{candidature_id}"))
            .await
    }

    /// Interviews for one candidate, joined with their candidacies.
    ///
    /// The backend has no per-candidate interview endpoint, so this
    /// mirrors the shell's client-side merge: fetch the candidate's
    /// candidacies, fetch all interviews, keep the intersection.
    pub async fn by_candidat(
        &self,
        candidat_id: &str,
    ) -> Result<Vec<EntretienAvecCandidature>, ApiError> {
        let candidatures: Vec<Candidature> = self
            .api
            .get(&format!("/candidatures/candidat/{candidat_id}"))
            .await?;
        let entretiens: Vec<Entretien> = self.api.get("/entretiens").await?;

        Ok(join_entretiens_candidatures(entretiens, candidatures))
    }

    pub async fn by_statut(&self, statut: StatutEntretien) -> Result<Vec<Entretien>, ApiError> {
        self.api
            .get(&format!("/entretiens/statut/{}", statut.as_str()))
            .await
    }

    pub async fn aujourdhui(&self) -> Result<Vec<Entretien>, ApiError> {
        self.api.get("/entretiens/aujourdhui").await
    }

    pub async fn a_venir(&self) -> Result<Vec<Entretien>, ApiError> {
        self.api.get("/entretiens/a-venir").await
    }

    pub async fn passes(&self) -> Result<Vec<Entretien>, ApiError> {
        self.api.get("/entretiens/passes").await
    }

    pub async fn by_periode(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<Entretien>, ApiError> {
        self.api
            .get_query(
                "/entretiens/periode",
                &[("debut", debut.to_string()), ("fin", fin.to_string())],
            )
            .await
    }

    pub async fn paginated(&self, page: u32, size: u32) -> Result<Page<Entretien>, ApiError> {
        self.api
            .get_query(
                "/entretiens/paginated",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await
    }

    pub async fn changer_statut(
        &self,
        id: &str,
        nouveau_statut: StatutEntretien,
    ) -> Result<Entretien, ApiError> {
        self.api
            .patch_query(
                &format!("/entretiens/{id}/statut"),
                &[("nouveauStatut", nouveau_statut.as_str().to_string())],
            )
            .await
    }

    pub async fn ajouter_evaluation(
        &self,
        id: &str,
        evaluation: &serde_json::Value,
    ) -> Result<Entretien, ApiError> {
        self.api
            .post(&format!("/entretiens/{id}/evaluations"), evaluation)
            .await
    }

    pub async fn statistics(&self) -> Result<serde_json::Value, ApiError> {
        self.api.get("/entretiens/statistics").await
    }
}

/// Keep the interviews belonging to one of the given candidacies and
/// attach the candidacy to each. Pure so candidate views are testable
/// without a backend.
pub fn join_entretiens_candidatures(
    entretiens: Vec<Entretien>,
    candidatures: Vec<Candidature>,
) -> Vec<EntretienAvecCandidature> {
    entretiens
        .into_iter()
        .filter_map(|entretien| {
            candidatures
                .iter()
                .find(|candidature| candidature.id == entretien.candidature_id)
                .cloned()
                .map(|candidature| EntretienAvecCandidature {
                    entretien,
                    candidature,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::candidatures::StatutCandidature;

    fn entretien(id: &str, candidature_id: &str) -> Entretien {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "candidatureId": candidature_id,
        }))
        .expect("interview parses")
    }

    fn candidature(id: &str) -> Candidature {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "offreId": "o-1",
        }))
        .expect("candidacy parses")
    }

    #[test]
    fn join_keeps_only_the_candidates_interviews() {
        let entretiens = vec![
            entretien("e-1", "c-1"),
            entretien("e-2", "c-9"),
            entretien("e-3", "c-2"),
        ];
        let candidatures = vec![candidature("c-1"), candidature("c-2")];

        let joined = join_entretiens_candidatures(entretiens, candidatures);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].entretien.id, "e-1");
        assert_eq!(joined[0].candidature.id, "c-1");
        assert_eq!(joined[1].entretien.id, "e-3");
    }

    #[test]
    fn join_is_empty_when_the_candidate_has_no_candidacies() {
        let joined = join_entretiens_candidatures(vec![entretien("e-1", "c-1")], Vec::new());
        assert!(joined.is_empty());
    }

    #[test]
    fn entretien_defaults_match_the_backend() {
        let parsed = entretien("e-1", "c-1");
        assert_eq!(parsed.type_entretien, TypeEntretien::EntretienRh);
        assert_eq!(parsed.statut, StatutEntretien::Planifie);
        assert_eq!(parsed.type_lieu, TypeLieu::Presentiel);
        // Unrelated default, sanity-checks the shared derive setup.
        assert_eq!(candidature("c-1").statut, StatutCandidature::Nouveau);
    }

    #[test]
    fn statut_labels() {
        assert_eq!(StatutEntretien::Planifie.label(), "Planifié");
        assert_eq!(StatutEntretien::Evalue.label(), "Évalué");
        assert_eq!(TypeEntretien::AssessmentCenter.label(), "Assessment Center");
    }
}
