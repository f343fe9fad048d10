use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};
use super::Page;

/// Pipeline stage of a candidacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutCandidature {
    Nouveau,
    EnRevision,
    Preselectionne,
    EntretienRh,
    TestTechnique,
    EntretienFinal,
    OffreEnvoyee,
    Accepte,
    Refuse,
    Retire,
}

impl StatutCandidature {
    pub const fn label(self) -> &'static str {
        match self {
            StatutCandidature::Nouveau => "Nouveau",
            StatutCandidature::EnRevision => "En révision",
            StatutCandidature::Preselectionne => "Présélectionné",
            StatutCandidature::EntretienRh => "Entretien RH",
            StatutCandidature::TestTechnique => "Test technique",
            StatutCandidature::EntretienFinal => "Entretien final",
            StatutCandidature::OffreEnvoyee => "Offre envoyée",
            StatutCandidature::Accepte => "Accepté",
            StatutCandidature::Refuse => "Refusé",
            StatutCandidature::Retire => "Retiré",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            StatutCandidature::Nouveau => "blue",
            StatutCandidature::EnRevision => "cyan",
            StatutCandidature::Preselectionne => "purple",
            StatutCandidature::EntretienRh | StatutCandidature::TestTechnique => "orange",
            StatutCandidature::EntretienFinal => "gold",
            StatutCandidature::OffreEnvoyee => "lime",
            StatutCandidature::Accepte => "success",
            StatutCandidature::Refuse => "error",
            StatutCandidature::Retire => "default",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatutCandidature::Nouveau => "NOUVEAU",
            StatutCandidature::EnRevision => "EN_REVISION",
            StatutCandidature::Preselectionne => "PRESELECTIONNE",
            StatutCandidature::EntretienRh => "ENTRETIEN_RH",
            StatutCandidature::TestTechnique => "TEST_TECHNIQUE",
            StatutCandidature::EntretienFinal => "ENTRETIEN_FINAL",
            StatutCandidature::OffreEnvoyee => "OFFRE_ENVOYEE",
            StatutCandidature::Accepte => "ACCEPTE",
            StatutCandidature::Refuse => "REFUSE",
            StatutCandidature::Retire => "RETIRE",
        }
    }
}

impl Default for StatutCandidature {
    fn default() -> Self {
        StatutCandidature::Nouveau
    }
}

/// Where the candidacy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceCandidature {
    SiteCarriere,
    Linkedin,
    Indeed,
    Cooptation,
    Spontanee,
    Autre,
}

impl SourceCandidature {
    pub const fn label(self) -> &'static str {
        match self {
            SourceCandidature::SiteCarriere => "Site carrière",
            SourceCandidature::Linkedin => "LinkedIn",
            SourceCandidature::Indeed => "Indeed",
            SourceCandidature::Cooptation => "Cooptation",
            SourceCandidature::Spontanee => "Spontanée",
            SourceCandidature::Autre => "Autre",
        }
    }
}

impl Default for SourceCandidature {
    fn default() -> Self {
        SourceCandidature::SiteCarriere
    }
}

/// Recruiter note on a candidacy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentaire {
    #[serde(default)]
    pub auteur_id: Option<String>,
    #[serde(default)]
    pub auteur_nom: Option<String>,
    pub contenu: String,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub prive: bool,
}

/// One entry of the status audit trail kept by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoriqueStatut {
    #[serde(default)]
    pub ancien_statut: Option<StatutCandidature>,
    pub nouveau_statut: StatutCandidature,
    #[serde(default)]
    pub auteur_id: Option<String>,
    #[serde(default)]
    pub auteur_nom: Option<String>,
    #[serde(default)]
    pub commentaire: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
}

/// A candidacy as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidature {
    pub id: String,
    #[serde(default)]
    pub candidat_id: Option<String>,
    pub offre_id: String,
    #[serde(default)]
    pub candidat_nom: Option<String>,
    #[serde(default)]
    pub candidat_prenom: Option<String>,
    #[serde(default)]
    pub candidat_email: Option<String>,
    #[serde(default)]
    pub offre_titre: Option<String>,
    #[serde(default)]
    pub statut: StatutCandidature,
    #[serde(default)]
    pub score_matching: i32,
    #[serde(default)]
    pub lettre_motivation: Option<String>,
    #[serde(default)]
    pub commentaires: Vec<Commentaire>,
    #[serde(default)]
    pub historique: Vec<HistoriqueStatut>,
    #[serde(default)]
    pub source: SourceCandidature,
    #[serde(default)]
    pub date_postulation: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_modification: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_derniere_action: Option<NaiveDateTime>,
}

/// Submission payload. The CV itself travels out of band (the upload
/// widget owns it); this client only sends the structured fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatureRequest {
    pub offre_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lettre_motivation: Option<String>,
    pub source: SourceCandidature,
}

/// Optional criteria for the candidacy filter endpoint.
#[derive(Debug, Clone, Default)]
pub struct CandidatureFilters {
    pub offre_id: Option<String>,
    pub statut: Option<StatutCandidature>,
    pub score_min: Option<i32>,
}

impl CandidatureFilters {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(offre_id) = &self.offre_id {
            query.push(("offreId", offre_id.clone()));
        }
        if let Some(statut) = self.statut {
            query.push(("statut", statut.as_str().to_string()));
        }
        if let Some(score_min) = self.score_min {
            query.push(("scoreMin", score_min.to_string()));
        }
        query
    }
}

/// Client for the `/candidatures` resource family.
pub struct CandidatureClient {
    api: Arc<ApiClient>,
}

impl CandidatureClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CandidatureRequest) -> Result<Candidature, ApiError> {
        self.api.post("/candidatures", request).await
    }

    pub async fn list(&self) -> Result<Vec<Candidature>, ApiError> {
        self.api.get("/candidatures").await
    }

    pub async fn get(&self, id: &str) -> Result<Candidature, ApiError> {
        self.api.get(&format!("/candidatures/{id}")).await
    }

    pub async fn delete(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.api.delete(&format!("/candidatures/{id}")).await
    }

    pub async fn by_offre(&self, offre_id: &str) -> Result<Vec<Candidature>, ApiError> {
        self.api.get(&format!("/candidatures/offre/{offre_id}")).await
    }

    pub async fn by_candidat(&self, candidat_id: &str) -> Result<Vec<Candidature>, ApiError> {
        self.api
            .get(&format!("/candidatures/candidat/{candidat_id}"))
            .await
    }

    pub async fn by_statut(&self, statut: StatutCandidature) -> Result<Vec<Candidature>, ApiError> {
        self.api
            .get(&format!("/candidatures/statut/{}", statut.as_str()))
            .await
    }

    pub async fn filter(&self, filters: &CandidatureFilters) -> Result<Vec<Candidature>, ApiError> {
        self.api
            .get_query("/candidatures/filter", &filters.to_query())
            .await
    }

    pub async fn paginated(&self, page: u32, size: u32) -> Result<Page<Candidature>, ApiError> {
        self.api
            .get_query(
                "/candidatures/paginated",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<Candidature>, ApiError> {
        self.api
            .get_query("/candidatures/recent", &[("limit", limit.to_string())])
            .await
    }

    pub async fn changer_statut(
        &self,
        id: &str,
        nouveau_statut: StatutCandidature,
        commentaire: &str,
    ) -> Result<Candidature, ApiError> {
        self.api
            .patch_query(
                &format!("/candidatures/{id}/statut"),
                &[
                    ("nouveauStatut", nouveau_statut.as_str().to_string()),
                    ("commentaire", commentaire.to_string()),
                ],
            )
            .await
    }

    pub async fn ajouter_commentaire(
        &self,
        id: &str,
        contenu: &str,
        prive: bool,
    ) -> Result<Candidature, ApiError> {
        self.api
            .post(
                &format!("/candidatures/{id}/commentaires"),
                &serde_json::json!({ "contenu": contenu, "prive": prive }),
            )
            .await
    }

    pub async fn statistics(&self) -> Result<serde_json::Value, ApiError> {
        self.api.get("/candidatures/statistics").await
    }
}

/// Score badge color, same thresholds as the candidacy table.
pub const fn score_color(score: i32) -> &'static str {
    if score >= 80 {
        "#52c41a"
    } else if score >= 60 {
        "#faad14"
    } else if score >= 40 {
        "#ff7875"
    } else {
        "#f5222d"
    }
}

/// Relative "time since applied" string shown on candidacy cards.
pub fn temps_ecoule(date_postulation: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now - date_postulation;
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();

    if days > 0 {
        format!("Il y a {days} jour{}", if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("Il y a {hours} heure{}", if hours > 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("Il y a {minutes} minute{}", if minutes > 1 { "s" } else { "" })
    } else {
        "À l'instant".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    #[test]
    fn statut_labels_cover_the_pipeline() {
        assert_eq!(StatutCandidature::Nouveau.label(), "Nouveau");
        assert_eq!(StatutCandidature::EntretienRh.label(), "Entretien RH");
        assert_eq!(StatutCandidature::OffreEnvoyee.label(), "Offre envoyée");
        assert_eq!(StatutCandidature::Retire.label(), "Retiré");
    }

    #[test]
    fn statut_colors_match_the_badge_table() {
        assert_eq!(StatutCandidature::Nouveau.color(), "blue");
        assert_eq!(StatutCandidature::TestTechnique.color(), "orange");
        assert_eq!(StatutCandidature::Accepte.color(), "success");
        assert_eq!(StatutCandidature::Refuse.color(), "error");
    }

    #[test]
    fn score_color_thresholds() {
        assert_eq!(score_color(92), "#52c41a");
        assert_eq!(score_color(80), "#52c41a");
        assert_eq!(score_color(65), "#faad14");
        assert_eq!(score_color(41), "#ff7875");
        assert_eq!(score_color(12), "#f5222d");
    }

    #[test]
    fn temps_ecoule_picks_the_largest_unit() {
        let applied = at(9, 0);
        assert_eq!(temps_ecoule(applied, at(9, 0)), "À l'instant");
        assert_eq!(temps_ecoule(applied, at(9, 5)), "Il y a 5 minutes");
        assert_eq!(temps_ecoule(applied, at(11, 0)), "Il y a 2 heures");
        let next_week = NaiveDate::from_ymd_opt(2025, 6, 13)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time");
        assert_eq!(temps_ecoule(applied, next_week), "Il y a 3 jours");
    }

    #[test]
    fn candidature_deserializes_with_defaults() {
        let candidature: Candidature = serde_json::from_str(
            r#"{"id":"c-1","offreId":"o-1","statut":"EN_REVISION","scoreMatching":72}"#,
        )
        .expect("candidacy parses");
        assert_eq!(candidature.statut, StatutCandidature::EnRevision);
        assert_eq!(candidature.source, SourceCandidature::SiteCarriere);
        assert!(candidature.commentaires.is_empty());
    }
}
