use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};
use super::Page;

/// Contract type of a job offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeContrat {
    Cdi,
    Cdd,
    Stage,
    Alternance,
    Freelance,
    Interim,
}

impl TypeContrat {
    pub const fn label(self) -> &'static str {
        match self {
            TypeContrat::Cdi => "CDI",
            TypeContrat::Cdd => "CDD",
            TypeContrat::Stage => "Stage",
            TypeContrat::Alternance => "Alternance",
            TypeContrat::Freelance => "Freelance",
            TypeContrat::Interim => "Intérim",
        }
    }

    /// Wire spelling used in query parameters.
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeContrat::Cdi => "CDI",
            TypeContrat::Cdd => "CDD",
            TypeContrat::Stage => "STAGE",
            TypeContrat::Alternance => "ALTERNANCE",
            TypeContrat::Freelance => "FREELANCE",
            TypeContrat::Interim => "INTERIM",
        }
    }
}

/// Publication lifecycle of an offer, owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutOffre {
    Brouillon,
    Publiee,
    Expiree,
    Pourvue,
    Archivee,
}

impl StatutOffre {
    pub const fn label(self) -> &'static str {
        match self {
            StatutOffre::Brouillon => "Brouillon",
            StatutOffre::Publiee => "Publiée",
            StatutOffre::Expiree => "Expirée",
            StatutOffre::Pourvue => "Pourvue",
            StatutOffre::Archivee => "Archivée",
        }
    }

    /// Wire spelling used in path segments and query parameters.
    pub const fn as_str(self) -> &'static str {
        match self {
            StatutOffre::Brouillon => "BROUILLON",
            StatutOffre::Publiee => "PUBLIEE",
            StatutOffre::Expiree => "EXPIREE",
            StatutOffre::Pourvue => "POURVUE",
            StatutOffre::Archivee => "ARCHIVEE",
        }
    }

    /// Badge color used by the offer list views.
    pub const fn color(self) -> &'static str {
        match self {
            StatutOffre::Publiee => "success",
            StatutOffre::Expiree => "warning",
            StatutOffre::Pourvue => "processing",
            StatutOffre::Brouillon | StatutOffre::Archivee => "default",
        }
    }
}

impl Default for StatutOffre {
    fn default() -> Self {
        StatutOffre::Brouillon
    }
}

/// A job offer as returned by the backend. Transient, non-authoritative;
/// views re-fetch after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offre {
    pub id: String,
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub competences_requises: Vec<String>,
    #[serde(default)]
    pub competences_souhaitees: Vec<String>,
    #[serde(default)]
    pub localisation: Option<String>,
    #[serde(default)]
    pub type_contrat: Option<TypeContrat>,
    #[serde(default)]
    pub departement: Option<String>,
    #[serde(default)]
    pub experience_requise: Option<u32>,
    #[serde(default)]
    pub salaire_min: Option<f64>,
    #[serde(default)]
    pub salaire_max: Option<f64>,
    #[serde(default)]
    pub devise_monnaie: Option<String>,
    #[serde(default)]
    pub statut: StatutOffre,
    #[serde(default)]
    pub date_publication: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_expiration: Option<NaiveDateTime>,
    #[serde(default)]
    pub createur_id: Option<String>,
    #[serde(default)]
    pub createur_nom: Option<String>,
    #[serde(default)]
    pub nombre_vues: u32,
    #[serde(default)]
    pub nombre_candidatures: u32,
    #[serde(default)]
    pub teletravail_possible: bool,
    #[serde(default)]
    pub avantages: Vec<String>,
    #[serde(default)]
    pub date_creation: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_modification: Option<NaiveDateTime>,
}

/// Create/update payload for an offer.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffreRequest {
    pub titre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub competences_requises: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_contrat: Option<TypeContrat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_requise: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salaire_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salaire_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devise_monnaie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_expiration: Option<NaiveDateTime>,
    pub teletravail_possible: bool,
}

/// Optional criteria for the offer filter endpoint.
#[derive(Debug, Clone, Default)]
pub struct OffreFilters {
    pub statut: Option<StatutOffre>,
    pub type_contrat: Option<TypeContrat>,
    pub departement: Option<String>,
    pub localisation: Option<String>,
}

impl OffreFilters {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(statut) = self.statut {
            query.push(("statut", statut.as_str().to_string()));
        }
        if let Some(contrat) = self.type_contrat {
            query.push(("typeContrat", contrat.as_str().to_string()));
        }
        if let Some(departement) = &self.departement {
            query.push(("departement", departement.clone()));
        }
        if let Some(localisation) = &self.localisation {
            query.push(("localisation", localisation.clone()));
        }
        query
    }
}

/// Client for the `/offres` resource family.
pub struct OffreClient {
    api: Arc<ApiClient>,
}

impl OffreClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create(&self, offre: &OffreRequest) -> Result<Offre, ApiError> {
        self.api.post("/offres", offre).await
    }

    pub async fn list(&self) -> Result<Vec<Offre>, ApiError> {
        self.api.get("/offres").await
    }

    pub async fn get(&self, id: &str) -> Result<Offre, ApiError> {
        self.api.get(&format!("/offres/{id}")).await
    }

    pub async fn update(&self, id: &str, offre: &OffreRequest) -> Result<Offre, ApiError> {
        self.api.put(&format!("/offres/{id}"), offre).await
    }

    pub async fn delete(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.api.delete(&format!("/offres/{id}")).await
    }

    pub async fn paginated(
        &self,
        page: u32,
        size: u32,
        sort_by: &str,
    ) -> Result<Page<Offre>, ApiError> {
        self.api
            .get_query(
                "/offres/paginated",
                &[
                    ("page", page.to_string()),
                    ("size", size.to_string()),
                    ("sortBy", sort_by.to_string()),
                ],
            )
            .await
    }

    pub async fn search(&self, keyword: &str, page: u32, size: u32) -> Result<Page<Offre>, ApiError> {
        self.api
            .get_query(
                "/offres/search",
                &[
                    ("keyword", keyword.to_string()),
                    ("page", page.to_string()),
                    ("size", size.to_string()),
                ],
            )
            .await
    }

    pub async fn filter(&self, filters: &OffreFilters) -> Result<Vec<Offre>, ApiError> {
        self.api.get_query("/offres/filter", &filters.to_query()).await
    }

    pub async fn search_by_competences(
        &self,
        competences: &[String],
    ) -> Result<Vec<Offre>, ApiError> {
        self.api.post("/offres/search/competences", competences).await
    }

    pub async fn by_statut(&self, statut: StatutOffre) -> Result<Vec<Offre>, ApiError> {
        self.api
            .get(&format!("/offres/statut/{}", statut.as_str()))
            .await
    }

    pub async fn actives(&self) -> Result<Vec<Offre>, ApiError> {
        self.api.get("/offres/actives").await
    }

    /// Offers created by the authenticated recruiter.
    pub async fn mes_offres(&self) -> Result<Vec<Offre>, ApiError> {
        self.api.get("/offres/mes-offres").await
    }

    pub async fn publier(&self, id: &str) -> Result<Offre, ApiError> {
        self.api.patch(&format!("/offres/{id}/publier")).await
    }

    pub async fn archiver(&self, id: &str) -> Result<Offre, ApiError> {
        self.api.patch(&format!("/offres/{id}/archiver")).await
    }

    pub async fn marquer_pourvue(&self, id: &str) -> Result<Offre, ApiError> {
        self.api.patch(&format!("/offres/{id}/pourvue")).await
    }

    pub async fn stats(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.api.get(&format!("/offres/{id}/stats")).await
    }

    pub async fn count_by_statut(&self) -> Result<HashMap<String, u64>, ApiError> {
        self.api.get("/offres/statistics/count-by-statut").await
    }

    pub async fn check_expired(&self) -> Result<serde_json::Value, ApiError> {
        self.api.post_empty("/offres/check-expired").await
    }
}

/// Salary range formatted for display, matching the offer cards.
pub fn format_salaire(min: Option<f64>, max: Option<f64>, devise: &str) -> String {
    let symbol = match devise {
        "EUR" => "€",
        "USD" => "$",
        other => other,
    };

    match (min, max) {
        (Some(min), Some(max)) => format!("{min} - {max} {symbol}"),
        (Some(min), None) => format!("À partir de {min} {symbol}"),
        (None, Some(max)) => format!("Jusqu'à {max} {symbol}"),
        (None, None) => "Non spécifié".to_string(),
    }
}

/// Days until expiration, rounded up like the offer list badge.
pub fn jours_restants(expiration: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let seconds = (expiration - now).num_seconds();
    (seconds as f64 / 86_400.0).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn statut_labels_and_colors() {
        assert_eq!(StatutOffre::Publiee.label(), "Publiée");
        assert_eq!(StatutOffre::Publiee.color(), "success");
        assert_eq!(StatutOffre::Expiree.color(), "warning");
        assert_eq!(StatutOffre::Pourvue.color(), "processing");
        assert_eq!(StatutOffre::Brouillon.color(), "default");
    }

    #[test]
    fn contrat_labels() {
        assert_eq!(TypeContrat::Cdi.label(), "CDI");
        assert_eq!(TypeContrat::Interim.label(), "Intérim");
    }

    #[test]
    fn salaire_formats_every_combination() {
        assert_eq!(format_salaire(Some(30000.0), Some(45000.0), "EUR"), "30000 - 45000 €");
        assert_eq!(format_salaire(Some(30000.0), None, "USD"), "À partir de 30000 $");
        assert_eq!(format_salaire(None, Some(45000.0), "DH"), "Jusqu'à 45000 DH");
        assert_eq!(format_salaire(None, None, "EUR"), "Non spécifié");
    }

    #[test]
    fn jours_restants_rounds_up() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time");
        let expiration = NaiveDate::from_ymd_opt(2025, 6, 4)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time");
        assert_eq!(jours_restants(expiration, now), 3);
        assert_eq!(jours_restants(now, expiration), -2);
    }

    #[test]
    fn offre_deserializes_with_missing_optionals() {
        let offre: Offre = serde_json::from_str(
            r#"{"id":"o-1","titre":"Développeur Rust","statut":"PUBLIEE","typeContrat":"CDI"}"#,
        )
        .expect("offer parses");
        assert_eq!(offre.statut, StatutOffre::Publiee);
        assert_eq!(offre.type_contrat, Some(TypeContrat::Cdi));
        assert!(offre.competences_requises.is_empty());
        assert_eq!(offre.nombre_candidatures, 0);
    }
}
