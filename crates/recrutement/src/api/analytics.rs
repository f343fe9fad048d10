use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};

/// Headline counters for the recruiter dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_offres: u64,
    #[serde(default)]
    pub offres_publiees: u64,
    #[serde(default)]
    pub total_candidatures: u64,
    #[serde(default)]
    pub total_entretiens: u64,
    #[serde(default)]
    pub total_candidats: u64,
    #[serde(default)]
    pub candidatures_recentes: u64,
    #[serde(default)]
    pub entretiens_a_venir: u64,
    #[serde(default)]
    pub taux_conversion: f64,
    #[serde(default)]
    pub temps_moyen_recrutement: f64,
}

/// One month of the 12-month candidacy evolution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionMois {
    pub mois: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub acceptees: u64,
    #[serde(default)]
    pub refusees: u64,
}

/// One slice of a repartition chart (per status, type, or source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepartitionEntry {
    #[serde(alias = "statut", alias = "type", alias = "source")]
    pub cle: String,
    #[serde(default)]
    pub nombre: u64,
}

/// One row of the "top offers" table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopOffre {
    pub id: String,
    pub titre: String,
    #[serde(default)]
    pub nombre_candidatures: u64,
    #[serde(default)]
    pub nombre_vues: u64,
    #[serde(default)]
    pub taux_conversion: f64,
}

/// One row of the recruiter performance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecruteur {
    pub recruteur: String,
    #[serde(default)]
    pub nombre_offres: u64,
    #[serde(default)]
    pub nombre_candidatures: u64,
    #[serde(default)]
    pub moyenne_candidatures: f64,
}

/// Client for the read-only `/analytics` endpoints feeding the charts.
pub struct AnalyticsClient {
    api: Arc<ApiClient>,
}

impl AnalyticsClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.api.get("/analytics/dashboard").await
    }

    pub async fn evolution_candidatures(&self) -> Result<Vec<EvolutionMois>, ApiError> {
        self.api.get("/analytics/evolution-candidatures").await
    }

    pub async fn repartition_par_statut(&self) -> Result<Vec<RepartitionEntry>, ApiError> {
        self.api.get("/analytics/repartition-statut").await
    }

    pub async fn top_offres(&self) -> Result<Vec<TopOffre>, ApiError> {
        self.api.get("/analytics/top-offres").await
    }

    pub async fn repartition_entretiens(&self) -> Result<Vec<RepartitionEntry>, ApiError> {
        self.api.get("/analytics/repartition-entretiens").await
    }

    pub async fn sources_candidatures(&self) -> Result<Vec<RepartitionEntry>, ApiError> {
        self.api.get("/analytics/sources-candidatures").await
    }

    /// Matching-score histogram keyed by bucket ("0-20" … "80-100").
    pub async fn distribution_scores(&self) -> Result<HashMap<String, u64>, ApiError> {
        self.api.get("/analytics/distribution-scores").await
    }

    pub async fn stats_entretiens(&self) -> Result<serde_json::Value, ApiError> {
        self.api.get("/analytics/stats-entretiens").await
    }

    pub async fn performance_recruteurs(&self) -> Result<Vec<PerformanceRecruteur>, ApiError> {
        self.api.get("/analytics/performance-recruteurs").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_stats_tolerate_partial_payloads() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"totalOffres":14,"tauxConversion":3.5}"#)
                .expect("stats parse");
        assert_eq!(stats.total_offres, 14);
        assert_eq!(stats.taux_conversion, 3.5);
        assert_eq!(stats.total_candidats, 0);
    }

    #[test]
    fn repartition_accepts_any_key_field() {
        let by_statut: RepartitionEntry =
            serde_json::from_str(r#"{"statut":"NOUVEAU","nombre":8}"#).expect("entry parses");
        assert_eq!(by_statut.cle, "NOUVEAU");

        let by_type: RepartitionEntry =
            serde_json::from_str(r#"{"type":"ENTRETIEN_RH","nombre":3}"#).expect("entry parses");
        assert_eq!(by_type.cle, "ENTRETIEN_RH");
        assert_eq!(by_type.nombre, 3);
    }
}
