use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Canonical role used everywhere the client branches on access rights.
///
/// The backend has shipped several spellings for the same role over
/// time, so raw strings never cross this module's boundary: they are
/// folded through [`Role::normalize`] on login, registration, and
/// session re-hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Recruteur,
    Candidat,
    Interviewer,
    Admin,
}

/// Known backend spellings, including the historical RECRUITLUR typo.
const ROLE_ALIASES: &[(&str, Role)] = &[
    ("RECRUTEUR", Role::Recruteur),
    ("RECRUITER", Role::Recruteur),
    ("RECRUITLUR", Role::Recruteur),
    ("CANDIDAT", Role::Candidat),
    ("CANDIDATE", Role::Candidat),
    ("INTERVIEWER", Role::Interviewer),
    ("ADMIN", Role::Admin),
];

impl Role {
    /// Fallback when the backend sends nothing, or something the alias
    /// table does not know. Deliberately lossy: an unrecognized role is
    /// treated as a recruiter rather than rejected.
    pub const DEFAULT: Role = Role::Recruteur;

    /// Map a raw backend role string to its canonical role.
    ///
    /// Case-insensitive; `None`, empty, and whitespace-only input all
    /// resolve to [`Role::DEFAULT`]. Idempotent: normalizing a
    /// canonical spelling returns the same role.
    pub fn normalize(raw: Option<&str>) -> Role {
        let raw = match raw {
            Some(value) => value.trim(),
            None => return Role::DEFAULT,
        };
        if raw.is_empty() {
            return Role::DEFAULT;
        }

        let upper = raw.to_ascii_uppercase();
        ROLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == upper)
            .map(|(_, role)| *role)
            .unwrap_or(Role::DEFAULT)
    }

    /// Canonical wire spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Recruteur => "RECRUTEUR",
            Role::Candidat => "CANDIDAT",
            Role::Interviewer => "INTERVIEWER",
            Role::Admin => "ADMIN",
        }
    }

    /// Display label for the console views.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Recruteur => "Recruteur",
            Role::Candidat => "Candidat",
            Role::Interviewer => "Interviewer",
            Role::Admin => "Administrateur",
        }
    }

    /// Default view a role lands on after authentication.
    pub const fn landing_path(self) -> &'static str {
        match self {
            Role::Recruteur => "/dashboard",
            Role::Candidat => "/candidat/dashboard",
            Role::Interviewer => "/interviewer/dashboard",
            Role::Admin => "/dashboard",
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Persisted sessions may carry pre-normalization spellings;
        // fold them through the alias table instead of failing.
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Role::normalize(raw.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_table_maps_every_known_spelling() {
        for &(alias, expected) in ROLE_ALIASES {
            assert_eq!(Role::normalize(Some(alias)), expected, "alias {alias}");
        }
    }

    #[test]
    fn normalization_is_case_insensitive() {
        assert_eq!(Role::normalize(Some("candidat")), Role::Candidat);
        assert_eq!(Role::normalize(Some("Recruitlur")), Role::Recruteur);
        assert_eq!(Role::normalize(Some("interviewer")), Role::Interviewer);
    }

    #[test]
    fn absent_and_blank_input_fall_back_to_recruteur() {
        assert_eq!(Role::normalize(None), Role::Recruteur);
        assert_eq!(Role::normalize(Some("")), Role::Recruteur);
        assert_eq!(Role::normalize(Some("   ")), Role::Recruteur);
    }

    #[test]
    fn unknown_roles_fall_back_to_recruteur() {
        assert_eq!(Role::normalize(Some("SUPERVISOR")), Role::Recruteur);
        assert_eq!(Role::normalize(Some("root")), Role::Recruteur);
    }

    #[test]
    fn normalize_is_idempotent_over_canonical_spellings() {
        for role in [
            Role::Recruteur,
            Role::Candidat,
            Role::Interviewer,
            Role::Admin,
        ] {
            assert_eq!(Role::normalize(Some(role.as_str())), role);
        }
    }

    #[test]
    fn deserialization_normalizes_legacy_spellings() {
        let role: Role = serde_json::from_str("\"RECRUITLUR\"").expect("role parses");
        assert_eq!(role, Role::Recruteur);
        assert_eq!(serde_json::to_string(&role).expect("serializes"), "\"RECRUTEUR\"");
    }

    #[test]
    fn landing_paths_cover_every_role() {
        assert_eq!(Role::Recruteur.landing_path(), "/dashboard");
        assert_eq!(Role::Candidat.landing_path(), "/candidat/dashboard");
        assert_eq!(Role::Interviewer.landing_path(), "/interviewer/dashboard");
        assert_eq!(Role::Admin.landing_path(), "/dashboard");
    }
}
