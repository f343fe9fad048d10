//! Typed clients for the recruitment REST backend.
//!
//! Everything flows through [`client::ApiClient`], which attaches the
//! session's bearer token and enforces the 401 policy. The data these
//! clients return is transient and non-authoritative; views re-fetch
//! after every mutation instead of patching local copies.

pub mod analytics;
pub mod candidatures;
pub mod client;
pub mod entretiens;
pub mod notifications;
pub mod offres;

use serde::{Deserialize, Serialize};

pub use client::{ApiClient, ApiError};

/// One page of a paginated listing, as Spring serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_deserializes_spring_shape() {
        let page: Page<String> = serde_json::from_str(
            r#"{"content":["a","b"],"totalElements":12,"totalPages":6,"number":0,"size":2}"#,
        )
        .expect("page parses");
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 6);
    }
}
