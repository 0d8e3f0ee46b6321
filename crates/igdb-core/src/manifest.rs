use crate::types::{ContentType, ID_PREFIX};
use serde::{Deserialize, Serialize};

pub const ADDON_ID: &str = "org.igdbaddon";
pub const DEFAULT_NAME: &str = "IGDB Addon";
pub const DEFAULT_DESCRIPTION: &str = "Game trailer, gameplay videos from IGDB.com";

/// Id of the single catalog this addon serves.
pub const CATALOG_ID: &str = "IGDBcatalog";

/// Extra catalog parameter carrying free-text search.
pub const SEARCH_EXTRA: &str = "search";

/// Addon description handed to the host platform at install time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<ContentType>,
    pub catalogs: Vec<CatalogDescriptor>,
    pub id_prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub extra_supported: Vec<String>,
}

impl Manifest {
    /// Manifest with the given display name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ADDON_ID.to_string(),
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: description.into(),
            resources: vec!["catalog".to_string(), "meta".to_string()],
            types: vec![ContentType::Channel],
            catalogs: vec![CatalogDescriptor {
                kind: ContentType::Channel,
                id: CATALOG_ID.to_string(),
                name: "Games".to_string(),
                extra_supported: vec![SEARCH_EXTRA.to_string()],
            }],
            id_prefixes: vec![ID_PREFIX.to_string()],
        }
    }

    /// True if this addon serves the catalog `id` of content type `kind`.
    pub fn has_catalog(&self, kind: ContentType, id: &str) -> bool {
        self.catalogs.iter().any(|c| c.kind == kind && c.id == id)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json_shape() {
        let json = serde_json::to_value(Manifest::default()).unwrap();
        assert_eq!(json["id"], "org.igdbaddon");
        assert_eq!(json["types"][0], "channel");
        assert_eq!(json["idPrefixes"][0], "igdb-");
        assert_eq!(json["catalogs"][0]["type"], "channel");
        assert_eq!(json["catalogs"][0]["id"], "IGDBcatalog");
        assert_eq!(json["catalogs"][0]["extraSupported"][0], "search");
        assert_eq!(json["resources"], serde_json::json!(["catalog", "meta"]));
    }

    #[test]
    fn test_has_catalog() {
        let manifest = Manifest::default();
        assert!(manifest.has_catalog(ContentType::Channel, CATALOG_ID));
        assert!(!manifest.has_catalog(ContentType::Channel, "top"));
    }
}
