//! FHIR terminology package assembly.
//!
//! Builds installable FHIR packages: a gzip-compressed tarball whose
//! `package/` directory holds a `package.json` manifest, a `.index.json`
//! enumerating every resource file, and the resource files themselves.
//! Built archives can be loaded back for verification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

pub mod archive;
pub mod builder;

pub use archive::{load_archive, LoadedPackage};
pub use builder::{build_archive, scan_directory, ResourceEntry, ScanOutcome, SkippedFile};

/// FHIR package manifest (`package/package.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fhir_version: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceReference>,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl PackageManifest {
    /// Manifest with the required fields set and everything else empty.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            author: author.into(),
            url: None,
            fhir_version: None,
            dependencies: HashMap::new(),
            resources: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Validate required fields.
    pub fn validate(&self) -> Result<(), PackageError> {
        if self.name.is_empty() {
            return Err(PackageError::Validation("package name required".into()));
        }
        if self.version.is_empty() {
            return Err(PackageError::Validation("package version required".into()));
        }
        if self.author.is_empty() {
            return Err(PackageError::Validation("package author required".into()));
        }
        Ok(())
    }
}

/// `{type, reference}` entry in the manifest's resource listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub reference: String,
}

/// Package index (`package/.index.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIndex {
    #[serde(rename = "index-version")]
    pub index_version: u8,
    pub files: Vec<IndexEntry>,
}

/// File entry in the package index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub filename: String,
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Lowercased resource type, e.g. `codesystem`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("missing file: {0}")]
    MissingFile(String),
    #[error("validation error: {0}")]
    Validation(String),
}

pub type PackageResult<T> = Result<T, PackageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn manifest_serializes_builder_shape() {
        let mut manifest = PackageManifest::new("who.prequal.package", "2024.11.05", "WHO / RACSEL");
        manifest.description = "WHO Prequalified Vaccine Products".to_string();
        manifest.url = Some("http://who.org".to_string());
        manifest.fhir_version = Some("4.0.1".to_string());
        manifest.resources.push(ResourceReference {
            resource_type: "CodeSystem".to_string(),
            reference: "CodeSystem/PreQualCodeSystem".to_string(),
        });

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["name"], "who.prequal.package");
        assert_eq!(value["fhirVersion"], "4.0.1");
        assert_eq!(value["dependencies"], json!({}));
        assert_eq!(value["resources"][0]["type"], "CodeSystem");
        assert_eq!(
            value["resources"][0]["reference"],
            "CodeSystem/PreQualCodeSystem"
        );
    }

    #[test]
    fn manifest_validation_requires_core_fields() {
        assert!(PackageManifest::new("pkg", "1.0.0", "author").validate().is_ok());
        assert!(PackageManifest::new("", "1.0.0", "author").validate().is_err());
        assert!(PackageManifest::new("pkg", "", "author").validate().is_err());
        assert!(PackageManifest::new("pkg", "1.0.0", "").validate().is_err());
    }

    #[test]
    fn index_round_trips() {
        let index_json = json!({
            "index-version": 1,
            "files": [
                {
                    "filename": "CodeSystem/PreQualCodeSystem.json",
                    "resourceType": "CodeSystem",
                    "id": "prequal-codesystem",
                    "kind": "codesystem",
                    "url": "http://smart.who.int/pcmt-vaxprequal/CodeSystem/PreQualProductIDs",
                    "version": "2024"
                }
            ]
        });

        let index: PackageIndex = serde_json::from_value(index_json.clone()).unwrap();
        assert_eq!(index.index_version, 1);
        assert_eq!(index.files[0].kind.as_deref(), Some("codesystem"));

        let round_trip = serde_json::to_value(&index).unwrap();
        assert_eq!(round_trip, index_json);
    }
}
