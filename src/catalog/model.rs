//! Serde representation of the authored image catalog.
//!
//! The types mirror the authored JSON form (camelCase field names) so tooling
//! and tests can reason about asset metadata without ad-hoc JSON handling.
//! Use `ImageCatalog` for validation and querying; use these structs when the
//! raw catalog surface is required (export, authoring checks).

use crate::catalog::identity::{AssetId, Facet, SizeHint};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Expected `schema_version` of the authored catalog file.
pub const CATALOG_SCHEMA_VERSION: &str = "image_catalog_v1";

/// One reusable media file and its relevance metadata.
///
/// Set-valued fields use `BTreeSet` so duplicates collapse on load and
/// iteration order is stable regardless of authored order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: AssetId,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub categories: CategoryTags,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub suitable_pages: BTreeSet<String>,
    /// Ranking tie-break in [1,10], 10 highest. Never a hard filter.
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_hint: Option<SizeHint>,
}

impl ImageAsset {
    /// True when the given content-type tag is present on this asset.
    pub fn has_content_type(&self, tag: &str) -> bool {
        self.categories.content_type.contains(tag)
    }
}

/// Per-facet tag sets for one asset.
///
/// All facets are optional except `content_type`; emptiness of the mandatory
/// set is rejected at catalog construction rather than by serde so the
/// in-memory construction path reports the same violation as a file load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTags {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub material: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub feature: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub barrier: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub pouch_shape: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub surface: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub application: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub region: BTreeSet<String>,
    #[serde(default)]
    pub content_type: BTreeSet<String>,
}

impl CategoryTags {
    /// The tag set for one facet.
    pub fn facet(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Material => &self.material,
            Facet::Feature => &self.feature,
            Facet::Barrier => &self.barrier,
            Facet::PouchShape => &self.pouch_shape,
            Facet::Surface => &self.surface,
            Facet::Application => &self.application,
            Facet::Region => &self.region,
            Facet::ContentType => &self.content_type,
        }
    }
}

/// Full catalog document as stored on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub schema_version: String,
    pub images: Vec<ImageAsset>,
}

/// Read and parse a catalog document from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path)?;
    let document: CatalogDocument = serde_json::from_str(&data)?;
    Ok(document)
}
