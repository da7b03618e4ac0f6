//! Image-asset matching engine.
//!
//! The crate holds a validated, immutable catalog of tagged media assets and
//! the query functions page components use to pick imagery: category filter,
//! keyword search, page resolver, and slot selector, all returning ranked,
//! duplicate-free sequences. `recommend` composes those queries into
//! page-ready selections and `coverage` reports authoring gaps. The public
//! functions here form the contract the helper binaries depend on: catalog
//! location and list parsing shared between `hub-query` and `hub-report`.

use std::env;
use std::path::PathBuf;

pub mod catalog;
pub mod coverage;
pub mod error;
pub mod ranking;
pub mod recommend;

pub use catalog::{
    ALL_FACETS, AssetId, CATALOG_SCHEMA_VERSION, CatalogDocument, CategoryTags, Facet,
    ImageAsset, ImageCatalog, MAX_PRIORITY, MIN_PRIORITY, SizeHint, load_catalog_from_path,
};
pub use coverage::{
    CoverageReport, KeywordCount, PageCoverage, TagTally, coverage_report, page_coverage,
    page_image_mapping, routes_in_catalog, tag_tally,
};
pub use error::{HubError, Result};
pub use recommend::{
    MaterialImageSet, PageContent, PageImageSet, ThemeMatchOptions, ThemeProfile,
    match_images_for_theme, material_image_set, recommend_for_page, theme_profile,
};

/// Env var that overrides the default catalog location.
pub const CATALOG_ENV_VAR: &str = "IMAGEHUB_CATALOG";

/// The authored catalog consulted when no explicit path is given.
///
/// Resolution order: `IMAGEHUB_CATALOG`, then the copy shipped with this
/// crate. Binaries layer a `--catalog` flag on top of this.
pub fn default_catalog_path() -> PathBuf {
    if let Ok(path) = env::var(CATALOG_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("schema")
        .join("image_catalog.json")
}

/// Split comma- or whitespace-delimited flag values into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_commas_and_whitespace() {
        assert_eq!(split_list("kraft,paper coffee"), ["kraft", "paper", "coffee"]);
        assert_eq!(split_list(" , "), Vec::<String>::new());
    }

    #[test]
    fn default_catalog_path_points_into_schema_dir() {
        // The env override is exercised indirectly; without it the compiled-in
        // default must name the shipped catalog.
        if env::var(CATALOG_ENV_VAR).is_err() {
            let path = default_catalog_path();
            assert!(path.ends_with("schema/image_catalog.json"));
        }
    }
}
