//! Image catalog wiring.
//!
//! This module wraps the authored catalog under `schema/image_catalog.json`
//! so callers can load a validated snapshot and query it with consistent
//! identifiers. Types here mirror the authored fields; callers use
//! `ImageCatalog` for validation and the four query entry points, and the
//! raw `CatalogDocument` when the unvalidated catalog surface is required.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{ALL_FACETS, AssetId, Facet, SizeHint};
pub use index::{ImageCatalog, MAX_PRIORITY, MIN_PRIORITY};
pub use model::{CATALOG_SCHEMA_VERSION, CatalogDocument, CategoryTags, ImageAsset};

pub use model::load_catalog_from_path;
