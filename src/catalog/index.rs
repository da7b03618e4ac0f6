//! Validated, indexed view of an image catalog.
//!
//! `ImageCatalog` is the only way to obtain a queryable catalog: construction
//! enforces the data invariants (unique non-empty ids, priority range,
//! mandatory content type) and disk loads are additionally checked against
//! the JSON Schema contract before deserialization. Once built the catalog is
//! immutable; every query is a bounded scan returning a ranked, borrow-only
//! view of the entries.

use crate::catalog::identity::{ALL_FACETS, AssetId, Facet, SizeHint};
use crate::catalog::model::{CATALOG_SCHEMA_VERSION, ImageAsset, load_catalog_from_path};
use crate::error::{HubError, Result};
use crate::ranking;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Inclusive priority bounds; authored values outside this range are rejected.
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;

const SCHEMA_FILE_NAME: &str = "image_catalog.schema.json";

/// Image catalog plus a derived index keyed by asset id.
///
/// The catalog holds entries in a fixed order and never exposes a mutation
/// path, so concurrent readers need no coordination.
#[derive(Debug)]
pub struct ImageCatalog {
    assets: Vec<ImageAsset>,
    by_id: BTreeMap<AssetId, usize>,
}

impl ImageCatalog {
    /// Build a catalog from in-memory entries, enforcing the data invariants.
    ///
    /// Rejects blank or duplicate ids, priorities outside
    /// [`MIN_PRIORITY`]..=[`MAX_PRIORITY`], and entries with no content-type
    /// tags. The error detail names the offending asset so authoring mistakes
    /// surface immediately.
    pub fn new(assets: Vec<ImageAsset>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for (pos, asset) in assets.iter().enumerate() {
            if asset.id.as_str().trim().is_empty() {
                return Err(HubError::schema(format!(
                    "asset at position {pos} has a blank id"
                )));
            }
            if asset.priority < MIN_PRIORITY || asset.priority > MAX_PRIORITY {
                return Err(HubError::schema(format!(
                    "asset '{}' has priority {}, expected {MIN_PRIORITY}..={MAX_PRIORITY}",
                    asset.id.as_str(),
                    asset.priority
                )));
            }
            if asset.categories.content_type.is_empty() {
                return Err(HubError::schema(format!(
                    "asset '{}' has no contentType tags",
                    asset.id.as_str()
                )));
            }
            if by_id.insert(asset.id.clone(), pos).is_some() {
                return Err(HubError::schema(format!(
                    "duplicate asset id '{}'",
                    asset.id.as_str()
                )));
            }
        }
        Ok(Self { assets, by_id })
    }

    /// Load and validate a catalog document from disk.
    ///
    /// The raw JSON is checked against the shipped schema first so authoring
    /// errors are reported against the contract rather than as deserialization
    /// failures, then the declared `schema_version` and the data invariants
    /// are enforced.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;
        let document = load_catalog_from_path(path)?;
        if document.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(HubError::schema(format!(
                "unsupported schema_version '{}', expected '{CATALOG_SCHEMA_VERSION}'",
                document.schema_version
            )));
        }
        Self::new(document.images)
    }

    /// All entries in authored order.
    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    /// Resolve an asset by id.
    pub fn get(&self, id: &AssetId) -> Option<&ImageAsset> {
        self.by_id.get(id).map(|pos| &self.assets[*pos])
    }

    /// Iterates asset ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.by_id.keys()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Every tag in use, grouped by facet.
    ///
    /// Facets with no tags anywhere in the catalog map to an empty set, so
    /// callers can rely on all eight keys being present.
    pub fn facet_tags(&self) -> BTreeMap<Facet, BTreeSet<String>> {
        let mut tags: BTreeMap<Facet, BTreeSet<String>> = ALL_FACETS
            .iter()
            .map(|facet| (*facet, BTreeSet::new()))
            .collect();
        for asset in &self.assets {
            for facet in ALL_FACETS {
                if let Some(bucket) = tags.get_mut(facet) {
                    bucket.extend(asset.categories.facet(*facet).iter().cloned());
                }
            }
        }
        tags
    }

    /// Category filter: assets whose `facet` set intersects `tags`.
    ///
    /// An unknown facet name is an [`HubError::InvalidFacet`] caller error.
    /// An empty tag set is a deliberate "match nothing": an empty filter has
    /// no unambiguous semantic, so it yields an empty result rather than the
    /// whole catalog.
    pub fn images_by_category(
        &self,
        facet: &str,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<&ImageAsset>> {
        let facet = Facet::from_str(facet)?;
        Ok(self.images_by_facet(facet, tags))
    }

    /// Typed companion to [`ImageCatalog::images_by_category`] for callers
    /// that already hold a [`Facet`].
    pub fn images_by_facet(&self, facet: Facet, tags: &BTreeSet<String>) -> Vec<&ImageAsset> {
        if tags.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&ImageAsset> = self
            .assets
            .iter()
            .filter(|asset| {
                let facet_tags = asset.categories.facet(facet);
                tags.iter().any(|tag| facet_tags.contains(tag))
            })
            .collect();
        ranking::rank(&mut matches);
        matches
    }

    /// Keyword search: lexical overlap between query terms and asset keywords.
    ///
    /// Terms are trimmed and matched case-insensitively as substrings of the
    /// asset's keywords, which tolerates partial and plural variants without
    /// stemming. Assets matching none of the terms are excluded; the rest are
    /// ordered by matched-term count descending (the per-query denominator is
    /// fixed, so this is exactly score order), then priority, then id.
    ///
    /// A term list with no usable entries is an [`HubError::EmptyQuery`]
    /// caller error, distinct from "query executed, zero hits".
    pub fn search_by_keywords<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<&ImageAsset>> {
        let normalized = normalize_terms(terms);
        if normalized.is_empty() {
            return Err(HubError::EmptyQuery);
        }
        Ok(self.search_normalized(&normalized))
    }

    /// Scored search over pre-normalized terms. Shared with the composition
    /// layer, which treats "no usable terms" as "no keyword signal" instead
    /// of an error.
    pub(crate) fn search_normalized(&self, terms: &[String]) -> Vec<&ImageAsset> {
        let mut scored: Vec<(usize, &ImageAsset)> = Vec::new();
        for asset in &self.assets {
            let keywords: Vec<String> = asset
                .keywords
                .iter()
                .map(|keyword| keyword.to_lowercase())
                .collect();
            let matched = terms
                .iter()
                .filter(|term| keywords.iter().any(|keyword| keyword.contains(*term)))
                .count();
            if matched > 0 {
                scored.push((matched, asset));
            }
        }
        scored.sort_by(|(hits_a, a), (hits_b, b)| {
            hits_b.cmp(hits_a).then_with(|| ranking::ordering(a, b))
        });
        scored.into_iter().map(|(_, asset)| asset).collect()
    }

    /// Page resolver: curated matches first, route-inferred matches as a
    /// fallback.
    ///
    /// The exact tier returns assets whose `suitablePages` contains the route
    /// verbatim. Only when that tier is empty does the resolver fall back to
    /// assets whose content type matches a tag inferred from the route's
    /// first path segment; the tiers are never merged, so curated imagery is
    /// not diluted by weaker inferred matches. Zero matches in both tiers is
    /// a legitimate empty result, signaling "no curated imagery" to the
    /// caller.
    pub fn images_for_page(&self, route: &str) -> Vec<&ImageAsset> {
        let mut exact: Vec<&ImageAsset> = self
            .assets
            .iter()
            .filter(|asset| asset.suitable_pages.contains(route))
            .collect();
        if !exact.is_empty() {
            ranking::rank(&mut exact);
            return exact;
        }

        let Some(tag) = route_content_type_tag(route) else {
            return Vec::new();
        };
        let mut inferred: Vec<&ImageAsset> = self
            .assets
            .iter()
            .filter(|asset| asset.has_content_type(&tag))
            .collect();
        ranking::rank(&mut inferred);
        inferred
    }

    /// Slot selector: assets whose size hint equals `hint`.
    ///
    /// Entries without a size hint are never returned; absence is not a
    /// wildcard.
    pub fn images_by_size_hint(&self, hint: SizeHint) -> Vec<&ImageAsset> {
        let mut matches: Vec<&ImageAsset> = self
            .assets
            .iter()
            .filter(|asset| asset.size_hint == Some(hint))
            .collect();
        ranking::rank(&mut matches);
        matches
    }
}

/// Lowercase and trim query terms, dropping entries with no content.
pub(crate) fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Best-effort content-type tag for a route: the first path segment,
/// singularized by stripping one trailing `s` ("/products/…" → "product").
fn route_content_type_tag(route: &str) -> Option<String> {
    let segment = route.split('/').find(|segment| !segment.is_empty())?;
    let singular = match segment.strip_suffix('s') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => segment,
    };
    Some(singular.to_string())
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))?;

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let schema_file = File::open(&schema_path)?;
    let schema_value: Value = serde_json::from_reader(BufReader::new(schema_file))?;

    let compiled = JSONSchema::compile(&schema_value).map_err(|err| {
        HubError::schema(format!(
            "catalog schema {} does not compile: {err}",
            schema_path.display()
        ))
    })?;

    if let Err(errors) = compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(HubError::schema(format!(
            "catalog {} failed schema validation: {details}",
            catalog_path.display()
        )));
    }
    Ok(())
}

/// Prefer a schema shipped next to the catalog file so relocated catalogs can
/// carry their own contract; fall back to the copy in this crate.
fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(dir) = catalog_path.parent() {
        let candidate = dir.join(SCHEMA_FILE_NAME);
        if candidate.exists() {
            return candidate;
        }
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("schema")
        .join(SCHEMA_FILE_NAME)
}
