//! Coverage accounting between the image catalog and the pages it serves.
//!
//! Helpers here tally the catalog's tag surface and identify pages with thin
//! imagery so authoring gaps surface before they reach a layout. Reports are
//! deterministic: maps are key-ordered and every ranking inside a report has
//! a name tie-break.

use crate::catalog::identity::{ALL_FACETS, SizeHint};
use crate::catalog::index::ImageCatalog;
use crate::catalog::model::ImageAsset;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Keywords reported by [`coverage_report`].
pub const TOP_KEYWORD_LIMIT: usize = 20;

// Pages want one hero, a few gallery shots, and some overall depth before
// they stop looking sparse.
const WANTED_GALLERY_IMAGES: usize = 4;
const MIN_GALLERY_IMAGES: usize = 3;
const MIN_PAGE_IMAGES: usize = 4;

/// Asset counts per facet tag and per size hint.
#[derive(Debug, Clone, Serialize)]
pub struct TagTally {
    pub total: usize,
    /// facet name → tag → number of assets carrying that tag.
    pub by_facet: BTreeMap<String, BTreeMap<String, usize>>,
    pub by_size_hint: BTreeMap<String, usize>,
}

/// Count assets per tag across every facet, and per size hint.
pub fn tag_tally(catalog: &ImageCatalog) -> TagTally {
    let mut by_facet: BTreeMap<String, BTreeMap<String, usize>> = ALL_FACETS
        .iter()
        .map(|facet| (facet.as_str().to_string(), BTreeMap::new()))
        .collect();
    let mut by_size_hint: BTreeMap<String, usize> = BTreeMap::new();

    for asset in catalog.assets() {
        for facet in ALL_FACETS {
            if let Some(bucket) = by_facet.get_mut(facet.as_str()) {
                for tag in asset.categories.facet(*facet) {
                    *bucket.entry(tag.clone()).or_insert(0) += 1;
                }
            }
        }
        if let Some(hint) = asset.size_hint {
            *by_size_hint.entry(hint.as_str().to_string()).or_insert(0) += 1;
        }
    }

    TagTally {
        total: catalog.len(),
        by_facet,
        by_size_hint,
    }
}

/// Whether one page has enough curated imagery, with authoring suggestions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCoverage {
    pub has_hero: bool,
    pub gallery_count: usize,
    pub total_count: usize,
    pub suggestions: Vec<String>,
}

/// Check a page's resolved imagery against the layout minimums.
pub fn page_coverage(catalog: &ImageCatalog, route: &str) -> PageCoverage {
    let images = catalog.images_for_page(route);
    let has_hero = images
        .iter()
        .any(|asset| asset.size_hint == Some(SizeHint::Hero));
    let gallery_count = images
        .iter()
        .filter(|asset| asset.size_hint == Some(SizeHint::Gallery))
        .count();
    let total_count = images.len();

    let mut suggestions = Vec::new();
    if !has_hero {
        suggestions.push("Missing hero image for this page".to_string());
    }
    if gallery_count < MIN_GALLERY_IMAGES {
        suggestions.push(format!(
            "Only {gallery_count} gallery images - recommend at least {WANTED_GALLERY_IMAGES}"
        ));
    }
    if total_count < MIN_PAGE_IMAGES {
        suggestions.push(format!(
            "Low image coverage ({total_count}) - add more relevant images"
        ));
    }

    PageCoverage {
        has_hero,
        gallery_count,
        total_count,
        suggestions,
    }
}

/// One keyword with the number of assets carrying it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Catalog-wide coverage summary over a set of requested routes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub total_images: usize,
    pub pages_with_images: usize,
    pub average_images_per_page: f64,
    pub top_keywords: Vec<KeywordCount>,
    pub coverage_gaps: Vec<String>,
}

/// Build the coverage summary for the given routes.
///
/// `pages_with_images` counts distinct routes referenced anywhere in the
/// catalog; gaps and the per-page mean are computed over the requested
/// routes only. Keyword ranking breaks count ties by keyword name.
pub fn coverage_report(catalog: &ImageCatalog, routes: &[String]) -> CoverageReport {
    let mut keyword_counts: BTreeMap<String, usize> = BTreeMap::new();
    for asset in catalog.assets() {
        for keyword in &asset.keywords {
            *keyword_counts.entry(keyword.clone()).or_insert(0) += 1;
        }
    }
    let mut top_keywords: Vec<KeywordCount> = keyword_counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();
    top_keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    top_keywords.truncate(TOP_KEYWORD_LIMIT);

    let mut coverage_gaps = Vec::new();
    let mut matched_total = 0usize;
    for route in routes {
        let coverage = page_coverage(catalog, route);
        matched_total += coverage.total_count;
        if !coverage.suggestions.is_empty() {
            coverage_gaps.push(format!("{route}: {}", coverage.suggestions.join(", ")));
        }
    }

    let average_images_per_page = if routes.is_empty() {
        0.0
    } else {
        matched_total as f64 / routes.len() as f64
    };

    CoverageReport {
        total_images: catalog.len(),
        pages_with_images: routes_in_catalog(catalog).len(),
        average_images_per_page,
        top_keywords,
        coverage_gaps,
    }
}

/// Every route referenced by some asset's `suitablePages`.
pub fn routes_in_catalog(catalog: &ImageCatalog) -> BTreeSet<String> {
    catalog
        .assets()
        .iter()
        .flat_map(|asset| asset.suitable_pages.iter().cloned())
        .collect()
}

/// Resolve imagery for each route, keyed by route.
pub fn page_image_mapping<'a>(
    catalog: &'a ImageCatalog,
    routes: &[String],
) -> BTreeMap<String, Vec<&'a ImageAsset>> {
    routes
        .iter()
        .map(|route| (route.clone(), catalog.images_for_page(route)))
        .collect()
}
