//! Recommendation compositions over the image catalog.
//!
//! Helpers here combine the core queries (curated page matches, category
//! filters, keyword search) into the asset sets page templates actually
//! consume: a themed selection for generated landing content, a per-page
//! hero/gallery/inline split, and per-material image groups. Composition
//! always keeps curated matches ahead of inferred ones and returns ranked,
//! duplicate-free sequences.

use crate::catalog::identity::{Facet, SizeHint};
use crate::catalog::index::{ImageCatalog, normalize_terms};
use crate::catalog::model::ImageAsset;
use crate::ranking;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result cap for themed matching when the caller does not set one.
pub const DEFAULT_THEME_LIMIT: usize = 8;
/// Per-role caps for page recommendations.
pub const GALLERY_LIMIT: usize = 4;
pub const INLINE_LIMIT: usize = 6;
pub const CERTIFICATION_LIMIT: usize = 3;
/// Per-group caps for material image sets.
pub const MATERIAL_LIFESTYLE_LIMIT: usize = 3;
pub const MATERIAL_PRODUCT_LIMIT: usize = 3;
pub const MATERIAL_CERTIFICATION_LIMIT: usize = 2;

const CONTENT_TYPE_INFOGRAPHIC: &str = "infographic";
const CONTENT_TYPE_LIFESTYLE: &str = "lifestyle";
const CONTENT_TYPE_PRODUCT: &str = "product";
const CONTENT_TYPE_CERTIFICATION: &str = "certification";

/// Static keyword and category profile for one content theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeProfile {
    pub primary_keywords: &'static [&'static str],
    pub secondary_keywords: &'static [&'static str],
    pub category_tags: &'static [(Facet, &'static [&'static str])],
}

/// Every theme with a curated profile.
pub const THEMES: &[&str] = &[
    "compostable-coffee",
    "compostable-standup",
    "recyclable-mono",
    "coffee-valve",
    "low-moq",
    "high-barrier",
    "medium-barrier",
    "low-barrier",
    "surface-finish",
    "pouch-shapes",
    "usa-coffee",
    "australia-coffee",
    "europe-packaging",
];

/// Resolve the curated profile for a theme, if one exists.
///
/// Unknown themes are not an error: themed matching falls back to treating
/// the theme name itself as a search keyword.
pub fn theme_profile(theme: &str) -> Option<ThemeProfile> {
    match theme {
        "compostable-coffee" => Some(ThemeProfile {
            primary_keywords: &["compostable", "coffee", "eco-friendly"],
            secondary_keywords: &["degassing", "roastery", "sustainable", "biodegradable"],
            category_tags: &[
                (
                    Facet::Material,
                    &["compostable", "home-compostable", "industrial-compostable"],
                ),
                (Facet::Feature, &["degassing-valve", "tin-tie"]),
                (Facet::Application, &["coffee"]),
            ],
        }),
        "compostable-standup" => Some(ThemeProfile {
            primary_keywords: &["compostable", "stand-up", "pouch"],
            secondary_keywords: &["garden", "home composting", "backyard", "sustainable"],
            category_tags: &[
                (Facet::Material, &["compostable", "home-compostable"]),
                (Facet::PouchShape, &["stand-up-pouch"]),
            ],
        }),
        "recyclable-mono" => Some(ThemeProfile {
            primary_keywords: &["recyclable", "mono-material", "PE"],
            secondary_keywords: &["store drop-off", "curbside", "circular economy", "GRS"],
            category_tags: &[(Facet::Material, &["recyclable", "mono-material"])],
        }),
        "coffee-valve" => Some(ThemeProfile {
            primary_keywords: &["degassing valve", "coffee", "freshness"],
            secondary_keywords: &["one-way valve", "CO2", "tin tie", "reseal"],
            category_tags: &[
                (Facet::Feature, &["degassing-valve", "tin-tie", "ziplock"]),
                (Facet::Application, &["coffee"]),
            ],
        }),
        "low-moq" => Some(ThemeProfile {
            primary_keywords: &["low MOQ", "small batch", "startup"],
            secondary_keywords: &["digital printing", "trial order", "ecommerce", "DTC"],
            category_tags: &[],
        }),
        "high-barrier" => Some(ThemeProfile {
            primary_keywords: &["high barrier", "premium", "protection"],
            secondary_keywords: &["luxury", "extended shelf life", "metallic", "foil"],
            category_tags: &[(Facet::Barrier, &["high-barrier"])],
        }),
        "medium-barrier" => Some(ThemeProfile {
            primary_keywords: &["medium barrier", "balanced", "pantry"],
            secondary_keywords: &["dry goods", "snacks", "everyday"],
            category_tags: &[(Facet::Barrier, &["medium-barrier"])],
        }),
        "low-barrier" => Some(ThemeProfile {
            primary_keywords: &["low barrier", "fresh", "breathable"],
            secondary_keywords: &["produce", "short shelf life", "natural"],
            category_tags: &[(Facet::Barrier, &["low-barrier"])],
        }),
        "surface-finish" => Some(ThemeProfile {
            primary_keywords: &["matte", "gloss", "soft-touch"],
            secondary_keywords: &["metallic", "embossed", "foil stamping", "premium"],
            category_tags: &[(
                Facet::Surface,
                &["matte", "gloss", "soft-touch", "metallic", "embossed"],
            )],
        }),
        "pouch-shapes" => Some(ThemeProfile {
            primary_keywords: &["stand-up", "flat bottom", "side gusset"],
            secondary_keywords: &["three side seal", "spout pouch", "doypack"],
            category_tags: &[(
                Facet::PouchShape,
                &[
                    "stand-up-pouch",
                    "flat-bottom",
                    "side-gusset",
                    "three-side-seal",
                    "spout-pouch",
                ],
            )],
        }),
        "usa-coffee" => Some(ThemeProfile {
            primary_keywords: &["USA", "coffee", "roaster"],
            secondary_keywords: &["NYC", "artisan", "specialty"],
            category_tags: &[
                (Facet::Application, &["coffee"]),
                (Facet::Region, &["usa"]),
            ],
        }),
        "australia-coffee" => Some(ThemeProfile {
            primary_keywords: &["Australia", "coffee", "organic"],
            secondary_keywords: &["Perth", "Melbourne", "specialty"],
            category_tags: &[
                (Facet::Application, &["coffee"]),
                (Facet::Region, &["australia"]),
            ],
        }),
        "europe-packaging" => Some(ThemeProfile {
            primary_keywords: &["Europe", "EU", "PPWR"],
            secondary_keywords: &["regulation", "compliant", "2030"],
            category_tags: &[(Facet::Region, &["europe", "uk"])],
        }),
        _ => None,
    }
}

/// Optional narrowing for themed matching.
#[derive(Clone, Debug, Default)]
pub struct ThemeMatchOptions {
    pub material_type: Option<String>,
    pub region: Option<String>,
    pub max_images: Option<usize>,
}

/// Select assets for a content theme.
///
/// Category matches from the theme profile come first, keyword matches
/// supplement them, and optional material/region narrowing feeds both sides.
/// A theme without a profile degrades to a keyword search on the theme name.
/// The merged sequence is deduplicated, ranked, and capped.
pub fn match_images_for_theme<'a>(
    catalog: &'a ImageCatalog,
    theme: &str,
    options: &ThemeMatchOptions,
) -> Vec<&'a ImageAsset> {
    let mut keywords: Vec<String> = Vec::new();
    let mut matches: Vec<&ImageAsset> = Vec::new();

    if let Some(profile) = theme_profile(theme) {
        keywords.extend(profile.primary_keywords.iter().map(|kw| kw.to_string()));
        keywords.extend(profile.secondary_keywords.iter().map(|kw| kw.to_string()));
        for (facet, tags) in profile.category_tags {
            let tags: BTreeSet<String> = tags.iter().map(|tag| tag.to_string()).collect();
            matches.extend(catalog.images_by_facet(*facet, &tags));
        }
    } else {
        keywords.push(theme.to_string());
    }

    if let Some(material) = &options.material_type {
        keywords.push(material.clone());
        let tags = BTreeSet::from([material.clone()]);
        matches.extend(catalog.images_by_facet(Facet::Material, &tags));
    }
    if let Some(region) = &options.region {
        keywords.push(region.clone());
        let tags = BTreeSet::from([region.clone()]);
        matches.extend(catalog.images_by_facet(Facet::Region, &tags));
    }

    let terms = normalize_terms(&keywords);
    if !terms.is_empty() {
        matches.extend(catalog.search_normalized(&terms));
    }

    let mut merged = ranking::dedupe_by_id(matches);
    ranking::rank(&mut merged);
    merged.truncate(options.max_images.unwrap_or(DEFAULT_THEME_LIMIT));
    merged
}

/// Page context supplied by the rendering layer.
#[derive(Clone, Debug)]
pub struct PageContent {
    pub title: String,
    pub keywords: Vec<String>,
}

/// Role-partitioned image selection for one page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageImageSet<'a> {
    pub page_route: String,
    pub page_title: String,
    pub hero: Option<&'a ImageAsset>,
    pub gallery: Vec<&'a ImageAsset>,
    pub inline: Vec<&'a ImageAsset>,
    pub certification: Vec<&'a ImageAsset>,
}

/// Build the recommended image set for a page.
///
/// Curated page matches are pooled with keyword matches (curated entries keep
/// precedence through keep-first dedup), then partitioned by role: the first
/// hero-hinted asset, up to [`GALLERY_LIMIT`] gallery assets, up to
/// [`INLINE_LIMIT`] inline assets, and up to [`CERTIFICATION_LIMIT`]
/// certification-tagged assets. An all-unusable keyword list simply
/// contributes no keyword signal; the curated tier still resolves.
pub fn recommend_for_page<'a>(
    catalog: &'a ImageCatalog,
    route: &str,
    content: &PageContent,
) -> PageImageSet<'a> {
    let mut pool: Vec<&ImageAsset> = catalog.images_for_page(route);
    let terms = normalize_terms(&content.keywords);
    if !terms.is_empty() {
        pool.extend(catalog.search_normalized(&terms));
    }
    let pool = ranking::dedupe_by_id(pool);

    let hero = pool
        .iter()
        .copied()
        .find(|asset| asset.size_hint == Some(SizeHint::Hero));
    let gallery: Vec<&ImageAsset> = pool
        .iter()
        .copied()
        .filter(|asset| asset.size_hint == Some(SizeHint::Gallery))
        .take(GALLERY_LIMIT)
        .collect();
    let inline: Vec<&ImageAsset> = pool
        .iter()
        .copied()
        .filter(|asset| asset.size_hint == Some(SizeHint::Inline))
        .take(INLINE_LIMIT)
        .collect();
    let certification: Vec<&ImageAsset> = pool
        .iter()
        .copied()
        .filter(|asset| asset.has_content_type(CONTENT_TYPE_CERTIFICATION))
        .take(CERTIFICATION_LIMIT)
        .collect();

    PageImageSet {
        page_route: route.to_string(),
        page_title: content.title.clone(),
        hero,
        gallery,
        inline,
        certification,
    }
}

/// Content-type-partitioned images for one material tag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialImageSet<'a> {
    pub infographic: Option<&'a ImageAsset>,
    pub lifestyle: Vec<&'a ImageAsset>,
    pub product: Vec<&'a ImageAsset>,
    pub certification: Vec<&'a ImageAsset>,
}

/// Group a material's images by content type for the material detail layout.
pub fn material_image_set<'a>(catalog: &'a ImageCatalog, material: &str) -> MaterialImageSet<'a> {
    let tags = BTreeSet::from([material.to_string()]);
    let matches = catalog.images_by_facet(Facet::Material, &tags);

    MaterialImageSet {
        infographic: matches
            .iter()
            .copied()
            .find(|asset| asset.has_content_type(CONTENT_TYPE_INFOGRAPHIC)),
        lifestyle: matches
            .iter()
            .copied()
            .filter(|asset| asset.has_content_type(CONTENT_TYPE_LIFESTYLE))
            .take(MATERIAL_LIFESTYLE_LIMIT)
            .collect(),
        product: matches
            .iter()
            .copied()
            .filter(|asset| asset.has_content_type(CONTENT_TYPE_PRODUCT))
            .take(MATERIAL_PRODUCT_LIMIT)
            .collect(),
        certification: matches
            .iter()
            .copied()
            .filter(|asset| asset.has_content_type(CONTENT_TYPE_CERTIFICATION))
            .take(MATERIAL_CERTIFICATION_LIMIT)
            .collect(),
    }
}
