// Centralized integration suite for the matching engine; exercises catalog
// loading and schema validation, the four query entry points, and the
// composition helpers so contract changes surface in one place.
mod support;

use anyhow::Result;
use imagehub::{
    HubError, ImageAsset, ImageCatalog, PageContent, SizeHint, coverage_report,
    default_catalog_path, page_coverage, page_image_mapping, recommend_for_page,
    routes_in_catalog, tag_tally,
};
use serde_json::json;
use std::collections::BTreeSet;
use support::{asset, catalog_file, tag_set, write_document};

fn ids(assets: &[&ImageAsset]) -> Vec<String> {
    assets.iter().map(|a| a.id.as_str().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Catalog loading and validation
// ---------------------------------------------------------------------------

#[test]
fn shipped_catalog_loads_and_resolves_pages() -> Result<()> {
    let catalog = ImageCatalog::load(&default_catalog_path())?;
    assert!(catalog.len() >= 18);

    let hits = catalog.images_for_page("/materials/pcr");
    assert_eq!(ids(&hits), ["infographic-pcr", "pcr-store-drop-off"]);
    Ok(())
}

#[test]
fn load_rejects_out_of_range_priority() {
    let file = catalog_file(json!([{
        "id": "over-prioritized",
        "src": "/imgs/x.webp",
        "categories": { "contentType": ["product"] },
        "priority": 11
    }]));
    let err = ImageCatalog::load(file.path()).expect_err("priority 11 must fail");
    assert!(matches!(&err, HubError::SchemaViolation { .. }), "got {err}");
}

#[test]
fn load_rejects_unknown_size_hint() {
    let file = catalog_file(json!([{
        "id": "bad-hint",
        "src": "/imgs/x.webp",
        "categories": { "contentType": ["product"] },
        "priority": 5,
        "sizeHint": "banner"
    }]));
    let err = ImageCatalog::load(file.path()).expect_err("unknown size hint must fail");
    assert!(matches!(&err, HubError::SchemaViolation { .. }), "got {err}");
}

#[test]
fn load_rejects_wrong_schema_version() {
    let file = write_document(json!({
        "schema_version": "image_catalog_v0",
        "images": [],
    }));
    let err = ImageCatalog::load(file.path()).expect_err("version mismatch must fail");
    assert!(matches!(&err, HubError::SchemaViolation { .. }), "got {err}");
}

#[test]
fn load_rejects_duplicate_ids() {
    let entry = json!({
        "id": "twice",
        "src": "/imgs/x.webp",
        "categories": { "contentType": ["product"] },
        "priority": 5
    });
    let file = catalog_file(json!([entry, entry]));
    let err = ImageCatalog::load(file.path()).expect_err("duplicate id must fail");
    assert!(err.to_string().contains("duplicate asset id 'twice'"));
}

#[test]
fn load_rejects_missing_content_type() {
    let file = catalog_file(json!([{
        "id": "untagged",
        "src": "/imgs/x.webp",
        "categories": { "contentType": [] },
        "priority": 5
    }]));
    let err = ImageCatalog::load(file.path()).expect_err("empty contentType must fail");
    assert!(matches!(&err, HubError::SchemaViolation { .. }), "got {err}");
}

// ---------------------------------------------------------------------------
// Spec'd query scenarios
// ---------------------------------------------------------------------------

#[test]
fn page_resolver_orders_curated_assets_by_priority() -> Result<()> {
    let mut a = asset("a", 8);
    a.suitable_pages = tag_set(&["/materials/pcr"]);
    let mut b = asset("b", 5);
    b.suitable_pages = tag_set(&["/materials/pcr"]);
    let catalog = ImageCatalog::new(vec![b, a])?;

    let hits = catalog.images_for_page("/materials/pcr");
    assert_eq!(ids(&hits), ["a", "b"]);
    Ok(())
}

#[test]
fn keyword_search_counts_partial_matches() -> Result<()> {
    let mut c = asset("c", 5);
    c.keywords = tag_set(&["compostable", "kraft"]);
    let catalog = ImageCatalog::new(vec![c])?;

    // "kraft" hits, "paper" misses; a half-score still qualifies.
    let hits = catalog.search_by_keywords(&["kraft", "paper"])?;
    assert_eq!(ids(&hits), ["c"]);
    Ok(())
}

#[test]
fn slot_selector_excludes_other_hints() -> Result<()> {
    let mut d = asset("d", 5);
    d.size_hint = Some(SizeHint::Hero);
    let mut e = asset("e", 9);
    e.size_hint = Some(SizeHint::Gallery);
    let catalog = ImageCatalog::new(vec![d, e])?;

    let hits = catalog.images_by_size_hint(SizeHint::Hero);
    assert_eq!(ids(&hits), ["d"]);
    Ok(())
}

#[test]
fn category_filter_with_unmatched_tag_is_empty() -> Result<()> {
    let mut entry = asset("a", 5);
    entry.categories.material = tag_set(&["compostable"]);
    let catalog = ImageCatalog::new(vec![entry])?;

    let hits = catalog.images_by_category("material", &tag_set(&["nonexistent-tag"]))?;
    assert!(hits.is_empty());
    Ok(())
}

#[test]
fn in_memory_construction_enforces_priority_range() {
    let err = ImageCatalog::new(vec![asset("a", 11)]).expect_err("priority 11 must fail");
    assert!(matches!(err, HubError::SchemaViolation { .. }));
}

#[test]
fn empty_inputs_are_distinguished() -> Result<()> {
    let catalog = ImageCatalog::new(vec![asset("a", 5)])?;

    // Empty tag set: a legitimate "match nothing", not an error.
    let hits = catalog.images_by_category("material", &BTreeSet::new())?;
    assert!(hits.is_empty());

    // Empty term list: a caller mistake, surfaced as EmptyQuery.
    let empty: [&str; 0] = [];
    let err = catalog.search_by_keywords(&empty).expect_err("empty query");
    assert!(matches!(&err, HubError::EmptyQuery));
    assert!(err.is_recoverable());
    Ok(())
}

// ---------------------------------------------------------------------------
// Ordering and dedup properties over the shipped catalog
// ---------------------------------------------------------------------------

#[test]
fn queries_are_deterministic() -> Result<()> {
    let catalog = ImageCatalog::load(&default_catalog_path())?;

    let first = catalog.search_by_keywords(&["coffee", "compostable"])?;
    let second = catalog.search_by_keywords(&["coffee", "compostable"])?;
    assert_eq!(ids(&first), ids(&second));

    let first = catalog.images_by_size_hint(SizeHint::Gallery);
    let second = catalog.images_by_size_hint(SizeHint::Gallery);
    assert_eq!(ids(&first), ids(&second));
    Ok(())
}

#[test]
fn results_are_duplicate_free_and_rank_ordered() -> Result<()> {
    let catalog = ImageCatalog::load(&default_catalog_path())?;
    let results = vec![
        catalog.images_by_category("material", &tag_set(&["compostable", "recyclable"]))?,
        catalog.images_by_size_hint(SizeHint::Gallery),
        catalog.images_for_page("/options/high-barrier"),
    ];

    for result in results {
        let unique: BTreeSet<&str> = result.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unique.len(), result.len(), "duplicate id in result");
        for pair in result.windows(2) {
            assert!(
                pair[0].priority > pair[1].priority
                    || (pair[0].priority == pair[1].priority && pair[0].id <= pair[1].id),
                "ranking violated between '{}' and '{}'",
                pair[0].id.as_str(),
                pair[1].id.as_str()
            );
        }
    }
    Ok(())
}

#[test]
fn curated_page_matches_preempt_inferred_ones() -> Result<()> {
    let catalog = ImageCatalog::load(&default_catalog_path())?;

    // The route has curated entries, so product-typed assets that merely match
    // the inferred "/products/…" tag must stay out.
    let hits = catalog.images_for_page("/products/coffee-bags-degassing-valve");
    assert_eq!(
        ids(&hits),
        ["valve-closure-detail", "tintie-coffee-pouch", "roast-ritual-nyc"]
    );

    // An uncurated products route falls back to content-type inference.
    let fallback = catalog.images_for_page("/products/some-new-page");
    assert!(!fallback.is_empty());
    assert!(fallback.iter().all(|a| a.has_content_type("product")));
    Ok(())
}

// ---------------------------------------------------------------------------
// Composition and reporting helpers
// ---------------------------------------------------------------------------

#[test]
fn page_recommendation_over_shipped_catalog() -> Result<()> {
    let catalog = ImageCatalog::load(&default_catalog_path())?;
    let set = recommend_for_page(
        &catalog,
        "/materials/pcr",
        &PageContent {
            title: "PCR Material".to_string(),
            keywords: vec!["recycling".to_string(), "GRS".to_string()],
        },
    );

    assert!(set.hero.is_none());
    assert!(set.gallery.iter().any(|a| a.id.as_str() == "infographic-pcr"));
    assert!(set.inline.iter().any(|a| a.id.as_str() == "pcr-store-drop-off"));
    assert_eq!(set.page_title, "PCR Material");
    Ok(())
}

#[test]
fn coverage_reporting_over_shipped_catalog() -> Result<()> {
    let catalog = ImageCatalog::load(&default_catalog_path())?;

    let home = page_coverage(&catalog, "/");
    assert!(home.has_hero);

    let routes: Vec<String> = routes_in_catalog(&catalog).into_iter().collect();
    assert!(routes.contains(&"/materials/pcr".to_string()));

    let report = coverage_report(&catalog, &routes);
    assert_eq!(report.total_images, catalog.len());
    assert_eq!(report.pages_with_images, routes.len());
    assert!(!report.top_keywords.is_empty());
    assert!(report.top_keywords[0].count >= report.top_keywords.last().unwrap().count);

    let tally = tag_tally(&catalog);
    assert_eq!(tally.total, catalog.len());
    assert!(tally.by_facet["material"]["compostable"] >= 2);
    assert!(tally.by_size_hint["hero"] >= 2);

    let mapping = page_image_mapping(&catalog, &routes);
    assert_eq!(mapping.len(), routes.len());
    assert!(!mapping["/materials/pcr"].is_empty());
    Ok(())
}
