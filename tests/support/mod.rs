use imagehub::{AssetId, CategoryTags, ImageAsset};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::io::Write;
use tempfile::NamedTempFile;

pub fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// Minimal valid asset; tests adjust the fields they care about.
pub fn asset(id: &str, priority: u8) -> ImageAsset {
    ImageAsset {
        id: AssetId(id.to_string()),
        src: format!("/imgs/{id}.webp"),
        alt: None,
        caption: None,
        categories: CategoryTags {
            content_type: tag_set(&["product"]),
            ..CategoryTags::default()
        },
        keywords: BTreeSet::new(),
        suitable_pages: BTreeSet::new(),
        priority,
        size_hint: None,
    }
}

/// Write a catalog document with the given `images` array to a temp file.
pub fn catalog_file(images: Value) -> NamedTempFile {
    let document = json!({
        "schema_version": "image_catalog_v1",
        "images": images,
    });
    write_document(document)
}

/// Write an arbitrary catalog document to a temp file.
pub fn write_document(document: Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp catalog file");
    serde_json::to_writer(&mut file, &document).expect("serialize catalog document");
    file.flush().expect("flush catalog document");
    file
}
