use crate::error::HubError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable identifier for a single catalog entry.
///
/// Ids are authored once and never change; queries and composing callers use
/// them for deduplication and as the deterministic ranking tie-break.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Named category facet on an asset.
///
/// The set is closed: an unrecognized facet name in a query is a caller error
/// (`InvalidFacet`), not a forward-compatibility case, so there is no
/// catch-all variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    Material,
    Feature,
    Barrier,
    PouchShape,
    Surface,
    Application,
    Region,
    ContentType,
}

/// Every recognized facet, in declaration order. Used by tally and
/// introspection helpers that walk the whole categorization surface.
pub const ALL_FACETS: &[Facet] = &[
    Facet::Material,
    Facet::Feature,
    Facet::Barrier,
    Facet::PouchShape,
    Facet::Surface,
    Facet::Application,
    Facet::Region,
    Facet::ContentType,
];

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Material => "material",
            Facet::Feature => "feature",
            Facet::Barrier => "barrier",
            Facet::PouchShape => "pouchShape",
            Facet::Surface => "surface",
            Facet::Application => "application",
            Facet::Region => "region",
            Facet::ContentType => "contentType",
        }
    }

    /// Parse a facet name as it appears in authored data and query arguments.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "material" => Some(Facet::Material),
            "feature" => Some(Facet::Feature),
            "barrier" => Some(Facet::Barrier),
            "pouchShape" => Some(Facet::PouchShape),
            "surface" => Some(Facet::Surface),
            "application" => Some(Facet::Application),
            "region" => Some(Facet::Region),
            "contentType" => Some(Facet::ContentType),
            _ => None,
        }
    }
}

impl FromStr for Facet {
    type Err = HubError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Facet::parse(value).ok_or_else(|| HubError::InvalidFacet {
            name: value.to_string(),
        })
    }
}

/// Intended presentation scale for an asset.
///
/// Absence on an entry means the asset has no slot preference; the slot
/// selector treats absence as "never matches", not as a wildcard.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeHint {
    Hero,
    Gallery,
    Inline,
    Thumbnail,
}

impl SizeHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeHint::Hero => "hero",
            SizeHint::Gallery => "gallery",
            SizeHint::Inline => "inline",
            SizeHint::Thumbnail => "thumbnail",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hero" => Some(SizeHint::Hero),
            "gallery" => Some(SizeHint::Gallery),
            "inline" => Some(SizeHint::Inline),
            "thumbnail" => Some(SizeHint::Thumbnail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_round_trips_every_name() {
        for facet in ALL_FACETS {
            assert_eq!(Facet::parse(facet.as_str()), Some(*facet));
            let json = serde_json::to_string(facet).unwrap();
            assert_eq!(json.trim_matches('"'), facet.as_str());
            let back: Facet = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *facet);
        }
    }

    #[test]
    fn facet_from_str_rejects_unknown_names() {
        let err = "color".parse::<Facet>().expect_err("unknown facet");
        assert!(matches!(err, HubError::InvalidFacet { name } if name == "color"));
        // Facet names are exact; the parser does not case-fold.
        assert!(Facet::parse("Material").is_none());
    }

    #[test]
    fn size_hint_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&SizeHint::Hero).unwrap();
        assert_eq!(json, "\"hero\"");
        let back: SizeHint = serde_json::from_str("\"thumbnail\"").unwrap();
        assert_eq!(back, SizeHint::Thumbnail);
        assert!(serde_json::from_str::<SizeHint>("\"banner\"").is_err());
    }

    #[test]
    fn size_hint_parse_matches_serde_names() {
        for hint in [
            SizeHint::Hero,
            SizeHint::Gallery,
            SizeHint::Inline,
            SizeHint::Thumbnail,
        ] {
            assert_eq!(SizeHint::parse(hint.as_str()), Some(hint));
        }
        assert!(SizeHint::parse("banner").is_none());
    }

    #[test]
    fn asset_id_is_transparent_in_json() {
        let id = AssetId("infographic-compost".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"infographic-compost\"");
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
