use serde::{Deserialize, Serialize};

/// Prefix that marks an item id as belonging to this addon.
pub const ID_PREFIX: &str = "igdb-";

/// Upstream identifier of a game record.
pub type GameId = u64;

// === Upstream (IGDB) records ===

/// A nested upstream object that IGDB returns either expanded (when the
/// query asked for `field.subfield`) or as a bare numeric reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Expanded(T),
    Reference(u64),
}

impl<T> Expandable<T> {
    /// The expanded object, or `None` for an unexpanded reference.
    pub fn expanded(&self) -> Option<&T> {
        match self {
            Expandable::Expanded(inner) => Some(inner),
            Expandable::Reference(_) => None,
        }
    }
}

/// Image object (cover, screenshot, artwork).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Usually protocol-relative, e.g. `//images.igdb.com/igdb/image/upload/t_thumb/abc.jpg`.
    #[serde(default)]
    pub url: Option<String>,
}

/// Any upstream object that only matters for its display name (genre, platform).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: Option<String>,
}

/// A video attached to a game. `video_id` is a YouTube identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameVideo {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One game record as returned by the IGDB `games` endpoint.
///
/// Every attribute depends on the requested field set and on what IGDB
/// knows about the game, so all of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub id: Option<GameId>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    /// Unix timestamp. IGDB v4 sends seconds; older payloads used milliseconds.
    #[serde(default)]
    pub first_release_date: Option<i64>,

    #[serde(default)]
    pub cover: Option<Expandable<Image>>,

    #[serde(default)]
    pub screenshots: Option<Vec<Expandable<Image>>>,

    #[serde(default)]
    pub artworks: Option<Vec<Expandable<Image>>>,

    #[serde(default)]
    pub genres: Option<Vec<Expandable<Named>>>,

    #[serde(default)]
    pub platforms: Option<Vec<Expandable<Named>>>,

    /// Score on a 0-100 scale.
    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub videos: Option<Vec<Expandable<GameVideo>>>,
}

impl GameRecord {
    pub fn new(id: GameId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

// === Normalized output ===

/// Content type tag understood by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Channel,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Channel => "channel",
        }
    }

    /// Parse the `type` path segment of a request.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "channel" => Some(ContentType::Channel),
            _ => None,
        }
    }
}

/// A normalized catalog/meta item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// `igdb-<upstream id>`.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: ContentType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,

    #[serde(default)]
    pub videos: Vec<MetaVideo>,
}

/// A playable video entry of a meta item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaVideo {
    /// `yt_id::<youtube id>`, resolved to a stream by the host.
    pub id: String,
    pub title: String,
    pub thumbnail: String,
}

/// Body of a catalog response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub metas: Vec<Meta>,
}

/// Body of a meta response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    pub meta: Meta,
}
