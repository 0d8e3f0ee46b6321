//! Mapping of raw IGDB game records onto the host platform's meta schema.
//!
//! Everything here is a pure function of its input. Missing or empty nested
//! collections degrade to absent output fields; nothing in this module fails.
//! A record without an id has no host-facing identity and yields no item.

use crate::types::{ContentType, Expandable, GameRecord, GameVideo, Image, Meta, MetaVideo, Named, ID_PREFIX};
use chrono::{DateTime, Datelike, Utc};

/// Prefix of video ids the host resolves through YouTube.
pub const VIDEO_ID_PREFIX: &str = "yt_id::";

/// Timestamps above this are taken to be milliseconds. 10^11 seconds is
/// roughly the year 5138, 10^11 milliseconds is early 1973.
const MILLIS_THRESHOLD: u64 = 100_000_000_000;

/// IGDB image size presets an image URL can be rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    CoverBig,
    Original,
}

impl ImageSize {
    /// Size token IGDB puts in image URLs by default.
    pub const THUMB_TOKEN: &'static str = "/t_thumb/";

    pub fn token(&self) -> &'static str {
        match self {
            ImageSize::CoverBig => "/t_cover_big/",
            ImageSize::Original => "/t_original/",
        }
    }
}

/// Normalize one upstream record. `None` only when the record has no id.
pub fn to_meta(record: &GameRecord) -> Option<Meta> {
    Some(Meta {
        id: item_id(record.id?),
        name: record.name.clone(),
        kind: ContentType::Channel,
        poster: poster(record),
        description: description(record),
        year: record.first_release_date.and_then(release_year),
        background: background(record),
        genres: genres(record),
        videos: videos(record),
    })
}

/// Host-facing id for an upstream game id.
pub fn item_id(id: u64) -> String {
    format!("{}{}", ID_PREFIX, id)
}

/// Recover the upstream game id from a host-facing item id.
///
/// Returns `None` when the prefix is missing or the remainder is not a
/// non-negative integer.
pub fn parse_item_id(id: &str) -> Option<u64> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}

/// Swap the thumbnail size token for `size` and make protocol-relative URLs
/// absolute. URLs without the token keep their path unchanged.
pub fn rewrite_image_url(url: &str, size: ImageSize) -> String {
    let resized = url.replace(ImageSize::THUMB_TOKEN, size.token());
    if resized.starts_with("//") {
        format!("https:{}", resized)
    } else {
        resized
    }
}

/// Calendar year (UTC) of an upstream release timestamp.
pub fn release_year(timestamp: i64) -> Option<i32> {
    let datetime = if timestamp.unsigned_abs() > MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(timestamp)?
    } else {
        DateTime::<Utc>::from_timestamp(timestamp, 0)?
    };
    Some(datetime.year())
}

fn poster(record: &GameRecord) -> Option<String> {
    let url = image_url(record.cover.as_ref()?)?;
    Some(rewrite_image_url(url, ImageSize::CoverBig))
}

fn background(record: &GameRecord) -> Option<String> {
    // Screenshots win whenever there are any, even if the first lacks a URL.
    let source = first_non_empty(&record.screenshots).or_else(|| first_non_empty(&record.artworks))?;
    let url = image_url(source)?;
    Some(rewrite_image_url(url, ImageSize::Original))
}

fn description(record: &GameRecord) -> Option<String> {
    let platforms = names(&record.platforms);
    if !platforms.is_empty() {
        return Some(format!("Platforms: {}", platforms.join(", ")));
    }

    record.summary.clone().filter(|s| !s.is_empty())
}

fn genres(record: &GameRecord) -> Option<Vec<String>> {
    let genres = names(&record.genres);
    if genres.is_empty() {
        None
    } else {
        Some(genres)
    }
}

fn videos(record: &GameRecord) -> Vec<MetaVideo> {
    record
        .videos
        .iter()
        .flatten()
        .filter_map(Expandable::expanded)
        .filter_map(video)
        .collect()
}

fn video(entry: &GameVideo) -> Option<MetaVideo> {
    let video_id = entry.video_id.as_deref().filter(|v| !v.is_empty())?;
    Some(MetaVideo {
        id: format!("{}{}", VIDEO_ID_PREFIX, video_id),
        title: entry.name.clone().unwrap_or_default(),
        thumbnail: format!("https://img.youtube.com/vi/{}/default.jpg", video_id),
    })
}

fn first_non_empty(list: &Option<Vec<Expandable<Image>>>) -> Option<&Expandable<Image>> {
    list.as_ref()?.first()
}

fn image_url(image: &Expandable<Image>) -> Option<&str> {
    image.expanded()?.url.as_deref().filter(|u| !u.is_empty())
}

fn names(list: &Option<Vec<Expandable<Named>>>) -> Vec<String> {
    list.iter()
        .flatten()
        .filter_map(Expandable::expanded)
        .filter_map(|n| n.name.clone())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> Expandable<Image> {
        Expandable::Expanded(Image {
            url: Some(url.to_string()),
        })
    }

    fn named(name: &str) -> Expandable<Named> {
        Expandable::Expanded(Named {
            name: Some(name.to_string()),
        })
    }

    #[test]
    fn test_minimal_record() {
        let mut record = GameRecord::new(42, "Game X");
        record.cover = Some(image("//img.example/t_thumb/foo.jpg"));

        let meta = to_meta(&record).unwrap();
        assert_eq!(meta.id, "igdb-42");
        assert_eq!(meta.name.as_deref(), Some("Game X"));
        assert_eq!(meta.kind, ContentType::Channel);
        assert_eq!(meta.poster.as_deref(), Some("https://img.example/t_cover_big/foo.jpg"));
        assert_eq!(meta.description, None);
        assert_eq!(meta.year, None);
        assert_eq!(meta.background, None);
        assert_eq!(meta.genres, None);
        assert!(meta.videos.is_empty());
    }

    #[test]
    fn test_nameless_record_keeps_name_absent() {
        let record = GameRecord {
            id: Some(5),
            ..Default::default()
        };

        let meta = to_meta(&record).unwrap();
        assert_eq!(meta.name, None);
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            serde_json::json!({"id": "igdb-5", "type": "channel", "videos": []})
        );
    }

    #[test]
    fn test_record_without_id_yields_nothing() {
        let record = GameRecord {
            name: Some("No id".into()),
            ..Default::default()
        };
        assert_eq!(to_meta(&record), None);
    }

    #[test]
    fn test_rewrite_keeps_url_without_token() {
        assert_eq!(
            rewrite_image_url("https://img.example/t_720p/foo.jpg", ImageSize::CoverBig),
            "https://img.example/t_720p/foo.jpg"
        );
        assert_eq!(
            rewrite_image_url("//img.example/foo.jpg", ImageSize::Original),
            "https://img.example/foo.jpg"
        );
    }

    #[test]
    fn test_background_prefers_screenshots() {
        let mut record = GameRecord::new(1, "A");
        record.screenshots = Some(vec![image("//s/t_thumb/1.jpg"), image("//s/t_thumb/2.jpg")]);
        record.artworks = Some(vec![image("//a/t_thumb/1.jpg")]);

        assert_eq!(to_meta(&record).unwrap().background.as_deref(), Some("https://s/t_original/1.jpg"));
    }

    #[test]
    fn test_background_falls_back_to_artworks() {
        let mut record = GameRecord::new(1, "A");
        record.screenshots = Some(vec![]);
        record.artworks = Some(vec![image("//a/t_thumb/1.jpg")]);

        assert_eq!(to_meta(&record).unwrap().background.as_deref(), Some("https://a/t_original/1.jpg"));
    }

    #[test]
    fn test_description_platforms_over_summary() {
        let mut record = GameRecord::new(1, "A");
        record.summary = Some("A summary".into());
        record.platforms = Some(vec![named("PC"), named("PlayStation 5")]);

        assert_eq!(
            to_meta(&record).unwrap().description.as_deref(),
            Some("Platforms: PC, PlayStation 5")
        );

        record.platforms = Some(vec![]);
        assert_eq!(to_meta(&record).unwrap().description.as_deref(), Some("A summary"));
    }

    #[test]
    fn test_unexpanded_references_are_skipped() {
        let mut record = GameRecord::new(1, "A");
        record.cover = Some(Expandable::Reference(99));
        record.genres = Some(vec![Expandable::Reference(5), Expandable::Reference(6)]);
        record.platforms = Some(vec![Expandable::Reference(48)]);

        let meta = to_meta(&record).unwrap();
        assert_eq!(meta.poster, None);
        assert_eq!(meta.genres, None);
        assert_eq!(meta.description, None);
    }

    #[test]
    fn test_videos() {
        let mut record = GameRecord::new(1, "A");
        record.videos = Some(vec![
            Expandable::Expanded(GameVideo {
                video_id: Some("abc123".into()),
                name: Some("Trailer".into()),
            }),
            Expandable::Expanded(GameVideo {
                video_id: None,
                name: Some("Broken".into()),
            }),
        ]);

        let videos = to_meta(&record).unwrap().videos;
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "yt_id::abc123");
        assert_eq!(videos[0].title, "Trailer");
        assert_eq!(videos[0].thumbnail, "https://img.youtube.com/vi/abc123/default.jpg");
    }

    #[test]
    fn test_release_year_seconds_and_millis() {
        // 2019-03-01T00:00:00Z
        assert_eq!(release_year(1_551_398_400), Some(2019));
        assert_eq!(release_year(1_551_398_400_000), Some(2019));
        // 1999-12-31T23:59:59Z stays in 1999 regardless of local time zone
        assert_eq!(release_year(946_684_799), Some(1999));
        assert_eq!(release_year(i64::MAX), None);
        assert_eq!(release_year(i64::MIN), None);
    }

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("igdb-42"), Some(42));
        assert_eq!(parse_item_id("igdb-"), None);
        assert_eq!(parse_item_id("igdb-x1"), None);
        assert_eq!(parse_item_id("tt0111161"), None);
        assert_eq!(parse_item_id(&item_id(7)), Some(7));
    }
}
