use igdb_core::*;
use proptest::prelude::*;

fn image(url: String) -> Expandable<Image> {
    Expandable::Expanded(Image { url: Some(url) })
}

fn named(name: String) -> Expandable<Named> {
    Expandable::Expanded(Named { name: Some(name) })
}

fn meta(record: &GameRecord) -> Meta {
    to_meta(record).expect("record has an id")
}

fn host() -> impl Strategy<Value = String> {
    "[a-z]{1,12}\\.[a-z]{2,4}"
}

fn file() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,16}\\.(jpg|png)"
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,20}"
}

proptest! {
    #[test]
    fn poster_never_keeps_thumb_token(host in host(), file in file()) {
        let mut record = GameRecord::new(1, "A");
        record.cover = Some(image(format!("//{}/t_thumb/{}", host, file)));

        let poster = meta(&record).poster.unwrap();
        prop_assert!(poster.starts_with("https://"));
        prop_assert!(poster.contains("/t_cover_big/"));
        prop_assert!(!poster.contains("/t_thumb/"));
    }

    #[test]
    fn background_comes_from_first_screenshot(
        shots in prop::collection::vec(file(), 1..5),
        arts in prop::collection::vec(file(), 0..5),
    ) {
        let mut record = GameRecord::new(1, "A");
        record.screenshots = Some(shots.iter().map(|f| image(format!("//s.example/t_thumb/{}", f))).collect());
        record.artworks = Some(arts.iter().map(|f| image(format!("//a.example/t_thumb/{}", f))).collect());

        prop_assert_eq!(
            meta(&record).background,
            Some(format!("https://s.example/t_original/{}", shots[0]))
        );
    }

    #[test]
    fn background_falls_back_to_first_artwork(arts in prop::collection::vec(file(), 1..5)) {
        let mut record = GameRecord::new(1, "A");
        record.screenshots = Some(Vec::new());
        record.artworks = Some(arts.iter().map(|f| image(format!("//a.example/t_thumb/{}", f))).collect());

        prop_assert_eq!(
            meta(&record).background,
            Some(format!("https://a.example/t_original/{}", arts[0]))
        );
    }

    #[test]
    fn platforms_line_wins_over_summary(
        platforms in prop::collection::vec(word(), 1..6),
        summary in prop::option::of(word()),
    ) {
        let mut record = GameRecord::new(1, "A");
        record.summary = summary;
        record.platforms = Some(platforms.iter().cloned().map(named).collect());

        prop_assert_eq!(
            meta(&record).description,
            Some(format!("Platforms: {}", platforms.join(", ")))
        );
    }

    #[test]
    fn summary_used_verbatim_without_platforms(summary in word()) {
        let mut record = GameRecord::new(1, "A");
        record.summary = Some(summary.clone());
        record.platforms = Some(Vec::new());

        prop_assert_eq!(meta(&record).description, Some(summary));
    }

    #[test]
    fn item_ids_are_injective(a in any::<u64>(), b in any::<u64>()) {
        let meta_a = meta(&GameRecord::new(a, "A"));
        let meta_b = meta(&GameRecord::new(b, "B"));
        prop_assert_eq!(meta_a.id == meta_b.id, a == b);
        prop_assert_eq!(parse_item_id(&meta_a.id), Some(a));
    }

    #[test]
    fn video_ids_and_thumbnails(video_id in "[A-Za-z0-9_-]{6,11}", title in word()) {
        let mut record = GameRecord::new(1, "A");
        record.videos = Some(vec![Expandable::Expanded(GameVideo {
            video_id: Some(video_id.clone()),
            name: Some(title.clone()),
        })]);

        let videos = meta(&record).videos;
        prop_assert_eq!(videos.len(), 1);
        prop_assert_eq!(&videos[0].id, &format!("yt_id::{}", video_id));
        prop_assert_eq!(&videos[0].title, &title);
        prop_assert_eq!(
            &videos[0].thumbnail,
            &format!("https://img.youtube.com/vi/{}/default.jpg", video_id)
        );
    }

    #[test]
    fn year_is_unit_agnostic(secs in 100_000_001i64..4_102_444_800) {
        // 1973-03-03 .. 2100-01-01, where seconds and milliseconds cannot be confused
        let year = release_year(secs);
        prop_assert!(year.is_some());
        prop_assert_eq!(year, release_year(secs * 1000));
    }
}
