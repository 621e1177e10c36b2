//! Mapping of VNDB entities onto host-facing game metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vndb_model::{Release, VisualNovel};

use crate::{
    aggregate::{LanguagePriority, release_producers},
    client::browser_url,
};

pub const PROVIDER_SLUG: &str = "vndb";
pub const PROVIDER_NAME: &str = "VNDB";

/// Every entry on VNDB is a visual novel, so each game gets this one genre.
/// Real tag ids carry a `g` prefix, so `1` cannot collide with them.
pub const VISUAL_NOVEL_GENRE_ID: &str = "1";
pub const VISUAL_NOVEL_GENRE_NAME: &str = "Visual Novel";

/// A named record attributed to this provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidedItem {
    pub name: String,
    pub provider_slug: String,
    pub provider_data_id: String,
}

impl ProvidedItem {
    fn new(name: impl Into<String>, provider_data_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_slug: PROVIDER_SLUG.to_string(),
            provider_data_id: provider_data_id.into(),
        }
    }
}

pub type TagMetadata = ProvidedItem;
pub type GenreMetadata = ProvidedItem;
pub type CompanyMetadata = ProvidedItem;

/// Search hit, enough to let a user pick the right entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalGameMetadata {
    pub title: String,
    pub provider_slug: String,
    pub provider_data_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub title: String,
    pub provider_slug: String,
    pub provider_data_id: String,
    pub provider_data_url: String,
    pub url_screenshots: Vec<String>,
    /// Browser page first, then external links in upstream order.
    pub url_websites: Vec<String>,
    pub tags: Vec<TagMetadata>,
    pub publishers: Vec<CompanyMetadata>,
    pub developers: Vec<CompanyMetadata>,
    pub genres: Vec<GenreMetadata>,
    /// Strictest minimum age over all releases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_playtime: Option<u32>,
    /// The host downloads the image itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Parse an upstream release date. Partial dates resolve to the first day
/// of the month or year; `TBA` and anything unparseable give `None`.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = match parts.next() {
        Some(month) => month.parse::<u32>().ok()?,
        None => 1,
    };
    let day = match parts.next() {
        Some(day) => day.parse::<u32>().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn release_date(vn: &VisualNovel) -> Option<NaiveDate> {
    vn.released.as_deref().and_then(parse_release_date)
}

pub fn minimal_game_metadata(vn: &VisualNovel) -> MinimalGameMetadata {
    MinimalGameMetadata {
        title: vn.title.clone(),
        provider_slug: PROVIDER_SLUG.to_string(),
        provider_data_id: vn.id.clone(),
        release_date: release_date(vn),
        cover_url: vn.image.as_ref().map(|image| image.url.clone()),
        description: vn.description.clone(),
    }
}

/// Full metadata for `vn`, with companies and age rating taken from
/// `releases`. Companies are ordered by `priority`.
pub fn game_metadata(
    vn: &VisualNovel,
    releases: &[Release],
    priority: &LanguagePriority,
) -> GameMetadata {
    let producers = release_producers(releases, priority);
    let company = |credit: &vndb_model::ReleaseProducer| {
        ProvidedItem::new(&credit.producer.name, &credit.producer.id)
    };

    let browser = browser_url(&vn.id);
    let url_websites = std::iter::once(browser.clone())
        .chain(vn.extlinks.iter().map(|link| link.url.clone()))
        .collect();

    GameMetadata {
        title: vn.title.clone(),
        provider_slug: PROVIDER_SLUG.to_string(),
        provider_data_id: vn.id.clone(),
        provider_data_url: browser,
        url_screenshots: vn.screenshots.iter().map(|s| s.url.clone()).collect(),
        url_websites,
        // genres on VNDB are tags too; passed through unfiltered
        tags: vn
            .tags
            .iter()
            .map(|tag| ProvidedItem::new(&tag.name, &tag.id))
            .collect(),
        publishers: producers
            .iter()
            .filter(|credit| credit.publisher)
            .map(company)
            .collect(),
        developers: producers
            .iter()
            .filter(|credit| credit.developer)
            .map(company)
            .collect(),
        genres: vec![ProvidedItem::new(
            VISUAL_NOVEL_GENRE_NAME,
            VISUAL_NOVEL_GENRE_ID,
        )],
        age_rating: releases.iter().filter_map(|release| release.minage).max(),
        release_date: release_date(vn),
        description: vn.description.clone(),
        average_playtime: vn.length_minutes,
        cover_url: vn.image.as_ref().map(|image| image.url.clone()),
        rating: vn.rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vndb_model::{
        ExtLink, Image, Producer, ProducerType, ReleaseProducer, Tag,
    };

    fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            url: format!("https://t.vndb.org/{id}.jpg"),
            thumbnail: format!("https://t.vndb.org/t/{id}.jpg"),
        }
    }

    fn ever17() -> VisualNovel {
        VisualNovel {
            id: "v17".into(),
            title: "Ever17 -the out of infinity-".into(),
            aliases: vec!["E17".into()],
            description: Some("Trapped in an underwater park.".into()),
            released: Some("2002-08-29".into()),
            length_minutes: Some(2400),
            rating: Some(87.4),
            extlinks: vec![ExtLink {
                url: "https://en.wikipedia.org/wiki/Ever17".into(),
                label: "Wikipedia".into(),
                name: "wikipedia".into(),
            }],
            tags: vec![Tag {
                id: "g32".into(),
                name: "Amnesia".into(),
                aliases: Vec::new(),
            }],
            image: Some(image("cv1")),
            screenshots: vec![image("sf1"), image("sf2")],
        }
    }

    fn credit(id: &str, lang: &str, developer: bool, publisher: bool) -> ReleaseProducer {
        ReleaseProducer {
            producer: Producer {
                id: id.into(),
                name: format!("Studio {id}"),
                aliases: Vec::new(),
                lang: lang.into(),
                kind: ProducerType::Company,
            },
            developer,
            publisher,
        }
    }

    fn release(minage: Option<u8>, producers: Vec<ReleaseProducer>) -> Release {
        Release {
            id: "r1".into(),
            title: "Ever17".into(),
            minage,
            official: true,
            languages: Vec::new(),
            producers,
        }
    }

    fn ids(items: &[ProvidedItem]) -> Vec<&str> {
        items.iter().map(|i| i.provider_data_id.as_str()).collect()
    }

    #[test]
    fn release_dates_accept_partial_forms() {
        assert_eq!(
            parse_release_date("2002-08-29"),
            NaiveDate::from_ymd_opt(2002, 8, 29)
        );
        assert_eq!(
            parse_release_date("2002-08"),
            NaiveDate::from_ymd_opt(2002, 8, 1)
        );
        assert_eq!(parse_release_date("2002"), NaiveDate::from_ymd_opt(2002, 1, 1));
        assert_eq!(parse_release_date("TBA"), None);
        assert_eq!(parse_release_date("2002-13-01"), None);
        assert_eq!(parse_release_date(""), None);
    }

    #[test]
    fn minimal_metadata_carries_optional_fields() {
        let minimal = minimal_game_metadata(&ever17());
        assert_eq!(minimal.provider_slug, "vndb");
        assert_eq!(minimal.provider_data_id, "v17");
        assert_eq!(minimal.release_date, NaiveDate::from_ymd_opt(2002, 8, 29));
        assert_eq!(minimal.cover_url.as_deref(), Some("https://t.vndb.org/cv1.jpg"));

        let bare = VisualNovel {
            description: None,
            released: Some("TBA".into()),
            image: None,
            ..ever17()
        };
        let minimal = minimal_game_metadata(&bare);
        assert!(minimal.release_date.is_none());
        assert!(minimal.cover_url.is_none());

        let json = serde_json::to_value(&minimal).unwrap();
        assert!(json.get("cover_url").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn full_metadata_maps_every_field() {
        let releases = vec![
            release(Some(12), vec![credit("p1", "ja", true, true)]),
            release(None, vec![credit("p1", "ja", true, true), credit("p2", "en", false, true)]),
            release(Some(15), Vec::new()),
        ];
        let metadata =
            game_metadata(&ever17(), &releases, &LanguagePriority::new(["en"]));

        assert_eq!(metadata.provider_data_url, "https://vndb.org/v17");
        assert_eq!(
            metadata.url_websites,
            ["https://vndb.org/v17", "https://en.wikipedia.org/wiki/Ever17"]
        );
        assert_eq!(
            metadata.url_screenshots,
            ["https://t.vndb.org/sf1.jpg", "https://t.vndb.org/sf2.jpg"]
        );
        assert_eq!(ids(&metadata.tags), ["g32"]);
        assert_eq!(ids(&metadata.publishers), ["p2", "p1"]);
        assert_eq!(ids(&metadata.developers), ["p1"]);
        assert_eq!(metadata.developers[0].name, "Studio p1");
        assert_eq!(
            metadata.genres,
            vec![ProvidedItem::new("Visual Novel", "1")]
        );
        assert_eq!(metadata.age_rating, Some(15));
        assert_eq!(metadata.average_playtime, Some(2400));
        assert_eq!(metadata.rating, Some(87.4));
        assert_eq!(metadata.cover_url.as_deref(), Some("https://t.vndb.org/cv1.jpg"));
    }

    #[test]
    fn unknown_age_ratings_are_left_out() {
        let releases = vec![release(None, Vec::new())];
        let metadata =
            game_metadata(&ever17(), &releases, &LanguagePriority::default());

        assert_eq!(metadata.age_rating, None);
        assert!(metadata.publishers.is_empty());
        assert!(metadata.developers.is_empty());
    }
}
