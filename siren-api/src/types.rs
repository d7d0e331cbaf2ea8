//! Data types for Monster Siren API responses.
//!
//! Every type here is a read-only snapshot of server state created at decode
//! time. Absent wire fields take their default (empty string, `0`, empty
//! list), so `T::default()` doubles as the "nothing returned" sentinel and
//! list fields are never null.
//!
//! Field names follow Rust conventions. The serde names are the lowercased
//! wire keys, because bodies are key-normalized before decoding (see
//! [`envelope`](crate::envelope)).
//!
//! Equality is structural: scalars compare by value and list fields compare
//! element-wise in order, so the same artists in a different order make two
//! values unequal.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::envelope::{Identified, ListPackage};

/// An album as shown in listings and search results.
///
/// `GET albums` fills `cid`, `name`, `cover_url` and `artistes`;
/// `GET album/{cid}/data` fills every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlbumInfo {
    pub cid: String,
    pub name: String,
    pub intro: String,
    /// Owning franchise tag (e.g. `arknights`).
    pub belong: String,
    #[serde(rename = "coverurl")]
    pub cover_url: String,
    /// Wide "display" variant of the cover.
    #[serde(rename = "coverdeurl")]
    pub cover_de_url: String,
    /// Credited artists, in credit order.
    #[serde(alias = "artists")]
    pub artistes: Vec<String>,
}

/// Full album record including its songs, from `GET album/{cid}/detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlbumDetail {
    pub cid: String,
    pub name: String,
    pub intro: String,
    pub belong: String,
    #[serde(rename = "coverurl")]
    pub cover_url: String,
    #[serde(rename = "coverdeurl")]
    pub cover_de_url: String,
    /// Track list in album order.
    pub songs: Vec<SongInfo>,
}

/// A song as shown in listings and inside [`AlbumDetail`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SongInfo {
    pub cid: String,
    pub name: String,
    /// Cid of the album this song belongs to. Not resolved client-side.
    #[serde(rename = "albumcid")]
    pub album_cid: String,
    /// Performing artists. Album detail payloads spell the key `artistes`.
    #[serde(alias = "artistes")]
    pub artists: Vec<String>,
}

/// Full song record, from `GET song/{cid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SongDetail {
    pub cid: String,
    pub name: String,
    #[serde(rename = "albumcid")]
    pub album_cid: String,
    /// Audio file URL.
    #[serde(rename = "sourceurl")]
    pub source_url: String,
    /// LRC lyric file URL. Empty for instrumentals.
    #[serde(rename = "lyricurl")]
    pub lyric_url: String,
    #[serde(rename = "mvurl")]
    pub mv_url: String,
    #[serde(rename = "mvcoverurl")]
    pub mv_cover_url: String,
    #[serde(alias = "artistes")]
    pub artists: Vec<String>,
}

/// A news entry as shown in listings and search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsInfo {
    pub cid: String,
    pub title: String,
    /// Raw category code (wire key `cate`). See [`NewsCategory`].
    #[serde(rename = "cate")]
    pub category: i32,
    /// Publication date as sent by the server.
    pub date: String,
}

/// Full news article, from `GET news/{cid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsDetail {
    pub cid: String,
    pub title: String,
    #[serde(rename = "cate")]
    pub category: i32,
    pub author: String,
    /// Article body (HTML).
    pub content: String,
    pub date: String,
}

/// A featured news entry, from `GET recommendNews`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecommendedNewsInfo {
    pub cid: String,
    pub title: String,
    #[serde(rename = "cate")]
    pub category: i32,
    pub date: String,
    pub description: String,
    pub cover: RecommendedNewsCoverInfo,
}

/// Banner artwork attached to a [`RecommendedNewsInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecommendedNewsCoverInfo {
    #[serde(rename = "coverurl")]
    pub cover_url: String,
    #[serde(rename = "coverdeurl")]
    pub cover_de_url: String,
}

/// Combined result of `GET search`.
///
/// The two pages are independent: each has its own end flag and cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub albums: ListPackage<AlbumInfo>,
    pub news: ListPackage<NewsInfo>,
}

/// Known news category codes.
///
/// This is a display label set only. Entities keep the raw integer, and codes
/// outside this set are valid.
///
/// | Variant        | Code |
/// |----------------|------|
/// | `Announcement` | 1    |
/// | `Activity`     | 2    |
/// | `News`         | 3    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsCategory {
    Announcement = 1,
    Activity = 2,
    News = 3,
}

impl NewsCategory {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Announcement => "Announcement",
            Self::Activity => "Activity",
            Self::News => "News",
        }
    }
}

impl TryFrom<i32> for NewsCategory {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Announcement),
            2 => Ok(Self::Activity),
            3 => Ok(Self::News),
            other => Err(other),
        }
    }
}

impl From<NewsCategory> for i32 {
    fn from(category: NewsCategory) -> Self {
        category as i32
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_and_remainder(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|(date, _)| date)
}

impl NewsInfo {
    /// The category label, if the code is a known one.
    pub fn known_category(&self) -> Option<NewsCategory> {
        NewsCategory::try_from(self.category).ok()
    }

    /// Publication date parsed from `date`, if it starts with `YYYY-MM-DD`.
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

impl NewsDetail {
    /// The category label, if the code is a known one.
    pub fn known_category(&self) -> Option<NewsCategory> {
        NewsCategory::try_from(self.category).ok()
    }

    /// Publication date parsed from `date`, if it starts with `YYYY-MM-DD`.
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {$(
        impl Identified for $ty {
            fn cid(&self) -> &str {
                &self.cid
            }
        }

        impl $ty {
            /// Whether this equals the all-defaults "nothing returned" value.
            pub fn is_empty(&self) -> bool {
                *self == Self::default()
            }
        }
    )+};
}

impl_entity!(
    AlbumInfo,
    AlbumDetail,
    SongInfo,
    SongDetail,
    NewsInfo,
    NewsDetail,
    RecommendedNewsInfo,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::normalize;
    use serde_json::json;

    fn song(cid: &str, artists: &[&str]) -> SongInfo {
        SongInfo {
            cid: cid.into(),
            name: "Radiant".into(),
            album_cid: "1030".into(),
            artists: artists.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = song("1", &["Adam", "Eve"]);
        let b = song("1", &["Eve", "Adam"]);
        assert_ne!(a, b);
    }

    #[test]
    fn equality_is_by_value() {
        let a = song("1", &["Adam", "Eve"]);
        let b = song("1", &["Adam", "Eve"]);
        assert_eq!(a, b);
        assert_eq!(SongInfo::default(), SongInfo::default());
    }

    #[test]
    fn nested_song_order_matters_for_album_detail() {
        let first = AlbumDetail {
            cid: "1030".into(),
            songs: vec![song("1", &[]), song("2", &[])],
            ..AlbumDetail::default()
        };
        let mut second = first.clone();
        assert_eq!(first, second);

        second.songs.reverse();
        assert_ne!(first, second);
    }

    #[test]
    fn default_is_empty_sentinel() {
        assert!(AlbumDetail::default().is_empty());
        assert!(AlbumDetail::default().songs.is_empty());
        assert!(!song("1", &[]).is_empty());
    }

    #[test]
    fn album_artists_survive_either_spelling() {
        let doubled = json!({ "cid": "1", "artists": ["A"], "artistes": ["B"] });
        let album: AlbumInfo = serde_json::from_value(normalize(doubled)).unwrap();
        assert_eq!(album.artistes, ["A"]);

        let plain = json!({ "cid": "1", "artistes": ["B"] });
        let album: AlbumInfo = serde_json::from_value(normalize(plain)).unwrap();
        assert_eq!(album.artistes, ["B"]);
    }

    #[test]
    fn unknown_category_is_preserved() {
        let news = NewsInfo {
            cid: "5".into(),
            category: 42,
            ..NewsInfo::default()
        };
        assert_eq!(news.category, 42);
        assert_eq!(news.known_category(), None);
        assert_eq!(NewsCategory::try_from(42), Err(42));
    }

    #[test]
    fn known_category_round_trips() {
        for category in [
            NewsCategory::Announcement,
            NewsCategory::Activity,
            NewsCategory::News,
        ] {
            assert_eq!(NewsCategory::try_from(i32::from(category)), Ok(category));
        }
        assert_eq!(NewsCategory::Activity.label(), "Activity");
    }

    #[test]
    fn published_on_accepts_date_and_datetime() {
        let mut news = NewsInfo {
            date: "2023-05-01".into(),
            ..NewsInfo::default()
        };
        assert_eq!(news.published_on(), NaiveDate::from_ymd_opt(2023, 5, 1));

        news.date = "2023-05-01 12:30:00".into();
        assert_eq!(news.published_on(), NaiveDate::from_ymd_opt(2023, 5, 1));

        news.date = "yesterday".into();
        assert_eq!(news.published_on(), None);
    }
}
