//! Monster Siren API client library.
//!
//! Typed, async access to the public content API behind
//! `monster-siren.hypergryph.com`: albums, songs, news and search.
//!
//! ```no_run
//! # async fn run() -> siren_api::Result<()> {
//! use siren_api::SirenClient;
//!
//! let client = SirenClient::new()?;
//! let album = client.albums().detail("8930").await?;
//! for song in &album.songs {
//!     println!("{} - {}", song.cid, song.name);
//! }
//!
//! // Cursor pagination: continue after the last item of the previous page.
//! let first = client.news().list_all(None).await?;
//! if let Some(cursor) = first.next_cursor() {
//!     let _second = client.news().list_all(Some(cursor)).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                 | Endpoint                      | Returns                              |
//! |----------------------------------------|-------------------------------|--------------------------------------|
//! | [`AlbumService::list_all`]             | `albums`                      | `Vec<AlbumInfo>`                     |
//! | [`AlbumService::summary`]              | `album/{cid}/data`            | [`AlbumInfo`]                        |
//! | [`AlbumService::detail`]               | `album/{cid}/detail`          | [`AlbumDetail`]                      |
//! | [`SongService::list_all`]              | `songs`                       | `ListPackage<SongInfo>`              |
//! | [`SongService::detail`]                | `song/{cid}`                  | [`SongDetail`]                       |
//! | [`NewsService::recommended`]           | `recommendNews`               | `Vec<RecommendedNewsInfo>`           |
//! | [`NewsService::list_all`]              | `news[?lastCid=]`             | `ListPackage<NewsInfo>`              |
//! | [`NewsService::detail`]                | `news/{cid}`                  | [`NewsDetail`]                       |
//! | [`SearchService::albums_and_news`]     | `search?keyword=`             | [`SearchResult`]                     |
//! | [`SearchService::albums`]              | `search/album?keyword=[&lastCid=]` | `ListPackage<AlbumInfo>`        |
//! | [`SearchService::news`]                | `search/news?keyword=[&lastCid=]`  | `ListPackage<NewsInfo>`         |
//!
//! # Errors
//!
//! Blank ids and keywords fail with [`SirenError::InvalidArgument`] before
//! any request. Network failures are [`SirenError::Transport`]. Non-zero
//! envelope codes are [`SirenError::ServerRejected`] for calls keyed by a cid
//! or keyword and [`SirenError::Operational`] for bulk listings.

pub mod album;
pub mod client;
pub mod envelope;
pub mod error;
pub mod news;
pub mod paging;
pub mod search;
pub mod song;
pub mod types;

pub use album::AlbumService;
pub use client::{ClientConfig, HttpTransport, SirenClient, Transport};
pub use envelope::{Identified, ListPackage, ResponsePackage};
pub use error::{Result, SirenError};
pub use news::NewsService;
pub use search::SearchService;
pub use song::SongService;
pub use types::{
    AlbumDetail, AlbumInfo, NewsCategory, NewsDetail, NewsInfo, RecommendedNewsCoverInfo,
    RecommendedNewsInfo, SearchResult, SongDetail, SongInfo,
};
