//! Search API.
//!
//! Endpoints:
//! - `GET search?keyword={kw}` — first page of albums and news together
//! - `GET search/album?keyword={kw}[&lastCid={cid}]` — albums only, paged
//! - `GET search/news?keyword={kw}[&lastCid={cid}]` — news only, paged
//!
//! Combined response:
//! ```json
//! { "code": 0, "msg": "", "data": {
//!   "albums": { "list": [ { "cid": "8930", "name": "...", "coverUrl": "...", "artistes": [] } ], "end": true },
//!   "news":   { "list": [ { "cid": "7781", "title": "...", "cate": 1, "date": "..." } ], "end": false }
//! } }
//! ```
//!
//! The two halves are independent. To page further, pass the last cid of the
//! relevant half to [`SearchService::albums`] or [`SearchService::news`].

use serde::de::DeserializeOwned;

use crate::client::{SirenClient, require, require_cursor, with_query};
use crate::envelope::ListPackage;
use crate::error::Result;
use crate::paging::{PageStream, cursor_pages};
use crate::types::{AlbumInfo, NewsInfo, SearchResult};

/// Keyword search. Obtain one with [`SirenClient::search`].
///
/// Non-zero `code` responses become
/// [`SirenError::ServerRejected`](crate::SirenError::ServerRejected) carrying
/// the keyword.
#[derive(Debug, Clone)]
pub struct SearchService {
    client: SirenClient,
}

impl SearchService {
    pub(crate) fn new(client: SirenClient) -> Self {
        Self { client }
    }

    /// First page of matching albums and news, in one request.
    pub async fn albums_and_news(&self, keyword: &str) -> Result<SearchResult> {
        require("keyword", keyword)?;
        let path = with_query("search", &[("keyword", Some(keyword))]);
        self.client.fetch_targeted(&path, keyword).await
    }

    /// One page of matching albums, continuing after `last_cid` if given.
    pub async fn albums(
        &self,
        keyword: &str,
        last_cid: Option<&str>,
    ) -> Result<ListPackage<AlbumInfo>> {
        self.paged("search/album", keyword, last_cid).await
    }

    /// One page of matching news, continuing after `last_cid` if given.
    pub async fn news(
        &self,
        keyword: &str,
        last_cid: Option<&str>,
    ) -> Result<ListPackage<NewsInfo>> {
        self.paged("search/news", keyword, last_cid).await
    }

    /// Every page of matching albums.
    pub fn album_pages(&self, keyword: &str) -> Result<PageStream<'static, AlbumInfo>> {
        require("keyword", keyword)?;
        let service = self.clone();
        let keyword = keyword.to_owned();
        Ok(cursor_pages(move |cursor| {
            let service = service.clone();
            let keyword = keyword.clone();
            async move { service.albums(&keyword, cursor.as_deref()).await }
        }))
    }

    /// Every page of matching news.
    pub fn news_pages(&self, keyword: &str) -> Result<PageStream<'static, NewsInfo>> {
        require("keyword", keyword)?;
        let service = self.clone();
        let keyword = keyword.to_owned();
        Ok(cursor_pages(move |cursor| {
            let service = service.clone();
            let keyword = keyword.clone();
            async move { service.news(&keyword, cursor.as_deref()).await }
        }))
    }

    async fn paged<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        keyword: &str,
        last_cid: Option<&str>,
    ) -> Result<ListPackage<T>> {
        require("keyword", keyword)?;
        require_cursor(last_cid)?;
        let path = with_query(
            endpoint,
            &[("keyword", Some(keyword)), ("lastCid", last_cid)],
        );
        self.client.fetch_targeted(&path, keyword).await
    }
}
