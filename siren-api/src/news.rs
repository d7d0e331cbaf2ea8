//! News API.
//!
//! ## `recommended` — `GET recommendNews`
//!
//! Bare array of [`RecommendedNewsInfo`].
//!
//! ## `list_all` — `GET news[?lastCid={cid}]`
//!
//! ```json
//! { "code": 0, "msg": "", "data": {
//!   "list": [ { "cid": "7781", "title": "...", "cate": 1, "date": "2023-05-01" } ],
//!   "end": false
//! } }
//! ```
//!
//! Without `lastCid` the first page is returned; with it, the items after
//! that cid.
//!
//! ## `detail` — `GET news/{cid}`
//!
//! Single [`NewsDetail`] with `author` and HTML `content`.

use crate::client::{SirenClient, require_cursor, segment, with_query};
use crate::envelope::ListPackage;
use crate::error::Result;
use crate::paging::{PageStream, cursor_pages};
use crate::types::{NewsDetail, NewsInfo, RecommendedNewsInfo};

/// News lookups. Obtain one with [`SirenClient::news`].
#[derive(Debug, Clone)]
pub struct NewsService {
    client: SirenClient,
}

impl NewsService {
    pub(crate) fn new(client: SirenClient) -> Self {
        Self { client }
    }

    /// Featured news entries for the front page.
    ///
    /// # Errors
    ///
    /// - [`SirenError::Transport`](crate::SirenError::Transport) — network failure
    /// - [`SirenError::Operational`](crate::SirenError::Operational) — non-zero `code`
    pub async fn recommended(&self) -> Result<Vec<RecommendedNewsInfo>> {
        self.client.fetch_operational("recommendNews").await
    }

    /// One page of news, newest first.
    ///
    /// Pass the cid of the last item of the previous page as `last_cid` to
    /// continue after it; pass `None` for the first page.
    ///
    /// # Errors
    ///
    /// - [`SirenError::InvalidArgument`](crate::SirenError::InvalidArgument) — blank `last_cid`
    /// - [`SirenError::Operational`](crate::SirenError::Operational) — non-zero `code` on the first page
    /// - [`SirenError::ServerRejected`](crate::SirenError::ServerRejected) — non-zero `code` after a
    ///   cursor; the cursor is attached
    pub async fn list_all(&self, last_cid: Option<&str>) -> Result<ListPackage<NewsInfo>> {
        require_cursor(last_cid)?;
        let path = with_query("news", &[("lastCid", last_cid)]);
        match last_cid {
            Some(cursor) => self.client.fetch_targeted(&path, cursor).await,
            None => self.client.fetch_operational(&path).await,
        }
    }

    /// Full article.
    ///
    /// # Errors
    ///
    /// - [`SirenError::InvalidArgument`](crate::SirenError::InvalidArgument) — blank, `.` or `..` `cid`
    /// - [`SirenError::ServerRejected`](crate::SirenError::ServerRejected) — unknown article
    /// - [`SirenError::MissingPayload`](crate::SirenError::MissingPayload) — empty record
    pub async fn detail(&self, cid: &str) -> Result<NewsDetail> {
        let path = format!("news/{}", segment(cid)?);
        self.client.fetch_entity(&path, cid).await
    }

    /// Every news page in order, following `lastCid` until the end.
    pub fn pages(&self) -> PageStream<'static, NewsInfo> {
        let service = self.clone();
        cursor_pages(move |cursor| {
            let service = service.clone();
            async move { service.list_all(cursor.as_deref()).await }
        })
    }
}
