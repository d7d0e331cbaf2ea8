//! Album API.
//!
//! # Endpoints
//!
//! ## `list_all` — `GET albums`
//!
//! ```json
//! { "code": 0, "msg": "", "data": [
//!   { "cid": "8930", "name": "Ost", "coverUrl": "https://...", "artistes": ["塞壬唱片-MSR"] }
//! ] }
//! ```
//!
//! ## `summary` — `GET album/{cid}/data`
//!
//! Same object as above plus `intro`, `belong` and `coverDeUrl`.
//!
//! ## `detail` — `GET album/{cid}/detail`
//!
//! ```json
//! { "code": 0, "msg": "", "data": {
//!   "cid": "8930", "name": "Ost", "intro": "...", "belong": "arknights",
//!   "coverUrl": "https://...", "coverDeUrl": "https://...",
//!   "songs": [ { "cid": "048794", "name": "...", "artistes": ["..."] } ]
//! } }
//! ```

use crate::client::{SirenClient, segment};
use crate::error::Result;
use crate::types::{AlbumDetail, AlbumInfo};

/// Album lookups. Obtain one with [`SirenClient::albums`].
#[derive(Debug, Clone)]
pub struct AlbumService {
    client: SirenClient,
}

impl AlbumService {
    pub(crate) fn new(client: SirenClient) -> Self {
        Self { client }
    }

    /// Every album, newest first.
    ///
    /// # Errors
    ///
    /// - [`SirenError::Transport`](crate::SirenError::Transport) — network failure
    /// - [`SirenError::Operational`](crate::SirenError::Operational) — non-zero `code`
    pub async fn list_all(&self) -> Result<Vec<AlbumInfo>> {
        self.client.fetch_operational("albums").await
    }

    /// Summary fields of one album.
    ///
    /// # Errors
    ///
    /// - [`SirenError::InvalidArgument`](crate::SirenError::InvalidArgument) — blank, `.` or `..` `cid`
    /// - [`SirenError::ServerRejected`](crate::SirenError::ServerRejected) — unknown album
    pub async fn summary(&self, cid: &str) -> Result<AlbumInfo> {
        let path = format!("album/{}/data", segment(cid)?);
        self.client.fetch_entity(&path, cid).await
    }

    /// Full album record including its track list.
    ///
    /// # Errors
    ///
    /// - [`SirenError::InvalidArgument`](crate::SirenError::InvalidArgument) — blank, `.` or `..` `cid`
    /// - [`SirenError::ServerRejected`](crate::SirenError::ServerRejected) — unknown album
    pub async fn detail(&self, cid: &str) -> Result<AlbumDetail> {
        let path = format!("album/{}/detail", segment(cid)?);
        self.client.fetch_entity(&path, cid).await
    }
}
