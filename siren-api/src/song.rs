//! Song API.
//!
//! ## `list_all` — `GET songs`
//!
//! ```json
//! { "code": 0, "msg": "", "data": {
//!   "list": [ { "cid": "048794", "name": "...", "albumCid": "8930", "artists": ["..."] } ],
//!   "autoplay": "048794"
//! } }
//! ```
//!
//! ## `detail` — `GET song/{cid}`
//!
//! ```json
//! { "code": 0, "msg": "", "data": {
//!   "cid": "048794", "name": "...", "albumCid": "8930",
//!   "sourceUrl": "https://...wav", "lyricUrl": "https://...lrc",
//!   "mvUrl": null, "mvCoverUrl": null, "artists": ["..."]
//! } }
//! ```

use crate::client::{SirenClient, segment};
use crate::envelope::ListPackage;
use crate::error::Result;
use crate::types::{SongDetail, SongInfo};

/// Song lookups. Obtain one with [`SirenClient::songs`].
#[derive(Debug, Clone)]
pub struct SongService {
    client: SirenClient,
}

impl SongService {
    pub(crate) fn new(client: SirenClient) -> Self {
        Self { client }
    }

    /// Full song record: audio, lyric and MV URLs.
    ///
    /// # Errors
    ///
    /// - [`SirenError::InvalidArgument`](crate::SirenError::InvalidArgument) — blank, `.` or `..` `cid`
    /// - [`SirenError::ServerRejected`](crate::SirenError::ServerRejected) — unknown song
    /// - [`SirenError::MissingPayload`](crate::SirenError::MissingPayload) — empty record
    pub async fn detail(&self, cid: &str) -> Result<SongDetail> {
        let path = format!("song/{}", segment(cid)?);
        self.client.fetch_entity(&path, cid).await
    }

    /// Every song in one page, with the player's autoplay hint.
    ///
    /// # Errors
    ///
    /// - [`SirenError::Transport`](crate::SirenError::Transport) — network failure
    /// - [`SirenError::Operational`](crate::SirenError::Operational) — non-zero `code`
    pub async fn list_all(&self) -> Result<ListPackage<SongInfo>> {
        self.client.fetch_operational("songs").await
    }
}
