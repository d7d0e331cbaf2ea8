//! Response envelopes shared by every endpoint.
//!
//! Every response body has the same outer shape:
//!
//! ```json
//! { "code": 0, "msg": "", "data": { ...endpoint-specific payload... } }
//! ```
//!
//! `code == 0` means success. Any other code is an application-level
//! rejection, in which case `msg` explains why and `data` is meaningless.
//!
//! Listing endpoints wrap their items in a second layer, [`ListPackage`]:
//!
//! ```json
//! { "list": [ ... ], "end": false, "autoplay": "048794" }
//! ```
//!
//! # Key casing
//!
//! The server does not guarantee key casing, so bodies are normalized before
//! typed deserialization: every object key is lowercased and `null` members
//! are dropped (the field's default applies instead). All model types are
//! declared against the lowercased names.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, SirenError};

/// The `code` value reported by successful responses.
pub const SUCCESS_CODE: i64 = 0;

/// Entities addressed by a server-assigned content id.
pub trait Identified {
    /// The opaque content id (`cid`).
    fn cid(&self) -> &str;
}

/// Outer envelope of every API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePackage<T> {
    /// API status code; `0` on success.
    pub code: i64,
    /// Human-readable status message (wire key `msg`).
    pub message: String,
    /// Decoded payload. Only meaningful when [`is_success`](Self::is_success).
    pub data: Option<T>,
}

#[derive(Deserialize)]
struct RawPackage {
    code: i64,
    #[serde(default, rename = "msg", alias = "message")]
    message: String,
    #[serde(default)]
    data: Value,
}

impl<T: DeserializeOwned> ResponsePackage<T> {
    /// Decode a fully buffered response body.
    ///
    /// Succeeds for rejected responses too, so that `code` and `message` are
    /// always available to the caller. When `code != 0` a payload that does
    /// not match `T` is dropped instead of failing the decode.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Decode an already parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawPackage = serde_json::from_value(normalize(value))?;
        let data = match raw.data {
            Value::Null => None,
            payload => match serde_json::from_value(payload) {
                Ok(data) => Some(data),
                Err(err) if raw.code == SUCCESS_CODE => return Err(err.into()),
                Err(_) => None,
            },
        };
        Ok(Self {
            code: raw.code,
            message: raw.message,
            data,
        })
    }
}

impl<T> ResponsePackage<T> {
    /// Whether the server reported success. Ignores whether `data` is present.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Extract the payload, turning a rejection into the error built by
    /// `reject(code, message)`.
    ///
    /// A successful envelope without payload yields
    /// [`SirenError::MissingPayload`].
    pub fn into_data<F>(self, endpoint: &str, reject: F) -> Result<T>
    where
        F: FnOnce(i64, String) -> SirenError,
    {
        if !self.is_success() {
            return Err(reject(self.code, self.message));
        }
        self.data.ok_or_else(|| SirenError::MissingPayload {
            endpoint: endpoint.to_owned(),
        })
    }
}

/// One page of a listing.
///
/// Iterating a `ListPackage` walks `list` in server order; `is_end` and
/// `autoplay_song_cid` are page metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListPackage<T> {
    /// Items in server order (ranking or recency).
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    /// Whether no more items follow this page. `None` if the server did not say.
    #[serde(default, rename = "isend", alias = "end")]
    pub is_end: Option<bool>,
    /// Song the web player starts with, sent along with song listings.
    #[serde(default, rename = "autoplaysongcid", alias = "autoplay")]
    pub autoplay_song_cid: Option<String>,
}

impl<T> Default for ListPackage<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            is_end: None,
            autoplay_song_cid: None,
        }
    }
}

impl<T> ListPackage<T> {
    /// Iterate the items in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.list.iter()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The top-ranked (or newest) item on this page.
    pub fn first(&self) -> Option<&T> {
        self.list.first()
    }

    /// The item whose cid continues pagination.
    pub fn last(&self) -> Option<&T> {
        self.list.last()
    }

    /// `true` only when the server explicitly marked this page as the last one.
    pub fn is_end(&self) -> bool {
        self.is_end.unwrap_or(false)
    }
}

impl<T: Identified> ListPackage<T> {
    /// Cursor for the next page: the cid of the last item, unless this page
    /// is empty or marked as the end.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.is_end() {
            return None;
        }
        self.last().map(Identified::cid)
    }
}

impl<T> IntoIterator for ListPackage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListPackage<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

/// Alternate spellings of the same wire field, as `(canonical, alias)`.
///
/// When both appear in one object the canonical key wins and the alias is
/// dropped, since serde rejects a field supplied twice.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("msg", "message"),
    ("isend", "end"),
    ("autoplaysongcid", "autoplay"),
    ("artists", "artistes"),
];

/// Lowercase every object key, drop `null` members and collapse duplicate
/// aliases, recursively.
pub(crate) fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut map: Map<String, Value> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.to_lowercase(), normalize(v)))
                .collect();
            for (canonical, alias) in KEY_ALIASES {
                if map.contains_key(*canonical) {
                    map.remove(*alias);
                }
            }
            Value::Object(map)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}
