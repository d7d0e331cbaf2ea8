//! Cursor-following page streams.
//!
//! Listing endpoints paginate by "continue after this cid": the next page is
//! requested with `lastCid` set to the cid of the previous page's last item.
//! The streams here do that feeding automatically, one request at a time.

use std::future::Future;

use futures::stream::{self, BoxStream, StreamExt};

use crate::envelope::{Identified, ListPackage};
use crate::error::Result;

/// Successive pages of a listing, first page first.
pub type PageStream<'a, T> = BoxStream<'a, Result<ListPackage<T>>>;

struct Cursor<F> {
    fetch: F,
    /// `None` once the stream is finished.
    next: Option<Option<String>>,
}

/// Drive `fetch(cursor)` page by page, starting with no cursor.
///
/// Stops after a page marked as the end, an empty page, a page whose last
/// cid equals the cursor it was requested with, or the first error (which is
/// yielded).
pub(crate) fn cursor_pages<'a, T, F, Fut>(fetch: F) -> PageStream<'a, T>
where
    T: Identified + Send + 'a,
    F: FnMut(Option<String>) -> Fut + Send + 'a,
    Fut: Future<Output = Result<ListPackage<T>>> + Send + 'a,
{
    let start = Cursor {
        fetch,
        next: Some(None),
    };
    stream::unfold(start, |mut state| async move {
        let cursor = state.next.take()?;
        let result = (state.fetch)(cursor.clone()).await;
        if let Ok(page) = &result {
            state.next = match page.next_cursor() {
                Some(cid) if cursor.as_deref() != Some(cid) => Some(Some(cid.to_owned())),
                _ => None,
            };
        }
        Some((result, state))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::TryStreamExt;

    use super::*;
    use crate::error::SirenError;
    use crate::types::NewsInfo;

    fn page(cids: &[&str], is_end: Option<bool>) -> ListPackage<NewsInfo> {
        ListPackage {
            list: cids
                .iter()
                .map(|cid| NewsInfo {
                    cid: (*cid).to_owned(),
                    ..NewsInfo::default()
                })
                .collect(),
            is_end,
            autoplay_song_cid: None,
        }
    }

    fn scripted(
        pages: Vec<Result<ListPackage<NewsInfo>>>,
    ) -> (PageStream<'static, NewsInfo>, Arc<Mutex<Vec<Option<String>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let mut pages = pages.into_iter();
        let stream = cursor_pages(move |cursor| {
            log.lock().unwrap().push(cursor);
            let next = pages.next().expect("stream requested too many pages");
            async move { next }
        });
        (stream, seen)
    }

    #[tokio::test]
    async fn follows_cursor_until_end() {
        let (stream, seen) = scripted(vec![
            Ok(page(&["3", "2"], Some(false))),
            Ok(page(&["1"], Some(true))),
        ]);
        let pages: Vec<_> = stream.try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(*seen.lock().unwrap(), [None, Some("2".to_owned())]);
    }

    #[tokio::test]
    async fn stops_on_empty_page() {
        let (stream, seen) = scripted(vec![Ok(page(&["3"], None)), Ok(page(&[], None))]);
        let pages: Vec<_> = stream.try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stops_on_repeated_cursor() {
        let (stream, seen) = scripted(vec![Ok(page(&["3"], None)), Ok(page(&["3"], None))]);
        let pages: Vec<_> = stream.try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn error_ends_stream() {
        let (stream, _) = scripted(vec![
            Ok(page(&["3"], Some(false))),
            Err(SirenError::Operational {
                code: 1,
                message: "busy".into(),
            }),
        ]);
        let results: Vec<_> = stream.collect().await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SirenError::Operational { code: 1, .. })));
    }
}
