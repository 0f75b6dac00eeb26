//! Link-based pagination
//!
//! A collection endpoint returns one page per request, with a link to the
//! next page somewhere in the body. [`Pager`] follows those links using a
//! fetch function supplied by the caller, so the same code drives real HTTP
//! requests and canned bodies in tests.

use crate::error::{LbError, Result};
use futures::{Stream, TryStreamExt};
use serde_json::Value;
use std::future::Future;
use url::Url;

/// Where the next-page link lives in a response body by default
pub const DEFAULT_LINK_PATH: &[&str] = &["links"];

/// One page of a collection
pub trait Page: Sized {
    /// Whether the page holds no items. Paging stops at the first empty page.
    fn is_empty(&self) -> Result<bool>;

    /// URL of the following page, if there is one
    fn next_page_url(&self) -> Result<Option<Url>>;
}

/// A raw page body together with the URL it was fetched from
#[derive(Debug, Clone)]
pub struct LinkedPage {
    pub url: Url,
    pub body: Value,
    link_path: Vec<String>,
}

impl LinkedPage {
    pub fn new(url: Url, body: Value) -> Self {
        Self {
            url,
            body,
            link_path: DEFAULT_LINK_PATH.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Look for the next link under a different sequence of keys
    pub fn with_link_path(mut self, path: &[&str]) -> Self {
        self.link_path = path.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Find the next-page link.
    ///
    /// The value at the end of the link path may be a URL string, an object
    /// with a `next` key, or an array of `{"rel", "href"}` links. A missing
    /// key or `null` means there is no next page. Relative links are resolved
    /// against the URL of this page.
    pub fn next_page_url(&self) -> Result<Option<Url>> {
        let mut current = &self.body;

        for key in &self.link_path {
            match current {
                Value::Object(map) => match map.get(key) {
                    Some(v) => current = v,
                    None => return Ok(None),
                },
                Value::Null => return Ok(None),
                other => {
                    return Err(LbError::Link(format!(
                        "expected an object at '{}', found {}",
                        key,
                        kind_of(other)
                    )))
                }
            }
        }

        let href = match current {
            Value::Null => None,
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => match map.get("next") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.as_str()),
                Some(other) => {
                    return Err(LbError::Link(format!(
                        "expected a string next link, found {}",
                        kind_of(other)
                    )))
                }
            },
            Value::Array(links) => links
                .iter()
                .find(|link| link.get("rel").and_then(|v| v.as_str()) == Some("next"))
                .and_then(|link| link.get("href"))
                .and_then(|v| v.as_str()),
            other => {
                return Err(LbError::Link(format!(
                    "expected a link, found {}",
                    kind_of(other)
                )))
            }
        };

        match href {
            None => Ok(None),
            Some("") => Ok(None),
            Some(href) => self
                .url
                .join(href)
                .map(Some)
                .map_err(|e| LbError::Link(format!("{}: {}", href, e))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Walks a paginated collection, one page at a time.
///
/// `fetch` receives the URL of each page in turn and returns its body.
/// `make_page` wraps the body in the page type for the collection.
pub struct Pager<P, F> {
    initial: Url,
    make_page: fn(Url, Value) -> P,
    fetch: F,
}

impl<P, F, Fut> Pager<P, F>
where
    P: Page,
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    pub fn new(initial: Url, make_page: fn(Url, Value) -> P, fetch: F) -> Self {
        Self {
            initial,
            make_page,
            fetch,
        }
    }

    /// Stream of pages. Ends after an empty page, after a page with no next
    /// link, or at the first error. A page whose next link is malformed is
    /// still yielded; the link error follows it.
    pub fn into_stream(self) -> impl Stream<Item = Result<P>> {
        let Pager {
            initial,
            make_page,
            fetch,
        } = self;

        futures::stream::try_unfold(
            (Ok(Some(initial)), fetch),
            move |(next, mut fetch): (Result<Option<Url>>, F)| async move {
                let Some(url) = next? else {
                    return Ok(None);
                };

                tracing::debug!("Fetching page {}", url);
                let body = fetch(url.clone()).await?;
                let page = make_page(url, body);

                if page.is_empty()? {
                    return Ok(None);
                }

                let next = page.next_page_url();
                Ok::<_, LbError>(Some((page, (next, fetch))))
            },
        )
    }

    /// Hand every page to `handler` until it returns `false` or the
    /// collection is exhausted
    pub async fn each_page<H>(self, mut handler: H) -> Result<()>
    where
        H: FnMut(P) -> Result<bool>,
    {
        let pages = self.into_stream();
        futures::pin_mut!(pages);

        while let Some(page) = pages.try_next().await? {
            if !handler(page)? {
                break;
            }
        }

        Ok(())
    }
}
