//! Cursor-paginated listings.
//!
//! List endpoints answer with `{"results": [...], "next": <cursor|null>}`.
//! The cursor is either an offset (number or numeric string) that is sent
//! back as the `offset` query parameter, or a link to the next page.

use crate::error::SdkError;
use crate::http::client::{decode, LemonHttp, Query};
use crate::http::retry::RetryPolicy;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;

/// One page of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<Cursor>,
}

/// Server-provided pointer to the next page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    Offset(u64),
    Link(String),
}

impl Cursor {
    /// Numeric strings are offsets too.
    fn normalized(self) -> Self {
        match self {
            Cursor::Link(s) => match s.trim().parse::<u64>() {
                Ok(offset) => Cursor::Offset(offset),
                Err(_) => Cursor::Link(s),
            },
            offset => offset,
        }
    }
}

impl LemonHttp {
    /// Fetch every page of `endpoint` and return the concatenated results.
    ///
    /// Stops when `next` is null, when it repeats a cursor already followed,
    /// or when an offset cursor does not move forward. Any page failure
    /// aborts the whole fetch; partial results are never returned on error.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query<'_>,
    ) -> Result<Vec<T>, SdkError> {
        let mut results = Vec::new();
        let mut seen: HashSet<Cursor> = HashSet::new();
        let mut offset: u64 = 0;
        let mut cursor: Option<Cursor> = None;
        let mut pages = 0usize;

        loop {
            let page: Page<T> = match &cursor {
                None => self.fetch_page(endpoint, query).await?,
                Some(Cursor::Offset(n)) => {
                    let mut params: Vec<(&str, String)> = query
                        .iter()
                        .filter(|(k, _)| *k != "offset")
                        .cloned()
                        .collect();
                    params.push(("offset", n.to_string()));
                    self.fetch_page(endpoint, &params).await?
                }
                Some(Cursor::Link(link)) => self.fetch_page(link, &[]).await?,
            };
            pages += 1;
            results.extend(page.results);

            let Some(next) = page.next.map(Cursor::normalized) else {
                break;
            };

            let stalled = match &next {
                Cursor::Offset(n) => *n <= offset,
                Cursor::Link(_) => false,
            };
            if stalled || !seen.insert(next.clone()) {
                tracing::warn!(
                    endpoint = %endpoint,
                    pages,
                    cursor = ?next,
                    "Pager cursor did not advance; stopping"
                );
                break;
            }

            if let Cursor::Offset(n) = next {
                offset = n;
            }
            cursor = Some(next);
        }

        tracing::debug!(endpoint = %endpoint, pages, records = results.len(), "Fetched all pages");
        Ok(results)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query<'_>,
    ) -> Result<Page<T>, SdkError> {
        let value = self
            .execute(Method::GET, endpoint, None::<&()>, query, RetryPolicy::Idempotent)
            .await?;
        decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_with_offset_cursor() {
        let page: Page<u32> = serde_json::from_str(r#"{"results": [1, 2], "next": 20}"#).unwrap();
        assert_eq!(page.results, vec![1, 2]);
        assert_eq!(page.next, Some(Cursor::Offset(20)));
    }

    #[test]
    fn test_page_with_link_cursor() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"results": [], "next": "https://paper-trading.lemon.markets/rest/v1/spaces/?offset=20"}"#,
        )
        .unwrap();
        assert!(matches!(page.next, Some(Cursor::Link(ref l)) if l.ends_with("offset=20")));
    }

    #[test]
    fn test_page_without_next() {
        let page: Page<u32> = serde_json::from_str(r#"{"results": [3]}"#).unwrap();
        assert!(page.next.is_none());
        let page: Page<u32> = serde_json::from_str(r#"{"results": [3], "next": null}"#).unwrap();
        assert!(page.next.is_none());
    }

    #[test]
    fn test_numeric_string_cursor_is_offset() {
        assert_eq!(Cursor::Link("40".into()).normalized(), Cursor::Offset(40));
        assert_eq!(
            Cursor::Link("spaces/?offset=40".into()).normalized(),
            Cursor::Link("spaces/?offset=40".into())
        );
    }

    #[test]
    fn test_page_requires_results() {
        assert!(serde_json::from_str::<Page<u32>>(r#"{"next": null}"#).is_err());
    }
}
