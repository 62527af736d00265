//! Lazy pagination over listing endpoints.
//!
//! Listings are fetched page by page on demand and cached by page number.
//! The server announces the last page through the `Link` response header
//! (RFC 8288); an empty page is the fallback end-of-list signal.

use crate::client::FakturoidClient;
use crate::errors::{FakturoidError, FakturoidResult};
use crate::models::Resource;
use reqwest::header::HeaderMap;
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Parses the last page number out of a `Link` header value.
pub(crate) fn last_page_from_header(header_value: &str) -> Option<u32> {
    for part in header_value.split(',') {
        let mut target = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                target = Some(&segment[1..segment.len() - 1]);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rel = Some(value.trim_matches('"'));
            }
        }

        if rel == Some("last") {
            return target.and_then(|url| {
                url::Url::parse(url).ok().and_then(|u| {
                    u.query_pairs()
                        .find(|(k, _)| k == "page")
                        .and_then(|(_, v)| v.parse().ok())
                })
            });
        }
    }
    None
}

/// Parses the last page number out of response headers.
pub(crate) fn last_page_from_headers(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("link")
        .and_then(|v| v.to_str().ok())
        .and_then(last_page_from_header)
}

/// A lazily loaded, page-cached view over one listing endpoint.
///
/// Pages are numbered from 1 and fetched on first access. Requesting a page
/// past the known end returns an empty slice without touching the network.
/// [`len`](Self::len) and [`get`](Self::get) materialize the whole listing;
/// [`slice`](Self::slice) walks it lazily instead.
pub struct PagedList<'a, T: Resource> {
    client: &'a FakturoidClient,
    endpoint: String,
    params: Vec<(String, String)>,
    pages: BTreeMap<u32, Vec<T>>,
    page_count: Option<u32>,
}

impl<'a, T: Resource> PagedList<'a, T> {
    pub(crate) fn new(
        client: &'a FakturoidClient,
        endpoint: impl Into<String>,
        params: Vec<(String, String)>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            params,
            pages: BTreeMap::new(),
            page_count: None,
        }
    }

    /// Returns one page of models, fetching it if it is not cached yet.
    /// Page numbers start at 1.
    pub async fn page(&mut self, number: u32) -> FakturoidResult<&[T]> {
        if number == 0 {
            return Err(FakturoidError::invalid_parameter("page numbers start at 1"));
        }
        if !self.pages.contains_key(&number) {
            if let Some(count) = self.page_count {
                if number > count {
                    return Ok(&[]);
                }
            }
            self.fetch_page(number).await?;
        }
        Ok(self
            .pages
            .get(&number)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    async fn fetch_page(&mut self, number: u32) -> FakturoidResult<()> {
        let mut params = self.params.clone();
        params.push(("page".to_string(), number.to_string()));

        let response = self.client.get(&self.endpoint, &params).await?;
        if let Some(count) = response.page_count {
            self.page_count = Some(count);
        }

        let items = match response.body {
            Some(Json::Array(items)) => items,
            other => {
                return Err(FakturoidError::deserialization(format!(
                    "expected a JSON array from {}, got {}",
                    self.endpoint,
                    match other {
                        Some(v) => v.to_string(),
                        None => "no body".to_string(),
                    }
                )))
            }
        };

        let mut models = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Json::Object(map) => models.push(T::from_fields(map)),
                other => {
                    return Err(FakturoidError::deserialization(format!(
                        "expected JSON objects in the {} listing, got {}",
                        self.endpoint, other
                    )))
                }
            }
        }

        if models.is_empty() {
            // an empty page means the previous page was the last one
            let discovered = number.saturating_sub(1);
            self.page_count = Some(match self.page_count {
                Some(count) => count.min(discovered),
                None => discovered,
            });
        }
        self.pages.insert(number, models);
        Ok(())
    }

    /// Fetches every remaining page.
    async fn materialize(&mut self) -> FakturoidResult<()> {
        let mut number = 1;
        loop {
            if self.page(number).await?.is_empty() {
                break;
            }
            if let Some(count) = self.page_count {
                if number >= count {
                    break;
                }
            }
            number += 1;
        }
        Ok(())
    }

    fn cached_len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Total number of items. Forces full materialization.
    pub async fn len(&mut self) -> FakturoidResult<usize> {
        self.materialize().await?;
        Ok(self.cached_len())
    }

    /// Returns the item at `index`, counting from the tail for negative
    /// values. Forces full materialization; out-of-range yields `None`.
    pub async fn get(&mut self, index: i64) -> FakturoidResult<Option<&T>> {
        self.materialize().await?;
        let total = self.cached_len() as i64;
        let index = if index < 0 { index + total } else { index };
        if index < 0 || index >= total {
            return Ok(None);
        }

        let mut remaining = index as usize;
        for page in self.pages.values() {
            if remaining < page.len() {
                return Ok(page.get(remaining));
            }
            remaining -= page.len();
        }
        Ok(None)
    }

    /// Collects every item, in listing order, consuming the list.
    pub async fn collect_all(mut self) -> FakturoidResult<Vec<T>> {
        self.materialize().await?;
        Ok(self.pages.into_values().flatten().collect())
    }

    /// Returns a lazy restartable view over `[start, end)` with the given
    /// step. Pages are skipped lazily as the view advances; a negative or
    /// zero step is not supported.
    pub fn slice(
        &mut self,
        start: usize,
        end: Option<usize>,
        step: usize,
    ) -> FakturoidResult<PagedSlice<'_, 'a, T>> {
        if step == 0 {
            return Err(FakturoidError::invalid_parameter("slice step must be positive"));
        }
        Ok(PagedSlice {
            list: self,
            start,
            end,
            step,
            next_index: start,
        })
    }

    /// Returns a lazy cursor over the whole listing.
    pub fn cursor(&mut self) -> PagedSlice<'_, 'a, T> {
        PagedSlice {
            list: self,
            start: 0,
            end: None,
            step: 1,
            next_index: 0,
        }
    }
}

/// Restartable lazy view over a sub-range of a [`PagedList`].
pub struct PagedSlice<'s, 'a, T: Resource> {
    list: &'s mut PagedList<'a, T>,
    start: usize,
    end: Option<usize>,
    step: usize,
    next_index: usize,
}

impl<'s, 'a, T: Resource> PagedSlice<'s, 'a, T> {
    /// Advances to the next item, fetching pages as needed. Returns `None`
    /// once the range or the listing is exhausted.
    pub async fn try_next(&mut self) -> FakturoidResult<Option<&T>> {
        if let Some(end) = self.end {
            if self.next_index >= end {
                return Ok(None);
            }
        }

        let target = self.next_index;
        let mut page_number = 1;
        let mut offset = target;
        loop {
            let page_len = self.list.page(page_number).await?.len();
            if page_len == 0 {
                return Ok(None);
            }
            if offset < page_len {
                break;
            }
            offset -= page_len;
            page_number += 1;
        }

        self.next_index += self.step;
        Ok(self.list.page(page_number).await?.get(offset))
    }

    /// Restarts the view from its start index.
    pub fn reset(&mut self) {
        self.next_index = self.start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_header() {
        let header = "<https://app.fakturoid.cz/api/v3/accounts/applecorp/invoices.json?page=2>; rel=\"next\", <https://app.fakturoid.cz/api/v3/accounts/applecorp/invoices.json?page=5>; rel=\"last\"";
        assert_eq!(last_page_from_header(header), Some(5));
    }

    #[test]
    fn test_parse_link_header_without_last() {
        let header = "<https://app.fakturoid.cz/api/v3/accounts/applecorp/invoices.json?page=1>; rel=\"first\"";
        assert_eq!(last_page_from_header(header), None);
    }

    #[test]
    fn test_parse_link_header_garbage() {
        assert_eq!(last_page_from_header("not a link header"), None);
        assert_eq!(last_page_from_header(""), None);
    }

    #[test]
    fn test_parse_link_header_last_without_page_param() {
        let header = "<https://app.fakturoid.cz/api/v3/accounts/applecorp/invoices.json>; rel=\"last\"";
        assert_eq!(last_page_from_header(header), None);
    }
}
