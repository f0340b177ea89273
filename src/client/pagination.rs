//! Cursor pagination over Graph collections
//!
//! Graph list responses carry their items in `value` and, when more results
//! exist, an absolute `@odata.nextLink` URL for the following page.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use super::GraphApi;
use super::models::decode;
use crate::error::ApiResult;

/// One page of a Graph collection
#[derive(Debug, Deserialize)]
pub struct Page {
    /// Raw items on this page
    pub value: Vec<Value>,

    /// URL of the next page; absent on the last page
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

impl Page {
    pub fn from_value(body: Value) -> ApiResult<Self> {
        decode(body, "collection page")
    }

    /// Next page URL, treating an empty link as the end.
    fn next(&self) -> Option<&str> {
        self.next_link.as_deref().filter(|link| !link.is_empty())
    }
}

/// Fetch a single collection response and return its items.
///
/// Used for endpoints whose results always fit one page.
pub async fn fetch_values<A: GraphApi + ?Sized>(api: &A, path: &str) -> ApiResult<Vec<Value>> {
    let page = Page::from_value(api.fetch(path).await?)?;
    Ok(page.value)
}

/// Follow next links from `path` until a page has none.
///
/// Items are returned in arrival order. There is no page limit; the server
/// ends the sequence.
pub async fn fetch_all<A: GraphApi + ?Sized>(api: &A, path: &str) -> ApiResult<Vec<Value>> {
    let mut items = Vec::new();
    let mut target = path.to_string();
    let mut pages = 0usize;

    loop {
        let page = Page::from_value(api.fetch(&target).await?)?;
        pages += 1;
        debug!("Page {}: {} items", pages, page.value.len());

        let next = page.next().map(str::to_owned);
        items.extend(page.value);

        match next {
            Some(link) => target = link,
            None => break,
        }
    }

    debug!("Fetched {} items over {} pages", items.len(), pages);
    Ok(items)
}
