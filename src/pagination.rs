//! Cursor-based paging over list endpoints.
//!
//! List endpoints return at most `limit` items plus a [`NextPage`] cursor
//! while more remain. [`collect_all`] walks the cursor chain until a page
//! arrives without one.

use crate::envelope::NextPage;
use crate::options::Options;
use crate::Result;
use std::future::Future;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The cursor for the following page, if any.
    pub next_page: Option<NextPage>,
}

impl<T> Page<T> {
    /// Returns the offset token of the following page.
    pub fn next_offset(&self) -> Option<&str> {
        self.next_page.as_ref().map(|next| next.offset.as_str())
    }
}

/// Fetches pages until one has no cursor, concatenating their items.
///
/// `fetch` receives the paging options for each request: `limit` set to
/// `page_size`, plus `offset` for every page after the first. Pages are
/// requested strictly in sequence and the first error aborts the walk.
///
/// # Examples
///
/// ```no_run
/// use asana_client::pagination::{self, Page};
/// use asana_client::resources::Tag;
/// use asana_client::Client;
///
/// # async fn example() -> Result<(), asana_client::Error> {
/// let client = Client::builder().access_token("0/123").build()?;
///
/// let tags: Vec<Tag> = pagination::collect_all(50, |page| {
///     let client = client.clone();
///     async move {
///         let response = client
///             .get::<_, Vec<Tag>>("/workspaces/1/tags", (), &[page])
///             .await?;
///         Ok(response.into_page())
///     }
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn collect_all<T, F, Fut>(page_size: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Options) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut offset: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let mut page = Options::new().limit(page_size);
        if let Some(offset) = offset.take() {
            page = page.offset(offset);
        }

        let result = fetch(page).await?;
        pages += 1;
        items.extend(result.items);

        match result.next_page {
            Some(next) => {
                tracing::trace!(page = pages, offset = %next.offset, "Following next page");
                offset = Some(next.offset);
            }
            None => break,
        }
    }

    tracing::debug!(pages = pages, items = items.len(), "Collected all pages");
    Ok(items)
}

/// Appends paging options after the caller's, so that they take precedence.
pub fn with_page(options: &[Options], page: Options) -> Vec<Options> {
    let mut all = Vec::with_capacity(options.len() + 1);
    all.extend_from_slice(options);
    all.push(page);
    all
}
