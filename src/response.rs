//! Successful responses with their decoded payload and metadata.

use crate::envelope::NextPage;
use crate::pagination::Page;
use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful API response.
///
/// `data` is the decoded `data` member of the response envelope. List
/// endpoints also return a [`NextPage`] cursor while more results remain.
///
/// # Examples
///
/// ```no_run
/// use asana_client::{Client, Options};
/// use asana_client::resources::Task;
///
/// # async fn example() -> Result<(), asana_client::Error> {
/// let client = Client::builder().access_token("0/123").build()?;
///
/// let response = client
///     .get::<_, Vec<Task>>("/projects/9/tasks", (), &[Options::new().limit(2)])
///     .await?;
///
/// println!("{} tasks in {:?}", response.data.len(), response.latency);
/// if let Some(next) = &response.next_page {
///     println!("More from offset {}", next.offset);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response data.
    pub data: T,

    /// The raw JSON of the `data` member.
    pub raw_data: String,

    /// The cursor for the next page, if any. Always `None` for cached
    /// responses.
    pub next_page: Option<NextPage>,

    /// The HTTP status code. `200` for cached responses.
    pub status: StatusCode,

    /// The response headers. Empty for cached responses.
    pub headers: HeaderMap,

    /// Time spent on the request.
    pub latency: Duration,

    /// The correlation id generated for the request.
    pub request_id: String,

    /// Whether the response was served from the cache.
    pub cached: bool,
}

impl<T> Response<T> {
    /// Maps the response data to a different type using the provided function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use asana_client::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response {
    ///     data: vec![1, 2, 3],
    ///     raw_data: "[1,2,3]".to_string(),
    ///     next_page: None,
    ///     status: StatusCode::OK,
    ///     headers: HeaderMap::new(),
    ///     latency: Duration::from_millis(100),
    ///     request_id: "r1".to_string(),
    ///     cached: false,
    /// };
    ///
    /// let count = response.map(|items| items.len());
    /// assert_eq!(count.data, 3);
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_data: self.raw_data,
            next_page: self.next_page,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            request_id: self.request_id,
            cached: self.cached,
        }
    }

    /// Returns `true` if another page is available.
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> Response<Vec<T>> {
    /// Splits a list response into its items and cursor.
    pub fn into_page(self) -> Page<T> {
        Page {
            items: self.data,
            next_page: self.next_page,
        }
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
