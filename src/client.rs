//! The Asana API client and its request/response pipeline.
//!
//! The [`Client`] type is the main entry point for making requests.
//! Use [`ClientBuilder`] to configure and create clients.

use crate::{
    cache::Cache,
    classify::classify_response,
    envelope::Envelope,
    metadata::{RequestBody, RequestMetadata, Upload},
    options::Options,
    pagination,
    query::{self, QueryPairs},
    validate::Validate,
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// The default URL used to access the Asana API.
pub const BASE_URL: &str = "https://app.asana.com/api/1.0";

/// The environment variable holding a personal access token.
pub const TOKEN_ENV: &str = "ASANA_TOKEN";

/// The environment variable overriding [`BASE_URL`].
pub const BASE_URL_ENV: &str = "ASANA_BASE_URL";

/// A client for the Asana API.
///
/// The client is cheap to clone and is passed explicitly to every resource
/// accessor. Each call merges options, validates and encodes its payload,
/// optionally consults the response cache, performs exactly one HTTP
/// request and classifies any failure. The client never retries on its
/// own; see [`crate::retry`] for a caller-driven helper.
///
/// # Examples
///
/// ```no_run
/// use asana_client::{Client, Feature, Options};
/// use asana_client::cache::MapCache;
/// use asana_client::resources::Task;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), asana_client::Error> {
/// let client = Client::builder()
///     .access_token("0/123")
///     .default_options(Options::new().enable(Feature::NewSections))
///     .cache(Arc::new(MapCache::new(Duration::from_secs(300))))
///     .build()?;
///
/// let task = client.get::<_, Task>("/tasks/123", (), &[]).await?;
/// println!("Task: {}", task.data.base.name.as_deref().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    default_options: Options,
    cache: Option<Arc<dyn Cache>>,
}

/// A response read off the wire.
struct Received {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    latency: Duration,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("default_options", &self.inner.default_options)
            .field("cache", &self.inner.cache.is_some())
            .finish()
    }
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from the environment.
    ///
    /// Reads the access token from `ASANA_TOKEN` and, if set, the base URL
    /// from `ASANA_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no token is set.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| Error::Configuration(format!("{} is not set", TOKEN_ENV)))?;

        let mut builder = Client::builder().access_token(token);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url)?;
        }
        builder.build()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The options applied to every request.
    pub fn default_options(&self) -> &Options {
        &self.inner.default_options
    }

    /// Removes a cached response. Does nothing without a cache.
    ///
    /// `key` is a path relative to the base URL, including any query string.
    pub fn clear_cache(&self, key: &str) -> Result<()> {
        match &self.inner.cache {
            Some(cache) => {
                tracing::debug!(key = key, "Clearing cached response");
                cache.clear(key)
            }
            None => Ok(()),
        }
    }

    /// Makes a GET request.
    ///
    /// `query` is validated and encoded as query parameters. Its values
    /// replace same-named parameters from the client's default options,
    /// while options passed in `options` replace both. Later entries of
    /// `options` take precedence over earlier ones.
    ///
    /// If a cache is configured and holds an entry for the path and query,
    /// the cached data is decoded and no request is sent. Cached responses
    /// never carry a [`NextPage`](crate::NextPage).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use asana_client::{Client, Options};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Compact {
    ///     gid: String,
    ///     name: String,
    /// }
    ///
    /// # async fn example() -> Result<(), asana_client::Error> {
    /// let client = Client::builder().access_token("0/123").build()?;
    ///
    /// let projects = client
    ///     .get::<_, Vec<Compact>>("/workspaces/1/projects", (), &[Options::new().limit(10)])
    ///     .await?;
    /// for project in projects.data.iter() {
    ///     println!("{} {}", project.gid, project.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<Q, T>(&self, path: &str, mut query: Q, options: &[Options]) -> Result<Response<T>>
    where
        Q: Serialize + Validate,
        T: DeserializeOwned,
    {
        let start_time = Instant::now();
        let mut metadata = RequestMetadata::new(Method::GET, path);
        let effective = self.prepare(&mut metadata, options)?;

        query.validate()?;
        metadata.query = self.encode_query(&query, options, &effective)?;

        let key = metadata.path_and_query();
        if let Some(cached) = self.cached(&key, &metadata.request_id) {
            let raw_data = String::from_utf8(cached).map_err(|e| Error::Decode {
                raw_response: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                serde_error: e.to_string(),
                status: StatusCode::OK,
                request_id: metadata.request_id.clone(),
            })?;
            let data = decode::<T>(&raw_data, StatusCode::OK, &metadata.request_id)?;
            return Ok(Response {
                data,
                raw_data,
                next_page: None,
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                latency: start_time.elapsed(),
                request_id: metadata.request_id,
                cached: true,
            });
        }

        let response = self.execute_request(&metadata, RequestBody::Empty).await?;
        let received = receive(response, start_time).await?;
        let envelope = self.envelope(&received, &metadata)?;

        let raw = envelope.data.ok_or_else(|| missing_data(&received, &metadata))?;
        let raw_data = raw.get().to_string();
        let data = decode::<T>(&raw_data, received.status, &metadata.request_id)?;

        // A cache hit has no cursor, so only final pages are stored.
        if envelope.next_page.is_none() {
            self.store(&key, raw_data.as_bytes().to_vec(), &metadata.request_id);
        }

        Ok(Response {
            data,
            raw_data,
            next_page: envelope.next_page,
            status: received.status,
            headers: received.headers,
            latency: received.latency,
            request_id: metadata.request_id,
            cached: false,
        })
    }

    /// Makes a POST request with `data` as the JSON `data` member of the body.
    ///
    /// A `201 Created` response carrying a `Location` header seeds the cache
    /// for that location with the returned data.
    pub async fn post<D, T>(&self, path: &str, data: D, options: &[Options]) -> Result<Response<T>>
    where
        D: Serialize + Validate,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, data, options).await
    }

    /// Makes a PUT request with `data` as the JSON `data` member of the body.
    ///
    /// On success the cached response of a plain GET of `path` is cleared.
    pub async fn put<D, T>(&self, path: &str, data: D, options: &[Options]) -> Result<Response<T>>
    where
        D: Serialize + Validate,
        T: DeserializeOwned,
    {
        let response = self.send_json(Method::PUT, path, data, options).await?;
        self.forget_path(path, &response.request_id);
        Ok(response)
    }

    /// Makes a DELETE request. Any 2xx status is a success.
    ///
    /// On success the cached response of a plain GET of `path` is cleared.
    pub async fn delete(&self, path: &str, options: &[Options]) -> Result<()> {
        let start_time = Instant::now();
        let mut metadata = RequestMetadata::new(Method::DELETE, path);
        self.prepare(&mut metadata, options)?;

        let response = self.execute_request(&metadata, RequestBody::Empty).await?;
        let received = receive(response, start_time).await?;
        if !received.status.is_success() {
            return Err(self.failure(&received, Envelope::parse(&received.body), &metadata));
        }

        self.forget_path(path, &metadata.request_id);
        Ok(())
    }

    /// Uploads a file as `multipart/form-data`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use asana_client::{Client, Upload};
    /// use asana_client::resources::Attachment;
    ///
    /// # async fn example() -> Result<(), asana_client::Error> {
    /// let client = Client::builder().access_token("0/123").build()?;
    ///
    /// let upload = Upload::new("notes.txt", "text/plain", "hello".to_string());
    /// let attachment = client
    ///     .post_multipart::<Attachment>("/tasks/1/attachments", upload, &[])
    ///     .await?;
    /// println!("Uploaded {}", attachment.data.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        upload: Upload,
        options: &[Options],
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let start_time = Instant::now();
        let mut metadata = RequestMetadata::new(Method::POST, path);
        self.prepare(&mut metadata, options)?;

        tracing::debug!(
            request_id = %metadata.request_id,
            path = %metadata.path,
            field = %upload.field_name,
            file_name = %upload.file_name,
            content_type = %upload.content_type,
            "Uploading multipart body"
        );

        let response = self
            .execute_request(&metadata, RequestBody::Multipart(upload))
            .await?;
        self.finish_mutation(response, &metadata, start_time).await
    }

    /// Fetches every page of a list endpoint.
    ///
    /// Pages are requested one after another with `limit` set to
    /// `page_size` and `offset` set to the previous cursor, until a page
    /// arrives without a cursor. The paging options take precedence over
    /// anything in `options`.
    pub async fn get_all<Q, T>(
        &self,
        path: &str,
        query: Q,
        page_size: u32,
        options: &[Options],
    ) -> Result<Vec<T>>
    where
        Q: Serialize + Validate + Clone,
        T: DeserializeOwned,
    {
        pagination::collect_all(page_size, |page| {
            let options = pagination::with_page(options, page);
            let query = query.clone();
            async move {
                let response = self.get::<Q, Vec<T>>(path, query, &options).await?;
                Ok(response.into_page())
            }
        })
        .await
    }

    async fn send_json<D, T>(
        &self,
        method: Method,
        path: &str,
        mut data: D,
        options: &[Options],
    ) -> Result<Response<T>>
    where
        D: Serialize + Validate,
        T: DeserializeOwned,
    {
        let start_time = Instant::now();
        let mut metadata = RequestMetadata::new(method, path);
        let effective = self.prepare(&mut metadata, options)?;

        data.validate()?;
        let body = request_body(&data, &effective)?;

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(
                request_id = %metadata.request_id,
                body = %body,
                "Encoded request body"
            );
        }

        let response = self
            .execute_request(&metadata, RequestBody::Json(body))
            .await?;
        self.finish_mutation(response, &metadata, start_time).await
    }

    /// Shared tail of POST, PUT and multipart requests.
    async fn finish_mutation<T>(
        &self,
        response: reqwest::Response,
        metadata: &RequestMetadata,
        start_time: Instant,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let received = receive(response, start_time).await?;
        let envelope = self.envelope(&received, metadata)?;

        let raw = envelope.data.ok_or_else(|| missing_data(&received, metadata))?;
        let raw_data = raw.get().to_string();
        let data = decode::<T>(&raw_data, received.status, &metadata.request_id)?;

        if received.status == StatusCode::CREATED {
            if let Some(location) = received
                .headers
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
            {
                let key = self.cache_key_for_location(location);
                self.store(&key, raw_data.as_bytes().to_vec(), &metadata.request_id);
            }
        }

        Ok(Response {
            data,
            raw_data,
            next_page: envelope.next_page,
            status: received.status,
            headers: received.headers,
            latency: received.latency,
            request_id: metadata.request_id.clone(),
            cached: false,
        })
    }

    /// Merges options and attaches the feature headers they imply.
    fn prepare(&self, metadata: &mut RequestMetadata, options: &[Options]) -> Result<Options> {
        let effective = Options::merge(options, &self.inner.default_options)?;
        effective.apply_headers(&mut metadata.headers)?;
        Ok(effective)
    }

    /// Builds the query string layers: client defaults, then request data,
    /// then explicitly passed options.
    fn encode_query<Q: Serialize>(
        &self,
        data: &Q,
        options: &[Options],
        effective: &Options,
    ) -> Result<QueryPairs> {
        let mut pairs = self.inner.default_options.to_query_pairs()?;
        query::overlay(&mut pairs, query::encode(data)?);

        let explicit: Vec<String> = Options::merge(options, &Options::default())?
            .to_query_pairs()?
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        let overriding = effective
            .to_query_pairs()?
            .into_iter()
            .filter(|(key, _)| explicit.contains(key))
            .collect();
        query::overlay(&mut pairs, overriding);

        Ok(pairs)
    }

    fn url_for(&self, metadata: &RequestMetadata) -> Result<Url> {
        if !metadata.path.starts_with('/') {
            return Err(Error::Configuration(format!(
                "Invalid API path {:?}: must start with '/'",
                metadata.path
            )));
        }
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, metadata.path_and_query()))?)
    }

    /// Sends a single request.
    async fn execute_request(
        &self,
        metadata: &RequestMetadata,
        body: RequestBody,
    ) -> Result<reqwest::Response> {
        let url = self.url_for(metadata)?;

        tracing::debug!(
            request_id = %metadata.request_id,
            method = %metadata.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.request(metadata.method.clone(), url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        for (name, value) in &metadata.headers {
            request = request.header(name, value);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request.json(&json),
            RequestBody::Multipart(upload) => request.multipart(upload.into_form()?),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                request_id = %metadata.request_id,
                error = %e,
                "Transport error"
            );
            Error::Transport(e)
        })?;

        Ok(response)
    }

    /// Parses the envelope of a received response, classifying failures.
    ///
    /// Only `200 OK` and `201 Created` carry data; any other status is an
    /// API error.
    fn envelope(&self, received: &Received, metadata: &RequestMetadata) -> Result<Envelope> {
        let accepted = matches!(received.status, StatusCode::OK | StatusCode::CREATED);
        match Envelope::parse(&received.body) {
            Ok(envelope) if accepted => Ok(envelope),
            parsed => Err(self.failure(received, parsed, metadata)),
        }
    }

    fn failure(
        &self,
        received: &Received,
        parsed: serde_json::Result<Envelope>,
        metadata: &RequestMetadata,
    ) -> Error {
        let envelope = match parsed {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::debug!(
                    request_id = %metadata.request_id,
                    error = %e,
                    body = %String::from_utf8_lossy(&received.body),
                    "Response body is not a valid envelope"
                );
                None
            }
        };

        let err = classify_response(
            received.status,
            &received.headers,
            envelope.as_ref(),
            &metadata.request_id,
        );

        if received.status.is_server_error() {
            tracing::warn!(
                request_id = %metadata.request_id,
                status = received.status.as_u16(),
                error = %err,
                "Server error (5xx)"
            );
        } else {
            tracing::warn!(
                request_id = %metadata.request_id,
                status = received.status.as_u16(),
                error = %err,
                "API error"
            );
        }

        Error::Api(err)
    }

    fn cached(&self, key: &str, request_id: &str) -> Option<Vec<u8>> {
        let cache = self.inner.cache.as_ref()?;
        match cache.get(key) {
            Ok(Some(value)) => {
                tracing::debug!(request_id = %request_id, key = key, "Using cached response");
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(request_id = %request_id, key = key, error = %e, "Cache lookup failed");
                None
            }
        }
    }

    fn store(&self, key: &str, value: Vec<u8>, request_id: &str) {
        let Some(cache) = &self.inner.cache else {
            return;
        };
        tracing::trace!(request_id = %request_id, key = key, "Caching response");
        if let Err(e) = cache.put(key, value) {
            tracing::warn!(request_id = %request_id, key = key, error = %e, "Cache store failed");
        }
    }

    fn forget(&self, key: &str, request_id: &str) {
        if let Err(e) = self.clear_cache(key) {
            tracing::warn!(request_id = %request_id, key = key, error = %e, "Cache clear failed");
        }
    }

    /// Maps a `Location` header onto the cache key a plain GET of it would
    /// use. Foreign locations are kept verbatim.
    fn cache_key_for_location(&self, location: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        match location.strip_prefix(base) {
            Some(path) if path.starts_with('/') => self.default_key(path),
            _ => location.to_string(),
        }
    }

    /// The key of a GET of `path` with no query data and no per-call
    /// options, which carries the client's default options.
    fn default_key(&self, path: &str) -> String {
        match self.inner.default_options.to_query_pairs() {
            Ok(pairs) if !pairs.is_empty() => {
                format!("{}?{}", path, query::to_query_string(&pairs))
            }
            _ => path.to_string(),
        }
    }

    /// Clears the entries a plain GET of `path` may have written.
    fn forget_path(&self, path: &str, request_id: &str) {
        let key = self.default_key(path);
        if key != path {
            self.forget(&key, request_id);
        }
        self.forget(path, request_id);
    }
}

/// Reads the status, headers and body of a response.
async fn receive(response: reqwest::Response, start_time: Instant) -> Result<Received> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();
    let latency = start_time.elapsed();

    tracing::debug!(
        status = status.as_u16(),
        latency_ms = latency.as_millis() as u64,
        bytes = body.len(),
        "Received HTTP response"
    );

    Ok(Received {
        status,
        headers,
        body,
        latency,
    })
}

fn missing_data(received: &Received, metadata: &RequestMetadata) -> Error {
    tracing::error!(
        request_id = %metadata.request_id,
        status = received.status.as_u16(),
        "Missing data from response"
    );
    Error::Protocol {
        status: received.status,
        request_id: metadata.request_id.clone(),
    }
}

fn decode<T: DeserializeOwned>(raw: &str, status: StatusCode, request_id: &str) -> Result<T> {
    serde_json::from_str::<T>(raw).map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            error = %e,
            raw_response = %raw,
            "Failed to decode response data"
        );
        Error::Decode {
            raw_response: raw.to_string(),
            serde_error: e.to_string(),
            status,
            request_id: request_id.to_string(),
        }
    })
}

/// Builds `{"data": ..., "options": ...}`.
fn request_body<D: Serialize>(data: &D, options: &Options) -> Result<serde_json::Value> {
    let data = serde_json::to_value(data)
        .map_err(|e| Error::Encoding(format!("Unable to serialize request data: {}", e)))?;

    let mut body = serde_json::Map::new();
    body.insert("data".to_string(), data);
    if let Some(body_options) = options.to_body() {
        let value = serde_json::to_value(body_options)
            .map_err(|e| Error::Encoding(format!("Unable to serialize options: {}", e)))?;
        body.insert("options".to_string(), value);
    }
    Ok(serde_json::Value::Object(body))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use asana_client::{ClientBuilder, Options};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), asana_client::Error> {
/// let client = ClientBuilder::new()
///     .access_token("0/123")
///     .timeout(Duration::from_secs(30))
///     .default_options(Options::new().pretty(true))
///     .default_header("X-Trace", "on")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    access_token: Option<String>,
    default_headers: HeaderMap,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_options: Options,
    cache: Option<Arc<dyn Cache>>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            access_token: None,
            default_headers: HeaderMap::new(),
            http_client: None,
            timeout: None,
            user_agent: None,
            default_options: Options::default(),
            cache: None,
        }
    }

    /// Sets the base URL for all requests. Defaults to [`BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Authenticates every request with a bearer token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Uses an existing HTTP client, for example one that already injects
    /// OAuth2 credentials. [`timeout`](Self::timeout) and
    /// [`user_agent`](Self::user_agent) are then ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` of the transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the options merged into every request.
    pub fn default_options(mut self, options: Options) -> Self {
        self.default_options = options;
        self
    }

    /// Enables response caching.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or default options cannot be encoded,
    /// or if the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(BASE_URL)?,
        };

        self.default_options.check_encodable()?;

        let mut default_headers = self.default_headers;
        if let Some(token) = self.access_token {
            let mut value = HeaderValue::try_from(format!("Bearer {}", token))
                .map_err(|e| Error::Configuration(format!("Invalid access token: {}", e)))?;
            value.set_sensitive(true);
            default_headers.insert(header::AUTHORIZATION, value);
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let user_agent = self.user_agent.unwrap_or_else(|| {
                    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
                });
                let mut builder = reqwest::Client::builder().user_agent(user_agent);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    Error::Configuration(format!("Failed to build HTTP client: {}", e))
                })?
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers,
                default_options: self.default_options,
                cache: self.cache,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
