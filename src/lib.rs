//! # asana-client - A typed async client for the Asana REST API
//!
//! The crate turns typed operations into authenticated HTTP requests and
//! returns typed results. Each call runs through one pipeline: merge
//! options, validate and encode the payload, consult the optional response
//! cache, send a single request, then unwrap the `{data, next_page, errors}`
//! envelope or classify the failure.
//!
//! ## Quick Start
//!
//! ```no_run
//! use asana_client::resources::{CreateTaskRequest, Project, TaskBase};
//! use asana_client::{Client, Options};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), asana_client::Error> {
//!     let client = Client::from_env()?;
//!
//!     let me = client.current_user().await?;
//!     println!("Hello {}", me.name.as_deref().unwrap_or("there"));
//!
//!     for workspace in client.workspaces().await? {
//!         let projects = workspace.all_projects(&client, &[]).await?;
//!         println!("{} projects in {:?}", projects.len(), workspace.name);
//!     }
//!
//!     let project = Project::with_id("9");
//!     let page = project
//!         .tasks(&client, &[Options::new().fields(["name", "completed"]).limit(20)])
//!         .await?;
//!     for task in &page.items {
//!         println!("{} {:?}", task.id, task.base.name);
//!     }
//!
//!     let task = client
//!         .create_task(CreateTaskRequest {
//!             base: TaskBase {
//!                 name: Some("Follow up".to_string()),
//!                 ..TaskBase::default()
//!             },
//!             projects: vec![project.id.clone()],
//!             ..CreateTaskRequest::default()
//!         })
//!         .await?;
//!     println!("Created {}", task.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Option merging** - Client defaults, per-call options and paging options combine with fixed precedence
//! - **Classified errors** - Auth, not-found, payload-too-large, rate-limit and server errors without string matching
//! - **Retry hints** - `Retry-After` is parsed into a duration, with a default for rate limits
//! - **Response cache** - Optional path-keyed cache of GET results with expiry
//! - **Pagination** - Opaque cursors and helpers that walk every page
//! - **Logging** - Structured `tracing` events carrying a per-request correlation id
//!
//! ## Error Handling
//!
//! ```no_run
//! use asana_client::resources::Task;
//! use asana_client::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().access_token("0/123").build()?;
//! match Task::with_id("123").fetch(&client, &[]).await {
//!     Ok(task) => println!("Task: {:?}", task.base.name),
//!     Err(e) if e.is_not_found_error() => println!("No such task"),
//!     Err(e) if e.is_rate_limited() => {
//!         println!("Slow down, retry in {:?}", e.retry_after());
//!     }
//!     Err(Error::Decode { raw_response, serde_error, .. }) => {
//!         eprintln!("Unexpected payload {}: {}", raw_response, serde_error);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Retries
//!
//! The client never retries on its own. Wrap calls in a [`retry::Retrier`]
//! to retry transient failures:
//!
//! ```no_run
//! use asana_client::retry::{Retrier, RetryOnRateLimit};
//! use asana_client::resources::Task;
//! use asana_client::{Client, RetryStrategy};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), asana_client::Error> {
//! # let client = Client::builder().access_token("0/123").build()?;
//! let retrier = Retrier::new(RetryStrategy::ExponentialBackoff {
//!     initial_delay: Duration::from_millis(100),
//!     max_delay: Duration::from_secs(10),
//!     max_retries: 3,
//!     jitter: true,
//! })
//! .predicate(RetryOnRateLimit);
//!
//! let task = Task::with_id("123");
//! let task = retrier.run(|| task.fetch(&client, &[])).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod classify;
mod client;
pub mod envelope;
mod error;
pub mod metadata;
mod options;
pub mod pagination;
pub mod query;
pub mod resources;
mod response;
pub mod retry;
mod validate;

pub use client::{Client, ClientBuilder, BASE_URL};
pub use envelope::NextPage;
pub use error::{ApiError, ApiErrorKind, Error, Result, ResultExt};
pub use metadata::Upload;
pub use options::{Feature, Options};
pub use pagination::Page;
pub use response::Response;
pub use retry::{RetryPredicate, RetryStrategy};
pub use validate::Validate;
