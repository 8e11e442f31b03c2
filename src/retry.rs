//! Caller-driven retries for transient failures.
//!
//! The client itself sends every request exactly once. Wrap a call in a
//! [`Retrier`] to repeat it while a [`RetryPredicate`] accepts the error and
//! the [`RetryStrategy`] has attempts left.

use crate::{Error, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// The default cap on a server-provided `Retry-After` delay.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);

/// How long to wait between attempts, and when to give up.
///
/// Retries are numbered from 1: retry 1 follows the first failed attempt.
///
/// # Examples
///
/// ```
/// use asana_client::RetryStrategy;
/// use std::time::Duration;
///
/// let backoff = RetryStrategy::ExponentialBackoff {
///     initial_delay: Duration::from_millis(250),
///     max_delay: Duration::from_secs(8),
///     max_retries: 4,
///     jitter: false,
/// };
///
/// assert_eq!(backoff.delay_for_attempt(3), Some(Duration::from_secs(1)));
/// assert_eq!(backoff.delay_for_attempt(5), None);
/// assert_eq!(RetryStrategy::None.delay_for_attempt(1), None);
/// ```
#[derive(Debug, Clone, Default)]
pub enum RetryStrategy {
    /// Never retry.
    #[default]
    None,

    /// Doubling delays starting at `initial_delay`, never above `max_delay`.
    ///
    /// With `jitter`, each delay is scaled by a random factor between one
    /// half and one.
    ExponentialBackoff {
        /// Delay before the first retry.
        initial_delay: Duration,
        /// Upper bound on any single delay.
        max_delay: Duration,
        /// Number of retries after the first attempt.
        max_retries: usize,
        /// Randomize delays.
        jitter: bool,
    },

    /// The same delay before every retry.
    Linear {
        /// Delay before each retry.
        delay: Duration,
        /// Number of retries after the first attempt.
        max_retries: usize,
    },

    /// Delays computed from the retry number. Returning `None` stops.
    Custom {
        /// Maps a retry number to its delay.
        delay_fn: fn(retry: usize) -> Option<Duration>,
    },
}

impl RetryStrategy {
    /// The delay before retry number `retry`, or `None` once retries are
    /// used up.
    pub fn delay_for_attempt(&self, retry: usize) -> Option<Duration> {
        if self.max_retries().is_some_and(|limit| retry > limit) {
            return None;
        }

        match *self {
            RetryStrategy::None => None,
            RetryStrategy::Linear { delay, .. } => Some(delay),
            RetryStrategy::ExponentialBackoff {
                initial_delay,
                max_delay,
                jitter,
                ..
            } => {
                let doublings = u32::try_from(retry.saturating_sub(1)).unwrap_or(u32::MAX);
                let factor = 2u32.checked_pow(doublings).unwrap_or(u32::MAX);
                let delay = initial_delay.saturating_mul(factor).min(max_delay);
                Some(if jitter { jittered(delay) } else { delay })
            }
            RetryStrategy::Custom { delay_fn } => delay_fn(retry),
        }
    }

    /// The retry limit, or `None` when a custom function decides.
    pub fn max_retries(&self) -> Option<usize> {
        match self {
            RetryStrategy::None => Some(0),
            RetryStrategy::ExponentialBackoff { max_retries, .. }
            | RetryStrategy::Linear { max_retries, .. } => Some(*max_retries),
            RetryStrategy::Custom { .. } => None,
        }
    }
}

fn jittered(delay: Duration) -> Duration {
    delay.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
}

/// Decides whether a failed call should be retried.
///
/// Closures taking the error and the failed attempt number implement this
/// trait too.
///
/// # Examples
///
/// ```
/// use asana_client::retry::Retrier;
/// use asana_client::{Error, RetryPredicate, RetryStrategy};
///
/// struct RetryOnServerPhrase;
///
/// impl RetryPredicate for RetryOnServerPhrase {
///     fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
///         error
///             .api_error()
///             .map_or(false, |api| api.phrase.is_some())
///     }
/// }
///
/// let strict = Retrier::new(RetryStrategy::None).predicate(RetryOnServerPhrase);
/// let first_two = Retrier::new(RetryStrategy::None)
///     .predicate(|error: &Error, attempt: usize| error.is_retryable() && attempt <= 2);
/// ```
pub trait RetryPredicate: Send + Sync {
    /// Returns `true` if the call should be retried.
    ///
    /// `attempt` is the number of the attempt that failed, starting at 1.
    fn should_retry(&self, error: &Error, attempt: usize) -> bool;
}

impl<F> RetryPredicate for F
where
    F: Fn(&Error, usize) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        self(error, attempt)
    }
}

/// Retries whatever [`Error::is_retryable`] accepts: rate limits, 5xx
/// responses, transport timeouts and connection failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryOnRetryable;

impl RetryPredicate for RetryOnRetryable {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.is_retryable()
    }
}

/// Retries 429 responses only.
#[derive(Debug, Clone, Copy)]
pub struct RetryOnRateLimit;

impl RetryPredicate for RetryOnRateLimit {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.is_rate_limited()
    }
}

/// Retries 5xx responses only.
#[derive(Debug, Clone, Copy)]
pub struct RetryOn5xx;

impl RetryPredicate for RetryOn5xx {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.is_recoverable_error()
    }
}

/// Retries requests that never got a response because the connection
/// failed or timed out.
#[derive(Debug, Clone, Copy)]
pub struct RetryOnTransport;

impl RetryPredicate for RetryOnTransport {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        matches!(error.root(), Error::Transport(e) if e.is_timeout() || e.is_connect())
    }
}

/// Retries when any inner predicate does.
///
/// # Examples
///
/// ```
/// use asana_client::retry::{OrPredicate, RetryOn5xx, RetryOnTransport};
///
/// let predicate = OrPredicate::new(vec![Box::new(RetryOn5xx), Box::new(RetryOnTransport)]);
/// ```
pub struct OrPredicate(Vec<Box<dyn RetryPredicate>>);

impl OrPredicate {
    /// Combines `predicates`. An empty list never retries.
    pub fn new(predicates: Vec<Box<dyn RetryPredicate>>) -> Self {
        Self(predicates)
    }
}

impl RetryPredicate for OrPredicate {
    fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        self.0.iter().any(|p| p.should_retry(error, attempt))
    }
}

/// Retries only when every inner predicate does.
///
/// # Examples
///
/// ```
/// use asana_client::retry::{AndPredicate, RetryOnRateLimit};
/// use asana_client::Error;
///
/// let predicate = AndPredicate::new(vec![
///     Box::new(RetryOnRateLimit),
///     Box::new(|_: &Error, attempt: usize| attempt < 3),
/// ]);
/// ```
pub struct AndPredicate(Vec<Box<dyn RetryPredicate>>);

impl AndPredicate {
    /// Combines `predicates`. An empty list always retries.
    pub fn new(predicates: Vec<Box<dyn RetryPredicate>>) -> Self {
        Self(predicates)
    }
}

impl RetryPredicate for AndPredicate {
    fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        self.0.iter().all(|p| p.should_retry(error, attempt))
    }
}

/// Runs an operation again while it fails with a retryable error.
///
/// A server-provided `Retry-After` hint replaces the strategy's delay,
/// capped at `max_wait`. The strategy still bounds the number of retries.
///
/// # Examples
///
/// ```no_run
/// use asana_client::retry::Retrier;
/// use asana_client::resources::Task;
/// use asana_client::{Client, RetryStrategy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), asana_client::Error> {
/// let client = Client::builder().access_token("0/123").build()?;
/// let retrier = Retrier::new(RetryStrategy::Linear {
///     delay: Duration::from_secs(1),
///     max_retries: 3,
/// });
///
/// let task = retrier
///     .run(|| client.get::<_, Task>("/tasks/1", (), &[]))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Retrier {
    strategy: RetryStrategy,
    predicate: Box<dyn RetryPredicate>,
    max_wait: Duration,
}

impl Retrier {
    /// Creates a retrier that retries errors for which
    /// [`Error::is_retryable`] holds.
    pub fn new(strategy: RetryStrategy) -> Self {
        Self {
            strategy,
            predicate: Box::new(RetryOnRetryable),
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    /// Sets the predicate that decides which errors are retried.
    pub fn predicate(mut self, predicate: impl RetryPredicate + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    /// Caps the delay taken from a `Retry-After` hint.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Runs `op` until it succeeds, fails with an error the predicate
    /// rejects, or the strategy runs out of retries.
    ///
    /// # Errors
    ///
    /// Returns the operation's error as-is when it is not retried on the
    /// first attempt, and [`Error::MaxRetriesExceeded`] once retries have
    /// been used up.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let e = match op().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            tracing::warn!(error = %e, attempt = attempt, "Request failed");

            if !self.predicate.should_retry(&e, attempt) {
                return Err(e);
            }

            let Some(backoff) = self.strategy.delay_for_attempt(attempt) else {
                if attempt == 1 {
                    return Err(e);
                }
                return Err(Error::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: Box::new(e),
                });
            };

            let delay = match e.retry_after() {
                Some(retry_after) => {
                    let delay = retry_after.min(self.max_wait);
                    tracing::info!(
                        delay_ms = delay.as_millis() as u64,
                        attempt = attempt,
                        max_wait_secs = self.max_wait.as_secs(),
                        "Rate limited - waiting before retry"
                    );
                    delay
                }
                None => {
                    tracing::info!(
                        delay_ms = backoff.as_millis() as u64,
                        attempt = attempt,
                        "Retrying request after delay"
                    );
                    backoff
                }
            };

            tokio::time::sleep(delay).await;
        }
    }
}
