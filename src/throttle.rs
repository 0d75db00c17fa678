//! Global admission control for vendor API calls
//!
//! One [`Throttle`] is shared by every facade in the process. It gates how
//! many vendor calls may *start* per one-second window; it does not bound
//! how many are in flight. Facades dispatch every call through it, and use
//! [`Throttle::collect`] to convert failures into empty results so that
//! inventory collection degrades instead of aborting.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::future::Future;
use std::num::NonZeroU32;
use std::sync::{Arc, OnceLock};

/// Default admission rate: 10 call starts per second, process-wide.
pub const DEFAULT_RATE_PER_SECOND: u32 = 10;

/// Which path a call was dispatched on.
///
/// The variant is a type-level record of whether the limiter gated the
/// call, so fallback handling is a match, not an error-message inspection.
#[derive(Debug)]
pub enum Dispatch<T> {
    /// The call waited for a limiter slot before starting.
    Throttled(T),
    /// No limiter is installed; the call started immediately.
    Unthrottled(T),
}

impl<T> Dispatch<T> {
    /// The call result, whichever path produced it.
    pub fn into_inner(self) -> T {
        match self {
            Dispatch::Throttled(value) | Dispatch::Unthrottled(value) => value,
        }
    }

    pub fn was_throttled(&self) -> bool {
        matches!(self, Dispatch::Throttled(_))
    }
}

/// Shared rate-limiter service handed to every facade.
///
/// Cheap to clone; clones share the same limiter. A `Throttle` without a
/// limiter (failed construction or [`Throttle::unthrottled`]) dispatches
/// every call immediately and tags it [`Dispatch::Unthrottled`].
#[derive(Clone)]
pub struct Throttle {
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

static SHARED: OnceLock<Throttle> = OnceLock::new();

impl Throttle {
    /// Build a limiter admitting `rate_per_second` call starts per second.
    ///
    /// A zero rate cannot back a limiter; rather than failing whatever
    /// initialization path asked for it, the service degrades to
    /// unthrottled dispatch and says so once in the log.
    pub fn new(rate_per_second: u32) -> Self {
        match NonZeroU32::new(rate_per_second) {
            Some(rate) => Self {
                limiter: Some(Arc::new(RateLimiter::direct(Quota::per_second(rate)))),
            },
            None => {
                tracing::warn!(
                    "Invalid rate limit ({}/s), vendor calls will run unthrottled",
                    rate_per_second
                );
                Self { limiter: None }
            }
        }
    }

    /// A throttle with no limiter installed.
    pub fn unthrottled() -> Self {
        Self { limiter: None }
    }

    /// The process-wide throttle at [`DEFAULT_RATE_PER_SECOND`].
    ///
    /// Installation is idempotent: every call, including concurrent first
    /// calls, observes the same limiter.
    pub fn shared() -> &'static Throttle {
        SHARED.get_or_init(|| Throttle::new(DEFAULT_RATE_PER_SECOND))
    }

    pub fn is_limited(&self) -> bool {
        self.limiter.is_some()
    }

    /// Dispatch one vendor call.
    ///
    /// Waits for a limiter slot when one is installed, then awaits the
    /// call. The result value is identical on either path; only the tag
    /// differs.
    pub async fn run<T, F>(&self, call: F) -> Dispatch<T>
    where
        F: Future<Output = T>,
    {
        match &self.limiter {
            Some(limiter) => {
                limiter.until_ready().await;
                Dispatch::Throttled(call.await)
            }
            None => Dispatch::Unthrottled(call.await),
        }
    }

    /// Dispatch one vendor call and isolate its failure.
    ///
    /// This is the skeleton every facade method shares: run the call
    /// through the limiter, and on any error (client construction or the
    /// call itself) log it under `resource` and return the empty value of
    /// the declared shape. The caller never sees an error.
    pub async fn collect<T, F>(&self, resource: &str, call: F) -> T
    where
        T: Default,
        F: Future<Output = anyhow::Result<T>>,
    {
        match self.run(call).await.into_inner() {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Failed to retrieve {}: {:#}", resource, err);
                T::default()
            }
        }
    }
}
