//! Device location requests with timeout and cancellation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Coordinate, LocationError, LocationSample};

/// A source of device positions.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Requests the current position once.
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Issues location requests with a bounded wait and discards responses that
/// arrive after [`LocationRequester::cancel`].
///
/// Each request is fire-once; nothing is retried.
pub struct LocationRequester<P> {
    provider: P,
    timeout: Duration,
    generation: AtomicU64,
}

impl<P: LocationProvider> LocationRequester<P> {
    /// Wraps a provider with a request timeout.
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            generation: AtomicU64::new(0),
        }
    }

    /// Invalidates every request currently in flight.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Requests a position.
    ///
    /// Provider failures and timeouts come back as an unavailable
    /// [`LocationSample`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LocationStale`] when [`cancel`](Self::cancel)
    /// was called while the request was pending.
    pub async fn request(&self) -> EngineResult<LocationSample> {
        let generation = self.generation.load(Ordering::SeqCst);

        let pending = self.provider.current_position();
        let outcome = match tokio::time::timeout(self.timeout, pending).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "location request timed out");
                Err(LocationError::Timeout)
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding stale location response");
            return Err(EngineError::LocationStale);
        }

        Ok(LocationSample::from(outcome))
    }
}
