use std::time::Duration;

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Context for service methods providing retry & caching logic
pub struct RetryContext<T> {
    /// cache to be used between retries to prevent repeating completed steps
    cache: T,
    /// Max attempts before failure
    max_attempts: u32,
    /// Backoff before the first retry, doubled for every following retry
    initial_backoff: Duration,
}

impl<T> RetryContext<T>
where
    T: Clone + Default,
{
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);

    pub fn new() -> Self {
        Self::with_backoff(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_INITIAL_BACKOFF)
    }

    pub fn with_backoff(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            cache: T::default(),
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    /// Execute a method with automatic retry logic
    ///
    /// The operation function receives:
    /// - `retry_cache`: Data stored by previous attempt(s)
    ///
    /// The operation should:
    /// - Use cached data if available to skip steps that already succeeded, e.g. a
    ///   customer already created at the payment provider
    /// - Store the results of completed steps in the cache before any later step can fail
    ///
    /// # Arguments
    /// - `description`: Description of the operation for logging (e.g., "create payment intent")
    /// - `operation`: Async function performing the operation
    pub async fn execute_with_retry<R, F>(
        &mut self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: for<'a> Fn(
            &'a mut T,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<R, Error>> + Send + 'a>,
        >,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            let result = operation(&mut self.cache).await;

            match result {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::debug!("Permanent error for {}: {}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.initial_backoff * 2_u32.pow(attempt_count - 1);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}
