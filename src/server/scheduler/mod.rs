//! Scheduler for periodic background jobs.
//!
//! Runs cron jobs next to the HTTP server. The only job retries failed payment webhook
//! reconciliations from the webhook audit log.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::AppState};

pub mod config;
pub mod reconciliation;

use self::reconciliation::retry_failed_webhooks;

/// Job scheduler for background tasks sharing the application state
pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// # Arguments
    /// - `reconciliation_max_attempts` - Attempts after which a failed webhook event is no
    ///   longer retried
    pub async fn start(mut self, reconciliation_max_attempts: i32) -> Result<(), Error> {
        self.schedule_job(
            config::reconciliation::CRON_EXPRESSION,
            "webhook reconciliation",
            move |state| retry_failed_webhooks(state, reconciliation_max_attempts),
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The function receives a clone of the application state on every run, the number it
    /// returns is logged.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run (e.g., "0 0 * * * *" for hourly)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async function performing the job, returning the count of processed items
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Failed to create or add the job (invalid cron expression or scheduler error)
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(state).await {
                        Ok(count) => tracing::info!("Processed {} {} item(s)", count, name),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
