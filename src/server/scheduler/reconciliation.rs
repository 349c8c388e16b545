//! Periodic retry of failed payment webhook reconciliations.
//!
//! A `charge.succeeded` delivery whose reconciliation failed, for example because the
//! customer was stored only after the charge was reported, keeps its payload in the webhook
//! audit log. This job reconciles those events again until they succeed or run out of
//! attempts.

use crate::server::{error::Error, model::app::AppState, service::payment::PaymentService};

/// Re-run reconciliation for failed webhook events below `max_attempts`
///
/// # Returns
/// - `Ok(usize)` - Number of events reconciled
/// - `Err(Error)` - Failed to read or update the audit log
pub async fn retry_failed_webhooks(state: AppState, max_attempts: i32) -> Result<usize, Error> {
    PaymentService::new(&state.db, state.payment_provider.clone())
        .retry_failed_reconciliations(max_attempts)
        .await
}
