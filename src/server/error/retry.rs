use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (connection issues, provider outages)
    Retry,
    /// Failed permanently (bad request)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // Transport failures, rate limiting and provider 5xx responses
            Self::ProviderError(err) if err.is_transient() => ErrorRetryStrategy::Retry,
            // Provider rejected the request itself, repeating it won't help
            Self::ProviderError(_) => ErrorRetryStrategy::Fail,

            Self::DbErr(db_err) => match db_err {
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Constraint violations, type conversions, missing records
                _ => ErrorRetryStrategy::Fail,
            },

            // Session errors - transient, could be Redis connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::UserError(_)
            | Self::ListingError(_)
            | Self::MeetupError(_)
            | Self::PaymentError(_)
            | Self::VerificationError(_)
            | Self::ParseError(_)
            | Self::InternalError(_)
            | Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
