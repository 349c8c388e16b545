//! Database model type aliases.
//!
//! Short names for the SeaORM models generated in the `entity` crate, used by the
//! repositories and services.

/// Marketplace user account, see `entity::bookmeet_user::Model`.
///
/// The `password_hash` field holds an argon2id PHC string and is never exposed through the API.
pub type UserModel = entity::bookmeet_user::Model;

pub type UniversityModel = entity::university::Model;

/// A book offered for sale. `price_cents` is the price in cents.
pub type BookListingModel = entity::book_listing::Model;

/// Ratings exchanged after a sale, stored in half stars (0..=10).
pub type CompletedListingModel = entity::completed_listing::Model;

/// A buyer's proposal to meet the listing owner.
///
/// `location_latitude` and `location_longitude` are stored in micro-degrees.
pub type MeetupRequestModel = entity::meetup_request::Model;

/// Ledger row recording a connection fee collected for a listing, one per external charge.
pub type ConnectionFeePaidModel = entity::connection_fee_paid::Model;

/// Audit row recording one payment webhook delivery and the outcome of its reconciliation.
pub type PaymentWebhookEventModel = entity::payment_webhook_event::Model;
