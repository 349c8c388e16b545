//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered together so each path gets a single method router.
/// The OpenAPI specification is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Bookmeet", description = "Bookmeet textbook marketplace API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Session sign in & sign out"),
        (name = controller::user::USER_TAG, description = "Accounts & profiles"),
        (name = controller::university::UNIVERSITY_TAG, description = "Universities"),
        (name = controller::listing::LISTING_TAG, description = "Book listings & seller ratings"),
        (name = controller::meetup::MEETUP_TAG, description = "Meetup requests"),
        (name = controller::payment::PAYMENT_TAG, description = "Connection fee payments"),
        (name = controller::verification::VERIFICATION_TAG, description = "Phone number verification"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::user::register))
        .routes(routes!(controller::user::get_user))
        .routes(routes!(controller::user::get_me, controller::user::update_me))
        .routes(routes!(controller::university::get_universities))
        .routes(routes!(
            controller::listing::get_listings,
            controller::listing::create_listing
        ))
        .routes(routes!(
            controller::listing::get_listing,
            controller::listing::update_listing,
            controller::listing::delete_listing
        ))
        .routes(routes!(controller::listing::get_ratings_by_owner))
        .routes(routes!(controller::meetup::request_meetup))
        .routes(routes!(controller::meetup::accept_meetup_request))
        .routes(routes!(controller::meetup::get_my_meetup_requests))
        .routes(routes!(controller::payment::create_payment_intent))
        .routes(routes!(controller::payment::stripe_webhook))
        .routes(routes!(
            controller::verification::send_verification_code,
            controller::verification::check_verification_code
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
