use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        payment::{CreatePaymentIntentDto, PaymentFailedDto, PaymentIntentDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::payment::PaymentService,
    },
};

pub static PAYMENT_TAG: &str = "payment";

/// Create a payment intent for the connection fee of a listing
///
/// The returned client secret is used by the client to confirm the payment with the payment
/// provider, which then reports the charge through the webhook.
///
/// # Responses
/// - 200 (Success): Client secret of the payment intent
/// - 400 (Bad Request): The payment provider rejected the request, its error is returned
/// - 401 (Unauthorized): Nobody is signed in
/// - 500 (Internal Server Error): A database, session or provider error occurred
#[utoipa::path(
    post,
    path = "/api/payment/create-payment-intent/",
    tag = PAYMENT_TAG,
    request_body = CreatePaymentIntentDto,
    responses(
        (status = 200, description = "Payment intent created", body = PaymentIntentDto),
        (status = 400, description = "Payment provider rejected the request", body = PaymentFailedDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreatePaymentIntentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let payment_intent = PaymentService::new(&state.db, state.payment_provider.clone())
        .create_payment_intent(user.id, request, &state.connection_fee)
        .await?;

    Ok((StatusCode::OK, Json(payment_intent)))
}

/// Receive payment provider webhook deliveries
///
/// Every delivery is acknowledged, failures are recorded in the webhook audit log and failed
/// reconciliations are retried by a scheduled job.
///
/// # Responses
/// - 200 (Success): Delivery received
#[utoipa::path(
    post,
    path = "/api/payment/stripe-webhook/",
    tag = PAYMENT_TAG,
    request_body(content = String, description = "Raw event body as signed by the provider"),
    responses(
        (status = 200, description = "Delivery received", body = MessageDto)
    ),
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(providers::stripe::SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let outcome = PaymentService::new(&state.db, state.payment_provider.clone())
        .handle_webhook(&body, signature)
        .await;

    (
        StatusCode::OK,
        Json(MessageDto {
            message: outcome.message().to_string(),
        }),
    )
}
