use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use bookmeet::{
    model::payment::CreatePaymentIntentDto,
    server::{
        controller::payment::{create_payment_intent, stripe_webhook},
        data::payment::{
            connection_fee::ConnectionFeeRepository, webhook_event::WebhookEventRepository,
        },
        model::app::AppState,
    },
};
use bookmeet_test_utils::{fixtures::payment::SignedWebhook, prelude::*};
use entity::sea_orm_active_enums::WebhookEventStatus;
use sea_orm::EntityTrait;

use super::{body_json, sign_in};

fn signature_headers(delivery: &SignedWebhook) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        providers::stripe::SIGNATURE_HEADER,
        HeaderValue::from_str(&delivery.signature).unwrap(),
    );

    headers
}

#[tokio::test]
/// Expect 200 success with the client secret of the new payment intent
async fn creates_payment_intent() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let buyer = test
        .user()
        .insert_user_with_stripe_id("buyer", "cus_buyer")
        .await?;
    let endpoint = test
        .payment()
        .create_payment_intent_endpoint("cus_buyer", "pi_secret_123", 1)
        .await;
    sign_in(&test.session, buyer.id).await;
    let state: AppState = test.state();

    let result = create_payment_intent(
        State(state),
        test.session.clone(),
        Json(CreatePaymentIntentDto {
            book_id: 1,
            location: "Library".to_string(),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["clientSecret"], "pi_secret_123");
    endpoint.assert_async().await;

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request carrying the provider's error when it rejects the intent
async fn returns_provider_rejection() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let buyer = test
        .user()
        .insert_user_with_stripe_id("buyer", "cus_buyer")
        .await?;
    let error = serde_json::json!({
        "error": { "type": "card_error", "message": "Your card was declined." }
    });
    let endpoint = test
        .payment()
        .create_payment_intent_error_endpoint(402, error.clone(), 1)
        .await;
    sign_in(&test.session, buyer.id).await;
    let state: AppState = test.state();

    let result = create_payment_intent(
        State(state),
        test.session.clone(),
        Json(CreatePaymentIntentDto {
            book_id: 1,
            location: String::new(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["detail"], error);
    endpoint.assert_async().await;

    Ok(())
}

#[tokio::test]
/// Expect a single ledger row when the same charge event is delivered twice
async fn webhook_replay_records_fee_once() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("owner").await?;
    let buyer = test
        .user()
        .insert_user_with_stripe_id("buyer", "cus_buyer")
        .await?;
    let listing = test.listing().insert_listing(owner.id, "Calculus", 2000).await?;
    let event = test.payment().charge_succeeded_event(
        "evt_1",
        "ch_1",
        "cus_buyer",
        &listing.id.to_string(),
    );
    let delivery = test.payment().sign(&event)?;
    let state: AppState = test.state();

    for _ in 0..2 {
        let resp = stripe_webhook(
            State(state.clone()),
            signature_headers(&delivery),
            Bytes::from(delivery.payload.clone()),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    let fees = ConnectionFeeRepository::new(&test.state.db)
        .get_by_charge_id("ch_1")
        .await?;
    assert_eq!(fees.len(), 1);
    assert_eq!(fees[0].user_id, buyer.id);
    assert_eq!(fees[0].book_listing_id, listing.id);

    Ok(())
}

#[tokio::test]
/// Expect 200 acknowledgement, no ledger row and a failed audit row for an unknown book ID
async fn webhook_with_unknown_book_is_acknowledged() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    test.user()
        .insert_user_with_stripe_id("buyer", "cus_buyer")
        .await?;
    let event = test
        .payment()
        .charge_succeeded_event("evt_1", "ch_1", "cus_buyer", "9999");
    let delivery = test.payment().sign(&event)?;
    let state: AppState = test.state();

    let resp = stripe_webhook(
        State(state),
        signature_headers(&delivery),
        Bytes::from(delivery.payload.clone()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let fees = entity::prelude::ConnectionFeePaid::find()
        .all(&test.state.db)
        .await?;
    assert!(fees.is_empty());
    let audit = WebhookEventRepository::new(&test.state.db)
        .find_by_event_id("evt_1")
        .await?
        .unwrap();
    assert_eq!(audit.status, WebhookEventStatus::Failed);

    Ok(())
}

#[tokio::test]
/// Expect 200 acknowledgement and a rejected audit row for an unsigned delivery
async fn webhook_without_signature_is_rejected() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let event = test
        .payment()
        .charge_succeeded_event("evt_1", "ch_1", "cus_buyer", "1");
    let state: AppState = test.state();

    let resp = stripe_webhook(
        State(state),
        HeaderMap::new(),
        Bytes::from(serde_json::to_vec(&event)?),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let audit = entity::prelude::PaymentWebhookEvent::find()
        .all(&test.state.db)
        .await?;
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].status, WebhookEventStatus::Rejected);

    Ok(())
}
