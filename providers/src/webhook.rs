//! Stripe style webhook signatures.
//!
//! The `Stripe-Signature` header has the form `t=<unix seconds>,v1=<hex hmac>[,v1=...]`, the
//! HMAC-SHA256 being computed with the endpoint secret over `"{t}.{raw body}"`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a delivery before it is treated as a replay
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

fn signed_payload_mac(secret: &str, timestamp: i64, payload: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Some(mac)
}

/// Verify `header` against `payload`, `now` being the current unix time in seconds.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };

        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            "v1" => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }

    if (now - timestamp).abs() > tolerance_secs {
        return Err(WebhookError::TimestampOutsideTolerance {
            timestamp,
            tolerance_secs,
        });
    }

    let mac = signed_payload_mac(secret, timestamp, payload)
        .ok_or(WebhookError::NoMatchingSignature)?;

    let matched = signatures
        .iter()
        .filter_map(|signature| hex::decode(signature).ok())
        .any(|signature| mac.clone().verify_slice(&signature).is_ok());

    if matched {
        Ok(())
    } else {
        Err(WebhookError::NoMatchingSignature)
    }
}

/// Build a signature header for `payload` as the provider would send it.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> Option<String> {
    let mac = signed_payload_mac(secret, timestamp, payload)?;
    let signature = hex::encode(mac.finalize().into_bytes());

    Some(format!("t={},v1={}", timestamp, signature))
}
