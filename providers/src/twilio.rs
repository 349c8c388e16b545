use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::ProviderError,
    http::read_json,
    verification::{VerificationProvider, VerificationStatus},
};

pub const DEFAULT_TWILIO_API_URL: &str = "https://verify.twilio.com";

#[derive(Clone)]
pub struct TwilioConfig {
    pub api_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
    pub timeout: Duration,
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("api_url", &self.api_url)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("verify_service_sid", &self.verify_service_sid)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Twilio Verify v2 client, codes are always delivered by SMS
#[derive(Clone)]
pub struct TwilioVerifyClient {
    http: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    verify_service_sid: String,
}

#[derive(Deserialize)]
struct VerificationResponse {
    status: String,
}

impl TwilioVerifyClient {
    pub fn new(config: TwilioConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid,
            auth_token: config.auth_token,
            verify_service_sid: config.verify_service_sid,
        })
    }

    async fn post_form(
        &self,
        resource: &str,
        form: &[(&str, &str)],
    ) -> Result<VerificationResponse, ProviderError> {
        let url = format!(
            "{}/v2/Services/{}/{}",
            self.api_url, self.verify_service_sid, resource
        );

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(form)
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait]
impl VerificationProvider for TwilioVerifyClient {
    async fn send_verification(&self, phone_number: &str) -> Result<(), ProviderError> {
        let response = self
            .post_form("Verifications", &[("To", phone_number), ("Channel", "sms")])
            .await?;

        tracing::debug!(status = %response.status, "Sent phone verification code");

        Ok(())
    }

    async fn check_verification(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<VerificationStatus, ProviderError> {
        let response = self
            .post_form("VerificationCheck", &[("To", phone_number), ("Code", code)])
            .await?;

        if response.status == "approved" {
            Ok(VerificationStatus::Approved)
        } else {
            Ok(VerificationStatus::Denied)
        }
    }
}
