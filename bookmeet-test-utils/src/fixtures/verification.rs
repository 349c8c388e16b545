//! Twilio Verify mock endpoints.

use mockito::Mock;

use crate::{constant::TEST_TWILIO_VERIFY_SERVICE_SID, TestSetup};

impl TestSetup {
    pub fn verification<'a>(&'a mut self) -> VerificationFixtures<'a> {
        VerificationFixtures { setup: self }
    }
}

pub struct VerificationFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> VerificationFixtures<'a> {
    /// Create a mock endpoint accepting a new SMS verification
    pub async fn create_send_endpoint(&mut self, expected_requests: usize) -> Mock {
        let url = format!("/v2/Services/{}/Verifications", TEST_TWILIO_VERIFY_SERVICE_SID);

        self.setup
            .server
            .mock("POST", url.as_str())
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sid":"VE_test","status":"pending","channel":"sms"}"#)
            .expect(expected_requests)
            .create_async()
            .await
    }

    /// Create a mock verification check endpoint reporting `status`, either
    /// `"approved"` for a correct code or `"pending"` for a wrong one
    pub async fn create_check_endpoint(&mut self, status: &str, expected_requests: usize) -> Mock {
        let url = format!(
            "/v2/Services/{}/VerificationCheck",
            TEST_TWILIO_VERIFY_SERVICE_SID
        );

        self.setup
            .server
            .mock("POST", url.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "sid": "VE_test", "status": status }).to_string())
            .expect(expected_requests)
            .create_async()
            .await
    }

    /// Create a mock verification check endpoint failing with `status`
    pub async fn create_check_error_endpoint(
        &mut self,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!(
            "/v2/Services/{}/VerificationCheck",
            TEST_TWILIO_VERIFY_SERVICE_SID
        );

        self.setup
            .server
            .mock("POST", url.as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":20404,"message":"The requested resource was not found"}"#)
            .expect(expected_requests)
            .create_async()
            .await
    }
}
