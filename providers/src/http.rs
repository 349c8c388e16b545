use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Decode a provider response, turning non-success statuses into [`ProviderError::Rejected`]
/// with the provider's error body attached.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        return Err(ProviderError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
}
