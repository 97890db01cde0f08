//! Client for the promo-check endpoint of the order backend.

use cafemenu_core::{PromoRequest, PromoResponse};
use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::http::{build_client, ensure_success, parse_url};

const CHECK_PROMO_PATH: &str = "api/check_promo";

/// Checks promo codes against `POST {backend}/api/check_promo`.
///
/// Each call is a single request; failures are returned, never retried.
pub struct PromoClient {
    client: Client,
    base_url: Url,
}

impl PromoClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidUrl`] if
    /// `backend_url` is not a valid URL.
    pub fn new(backend_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        // Exactly one trailing slash, so joining keeps any path prefix.
        let normalised = format!("{}/", backend_url.trim_end_matches('/'));
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_url(&normalised)?,
        })
    }

    /// Checks `code` for `user_id`. The code is trimmed and uppercased.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Promo`] for a blank code; nothing is sent.
    /// - See [`PromoClient::check`] for transport errors.
    pub async fn check_promo(&self, code: &str, user_id: i64) -> Result<PromoResponse, ClientError> {
        let request = PromoRequest::new(code, user_id)?;
        self.check(&request).await
    }

    /// Sends a prepared request.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not a promo response.
    pub async fn check(&self, request: &PromoRequest) -> Result<PromoResponse, ClientError> {
        let url = self
            .base_url
            .join(CHECK_PROMO_PATH)
            .map_err(|e| ClientError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let response = self.client.post(url).json(request).send().await?;
        let body = ensure_success(response)?.text().await?;
        let parsed: PromoResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("check_promo(code={})", request.code),
                source: e,
            })?;

        tracing::debug!(code = %request.code, status = ?parsed.status, "promo endpoint answered");
        Ok(parsed)
    }
}
