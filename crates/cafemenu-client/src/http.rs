use std::time::Duration;

use reqwest::{Client, Response, Url};

use crate::error::ClientError;

/// Builds the shared `reqwest` client used by both collaborators.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Passes 2xx responses through and turns anything else into
/// [`ClientError::UnexpectedStatus`].
pub(crate) fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ClientError::UnexpectedStatus {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}
