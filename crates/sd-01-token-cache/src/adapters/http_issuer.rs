//! OAuth2 client-credentials token issuer over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::config::TokenCacheConfig;
use crate::domain::entities::{ClientCredentials, IssuedToken};
use crate::domain::errors::TokenError;
use crate::ports::outbound::TokenIssuer;

/// Token issuer that POSTs a `client_credentials` grant to the token endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenIssuer {
    client: Client,
}

impl HttpTokenIssuer {
    /// Create an issuer with the timeouts from `config`.
    pub fn new(config: &TokenCacheConfig) -> Result<Self, TokenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| TokenError::Unreachable(format!("http client init: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<IssuedToken, TokenError> {
        debug!(
            client_id = %credentials.client_id,
            endpoint = %credentials.token_endpoint,
            "Requesting access token"
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&credentials.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    TokenError::Unreachable(format!(
                        "cannot reach {}: {}",
                        credentials.token_endpoint, e
                    ))
                } else {
                    TokenError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TokenError::Unreachable(format!("reading token response: {}", e)))?;

        if !status.is_success() {
            warn!(
                client_id = %credentials.client_id,
                status = status.as_u16(),
                "Identity provider rejected token request"
            );
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let issued: IssuedToken = serde_json::from_str(&body)
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;
        if issued.access_token.is_empty() {
            return Err(TokenError::InvalidResponse("empty access_token".into()));
        }
        Ok(issued)
    }
}
