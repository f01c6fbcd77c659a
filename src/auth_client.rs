use crate::config::Config;
use crate::errors::AppError;
use crate::models::AuthenticateResponse;
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Audience ZoomInfo expects on client assertions.
pub const CLIENT_JWT_AUDIENCE: &str = "enterprise_api";
/// Issuer ZoomInfo expects on client assertions.
pub const CLIENT_JWT_ISSUER: &str = "api-client@zoominfo.com";
/// Lifetime of a signed client assertion.
const CLIENT_JWT_TTL_SECS: i64 = 5 * 60;

/// Source of bearer tokens for the ZoomInfo API.
///
/// Every call must produce a freshly acquired token; implementations do not cache.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AppError>;
}

/// Claims of the RS256 client assertion sent to `/authenticate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientClaims {
    pub aud: String,
    pub iss: String,
    pub username: String,
    pub client_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// PKI token exchange: sign a client JWT with the private key, trade it for an access token.
#[derive(Clone)]
pub struct PkiTokenProvider {
    client: reqwest::Client,
    authenticate_url: String,
    username: String,
    client_id: String,
    private_key: String,
}

impl PkiTokenProvider {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            authenticate_url: format!("{}/authenticate", config.zoominfo_base_url),
            username: config.zoominfo_username.clone(),
            client_id: config.zoominfo_client_id.clone(),
            private_key: config.zoominfo_private_key.clone(),
        }
    }

    /// Builds and signs the client assertion.
    pub fn client_jwt(&self) -> Result<String, AppError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes()).map_err(|e| {
            AppError::ExternalApiError(format!("Invalid ZoomInfo private key: {}", e))
        })?;

        let iat = chrono::Utc::now().timestamp();
        let claims = ClientClaims {
            aud: CLIENT_JWT_AUDIENCE.to_string(),
            iss: CLIENT_JWT_ISSUER.to_string(),
            username: self.username.clone(),
            client_id: self.client_id.clone(),
            iat,
            exp: iat + CLIENT_JWT_TTL_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
            AppError::ExternalApiError(format!("Failed to sign client JWT: {}", e))
        })
    }
}

#[async_trait]
impl TokenProvider for PkiTokenProvider {
    async fn access_token(&self) -> Result<String, AppError> {
        let client_jwt = self.client_jwt()?;
        tracing::debug!("Requesting ZoomInfo access token for {}", self.username);

        let response = self
            .client
            .post(&self.authenticate_url)
            .header("Authorization", format!("Bearer {}", client_jwt))
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("ZoomInfo authenticate request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "ZoomInfo authenticate returned {}: {}",
                status, error_text
            )));
        }

        let body: AuthenticateResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse authenticate response: {}", e))
        })?;

        let token = body.jwt.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
            AppError::ExternalApiError("Authenticate response missing 'jwt' field".to_string())
        })?;

        tracing::info!("✓ ZoomInfo token generated");
        Ok(token)
    }
}
