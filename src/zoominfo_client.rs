use crate::errors::AppError;
use crate::models::{
    EnrichContactPayload, EnrichContactResponse, SearchContactPayload, SearchContactResponse,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Client for the ZoomInfo enrich and search endpoints.
///
/// Each method issues exactly one bearer-authenticated POST; nothing is retried.
#[derive(Clone)]
pub struct ZoomInfoClient {
    client: reqwest::Client,
    base_url: String,
}

impl ZoomInfoClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// POST /enrich/contact, decoded into the typed response.
    pub async fn enrich_contact(
        &self,
        token: &str,
        payload: &EnrichContactPayload,
    ) -> Result<EnrichContactResponse, AppError> {
        self.post_json("/enrich/contact", token, payload).await
    }

    /// POST /enrich/contact, returning the body untouched.
    pub async fn enrich_contact_raw(
        &self,
        token: &str,
        payload: &EnrichContactPayload,
    ) -> Result<Value, AppError> {
        self.post_json("/enrich/contact", token, payload).await
    }

    /// POST /search/contact.
    pub async fn search_contacts(
        &self,
        token: &str,
        payload: &SearchContactPayload,
    ) -> Result<SearchContactResponse, AppError> {
        self.post_json("/search/contact", token, payload).await
    }

    async fn post_json<B, R>(&self, path: &str, token: &str, body: &B) -> Result<R, AppError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("ZoomInfo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "ZoomInfo {} returned {}: {}",
                path, status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse ZoomInfo {} response: {}", path, e))
        })
    }
}
