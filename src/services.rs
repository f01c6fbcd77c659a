use crate::auth_client::{PkiTokenProvider, TokenProvider};
use crate::config::{Config, EnrichProfile};
use crate::enrichment::{validate_person, validate_search, QUERY_PERSON_OUTPUT_FIELDS};
use crate::errors::AppError;
use crate::models::*;
use crate::zoominfo_client::ZoomInfoClient;
use serde_json::Value;
use std::sync::Arc;

/// Relays caller requests to ZoomInfo.
///
/// Every operation runs validate -> authenticate -> call -> extract, with a
/// fresh token per call and no retries.
#[derive(Clone)]
pub struct RelayService {
    tokens: Arc<dyn TokenProvider>,
    zoominfo: ZoomInfoClient,
    profile: EnrichProfile,
}

impl RelayService {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        zoominfo: ZoomInfoClient,
        profile: EnrichProfile,
    ) -> Self {
        Self {
            tokens,
            zoominfo,
            profile,
        }
    }

    /// Wires the PKI token provider and the ZoomInfo client onto one shared HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        let tokens = Arc::new(PkiTokenProvider::new(client.clone(), config));
        let zoominfo = ZoomInfoClient::new(client, config.zoominfo_base_url.clone());

        Ok(Self::new(tokens, zoominfo, config.enrich_profile))
    }

    pub fn profile(&self) -> EnrichProfile {
        self.profile
    }

    pub async fn obtain_token(&self) -> Result<String, AppError> {
        self.tokens.access_token().await
    }

    /// Matches one person and returns the first record, shaped by the profile.
    pub async fn enrich_contact(&self, request: &EnrichRequest) -> Result<EnrichResponse, AppError> {
        let person = validate_person(request)?;
        let token = self.obtain_token().await?;

        let payload = EnrichContactPayload {
            match_person_input: vec![person],
            output_fields: self.profile.output_fields(),
        };
        let record = self
            .zoominfo
            .enrich_contact(&token, &payload)
            .await?
            .into_first_record()
            .ok_or_else(|| AppError::NotFound("No contact data found".to_string()))?;

        Ok(self.profile.project(record))
    }

    /// Runs a single-page contact search.
    pub async fn search_candidates(&self, request: &SearchRequest) -> Result<Vec<Value>, AppError> {
        let payload = validate_search(request)?;
        let token = self.obtain_token().await?;

        let candidates = self
            .zoominfo
            .search_contacts(&token, &payload)
            .await?
            .into_candidates()
            .ok_or_else(|| AppError::NotFound("No candidates found".to_string()))?;

        tracing::info!("Found {} candidates", candidates.len());
        Ok(candidates)
    }

    /// Matches one person and returns the remote body as-is.
    pub async fn query_person(&self, request: &EnrichRequest) -> Result<Value, AppError> {
        let person = validate_person(request)?;
        let token = self.obtain_token().await?;

        let payload = EnrichContactPayload {
            match_person_input: vec![person],
            output_fields: QUERY_PERSON_OUTPUT_FIELDS.to_vec(),
        };
        self.zoominfo.enrich_contact_raw(&token, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StaticToken {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StaticToken {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl TokenProvider for StaticToken {
        async fn access_token(&self) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::ExternalApiError("key expired".to_string()))
            } else {
                Ok("static-token".to_string())
            }
        }
    }

    fn service(tokens: Arc<StaticToken>, base_url: String, profile: EnrichProfile) -> RelayService {
        RelayService::new(
            tokens,
            ZoomInfoClient::new(reqwest::Client::new(), base_url),
            profile,
        )
    }

    fn derrick() -> EnrichRequest {
        EnrichRequest {
            first_name: Some("derrick".into()),
            last_name: Some("Alba".into()),
            company_name: Some("Advocate Aurora Health".into()),
        }
    }

    #[tokio::test]
    async fn test_validation_happens_before_token_fetch() {
        let tokens = StaticToken::new(false);
        let relay = service(tokens.clone(), "http://127.0.0.1:9".into(), EnrichProfile::Full);

        let result = relay.enrich_contact(&EnrichRequest::default()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(matches!(
            relay.search_candidates(&SearchRequest::default()).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_token_failure_skips_remote_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tokens = StaticToken::new(true);
        let relay = service(tokens.clone(), mock_server.uri(), EnrichProfile::Full);

        assert!(matches!(
            relay.enrich_contact(&derrick()).await,
            Err(AppError::ExternalApiError(_))
        ));
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_enrich_employment_profile() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/enrich/contact"))
            .and(header("Authorization", "Bearer static-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"result": [{"data": [{
                    "firstName": "Derrick",
                    "employmentHistory": [
                        {"jobTitle": "VP", "fromDate": "2020-01-01", "company": {"companyName": "Advocate Aurora Health"}},
                        {}
                    ]
                }]}]}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let relay = service(
            StaticToken::new(false),
            mock_server.uri(),
            EnrichProfile::EmploymentHistory,
        );
        let response = relay.enrich_contact(&derrick()).await.unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"employmentHistory": [
                {"title": "VP", "start": "2020-01-01", "end": null, "company": "Advocate Aurora Health"},
                {"title": "Unknown Title", "start": null, "end": null, "company": "Unknown Company"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_empty_search_is_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;

        let relay = service(StaticToken::new(false), mock_server.uri(), EnrichProfile::Full);
        let request = SearchRequest {
            department: Some(json!("Nursing")),
            management_level: Some(json!("Director")),
            metro_region: Some(json!("usa.wisconsin.milwaukee")),
            industry_codes: Some(json!("hospitals")),
            rpp: None,
        };

        match relay.search_candidates(&request).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No candidates found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
