use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Caller Requests ============

/// Body of `POST /enrich` and `POST /query-person`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Body of `POST /search-candidates`.
///
/// Filter values are forwarded to ZoomInfo verbatim, so callers may send either
/// a comma-separated string or a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub department: Option<Value>,
    #[serde(default)]
    pub management_level: Option<Value>,
    #[serde(default)]
    pub metro_region: Option<Value>,
    #[serde(default)]
    pub industry_codes: Option<Value>,
    /// Results per page, forwarded as sent.
    #[serde(default)]
    pub rpp: Option<Value>,
}

/// Default page size for candidate searches.
pub const DEFAULT_RPP: u32 = 10;

// ============ ZoomInfo Payloads ============

/// A single person to match against ZoomInfo.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchPersonInput {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
}

/// Payload for `POST /enrich/contact`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichContactPayload {
    pub match_person_input: Vec<MatchPersonInput>,
    pub output_fields: Vec<&'static str>,
}

/// Payload for `POST /search/contact`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContactPayload {
    pub department: Value,
    pub management_level: Value,
    pub metro_region: Value,
    pub industry_codes: Value,
    pub rpp: Value,
}

// ============ ZoomInfo Responses ============

/// Reply of the `/authenticate` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateResponse {
    #[serde(default)]
    pub jwt: Option<String>,
}

/// Reply of `/enrich/contact`: `data.result[].data[]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichContactResponse {
    #[serde(default)]
    pub data: Option<EnrichContactData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichContactData {
    #[serde(default)]
    pub result: Option<Vec<MatchResult>>,
}

/// Outcome for one entry of `matchPersonInput`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

/// JSON truthiness: null, false, zero and the empty string carry no record.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl EnrichContactResponse {
    /// First data record of the first match result, if any level is populated.
    pub fn into_first_record(self) -> Option<Value> {
        self.data?
            .result?
            .into_iter()
            .next()?
            .data?
            .into_iter()
            .next()
            .filter(is_truthy)
    }
}

/// Reply of `/search/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchContactResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl SearchContactResponse {
    /// The candidate list, or `None` when it is absent or empty.
    pub fn into_candidates(self) -> Option<Vec<Value>> {
        self.data.filter(|candidates| !candidates.is_empty())
    }
}

// ============ Relay Responses ============

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// One normalized job from a contact's employment history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmploymentRecord {
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub company: String,
}

/// Body of a successful `/enrich`, shaped by the configured profile.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EnrichResponse {
    Profile {
        #[serde(rename = "enrichedProfile")]
        enriched_profile: Value,
    },
    Employment {
        #[serde(rename = "employmentHistory")]
        employment_history: Vec<EmploymentRecord>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<Value>,
}
