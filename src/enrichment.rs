/// Request validation and response shaping for the relay
///
/// Everything here is pure: no network, no state. The service layer calls
/// into it before issuing any outbound request and after the remote reply
/// has been decoded.
use crate::config::EnrichProfile;
use crate::errors::AppError;
use crate::models::{
    EmploymentRecord, EnrichRequest, EnrichResponse, MatchPersonInput, SearchContactPayload,
    SearchRequest, DEFAULT_RPP,
};
use serde_json::Value;

pub const MISSING_PERSON_FIELDS: &str =
    "Missing required fields: firstName, lastName, companyName";
pub const MISSING_SEARCH_FIELDS: &str =
    "Missing one or more required fields: department, managementLevel, metroRegion, industryCodes";

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Output fields requested by the full enrichment profile.
const FULL_OUTPUT_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "jobTitle",
    "companyName",
    "city",
    "state",
    "country",
    "employmentHistory",
    "externalUrls",
    "email",
    "hashedEmails",
    "phone",
    "mobilePhoneDoNotCall",
    "education",
];

const EMPLOYMENT_OUTPUT_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "jobTitle",
    "companyName",
    "employmentHistory",
];

/// Output fields requested by `/query-person`.
pub const QUERY_PERSON_OUTPUT_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "jobTitle",
    "companyName",
    "externalUrls",
    "email",
    "employmentHistory",
    "id",
    "companyId",
];

impl EnrichProfile {
    pub fn output_fields(&self) -> Vec<&'static str> {
        match self {
            EnrichProfile::Full => FULL_OUTPUT_FIELDS.to_vec(),
            EnrichProfile::EmploymentHistory => EMPLOYMENT_OUTPUT_FIELDS.to_vec(),
        }
    }

    /// Shapes a matched record into the `/enrich` response body.
    pub fn project(&self, record: Value) -> EnrichResponse {
        match self {
            EnrichProfile::Full => EnrichResponse::Profile {
                enriched_profile: record,
            },
            EnrichProfile::EmploymentHistory => EnrichResponse::Employment {
                employment_history: normalize_employment_history(&record),
            },
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A filter value counts as present unless it is null, false, blank or an empty list.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Checks the three person fields and builds the ZoomInfo match input.
pub fn validate_person(request: &EnrichRequest) -> Result<MatchPersonInput, AppError> {
    let first_name = non_blank(request.first_name.as_deref());
    let last_name = non_blank(request.last_name.as_deref());
    let company_name = non_blank(request.company_name.as_deref());

    match (first_name, last_name, company_name) {
        (Some(first), Some(last), Some(company)) => Ok(MatchPersonInput {
            first_name: first.to_string(),
            last_name: last.to_string(),
            company_name: company.to_string(),
        }),
        _ => Err(AppError::BadRequest(MISSING_PERSON_FIELDS.to_string())),
    }
}

/// Checks the four search filters and builds the ZoomInfo search payload.
pub fn validate_search(request: &SearchRequest) -> Result<SearchContactPayload, AppError> {
    let filters = [
        &request.department,
        &request.management_level,
        &request.metro_region,
        &request.industry_codes,
    ];
    if !filters.iter().all(|f| is_present(f.as_ref())) {
        return Err(AppError::BadRequest(MISSING_SEARCH_FIELDS.to_string()));
    }

    Ok(SearchContactPayload {
        department: request.department.clone().unwrap_or_default(),
        management_level: request.management_level.clone().unwrap_or_default(),
        metro_region: request.metro_region.clone().unwrap_or_default(),
        industry_codes: request.industry_codes.clone().unwrap_or_default(),
        rpp: request
            .rpp
            .clone()
            .filter(|rpp| !rpp.is_null())
            .unwrap_or_else(|| Value::from(DEFAULT_RPP)),
    })
}

/// Reads a string sub-field; non-string and blank values count as missing.
fn text_at<'a>(job: &'a Value, pointer: &str) -> Option<&'a str> {
    non_blank(job.pointer(pointer).and_then(Value::as_str))
}

/// Maps `record.employmentHistory` to `{title, start, end, company}` entries.
///
/// Each sub-field is read on its own: missing titles and company names become
/// sentinels, missing dates become null.
pub fn normalize_employment_history(record: &Value) -> Vec<EmploymentRecord> {
    let Some(jobs) = record.get("employmentHistory").and_then(Value::as_array) else {
        return Vec::new();
    };

    jobs.iter()
        .map(|job| EmploymentRecord {
            title: text_at(job, "/jobTitle")
                .unwrap_or(UNKNOWN_TITLE)
                .to_string(),
            start: text_at(job, "/fromDate").map(str::to_string),
            end: text_at(job, "/toDate").map(str::to_string),
            company: text_at(job, "/company/companyName")
                .unwrap_or(UNKNOWN_COMPANY)
                .to_string(),
        })
        .collect()
}
