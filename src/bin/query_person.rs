//! One-shot ZoomInfo person lookup.
//!
//! Usage: `query_person [firstName lastName companyName]`
//!
//! Reads the same environment as the server, fetches a token, runs a single
//! enrich match and prints `data.result`.

use anyhow::Context;
use zoominfo_relay::config::Config;
use zoominfo_relay::models::EnrichRequest;
use zoominfo_relay::services::RelayService;

const DEFAULT_PERSON: [&str; 3] = ["derrick", "Alba", "Advocate Aurora Health"];

/// Picks the person from the command line, falling back to the default lookup.
fn person_from_args(args: &[String]) -> anyhow::Result<EnrichRequest> {
    let [first, last, company] = match args {
        [] => DEFAULT_PERSON.map(String::from),
        [first, last, company] => [first.clone(), last.clone(), company.clone()],
        _ => anyhow::bail!("usage: query_person [firstName lastName companyName]"),
    };

    Ok(EnrichRequest {
        first_name: Some(first),
        last_name: Some(last),
        company_name: Some(company),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zoominfo_relay=info,query_person=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = person_from_args(&args)?;

    let config = Config::from_env()?;
    let relay = RelayService::from_config(&config)?;

    let response = relay
        .query_person(&request)
        .await
        .context("ZoomInfo contact enrichment failed")?;

    match response.pointer("/data/result") {
        Some(result) if result.is_array() => {
            tracing::info!("✓ ZoomInfo contact enrichment response received");
            println!("{}", serde_json::to_string_pretty(result)?);
            Ok(())
        }
        _ => {
            tracing::error!("Unexpected response structure: {}", response);
            anyhow::bail!("unexpected response structure")
        }
    }
}
