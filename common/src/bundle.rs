// common/src/bundle.rs
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

pub const JITO_EXPLORER: &str = "https://explorer.jito.wtf/bundle";

// ─────────────────── Jito block engine (sendBundle) ───────────────────

#[derive(Deserialize, Debug)]
pub struct BundleResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

pub fn bundle_url(jito_engine: &str) -> String {
    format!("{}/api/v1/bundles", jito_engine.trim_end_matches('/'))
}

pub fn bundle_request(transactions: &[String]) -> serde_json::Value {
    json!({
        "id": 1,
        "jsonrpc": "2.0",
        "method": "sendBundle",
        "params": [transactions],
    })
}

/// Submit `transactions` as one bundle. Best effort: failures are logged and
/// reported as `None`, never returned as errors.
pub async fn send_transaction_bundle(
    http: &Client,
    jito_engine: &str,
    transactions: &[String],
) -> Option<String> {
    let url = bundle_url(jito_engine);
    let response = http
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&bundle_request(transactions))
        .send()
        .await
        .and_then(|r| r.error_for_status());

    let body: BundleResponse = match response {
        Ok(r) => match r.json().await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "error sending transaction bundle");
                return None;
            }
        },
        Err(e) => {
            error!(error = %e, "error sending transaction bundle");
            return None;
        }
    };

    match body.result {
        Some(bundle_id) => {
            info!("{}/{}", JITO_EXPLORER, bundle_id);
            Some(bundle_id)
        }
        None => {
            warn!(error = ?body.error, "no result in response data");
            None
        }
    }
}
