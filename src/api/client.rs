use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use yansi::Paint;

use super::envelope::{embedded_error, extract_error_message};
use super::error::ApiError;
use crate::config;
use crate::models::Credentials;

static SILENT: AtomicBool = AtomicBool::new(false);

/// Body keys whose values are masked in request logs.
const MASKED_KEYS: &[&str] = &["secretKey"];

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Everything needed to reach the provisioning backend.
#[derive(Clone, Debug)]
pub struct ApiContext {
    pub client: reqwest::Client,
    pub api_base_url: String,
    pub project_id: i64,
}

impl ApiContext {
    pub fn new(api_base_url: &str, timeout: Duration, project_id: i64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("lbw/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base_url: config::sanitize_base_url(api_base_url),
            project_id,
        })
    }

    /// Build a context from the environment (`API_BASE_URL`, `REQUEST_TIMEOUT_SECS`, `PROJECT_ID`).
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(
            &config::get_api_base_url(),
            config::get_request_timeout(),
            config::get_project_id(),
        )
    }
}

/// Request body fields shared by every call: the caller's credentials and region.
pub fn credential_fields(credentials: &Credentials) -> serde_json::Map<String, Value> {
    let mut body = serde_json::Map::new();
    body.insert("secretId".into(), Value::from(credentials.secret_id()));
    body.insert("secretKey".into(), Value::from(credentials.secret_key()));
    body.insert("region".into(), Value::from(credentials.region().code()));
    body
}

fn masked_for_log(body: &Value) -> Value {
    let mut copy = body.clone();
    if let Some(obj) = copy.as_object_mut() {
        for key in MASKED_KEYS {
            if let Some(v) = obj.get_mut(*key) {
                *v = Value::from("***");
            }
        }
    }
    copy
}

/// POST a JSON body to the provisioning backend and classify the outcome.
///
/// Non-2xx statuses become [`ApiError::Http`], undecodable bodies
/// [`ApiError::Parse`], and 2xx envelopes carrying `Response.Error`
/// [`ApiError::Application`].
pub async fn api_call(ctx: &ApiContext, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
    let url = format!("{}{}", ctx.api_base_url, endpoint);

    // --- Curl Logging ---
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new("POST").fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(&url).fg(yansi::Color::Cyan)));
    parts.push(format!("{} {}",
        Paint::new("-H").fg(yansi::Color::Magenta),
        Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
    ));
    let json_str = serde_json::to_string_pretty(&masked_for_log(body)).unwrap_or_default();
    let escaped_json = json_str.replace("'", "'\\''");
    parts.push(format!("{} {}",
        Paint::new("-d").fg(yansi::Color::Blue),
        Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
    ));
    log_output(format!("Request:\n{}", parts.join(" ")));
    // --------------------

    let resp = ctx
        .client
        .post(&url)
        .json(body)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    // Grayed out so the request stays the visual focus
    log_output(format!("Response:\n{}", Paint::new(format!("HTTP {} {}", status.as_u16(), text)).rgb(100, 100, 100)));

    let parsed: Result<Value, _> = serde_json::from_str(&text);

    if !status.is_success() {
        let message = parsed.ok().as_ref().and_then(extract_error_message);
        tracing::warn!(endpoint, status = status.as_u16(), ?message, "Provisioning API returned an error status");
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let payload = parsed.map_err(|e| ApiError::Parse(e.to_string()))?;
    if let Some(err) = embedded_error(&payload) {
        tracing::warn!(endpoint, error = %err, "Provisioning API embedded an error in the response");
        return Err(err);
    }
    Ok(payload)
}
