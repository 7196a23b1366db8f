//! Blocking HTTP clients for the playground backend.
//!
//! [`CompletionClient`] submits chat-completion requests; [`PromptsClient`]
//! reads prompt metadata and LLM connections. Both are cheap to construct and
//! are meant to be moved onto a worker thread for the duration of a request,
//! so the UI thread never blocks on the network.

use crate::app::chat::ChatCompletionRequest;
use crate::app::config::PlaygroundConfig;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CHAT_COMPLETION_PATH: &str = "api/chatCompletion";
const PROMPTS_PATH: &str = "api/public/v2/prompts";
const LLM_CONNECTIONS_PATH: &str = "api/public/llm-connections";

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, bad URL
    Http(String),
    /// The server answered with a non-success status
    Status { status: u16, message: String },
    /// The response body could not be decoded
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(msg) => write!(f, "Request failed: {}", msg),
            ClientError::Status { status, message } => write!(f, "{} (HTTP {})", message, status),
            ClientError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ClientError::Decode(value.to_string())
        } else {
            ClientError::Http(value.to_string())
        }
    }
}

fn build_http_client() -> Result<Client, ClientError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Turn a raw completion response into the value shown in the output pane.
///
/// - non-success: the JSON body's `message`, or `"Chat failed"`
/// - JSON content type: the parsed body
/// - anything else: `{"content": <body text>}`
pub fn interpret_completion_response(
    status: u16,
    content_type: Option<&str>,
    body: &str,
) -> Result<Value, ClientError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Chat failed".to_string());
        return Err(ClientError::Status { status, message });
    }

    let is_json = content_type
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);
    if is_json {
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
    } else {
        Ok(serde_json::json!({ "content": body }))
    }
}

#[derive(Debug, Clone)]
pub struct CompletionClient {
    config: PlaygroundConfig,
}

impl CompletionClient {
    pub fn new(config: PlaygroundConfig) -> Self {
        Self { config }
    }

    pub fn send(&self, request: &ChatCompletionRequest) -> Result<Value, ClientError> {
        let url = self.config.url(CHAT_COMPLETION_PATH);
        info!(
            "Submitting {} messages to {} (model {})",
            request.messages.len(),
            url,
            request.model_params.model
        );

        let response = build_http_client()?.post(&url).json(request).send()?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        let result = interpret_completion_response(status, content_type.as_deref(), &body);
        match &result {
            Ok(_) => debug!("Chat completion succeeded with HTTP {}", status),
            Err(e) => error!("Chat completion failed: {}", e),
        }
        result
    }
}

/// Prompt entry as returned by the prompt list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptMeta {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub last_updated_at: Option<String>,
    #[serde(rename = "type", default)]
    pub prompt_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct PromptListResponse {
    #[serde(default)]
    data: Vec<PromptMeta>,
}

/// Latest version of a single prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDetail {
    pub name: String,
    pub version: u32,
    #[serde(rename = "type", default)]
    pub prompt_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Row shown in the prompt list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSummary {
    pub id: String,
    pub name: String,
    /// Latest version number
    pub versions: u32,
    pub prompt_type: String,
    /// Not reported by the API
    pub observations: u64,
    pub latest_version_created_at: String,
    pub tags: Vec<String>,
}

impl From<PromptDetail> for PromptSummary {
    fn from(detail: PromptDetail) -> Self {
        Self {
            id: detail.name.clone(),
            latest_version_created_at: detail
                .updated_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            name: detail.name,
            versions: detail.version,
            prompt_type: detail.prompt_type,
            observations: 0,
            tags: detail.tags,
        }
    }
}

/// Render an RFC 3339 timestamp in local time, or return it unchanged
pub fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

/// Prompt names in first-seen order, without duplicates
pub fn unique_prompt_names(prompts: &[PromptMeta]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        if !names.contains(&prompt.name) {
            names.push(prompt.name.clone());
        }
    }
    names
}

/// A configured model provider connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConnection {
    pub id: String,
    pub provider: String,
    #[serde(default)]
    pub adapter: String,
    #[serde(default)]
    pub custom_models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LlmConnectionListResponse {
    #[serde(default)]
    data: Vec<LlmConnection>,
}

#[derive(Debug, Clone)]
pub struct PromptsClient {
    config: PlaygroundConfig,
}

impl PromptsClient {
    pub fn new(config: PlaygroundConfig) -> Self {
        Self { config }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.credentials() {
            Some((public, secret)) => request.basic_auth(public, Some(secret)),
            None => request,
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn list_prompts(&self, name: Option<&str>) -> Result<Vec<PromptMeta>, ClientError> {
        let client = build_http_client()?;
        let mut request = client.get(self.config.url(PROMPTS_PATH));
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        let response = self.authorized(request).send()?;
        let list: PromptListResponse = Self::read_json(response)?;
        Ok(list.data)
    }

    pub fn get_prompt(&self, name: &str) -> Result<PromptDetail, ClientError> {
        let mut url = reqwest::Url::parse(&self.config.url(PROMPTS_PATH))
            .map_err(|e| ClientError::Http(e.to_string()))?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|_| ClientError::Http(format!("Endpoint cannot be a base: {}", base)))?
            .push(name);

        let client = build_http_client()?;
        let response = self.authorized(client.get(url)).send()?;
        Self::read_json(response)
    }

    /// Every prompt name in the project. Failures are logged and yield an
    /// empty list.
    pub fn fetch_all_prompt_names(&self) -> Vec<String> {
        match self.list_prompts(None) {
            Ok(prompts) => unique_prompt_names(&prompts),
            Err(e) => {
                error!("Failed to fetch all prompt names: {}", e);
                Vec::new()
            }
        }
    }

    /// All version numbers of one prompt. Failures are logged and yield an
    /// empty list.
    pub fn fetch_versions_for_prompt(&self, prompt_name: &str) -> Vec<u32> {
        if prompt_name.is_empty() {
            return Vec::new();
        }
        match self.list_prompts(Some(prompt_name)) {
            Ok(prompts) => prompts
                .into_iter()
                .next()
                .map(|p| p.versions)
                .unwrap_or_default(),
            Err(e) => {
                error!("Failed to fetch versions for prompt \"{}\": {}", prompt_name, e);
                Vec::new()
            }
        }
    }

    /// Summaries of every prompt with its latest version
    pub fn fetch_prompts(&self) -> Result<Vec<PromptSummary>, ClientError> {
        let names = unique_prompt_names(&self.list_prompts(None)?);
        names
            .iter()
            .map(|name| self.get_prompt(name).map(PromptSummary::from))
            .collect()
    }

    pub fn fetch_llm_connections(&self) -> Result<Vec<LlmConnection>, ClientError> {
        let client = build_http_client()?;
        let response = self
            .authorized(client.get(self.config.url(LLM_CONNECTIONS_PATH)))
            .send()?;
        let list: LlmConnectionListResponse = Self::read_json(response)?;
        debug!("Fetched {} LLM connections", list.data.len());
        Ok(list.data)
    }
}
