//! OpenAI-compatible chat-completions client.
//!
//! Plain JSON request/response, no streaming: stage outputs are consumed
//! whole, so there is nothing to render incrementally. The base URL is
//! configurable for tests and self-hosted gateways.

use scout_core::TokenUsage;
use scout_settings::ProviderSettings;
use scout_tools::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::CapabilityError;

/// One chat message in the conversation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `"system"`, `"user"`, `"assistant"`, or `"tool"`.
    pub role: String,
    /// Message text. Absent on assistant messages that only call tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls requested by the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// For `"tool"` messages: the id of the call being answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::text("system", content)
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::text("user", content)
    }

    /// A tool result message answering `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

/// One tool call requested by the model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id, echoed back in the tool result message.
    pub id: String,
    /// Called function.
    pub function: FunctionCall,
}

/// Function name and raw argument JSON of a tool call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Tool name.
    pub name: String,
    /// Arguments as a JSON-encoded string (the wire format).
    pub arguments: String,
}

/// Parsed completion: the assistant message plus usage.
#[derive(Clone, Debug)]
pub struct ChatCompletion {
    /// Assistant message text, if any.
    pub content: Option<String>,
    /// Tool calls, if any.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage reported for this request.
    pub usage: TokenUsage,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// Chat-completions client bound to one provider configuration.
#[derive(Debug)]
pub struct ChatClient {
    http: reqwest::Client,
    settings: ProviderSettings,
    api_key: String,
}

impl ChatClient {
    /// Build a client from provider settings.
    ///
    /// Fails with an auth error when no API key is configured — better to
    /// refuse at startup than on the first stage of a run.
    pub fn new(settings: ProviderSettings) -> Result<Self, CapabilityError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CapabilityError::Auth {
                message: "no API key configured (set SCOUT_OPENAI_API_KEY)".to_string(),
            })?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            settings,
            api_key,
        })
    }

    /// Model id this client requests.
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Run one chat completion.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatCompletion, CapabilityError> {
        let tool_payload = (!tools.is_empty()).then(|| {
            tools
                .iter()
                .map(|tool| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect()
        });

        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            tools: tool_payload,
        };

        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        debug!(model = %self.settings.model, messages = messages.len(), "chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if status == 401 || status == 403 {
            return Err(CapabilityError::Auth {
                message: api_error_message(&body, status),
            });
        }
        if status != 200 {
            return Err(CapabilityError::Api {
                status,
                message: api_error_message(&body, status),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CapabilityError::EmptyCompletion {
                message: "response carried no choices".to_string(),
            })?;

        Ok(ChatCompletion {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            usage: TokenUsage::new(parsed.usage.prompt_tokens, parsed.usage.completion_tokens),
        })
    }
}

/// Pull a useful message out of an API error body, with a fallback.
fn api_error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
