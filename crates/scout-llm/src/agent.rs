//! The production capability: one configured agent executing one task.
//!
//! Prompt assembly follows the persona/task split from configuration: the
//! system message carries the agent's role, backstory, and goal; the user
//! message carries the interpolated task description, the upstream context
//! block, and the expected-output instruction.
//!
//! Tool use is a bounded loop: while the model requests tool calls, each
//! is executed by name against the agent's tool set and fed back as a
//! tool message. When the iteration budget runs out, one final request is
//! made without tools so the model must answer with text.

use std::sync::Arc;

use async_trait::async_trait;
use scout_core::TokenUsage;
use scout_settings::{AgentSettings, TaskSettings};
use scout_tools::ToolSet;
use tracing::{debug, instrument, warn};

use crate::capability::{Capability, CapabilityOutcome, CapabilityRequest};
use crate::chat::{ChatClient, ChatMessage, ToolCall};
use crate::errors::CapabilityError;

/// A configured agent bound to one task.
pub struct AgentCapability {
    id: String,
    client: Arc<ChatClient>,
    agent: AgentSettings,
    description: String,
    expected_output: String,
    tools: ToolSet,
    max_tool_iterations: u32,
}

impl AgentCapability {
    /// Build the capability for `task`, binding the agent's named tools
    /// from `tools`.
    pub fn new(
        client: Arc<ChatClient>,
        agent: AgentSettings,
        task: &TaskSettings,
        tools: &ToolSet,
        max_tool_iterations: u32,
    ) -> Self {
        let bound = tools.subset(&agent.tools);
        Self {
            id: task.id.clone(),
            client,
            agent,
            description: task.description.clone(),
            expected_output: task.expected_output.clone(),
            tools: bound,
            max_tool_iterations,
        }
    }

    fn system_prompt(&self, request: &CapabilityRequest) -> String {
        let goal = interpolate(&self.agent.goal, request);
        format!(
            "You are {role}.\n{backstory}\nYour goal: {goal}",
            role = self.agent.role,
            backstory = self.agent.backstory,
        )
    }

    fn user_prompt(&self, request: &CapabilityRequest) -> String {
        let mut prompt = interpolate(&self.description, request);
        if !request.context.is_empty() {
            prompt.push_str("\n\nContext from earlier research:\n\n");
            prompt.push_str(&request.context.join("\n\n----\n\n"));
        }
        prompt.push_str("\n\nExpected output: ");
        prompt.push_str(&self.expected_output);
        prompt
    }

    async fn run_tool_call(&self, call: &ToolCall) -> String {
        let Some(tool) = self.tools.get(&call.function.name) else {
            warn!(tool = %call.function.name, "model called an unbound tool");
            return format!("Error: unknown tool '{}'", call.function.name);
        };
        let params = match serde_json::from_str(&call.function.arguments) {
            Ok(params) => params,
            Err(e) => return format!("Error: tool arguments were not valid JSON: {e}"),
        };
        // Tool failures go back to the model as text; the model can adjust
        // or answer without the tool. Only transport failures to the LLM
        // itself abort the invocation.
        match tool.execute(params).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %call.function.name, error = %e, "tool execution failed");
                format!("Error: {e}")
            }
        }
    }
}

#[async_trait]
impl Capability for AgentCapability {
    #[instrument(skip_all, fields(stage = %self.id))]
    async fn invoke(&self, request: &CapabilityRequest) -> Result<CapabilityOutcome, CapabilityError> {
        let mut messages = vec![
            ChatMessage::system(self.system_prompt(request)),
            ChatMessage::user(self.user_prompt(request)),
        ];
        let definitions = self.tools.definitions();
        let mut usage = TokenUsage::default();

        for iteration in 0..=self.max_tool_iterations {
            // Last pass runs without tools to force a textual answer.
            let offer_tools = iteration < self.max_tool_iterations && !definitions.is_empty();
            let completion = self
                .client
                .complete(&messages, if offer_tools { definitions.as_slice() } else { &[] })
                .await?;
            usage.add(completion.usage);

            if completion.tool_calls.is_empty() {
                let content = completion.content.unwrap_or_default();
                if content.trim().is_empty() {
                    return Err(CapabilityError::EmptyCompletion {
                        message: "model answered with neither text nor tool calls".to_string(),
                    });
                }
                debug!(chars = content.len(), iterations = iteration, "agent finished");
                return Ok(CapabilityOutcome {
                    raw_output: content,
                    usage,
                });
            }

            messages.push(ChatMessage {
                role: "assistant".to_string(),
                content: completion.content,
                tool_calls: Some(completion.tool_calls.clone()),
                tool_call_id: None,
            });
            for call in &completion.tool_calls {
                let output = self.run_tool_call(call).await;
                messages.push(ChatMessage::tool_result(call.id.clone(), output));
            }
        }

        // The <= bound above guarantees a final no-tools pass returns or
        // errors before we ever get here.
        Err(CapabilityError::EmptyCompletion {
            message: "tool loop ended without an answer".to_string(),
        })
    }
}

/// Interpolate `{industry}` and `{country}` placeholders.
fn interpolate(text: &str, request: &CapabilityRequest) -> String {
    text.replace("{industry}", &request.industry)
        .replace("{country}", &request.country)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use scout_settings::ProviderSettings;
    use scout_tools::{ResearchTool, ToolDefinition, ToolError};
    use serde_json::{Value, json};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct LookupTool;

    #[async_trait]
    impl ResearchTool for LookupTool {
        fn name(&self) -> &str {
            "lookup"
        }

        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: "lookup".to_string(),
                description: "Look something up.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {"query": {"type": "string"}},
                    "required": ["query"]
                }),
            }
        }

        async fn execute(&self, params: Value) -> Result<String, ToolError> {
            let query = params.get("query").and_then(Value::as_str).unwrap_or("");
            Ok(format!("results for {query}"))
        }
    }

    fn request() -> CapabilityRequest {
        CapabilityRequest {
            industry: "Robotics".to_string(),
            country: "Germany".to_string(),
            context: Vec::new(),
        }
    }

    fn agent_settings(tools: &[&str]) -> AgentSettings {
        AgentSettings {
            role: "Senior Lead Research Specialist".to_string(),
            goal: "Find companies in the {industry} industry in {country}".to_string(),
            backstory: "You are an expert researcher.".to_string(),
            tools: tools.iter().map(ToString::to_string).collect(),
        }
    }

    fn task_settings() -> TaskSettings {
        TaskSettings {
            id: "lead_generation".to_string(),
            description: "Research {industry} companies in {country}.".to_string(),
            expected_output: "A JSON array of leads.".to_string(),
            ..Default::default()
        }
    }

    fn client(base_url: &str) -> Arc<ChatClient> {
        Arc::new(
            ChatClient::new(ProviderSettings {
                base_url: base_url.to_string(),
                api_key: Some("sk-test".to_string()),
                max_tool_iterations: 3,
                ..Default::default()
            })
            .unwrap(),
        )
    }

    fn text_response(content: &str, prompt: u64, completion: u64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": prompt, "completion_tokens": completion}
        }))
    }

    fn tool_call_response() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "lookup", "arguments": "{\"query\":\"acme\"}"}
                }]
            }}],
            "usage": {"prompt_tokens": 50, "completion_tokens": 10}
        }))
    }

    #[test]
    fn prompts_interpolate_parameters_and_context() {
        let mut toolset = ToolSet::new();
        toolset.register(Arc::new(LookupTool));
        let capability = AgentCapability::new(
            client("http://unused.example"),
            agent_settings(&[]),
            &task_settings(),
            &toolset,
            3,
        );
        let mut req = request();
        req.context = vec!["earlier output".to_string()];

        let system = capability.system_prompt(&req);
        assert!(system.contains("You are Senior Lead Research Specialist."));
        assert!(system.contains("Robotics industry in Germany"));

        let user = capability.user_prompt(&req);
        assert!(user.starts_with("Research Robotics companies in Germany."));
        assert!(user.contains("Context from earlier research:"));
        assert!(user.contains("earlier output"));
        assert!(user.ends_with("Expected output: A JSON array of leads."));
    }

    #[tokio::test]
    async fn plain_answer_returns_output_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(text_response("[{\"company_name\": \"Acme\"}]", 120, 45))
            .mount(&server)
            .await;

        let capability = AgentCapability::new(
            client(&server.uri()),
            agent_settings(&[]),
            &task_settings(),
            &ToolSet::new(),
            3,
        );
        let outcome = capability.invoke(&request()).await.unwrap();
        assert_eq!(outcome.raw_output, "[{\"company_name\": \"Acme\"}]");
        assert_eq!(outcome.usage, TokenUsage::new(120, 45));
    }

    #[tokio::test]
    async fn tool_loop_executes_and_sums_usage() {
        let server = MockServer::start().await;
        // Second round trip: the conversation now carries the tool result.
        Mock::given(method("POST"))
            .and(body_string_contains("results for acme"))
            .respond_with(text_response("final answer", 200, 30))
            .mount(&server)
            .await;
        // First round trip: the model asks for the lookup tool.
        Mock::given(method("POST"))
            .respond_with(tool_call_response())
            .mount(&server)
            .await;

        let mut toolset = ToolSet::new();
        toolset.register(Arc::new(LookupTool));
        let capability = AgentCapability::new(
            client(&server.uri()),
            agent_settings(&["lookup"]),
            &task_settings(),
            &toolset,
            3,
        );
        let outcome = capability.invoke(&request()).await.unwrap();
        assert_eq!(outcome.raw_output, "final answer");
        // 50+10 from the tool round, 200+30 from the answer.
        assert_eq!(outcome.usage, TokenUsage::new(250, 40));
    }

    #[tokio::test]
    async fn unknown_tool_call_feeds_error_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("unknown tool"))
            .respond_with(text_response("recovered", 10, 5))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(tool_call_response())
            .mount(&server)
            .await;

        // Tool set is empty: the model's lookup call cannot be resolved.
        let capability = AgentCapability::new(
            client(&server.uri()),
            agent_settings(&[]),
            &task_settings(),
            &ToolSet::new(),
            3,
        );
        let outcome = capability.invoke(&request()).await.unwrap();
        assert_eq!(outcome.raw_output, "recovered");
    }

    #[tokio::test]
    async fn empty_answer_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(text_response("   ", 1, 1))
            .mount(&server)
            .await;

        let capability = AgentCapability::new(
            client(&server.uri()),
            agent_settings(&[]),
            &task_settings(),
            &ToolSet::new(),
            3,
        );
        let err = capability.invoke(&request()).await.unwrap_err();
        assert_matches!(err, CapabilityError::EmptyCompletion { .. });
    }

    #[tokio::test]
    async fn transport_error_aborts_invocation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("{}"))
            .mount(&server)
            .await;

        let capability = AgentCapability::new(
            client(&server.uri()),
            agent_settings(&[]),
            &task_settings(),
            &ToolSet::new(),
            3,
        );
        let err = capability.invoke(&request()).await.unwrap_err();
        assert_matches!(err, CapabilityError::Api { status: 500, .. });
    }
}
