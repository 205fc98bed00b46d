//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a partial
//! settings file deep-merges over compiled defaults — missing fields keep
//! their default value. The compiled defaults describe the complete
//! four-agent lead-generation pipeline, so the binary runs with no settings
//! file at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root settings type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoutSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// LLM provider settings.
    pub provider: ProviderSettings,
    /// Research tool settings.
    pub tools: ToolSettings,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Agent personas, keyed by agent id.
    pub agents: BTreeMap<String, AgentSettings>,
    /// Pipeline tasks in execution order.
    pub tasks: Vec<TaskSettings>,
}

impl Default for ScoutSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "scout".to_string(),
            provider: ProviderSettings::default(),
            tools: ToolSettings::default(),
            server: ServerSettings::default(),
            agents: default_agents(),
            tasks: default_tasks(),
        }
    }
}

/// LLM provider settings (OpenAI-compatible chat completions).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// Model ID sent with every request.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// API key. Normally supplied via the `SCOUT_OPENAI_API_KEY` env
    /// override rather than the settings file.
    pub api_key: Option<String>,
    /// Max completion tokens per request.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Cap on tool-call round trips within one capability invocation.
    pub max_tool_iterations: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            max_tokens: 4096,
            temperature: 0.2,
            max_tool_iterations: 6,
            timeout_ms: 300_000,
        }
    }
}

/// Research tool settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    /// Web search tool settings.
    pub search: SearchToolSettings,
    /// Website scrape tool settings.
    pub scrape: ScrapeToolSettings,
}

/// Web search (Serper-style API) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchToolSettings {
    /// Search API base URL.
    pub base_url: String,
    /// API key. Normally supplied via `SCOUT_SERPER_API_KEY`.
    pub api_key: Option<String>,
    /// Number of results requested per query.
    pub result_count: u32,
}

impl Default for SearchToolSettings {
    fn default() -> Self {
        Self {
            base_url: "https://google.serper.dev".to_string(),
            api_key: None,
            result_count: 10,
        }
    }
}

/// Website scrape settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeToolSettings {
    /// Byte budget for extracted page text.
    pub max_bytes: usize,
    /// Fetch timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ScrapeToolSettings {
    fn default() -> Self {
        Self {
            max_bytes: 16_384,
            timeout_ms: 30_000,
        }
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub bind: String,
    /// Port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

/// Persona for one agent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSettings {
    /// Role line, e.g. `"Senior Lead Researcher"`.
    pub role: String,
    /// What the agent is trying to achieve.
    pub goal: String,
    /// Background framing for the persona.
    pub backstory: String,
    /// Research tools bound to this agent, by tool name.
    pub tools: Vec<String>,
}

/// Declared output contract of one task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Output is parsed into schema-validated lead records.
    LeadRecords,
    /// Output is passed through as raw text.
    #[default]
    RawText,
}

/// One task in the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSettings {
    /// Stage identifier, unique within the pipeline.
    pub id: String,
    /// Agent id executing this task.
    pub agent: String,
    /// Task description. `{industry}` and `{country}` placeholders are
    /// interpolated at run time.
    pub description: String,
    /// Description of the expected output, appended to the prompt.
    pub expected_output: String,
    /// Upstream task ids whose raw outputs form this task's context,
    /// in declared order.
    pub context: Vec<String>,
    /// Output contract.
    pub output: OutputKind,
}

fn default_agents() -> BTreeMap<String, AgentSettings> {
    let mut agents = BTreeMap::new();
    let _ = agents.insert(
        "lead_generator".to_string(),
        AgentSettings {
            role: "Senior Lead Research Specialist".to_string(),
            goal: "Discover high-potential companies in the {industry} industry in {country}"
                .to_string(),
            backstory: "You are an expert B2B researcher who finds promising companies using \
                        web search and company websites, and you always report revenue, \
                        headcount, and location when they can be found."
                .to_string(),
            tools: vec!["web_search".to_string(), "scrape_website".to_string()],
        },
    );
    let _ = agents.insert(
        "contact_agent".to_string(),
        AgentSettings {
            role: "Contact Research Specialist".to_string(),
            goal: "Identify key decision makers at each discovered company".to_string(),
            backstory: "You specialize in mapping company leadership: founders, C-level \
                        executives, and department heads, with their LinkedIn profiles."
                .to_string(),
            tools: vec!["web_search".to_string(), "scrape_website".to_string()],
        },
    );
    let _ = agents.insert(
        "lead_qualifier".to_string(),
        AgentSettings {
            role: "Lead Qualification Analyst".to_string(),
            goal: "Score each lead 1-10 for sales fit based on the research so far".to_string(),
            backstory: "You are a rigorous analyst. You weigh company size, revenue, and \
                        relevance to the target industry, and justify every score."
                .to_string(),
            tools: Vec::new(),
        },
    );
    let _ = agents.insert(
        "sales_manager".to_string(),
        AgentSettings {
            role: "Sales Manager".to_string(),
            goal: "Produce the final ranked lead list for the sales team".to_string(),
            backstory: "You turn research into decisions: a clean, deduplicated, scored list \
                        a sales team can act on immediately."
                .to_string(),
            tools: Vec::new(),
        },
    );
    agents
}

fn default_tasks() -> Vec<TaskSettings> {
    vec![
        TaskSettings {
            id: "lead_generation".to_string(),
            agent: "lead_generator".to_string(),
            description: "Research the {industry} industry in {country} and identify 5-10 \
                          promising companies as sales leads. For each company find its name, \
                          annual revenue, location (city and country), website URL, what it \
                          does, and employee count."
                .to_string(),
            expected_output: "A JSON array of lead objects with keys company_name, \
                              annual_revenue, location, website_url, review, num_employees, \
                              key_decision_makers, score."
                .to_string(),
            context: Vec::new(),
            output: OutputKind::LeadRecords,
        },
        TaskSettings {
            id: "contact_research".to_string(),
            agent: "contact_agent".to_string(),
            description: "For each company found so far, identify 1-3 key decision makers: \
                          their name, role, and LinkedIn profile URL."
                .to_string(),
            expected_output: "A text summary listing each company with its key decision \
                              makers and their LinkedIn URLs."
                .to_string(),
            context: vec!["lead_generation".to_string()],
            output: OutputKind::RawText,
        },
        TaskSettings {
            id: "lead_qualification".to_string(),
            agent: "lead_qualifier".to_string(),
            description: "Qualify every lead for sales fit in the {industry} industry in \
                          {country}. Assign each a score from 1 to 10."
                .to_string(),
            expected_output: "A JSON array of the same lead objects, each with all known \
                              fields filled in and a score from 1 to 10."
                .to_string(),
            context: vec!["lead_generation".to_string(), "contact_research".to_string()],
            output: OutputKind::LeadRecords,
        },
        TaskSettings {
            id: "sales_management".to_string(),
            agent: "sales_manager".to_string(),
            description: "Review the qualified leads and produce the final list for the \
                          sales team, ordered by score."
                .to_string(),
            expected_output: "A JSON array of the final lead objects with every key present \
                              (company_name, annual_revenue, location, website_url, review, \
                              num_employees, key_decision_makers, score)."
                .to_string(),
            context: vec![
                "lead_generation".to_string(),
                "lead_qualification".to_string(),
                "contact_research".to_string(),
            ],
            output: OutputKind::LeadRecords,
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
