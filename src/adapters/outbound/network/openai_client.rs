use crate::ports::outbound::{AdvisoryRequest, AdvisoryResponse, AdvisoryService, ProjectDirectory};
use crate::shared::Result;
use anyhow::Context;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Upper bound on tool-call round trips within one advisory attempt
const MAX_TOOL_ROUNDS: usize = 8;

const SYSTEM_PROMPT: &str = r#"You are an expert software and DevOps engineer who specializes in Docker and NodeJS backend applications.

Given a NodeJS project that contains a Dockerfile to containerize it, your goal is to reduce the size of the final Docker image as much as possible, while keeping the code legible and developer-friendly.

* If the Dockerfile has a single stage, adopt Multistage builds: add a final stage that only contains the application code, its production dependencies (excluding "devDependencies" from package.json) and anything else needed for the app to run.
* The final stage should use a slim base image if possible. If a previous stage uses a specific version of NodeJS, use the same version.
* Set the NODE_ENV environment variable to "production" before running any npm commands in the final stage.
* Keep your changes consistent with the original code. For example, if the original uses "npm install", don't replace it with "npm ci".
* Add comments only in the code you write.
* You can inspect project files with the read_file and list_directory tools, e.g. to understand scripts invoked by RUN statements.

Respond with a single JSON object and nothing else:
{"dockerfile": "<the complete new Dockerfile>",
 "actions_taken": [{"rule": "<kebab-case id>", "filename": "Dockerfile", "title": "<short title>", "description": "<what you changed and why>"}],
 "recommendations": [{"rule": "<kebab-case id>", "filename": "<file>", "title": "<short title>", "description": "<what the user should change>"}]}
If no change is worthwhile, return the Dockerfile unchanged with empty lists."#;

/// Connection settings for an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// OpenAiAdvisoryService adapter delegating Dockerfile optimization to an LLM
///
/// This adapter implements the AdvisoryService port on top of the
/// `/chat/completions` endpoint. The model may call `read_file` and
/// `list_directory`, which are served by the restricted project view.
///
/// # Security
/// - Implements timeout (configurable)
/// - Does not retry failed requests (fail fast, the caller aborts the run)
/// - File access goes through `ProjectDirectory` only
pub struct OpenAiAdvisoryService {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiAdvisoryService {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dockershrink/{}", version);
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base_url.trim_end_matches('/')
        )
    }

    /// Sends the conversation so far and returns the assistant's message
    fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            tools: tool_definitions(),
            temperature: 0.0,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .context("Failed to reach the advisory API")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            anyhow::bail!(
                "Advisory API returned status code {}: {}",
                status,
                truncate(&text, 500)
            );
        }

        let completion: ChatResponse = response
            .json()
            .context("Advisory API returned an unexpected response body")?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow::anyhow!("Advisory API returned no choices"))
    }
}

impl AdvisoryService for OpenAiAdvisoryService {
    fn optimize_dockerfile(&self, request: &AdvisoryRequest<'_>) -> Result<AdvisoryResponse> {
        let mut messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_prompt(request)),
        ];

        for round in 1..=MAX_TOOL_ROUNDS {
            let reply = self.complete(&messages)?;
            if reply.tool_calls.is_empty() {
                let content = reply.content.unwrap_or_default();
                return parse_advisory_reply(&content);
            }

            debug!(round, calls = reply.tool_calls.len(), "advisory service requested tools");
            let calls = reply.tool_calls.clone();
            messages.push(reply);
            for call in calls {
                let output = run_tool(&call, request.project_directory);
                messages.push(ChatMessage::tool(call.id, output));
            }
        }

        anyhow::bail!(
            "Advisory service did not produce an answer within {} tool rounds",
            MAX_TOOL_ROUNDS
        )
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    tools: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self::with_role("system", content.to_string())
    }

    fn user(content: String) -> Self {
        Self::with_role("user", content)
    }

    fn tool(tool_call_id: String, content: String) -> Self {
        Self {
            tool_call_id: Some(tool_call_id),
            ..Self::with_role("tool", content)
        }
    }

    fn with_role(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct PathArguments {
    #[serde(default)]
    path: String,
}

fn function_kind() -> String {
    "function".to_string()
}

fn tool_definitions() -> serde_json::Value {
    let path_parameter = |description: &str| {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": description}
            },
            "required": ["path"]
        })
    };
    json!([
        {
            "type": "function",
            "function": {
                "name": "read_file",
                "description": "Read a text file of the project",
                "parameters": path_parameter("File path relative to the project root")
            }
        },
        {
            "type": "function",
            "function": {
                "name": "list_directory",
                "description": "List a directory of the project; directories end with '/'",
                "parameters": path_parameter("Directory path relative to the project root, '.' for the root")
            }
        }
    ])
}

fn build_user_prompt(request: &AdvisoryRequest<'_>) -> String {
    format!(
        "Optimize this Dockerfile ({} stage(s)):\n\n```\n{}\n```\n\n.dockerignore:\n\n```\n{}\n```\n\npackage.json:\n\n```\n{}\n```\n",
        request.dockerfile_stage_count,
        request.dockerfile.trim_end(),
        request.dockerignore.trim_end(),
        request.package_json.trim_end()
    )
}

/// Serves one tool call; failures are reported back to the model as text
fn run_tool(call: &ToolCall, directory: &dyn ProjectDirectory) -> String {
    let arguments: PathArguments = match serde_json::from_str(&call.function.arguments) {
        Ok(arguments) => arguments,
        Err(e) => return format!("error: invalid arguments: {}", e),
    };

    let result = match call.function.name.as_str() {
        "read_file" => directory.read_file(&arguments.path),
        "list_directory" => directory
            .list_directory(&arguments.path)
            .map(|entries| entries.join("\n")),
        other => return format!("error: unknown tool '{}'", other),
    };

    result.unwrap_or_else(|e| {
        warn!(tool = %call.function.name, path = %arguments.path, error = %e, "tool call failed");
        format!("error: {}", e)
    })
}

/// Parses the model's final answer, tolerating a surrounding code fence
fn parse_advisory_reply(content: &str) -> Result<AdvisoryResponse> {
    let body = strip_code_fences(content);
    serde_json::from_str(body).with_context(|| {
        format!(
            "Advisory reply is not the expected JSON object: {}",
            truncate(body, 200)
        )
    })
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
