//! AI orchestration: combines an LLM connector with the tool provider
//!
//! Every operation here is a short, linear sequence of LLM and tool calls.
//! Replies that do not parse degrade to sensible defaults; hard failures
//! either degrade to a canned response or propagate, depending on
//! [`OrchestratorConfig::fallback_on_error`].

use crate::errors::CoreResult;
use crate::traits::{CompletionRequest, LlmConnector, ToolProvider};
use crate::types::{Idea, Inspiration, ResearchDecision, SearchResult, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Results requested when researching an idea prompt
const RESEARCH_RESULTS: usize = 3;
/// Results requested when building inspiration
const INSPIRATION_RESULTS: usize = 5;
/// Hook length used when the idea reply is not JSON
const HOOK_PREVIEW_CHARS: usize = 150;

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Return canned content instead of an error when an LLM or tool call fails
    pub fallback_on_error: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fallback_on_error: true,
        }
    }
}

/// AI orchestrator that combines an LLM with the available tools
pub struct AiOrchestrator {
    llm: Arc<dyn LlmConnector>,
    tools: Arc<dyn ToolProvider>,
    config: OrchestratorConfig,
}

impl AiOrchestrator {
    /// Create a new orchestrator
    pub fn new(llm: Arc<dyn LlmConnector>, tools: Arc<dyn ToolProvider>, config: OrchestratorConfig) -> Self {
        Self { llm, tools, config }
    }

    /// Name of the underlying LLM provider
    pub fn provider_name(&self) -> &str {
        self.llm.provider_name()
    }

    /// Generate an idea for `prompt`, researching first if the LLM asks for it
    pub async fn generate_idea_with_research(&self, prompt: &str) -> CoreResult<Idea> {
        match self.try_generate_idea(prompt).await {
            Ok(idea) => {
                info!("Generated idea for prompt: {}", prompt);
                Ok(idea)
            }
            Err(e) if self.config.fallback_on_error => {
                warn!("Idea generation failed, using fallback: {}", e);
                Ok(fallback_idea())
            }
            Err(e) => {
                error!("Error in AI orchestrator idea generation: {}", e);
                Err(e)
            }
        }
    }

    /// Build inspirational content for `query` from web search results
    pub async fn inspire_with_search(&self, query: &str) -> CoreResult<Inspiration> {
        match self.try_inspire(query).await {
            Ok(inspiration) => {
                info!("Generated inspiration with search for query: {}", query);
                Ok(inspiration)
            }
            Err(e) if self.config.fallback_on_error => {
                warn!("Inspiration failed, using fallback: {}", e);
                Ok(fallback_inspiration(query))
            }
            Err(e) => {
                error!("Error in AI orchestrator inspiration: {}", e);
                Err(e)
            }
        }
    }

    /// Definitions of the tools available to the orchestrator
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    async fn try_generate_idea(&self, prompt: &str) -> CoreResult<Idea> {
        let decision = self.decide_research(prompt).await?;

        let research_context = match decision.query() {
            Some(query) => {
                debug!("Researching idea prompt with query: {}", query);
                let results = self.tools.web_search(query, RESEARCH_RESULTS).await?;
                format!("\n\nResearch context:\n{}", serde_json::to_string_pretty(&results)?)
            }
            None => String::new(),
        };

        let request = CompletionRequest::new(idea_prompt(prompt, &research_context))
            .with_max_tokens(300)
            .with_temperature(0.8);
        let reply = self.llm.complete(request).await?;

        Ok(idea_from_reply(&reply.text))
    }

    async fn decide_research(&self, prompt: &str) -> CoreResult<ResearchDecision> {
        let request = CompletionRequest::new(research_prompt(prompt))
            .with_max_tokens(100)
            .with_temperature(0.3);
        let reply = self.llm.complete(request).await?;

        let decision = serde_json::from_str::<ResearchDecision>(strip_code_fences(&reply.text)).unwrap_or_else(|e| {
            debug!("Research decision was not JSON ({}), skipping research", e);
            ResearchDecision::default()
        });
        Ok(decision)
    }

    async fn try_inspire(&self, query: &str) -> CoreResult<Inspiration> {
        let results = self.tools.web_search(query, INSPIRATION_RESULTS).await?;

        let request = CompletionRequest::new(inspiration_prompt(query, &results)?)
            .with_max_tokens(400)
            .with_temperature(0.7);
        let reply = self.llm.complete(request).await?;

        let mut urls = results
            .into_iter()
            .map(|r| r.url)
            .filter(|url| !url.is_empty());
        let source_url = urls.next();

        Ok(Inspiration {
            inspiration_text: reply.text,
            source_url,
            additional_sources: urls.collect(),
        })
    }
}

fn research_prompt(prompt: &str) -> String {
    format!(
        "Decide whether web research would help answer this prompt: \"{}\"\n\n\
         Respond only with JSON: {{\"needs_research\": true or false, \"search_query\": \"query if needed\"}}",
        prompt
    )
}

fn idea_prompt(prompt: &str, research_context: &str) -> String {
    format!(
        "Come up with a creative, engaging idea for this prompt: \"{}\"{}\n\n\
         Respond only with a JSON object containing:\n\
         - title: a catchy, engaging title\n\
         - hook: a compelling description that draws people in\n\
         - cta: a clear call-to-action\n\n\
         Make it exciting and actionable!",
        prompt, research_context
    )
}

fn inspiration_prompt(query: &str, results: &[SearchResult]) -> CoreResult<String> {
    Ok(format!(
        "Using these search results about \"{}\", write inspiring, motivational content:\n\n{}\n\n\
         The content should uplift the reader, offer actionable insights, stay positive \
         and encouraging, and reference the search findings naturally.",
        query,
        serde_json::to_string_pretty(results)?
    ))
}

/// Strip Markdown code fences an LLM may wrap around JSON
pub fn strip_code_fences(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parse an idea reply, falling back to a preview of the raw text
fn idea_from_reply(content: &str) -> Idea {
    match serde_json::from_str::<Idea>(strip_code_fences(content)) {
        Ok(idea) => idea,
        Err(e) => {
            debug!("Idea reply was not a JSON idea ({}), using text preview", e);
            Idea::new("Creative Idea", hook_preview(content), "Get Started")
        }
    }
}

fn hook_preview(content: &str) -> String {
    match content.char_indices().nth(HOOK_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

fn fallback_idea() -> Idea {
    Idea::new(
        "Inspiration Awaits",
        "Something amazing is waiting to be discovered. Let's explore new possibilities together!",
        "Discover More",
    )
}

fn fallback_inspiration(query: &str) -> Inspiration {
    Inspiration {
        inspiration_text: format!(
            "Every journey begins with a single step. Your interest in {} shows you're ready to grow \
             and explore new possibilities. Take that first step today!",
            query
        ),
        source_url: None,
        additional_sources: Vec::new(),
    }
}
