//! Core data types for Vibe

use serde::{Deserialize, Serialize};

/// A generated idea: something catchy to show the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// A catchy, engaging title
    pub title: String,
    /// A compelling description that draws people in
    pub hook: String,
    /// A clear call-to-action
    pub cta: String,
}

impl Idea {
    pub fn new(title: impl Into<String>, hook: impl Into<String>, cta: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hook: hook.into(),
            cta: cta.into(),
        }
    }
}

/// Inspirational text built from search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspiration {
    pub inspiration_text: String,
    /// First source URL from the search results, if any
    pub source_url: Option<String>,
    /// Remaining source URLs, in search order
    #[serde(default)]
    pub additional_sources: Vec<String>,
}

/// A single web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: String,
}

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Object,
    Array,
}

/// Description of one tool parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    /// Parameter name, used as the key in the serialized parameter map
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub required: bool,
    pub description: String,
}

impl ToolParameter {
    pub fn required(name: impl Into<String>, kind: ParameterType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            description: description.into(),
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParameterType, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

/// A tool advertised to the orchestrator.
///
/// Parameters serialize as an object keyed by parameter name, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_parameters")]
    pub parameters: Vec<ToolParameter>,
}

fn serialize_parameters<S>(parameters: &[ToolParameter], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_map(parameters.iter().map(|p| (p.name.as_str(), p)))
}

/// Whether the LLM thinks a prompt benefits from web research
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResearchDecision {
    #[serde(default)]
    pub needs_research: bool,
    #[serde(default)]
    pub search_query: Option<String>,
}

impl ResearchDecision {
    /// The query to search for, if research was requested with a usable query
    pub fn query(&self) -> Option<&str> {
        if !self.needs_research {
            return None;
        }
        self.search_query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
    }
}
