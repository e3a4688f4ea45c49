//! Router tests driving the full middleware stack with in-process requests

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use vibe_adapter_mcp_tools::{McpTools, McpToolsConfig};
use vibe_connector_openai::{OpenAiConfig, OpenAiConnector};
use vibe_core::prelude::*;
use vibe_http_api::{HttpApi, HttpApiConfig};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// LLM that replays canned replies in order and records the prompts it saw
struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedLlm {
    fn new(replies: Vec<Result<&str, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(String::from)).collect()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        }
    }
}

#[async_trait]
impl LlmConnector for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InternalError("no scripted reply".to_string())));
        reply.map(|text| CompletionResponse { text, metadata: None })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

fn app_with(llm: Arc<dyn LlmConnector>, fallback_on_error: bool, config: HttpApiConfig) -> Router {
    let tools = Arc::new(McpTools::new(McpToolsConfig::default()).unwrap());
    let orchestrator = AiOrchestrator::new(llm, tools, OrchestratorConfig { fallback_on_error });
    HttpApi::new(config, Arc::new(orchestrator)).router()
}

fn app(replies: Vec<Result<&str, LlmError>>, fallback_on_error: bool) -> Router {
    app_with(Arc::new(ScriptedLlm::new(replies)), fallback_on_error, HttpApiConfig::default())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[tokio::test]
async fn test_generate_idea() {
    let router = app(
        vec![
            Ok(r#"{"needs_research": false}"#),
            Ok(r#"{"title": "Salsa Night", "hook": "Dance like nobody is watching.", "cta": "Book a class"}"#),
        ],
        true,
    );

    let (status, _, body) = send(router, post_json("/api/generate-idea", json!({ "prompt": "date night" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "title": "Salsa Night",
        "hook": "Dance like nobody is watching.",
        "cta": "Book a class"
    }));
}

#[tokio::test]
async fn test_generate_idea_missing_prompt() {
    let (status, _, body) = send(app(vec![], true), post_json("/api/generate-idea", json!({ "topic": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing prompt in request body" }));
}

#[tokio::test]
async fn test_generate_idea_blank_prompt() {
    let (status, _, body) = send(app(vec![], true), post_json("/api/generate-idea", json!({ "prompt": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing prompt in request body");
}

#[tokio::test]
async fn test_generate_idea_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-idea")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(app(vec![], true), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing prompt in request body");

    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-idea")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app(vec![], true), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_idea_array_body() {
    let (status, _, body) = send(app(vec![], true), post_json("/api/generate-idea", json!(["date night"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing prompt in request body" }));
}

#[tokio::test]
async fn test_generate_idea_passes_prompt_untrimmed() {
    let llm = Arc::new(ScriptedLlm::new(vec![
        Ok(r#"{"needs_research": false}"#),
        Ok(r#"{"title": "T", "hook": "H", "cta": "C"}"#),
    ]));
    let router = app_with(llm.clone(), true, HttpApiConfig::default());

    let (status, _, _) = send(router, post_json("/api/generate-idea", json!({ "prompt": "  date night " }))).await;

    assert_eq!(status, StatusCode::OK);
    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().all(|p| p.contains("  date night ")));
}

#[tokio::test]
async fn test_generate_idea_llm_failure_uses_fallback() {
    let router = app(vec![Err(LlmError::Timeout)], true);
    let (status, _, body) = send(router, post_json("/api/generate-idea", json!({ "prompt": "x" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Inspiration Awaits");
    assert_eq!(body["cta"], "Discover More");
}

#[tokio::test]
async fn test_generate_idea_llm_failure_without_fallback() {
    let router = app(vec![Err(LlmError::ApiError("boom".to_string()))], false);
    let (status, _, body) = send(router, post_json("/api/generate-idea", json!({ "prompt": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to generate idea" }));
}

#[tokio::test]
async fn test_inspire() {
    let router = app(vec![Ok("Clay is patient. So are you.")], true);
    let (status, _, body) = send(router, post_json("/api/inspire", json!({ "query": "pottery" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inspirationText"], "Clay is patient. So are you.");
    assert_eq!(body["sourceUrl"], "https://example.com/article1?q=pottery");
    assert_eq!(body["additionalSources"], json!([
        "https://guide.com/topic?search=pottery",
        "https://news.com/latest?topic=pottery"
    ]));
}

#[tokio::test]
async fn test_inspire_missing_query() {
    let (status, _, body) = send(app(vec![], true), post_json("/api/inspire", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing query in request body" }));
}

#[tokio::test]
async fn test_inspire_array_body() {
    let (status, _, body) = send(app(vec![], true), post_json("/api/inspire", json!(["pottery"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing query in request body" }));
}

#[tokio::test]
async fn test_inspire_failure_without_fallback() {
    let router = app(vec![Err(LlmError::NetworkError("reset".to_string()))], false);
    let (status, _, body) = send(router, post_json("/api/inspire", json!({ "query": "pottery" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate inspiration");
}

#[tokio::test]
async fn test_list_tools() {
    let (status, _, body) = send(app(vec![], true), get("/api/tools")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["http_get_json", "web_search", "db_query"]);
    assert_eq!(body["tools"][0]["parameters"]["url"]["type"], "string");
}

#[tokio::test]
async fn test_health() {
    for uri in ["/health", "/api/health"] {
        let (status, _, body) = send(app(vec![], true), get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["llmProvider"], "scripted");
    }
}

#[tokio::test]
async fn test_request_id_header() {
    let (_, headers, _) = send(app(vec![], true), get("/health")).await;
    assert!(headers.contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(app(vec![], true), request).await;
    assert_eq!(headers["x-request-id"], "abc-123");
}

fn cors_preflight() -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/api/generate-idea")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap()
}

fn cross_origin_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_cors_enabled() {
    let (status, headers, _) = send(app(vec![], true), cors_preflight()).await;
    assert!(status.is_success());
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));

    let (status, headers, _) = send(app(vec![], true), cross_origin_get("/api/tools")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_cors_disabled() {
    let config = HttpApiConfig {
        enable_cors: false,
        ..Default::default()
    };

    let router = app_with(Arc::new(ScriptedLlm::new(vec![])), true, config.clone());
    let (_, headers, _) = send(router, cors_preflight()).await;
    assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let router = app_with(Arc::new(ScriptedLlm::new(vec![])), true, config);
    let (status, headers, _) = send(router, cross_origin_get("/api/tools")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _, _) = send(app(vec![], true), get("/api/contact")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_request_timeout() {
    let llm = ScriptedLlm {
        delay: Some(Duration::from_secs(120)),
        ..ScriptedLlm::new(vec![])
    };
    let config = HttpApiConfig {
        request_timeout_secs: 5,
        ..Default::default()
    };
    let router = app_with(Arc::new(llm), true, config);

    let (status, _, body) = send(router, post_json("/api/generate-idea", json!({ "prompt": "x" }))).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"], "Request timed out");
}

#[tokio::test]
async fn test_generate_idea_end_to_end_with_openai() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Decide whether web research"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": r#"{"needs_research": true, "search_query": "salsa classes"}"# } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Research context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": r#"{"title": "Step Up", "hook": "Learn salsa in a month.", "cta": "Join now"}"# } }],
            "usage": { "prompt_tokens": 80, "completion_tokens": 20 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let connector = OpenAiConnector::new(
        OpenAiConfig::new("test-key").with_api_base(format!("{}/v1", server.uri())),
    )
    .unwrap();
    let router = app_with(Arc::new(connector), false, HttpApiConfig::default());

    let (status, _, body) = send(router, post_json("/api/generate-idea", json!({ "prompt": "learn to dance" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Step Up");
}
