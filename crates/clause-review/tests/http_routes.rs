//! HTTP route tests against a canned completion backend.

use async_trait::async_trait;
use clause_generate::{
    ClauseGenerator, CompletionBackend, CompletionRequest, GenerateConfig, GenerateError,
    GenerateResult,
};
use clause_review::server::{routes, GenerateReply};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const RECOMMENDATION: &str = r#"{"parameters":[{"parameter":"textInput","parameterDescription":"Notice period in days","uiControl":"textInput","textInput":{"id":"notice","label":"Days","value":"30","placeholder":"days"}}]}"#;

/// Backend answering every request the same way
struct Canned {
    configured: bool,
    reply: fn() -> GenerateResult<String>,
    calls: AtomicUsize,
}

impl Canned {
    fn new(reply: fn() -> GenerateResult<String>) -> Self {
        Self {
            configured: true,
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(|| Ok(String::new()))
        }
    }
}

#[async_trait]
impl CompletionBackend for Canned {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, _request: &CompletionRequest) -> GenerateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }
}

fn generator(backend: Arc<Canned>) -> Arc<ClauseGenerator> {
    Arc::new(ClauseGenerator::new(
        backend,
        GenerateConfig::new().with_retries(0, 0),
    ))
}

async fn post(backend: Arc<Canned>, path: &str, body: &Value) -> (u16, Value) {
    let filter = routes(generator(backend), 16 * 1024);
    let response = warp::test::request()
        .method("POST")
        .path(path)
        .json(body)
        .reply(&filter)
        .await;
    let status = response.status().as_u16();
    let body = serde_json::from_slice(response.body()).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn generate_returns_raw_result() {
    let backend = Arc::new(Canned::new(|| Ok(RECOMMENDATION.to_string())));
    let (status, body) = post(
        Arc::clone(&backend),
        "/api/generate",
        &json!({"clause": "the notice period is thirty days"}),
    )
    .await;

    assert_eq!(status, 200);
    let reply: GenerateReply = serde_json::from_value(body).unwrap();
    assert_eq!(reply.result, RECOMMENDATION);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_rejects_empty_clause() {
    let backend = Arc::new(Canned::new(|| Ok(RECOMMENDATION.to_string())));
    for body in [json!({"clause": "   "}), json!({}), json!({"clause": null})] {
        let (status, reply) = post(Arc::clone(&backend), "/api/generate", &body).await;
        assert_eq!(status, 400);
        assert_eq!(reply, json!({"error": {"message": "Please enter a valid clause"}}));
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generate_without_key_is_server_error() {
    let (status, reply) = post(
        Arc::new(Canned::unconfigured()),
        "/api/generate",
        &json!({"clause": ""}),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(
        reply["error"]["message"],
        "OpenAI API key not configured, please follow instructions in README.md"
    );
}

#[tokio::test]
async fn generate_passes_upstream_error_through() {
    let backend = Arc::new(Canned::new(|| {
        Err(GenerateError::Upstream {
            status: 401,
            message: "Incorrect API key provided".to_string(),
            body: Some(json!({"error": {"message": "Incorrect API key provided", "code": "invalid_api_key"}})),
        })
    }));
    let (status, reply) = post(backend, "/api/generate", &json!({"clause": "clause"})).await;

    assert_eq!(status, 401);
    assert_eq!(reply["error"]["code"], "invalid_api_key");
}

#[tokio::test]
async fn generate_hides_other_failures() {
    let backend = Arc::new(Canned::new(|| Err(GenerateError::EmptyCompletion)));
    let (status, reply) = post(backend, "/api/generate", &json!({"clause": "clause"})).await;

    assert_eq!(status, 500);
    assert_eq!(
        reply,
        json!({"error": {"message": "An error occurred during your request."}})
    );
}

#[tokio::test]
async fn render_returns_controls() {
    let backend = Arc::new(Canned::new(|| Ok(String::new())));
    let (status, reply) = post(backend, "/api/render", &json!({"result": RECOMMENDATION})).await;

    assert_eq!(status, 200);
    assert_eq!(reply["status"], "controls");
    let controls = reply["controls"].as_array().unwrap();
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0]["description"], "Notice period in days");
    assert_eq!(controls[0]["view"]["uiControl"], "textInput");
    assert_eq!(controls[0]["view"]["value"], "30");
}

#[tokio::test]
async fn render_reports_unparseable_result() {
    let backend = Arc::new(Canned::new(|| Ok(String::new())));
    let (status, reply) = post(
        backend,
        "/api/render",
        &json!({"result": "I'm sorry, I can't help with that."}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(reply["status"], "error");
    assert_eq!(reply["error"]["message"], "Unable to parse result.");
}

#[tokio::test]
async fn malformed_body_and_unknown_path() {
    let filter = routes(generator(Arc::new(Canned::new(|| Ok(String::new())))), 16 * 1024);

    let response = warp::test::request()
        .method("POST")
        .path("/api/generate")
        .body("not json")
        .reply(&filter)
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = warp::test::request()
        .method("POST")
        .path("/api/unknown")
        .json(&json!({}))
        .reply(&filter)
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = warp::test::request()
        .method("GET")
        .path("/api/render")
        .reply(&filter)
        .await;
    assert_eq!(response.status().as_u16(), 405);
}
