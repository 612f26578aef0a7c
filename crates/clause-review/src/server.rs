//! HTTP endpoints
//!
//! - `POST /api/generate`: clause in, raw completion text out
//! - `POST /api/render`: raw completion text in, rendered controls out
//!
//! The server keeps no control state; pages render and interact locally.

use crate::config::ServerConfig;
use clause_controls::render_response;
use clause_generate::error::GENERIC_FAILURE_MESSAGE;
use clause_generate::{ClauseGenerator, GenerateError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

/// Body of `POST /api/generate`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Clause text; absent or null counts as empty
    #[serde(default)]
    pub clause: Option<String>,
}

/// Successful reply of `POST /api/generate`
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateReply {
    /// Raw completion text
    pub result: String,
}

/// Body of `POST /api/render`
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    /// Raw completion text
    #[serde(default)]
    pub result: String,
}

fn error_body(message: &str) -> Value {
    json!({ "error": { "message": message } })
}

fn json_response(body: &Value, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

/// Reply for a failed generation
///
/// Upstream error bodies pass through unchanged with their status.
#[must_use]
pub fn generate_error_response(error: &GenerateError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match error {
        GenerateError::Upstream {
            body: Some(body), ..
        } => json_response(body, status),
        _ => json_response(&error_body(&error.user_message()), status),
    }
}

async fn handle_generate(
    request: GenerateRequest,
    generator: Arc<ClauseGenerator>,
) -> Result<Response, Infallible> {
    let clause = request.clause.unwrap_or_default();
    match generator.generate(&clause).await {
        Ok(result) => Ok(warp::reply::json(&GenerateReply { result }).into_response()),
        Err(e) => {
            tracing::warn!("Generate request failed: {}", e);
            Ok(generate_error_response(&e))
        }
    }
}

async fn handle_render(request: RenderRequest) -> Result<Response, Infallible> {
    let outcome = render_response(&request.result);
    Ok(warp::reply::json(&outcome).into_response())
}

async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if rejection.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Request body must be JSON")
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Request body must be JSON")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", rejection);
        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE)
    };
    Ok(json_response(&error_body(message), status))
}

fn with_generator(
    generator: Arc<ClauseGenerator>,
) -> impl Filter<Extract = (Arc<ClauseGenerator>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&generator))
}

/// All routes
pub fn routes(
    generator: Arc<ClauseGenerator>,
    body_limit: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let generate = warp::path!("api" / "generate")
        .and(warp::post())
        .and(warp::body::content_length_limit(body_limit))
        .and(warp::body::json())
        .and(with_generator(generator))
        .and_then(handle_generate);

    let render = warp::path!("api" / "render")
        .and(warp::post())
        .and(warp::body::content_length_limit(body_limit))
        .and(warp::body::json())
        .and_then(handle_render);

    generate
        .or(render)
        .unify()
        .recover(handle_rejection)
        .unify()
        .with(warp::trace::request())
}

/// Serve until Ctrl-C
///
/// # Errors
/// Fails if the address cannot be bound.
pub async fn serve(config: &ServerConfig, generator: Arc<ClauseGenerator>) -> Result<(), warp::Error> {
    let (addr, server) = warp::serve(routes(generator, config.body_limit))
        .try_bind_with_graceful_shutdown(config.bind, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })?;

    tracing::info!("Listening on http://{}", addr);
    server.await;
    tracing::info!("Server stopped");
    Ok(())
}
