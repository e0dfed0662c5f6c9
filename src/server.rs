use crate::components::shift_templates::{validate_template, ShiftTemplate, ValidationError};
use crate::components::ShiftTemplateHandle;
use crate::config::Config;
use crate::error::{AppResult, Error};
use crate::shutdown;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Build the HTTP router for the validation gate
pub fn router(handle: ShiftTemplateHandle) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/shift-templates/validate", post(validate_handler))
        .route("/api/shift-templates", post(create_handler))
        .route("/api/shift-templates/{id}", put(update_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(handle)
}

/// Run the gate until a termination signal arrives
pub async fn serve(config: Arc<RwLock<Config>>, bind_override: Option<String>) -> AppResult<()> {
    let bind_addr = match bind_override {
        Some(addr) => addr,
        None => config.read().await.bind_addr.clone(),
    };

    let handle = ShiftTemplateHandle::new(Arc::clone(&config)).await?;
    let app = router(handle.clone());

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Shift template gate listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::handle_signals(handle))
        .await?;

    info!("Shift template gate stopped");
    Ok(())
}

async fn health_handler() -> &'static str {
    "OK"
}

fn validation_response(err: &ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "valid": false, "error": err })),
    )
        .into_response()
}

fn error_response(err: Error) -> Response {
    match err {
        Error::Validation(v) => validation_response(&v),
        other => {
            warn!("Shift template request failed: {}", other);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": other.to_string() })),
            )
                .into_response()
        }
    }
}

/// Split a deserialization message into a dotted field path and the remaining reason
///
/// `timeSlots[0].segmentType: unknown variant` becomes
/// `("timeSlots.0.segmentType", "unknown variant")`.
fn field_path_from_rejection(text: &str) -> Option<(String, String)> {
    let detail = text.split_once("target type: ").map_or(text, |(_, rest)| rest);
    let (path, reason) = detail.split_once(": ")?;
    if path.is_empty() || path == "." || path.contains(char::is_whitespace) {
        return None;
    }

    let path = path.replace('[', ".").replace(']', "");
    Some((path, reason.to_string()))
}

/// Turn a body the extractor could not read into the same error shape as a failed check
fn rejection_error(rejection: &JsonRejection) -> ValidationError {
    let text = rejection.body_text();
    match field_path_from_rejection(&text) {
        Some((path, reason)) => ValidationError::new(path, reason),
        None => ValidationError::new("body", text),
    }
}

async fn validate_handler(payload: Result<Json<ShiftTemplate>, JsonRejection>) -> Response {
    let Json(template) = match payload {
        Ok(body) => body,
        Err(rejection) => return validation_response(&rejection_error(&rejection)),
    };

    match validate_template(&template) {
        Ok(()) => Json(json!({ "valid": true })).into_response(),
        Err(e) => validation_response(&e),
    }
}

async fn create_handler(
    State(handle): State<ShiftTemplateHandle>,
    payload: Result<Json<ShiftTemplate>, JsonRejection>,
) -> Response {
    let Json(template) = match payload {
        Ok(body) => body,
        Err(rejection) => return validation_response(&rejection_error(&rejection)),
    };

    match handle.create(template).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_handler(
    State(handle): State<ShiftTemplateHandle>,
    Path(id): Path<String>,
    payload: Result<Json<ShiftTemplate>, JsonRejection>,
) -> Response {
    let Json(template) = match payload {
        Ok(body) => body,
        Err(rejection) => return validation_response(&rejection_error(&rejection)),
    };

    match handle.update(id, template).await {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => error_response(e),
    }
}
