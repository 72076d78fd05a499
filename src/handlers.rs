//! Purpose: Provide the HTTP greeting/echo handlers consuming the mapper.
//! Exports: `router`, `Greeting`, greeting and header constants.
//! Role: Logic-free pass-throughs; every request is logged and echoed back.
//! Invariants: Responses are 200 with the platform header; bodies render through
//! `mapper().write_value_as_string` only.
//! Invariants: Handlers perform no recovery; a mapper failure surfaces as an error envelope.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::mapper::{Error, ErrorKind, mapper};

pub const POWERED_BY_HEADER: &str = "x-powered-by";
pub const POWERED_BY: &str = "echomap & axum";
pub const HELLO_GREETING: &str = "Hello from echomap! Your request executed successfully.";
pub const BYE_GREETING: &str = "Bye from echomap! Your request executed successfully.";

/// Fixed-shape response body: a greeting plus an echo of the inbound payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
    pub input: Map<String, Value>,
}

pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/hello", post(hello))
        .route("/bye", post(bye))
}

async fn healthz() -> Response {
    json_response(json!({ "ok": true }))
}

async fn hello(Json(input): Json<Map<String, Value>>) -> Response {
    greet(HELLO_GREETING, input)
}

async fn bye(Json(input): Json<Map<String, Value>>) -> Response {
    greet(BYE_GREETING, input)
}

fn greet(message: &str, input: Map<String, Value>) -> Response {
    tracing::info!("received:");
    for (key, value) in &input {
        if !value.is_null() {
            tracing::info!(%key, %value, "payload entry");
        }
    }

    let body = Greeting {
        message: message.to_string(),
        input,
    };
    match mapper().write_value_as_string(Some(&body)) {
        Ok(Some(text)) => {
            let mut response = (StatusCode::OK, text).into_response();
            response
                .headers_mut()
                .insert("content-type", HeaderValue::from_static("application/json"));
            response
                .headers_mut()
                .insert(POWERED_BY_HEADER, HeaderValue::from_static(POWERED_BY));
            response
        }
        Ok(None) => error_response(
            Error::new(ErrorKind::Internal).with_message("serializer returned no body"),
        ),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: String,
    message: String,
}

fn json_response(payload: Value) -> Response {
    let mut response = Json(payload).into_response();
    response
        .headers_mut()
        .insert(POWERED_BY_HEADER, HeaderValue::from_static(POWERED_BY));
    response
}

fn error_response(err: Error) -> Response {
    let status = match err.kind() {
        ErrorKind::Usage | ErrorKind::Parse => StatusCode::BAD_REQUEST,
        ErrorKind::Format | ErrorKind::Io | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let body = ErrorEnvelope {
        error: ErrorBody {
            kind: format!("{:?}", err.kind()),
            message: err.message().unwrap_or("error").to_string(),
        },
    };
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(POWERED_BY_HEADER, HeaderValue::from_static(POWERED_BY));
    response
}

#[cfg(test)]
mod tests {
    use super::{BYE_GREETING, Greeting, HELLO_GREETING, POWERED_BY, POWERED_BY_HEADER, bye, hello};
    use axum::Json;
    use serde_json::{Map, Value, json};

    fn payload() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".to_string(), json!("x"));
        map
    }

    async fn body_of(response: axum::response::Response) -> Greeting {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("greeting body")
    }

    #[tokio::test]
    async fn hello_echoes_payload_with_platform_header() {
        let response = hello(Json(payload())).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get(POWERED_BY_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(POWERED_BY)
        );

        let body = body_of(response).await;
        assert_eq!(body.message, HELLO_GREETING);
        assert_eq!(Value::Object(body.input), json!({"name": "x"}));
    }

    #[tokio::test]
    async fn bye_uses_its_own_greeting() {
        let response = bye(Json(payload())).await;
        assert_eq!(response.status(), 200);

        let body = body_of(response).await;
        assert_eq!(body.message, BYE_GREETING);
        assert_eq!(Value::Object(body.input), json!({"name": "x"}));
    }

    #[tokio::test]
    async fn empty_payload_still_greets() {
        let response = hello(Json(Map::new())).await;
        assert_eq!(response.status(), 200);

        let body = body_of(response).await;
        assert_eq!(body.message, HELLO_GREETING);
        assert!(body.input.is_empty());
    }
}
