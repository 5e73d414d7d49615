use axum::Router;
use axum::body::Body;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::Value;
use tower::Service;
use uuid::Uuid;

use crate::create_router;
use crate::storage::Memory;
use crate::suggestions::Error as SuggestionError;
use crate::suggestions::Fixed;
use crate::suggestions::SuggestionProvider;

/// Suggestion every test app answers with
pub const SUGGESTION: &str = "Take a short walk and write down three good things.";

/// Test helper version of the mood entry
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct Mood {
    pub mood_id: Uuid,
    pub mood: String,
    pub note: String,
    pub suggestion: String,
    pub timestamp: String,
}

/// Raw response of the app
#[derive(Debug)]
pub struct Response {
    pub status_code: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Response {
    pub fn error(&self) -> Option<String> {
        self.body["error"].as_str().map(String::from)
    }

    pub fn message(&self) -> Option<String> {
        self.body["message"].as_str().map(String::from)
    }
}

/// Provider that always fails, like an unreachable service
#[derive(Clone)]
pub struct Unreachable;

impl SuggestionProvider for Unreachable {
    async fn suggest(&self, _prompt: &str) -> Result<String, SuggestionError> {
        Err(SuggestionError::Request("connection refused".to_string()))
    }
}

/// Provider that blows up
#[derive(Clone)]
pub struct Panicking;

impl SuggestionProvider for Panicking {
    async fn suggest(&self, _prompt: &str) -> Result<String, SuggestionError> {
        panic!("suggestion provider exploded");
    }
}

/// Setup the Moodlog app with empty storage and a fixed suggestion
pub fn setup_test_app() -> Router {
    setup_test_app_with(Memory::new(), Fixed::new(SUGGESTION))
}

/// Setup the Moodlog app with the given storage and provider
pub fn setup_test_app_with<P: SuggestionProvider>(storage: Memory, provider: P) -> Router {
    create_router(storage, provider)
}

pub async fn request(
    app: &mut Router,
    method: Method,
    uri: &str,
    payload: Option<&Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);

    let request = match payload {
        Some(payload) => builder
            .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(serde_json::to_vec(payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send(app, request).await
}

pub async fn request_with_raw_body(
    app: &mut Router,
    method: Method,
    uri: &str,
    body: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

async fn send(app: &mut Router, request: Request<Body>) -> Response {
    let response = app.call(request).await.unwrap();

    let status_code = response.status();
    let headers = response.headers().clone();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

    Response {
        status_code,
        headers,
        body,
    }
}

pub async fn maybe_create_mood(
    app: &mut Router,
    payload: &Value,
) -> (StatusCode, Option<Mood>, Option<String>) {
    let response = request(app, Method::POST, "/moods", Some(payload)).await;

    (
        response.status_code,
        if response.status_code == StatusCode::CREATED {
            Some(get_mood(&response.body))
        } else {
            None
        },
        response.error(),
    )
}

pub async fn create_mood(app: &mut Router, mood: &str, note: Option<&str>) -> Mood {
    let mut payload = serde_json::json!({ "mood": mood });
    if let Some(note) = note {
        payload["note"] = Value::String(note.to_string());
    }

    let (status_code, mood, _) = maybe_create_mood(app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);

    mood.unwrap()
}

pub async fn single_mood(
    app: &mut Router,
    mood_id: &str,
) -> (StatusCode, Option<Mood>, Option<String>) {
    let response = request(app, Method::GET, &format!("/moods/{mood_id}"), None).await;

    (
        response.status_code,
        if response.status_code == StatusCode::OK {
            Some(get_mood(&response.body))
        } else {
            None
        },
        response.error(),
    )
}

pub async fn maybe_update_mood(
    app: &mut Router,
    payload: &Value,
) -> (StatusCode, Option<String>, Option<String>) {
    let response = request(app, Method::PUT, "/moods", Some(payload)).await;

    (response.status_code, response.message(), response.error())
}

pub async fn maybe_delete_mood(
    app: &mut Router,
    mood_id: &str,
) -> (StatusCode, Option<String>, Option<String>) {
    let response = request(app, Method::DELETE, &format!("/moods/{mood_id}"), None).await;

    (response.status_code, response.message(), response.error())
}

/// Invoke the app with a raw event, returns the envelope
pub async fn invoke(app: &mut Router, event: &Value) -> Value {
    let response = request(app, Method::POST, "/invoke", Some(event)).await;
    assert_eq!(StatusCode::OK, response.status_code);

    response.body
}

/// The body inside an envelope, parsed
pub fn envelope_body(envelope: &Value) -> Value {
    serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap()
}

/// Check the CORS headers on a real response
pub fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!("*", headers["access-control-allow-origin"]);
    assert_eq!("Content-Type", headers["access-control-allow-headers"]);
    assert_eq!(
        "OPTIONS,POST,GET,PUT,DELETE",
        headers["access-control-allow-methods"]
    );
}

fn get_mood(body: &Value) -> Mood {
    serde_json::from_value(body.clone()).unwrap()
}
