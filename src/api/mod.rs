//! All API endpoint setup
//!
//! Requests become an [`Event`], get dispatched on their method and always answer with an
//! [`Envelope`]

use std::any::Any;

use axum::Extension;
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::rejection::PathRejection;
use axum::http::Method;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::any;
use axum::routing::post;
use serde_json::Value;

use crate::storage::Storage;
use crate::suggestions::SuggestionProvider;

pub use event::Event;
pub use response::Envelope;
pub use response::Error;
pub use response::Message;
pub use response::Success;

mod event;
mod moods;
mod response;

/// Name of the path parameter holding the entry ID
pub const MOOD_ID: &str = "mood_id";

/// Get the Axum router for all API routes
pub fn router<S: Storage, P: SuggestionProvider>() -> Router {
    Router::new()
        .route("/moods", any(collection::<S, P>))
        .route("/moods/{mood_id}", any(single::<S, P>))
        .route("/invoke", post(invoke::<S, P>).fallback(invoke_fallback))
        .fallback(fallback)
}

/// The handlers, one per supported method
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Create,
    Read,
    Update,
    Delete,
}

impl Route {
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::POST => Some(Route::Create),
            Method::GET => Some(Route::Read),
            Method::PUT => Some(Route::Update),
            Method::DELETE => Some(Route::Delete),
            _ => None,
        }
    }

    async fn handle<S: Storage, P: SuggestionProvider>(
        self,
        storage: &S,
        provider: &P,
        event: &Event,
    ) -> Envelope {
        match self {
            Route::Create => moods::create(storage, provider, event).await.into(),
            Route::Read => moods::single(storage, event).await.into(),
            Route::Update => moods::update(storage, event).await.into(),
            Route::Delete => moods::delete(storage, event).await.into(),
        }
    }
}

/// Dispatch a raw event
///
/// Never fails, every problem is an error envelope
pub async fn dispatch<S: Storage, P: SuggestionProvider>(
    storage: &S,
    provider: &P,
    event: Value,
) -> Envelope {
    match Event::from_value(event) {
        Ok(event) => handle(storage, provider, &event).await,
        Err(error) => error.into_envelope(),
    }
}

/// Dispatch a validated event
pub async fn handle<S: Storage, P: SuggestionProvider>(
    storage: &S,
    provider: &P,
    event: &Event,
) -> Envelope {
    let http_method = event.http_method();

    tracing::debug!("HTTP method: {http_method}");

    // unparsable methods can not have a handler either
    let Ok(method) = Method::from_bytes(http_method.as_bytes()) else {
        return Error::method_not_allowed().into_envelope();
    };

    if method == Method::OPTIONS {
        return preflight();
    }

    match Route::from_method(&method) {
        Some(route) => route.handle(storage, provider, event).await,
        None => Error::method_not_allowed().into_envelope(),
    }
}

async fn collection<S: Storage, P: SuggestionProvider>(
    Extension(storage): Extension<S>,
    Extension(provider): Extension<P>,
    method: Method,
    body: Bytes,
) -> Envelope {
    let event = Event::from_http(&method, None, String::from_utf8_lossy(&body).into_owned());

    handle(&storage, &provider, &event).await
}

async fn single<S: Storage, P: SuggestionProvider>(
    Extension(storage): Extension<S>,
    Extension(provider): Extension<P>,
    method: Method,
    mood_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Envelope {
    let mood_id = match mood_id {
        Ok(Path(mood_id)) => mood_id,
        Err(_) if method == Method::OPTIONS => return preflight(),
        Err(err) => {
            tracing::debug!("Invalid path parameter: {err}");

            return Error::bad_request("Invalid path parameter").into_envelope();
        }
    };

    let event = Event::from_http(
        &method,
        Some(mood_id),
        String::from_utf8_lossy(&body).into_owned(),
    );

    handle(&storage, &provider, &event).await
}

/// Invoke with a raw event, answers the envelope itself
///
/// A body that is not JSON at all is treated as an invalid event
async fn invoke<S: Storage, P: SuggestionProvider>(
    Extension(storage): Extension<S>,
    Extension(provider): Extension<P>,
    body: Bytes,
) -> Json<Envelope> {
    let event = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);

    Json(dispatch(&storage, &provider, event).await)
}

/// Other methods on the invoke endpoint, the preflight included
#[allow(clippy::unused_async)]
async fn invoke_fallback(method: Method) -> Envelope {
    if method == Method::OPTIONS {
        preflight()
    } else {
        Error::method_not_allowed().into_envelope()
    }
}

/// Only the preflight is answered outside the known routes
#[allow(clippy::unused_async)]
async fn fallback(method: Method) -> Envelope {
    if method == Method::OPTIONS {
        preflight()
    } else {
        Error::not_found("Not Found").into_envelope()
    }
}

fn preflight() -> Envelope {
    Success::ok(Message::new("CORS Preflight")).into_envelope()
}

/// Last resort when a handler panics
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(detail) = panic.downcast_ref::<String>() {
        detail.clone()
    } else if let Some(detail) = panic.downcast_ref::<&str>() {
        (*detail).to_string()
    } else {
        "unknown panic".to_string()
    };

    Error::internal_server_error(format!("Handler panicked: {detail}"))
        .into_envelope()
        .into_response()
}
