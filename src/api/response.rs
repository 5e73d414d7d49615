//! API response helpers
//!
//! Every outcome ends up as an [`Envelope`]: status code, JSON body as a string and the CORS
//! headers

use std::collections::BTreeMap;
use std::fmt::Display;

use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

/// Headers present on every response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST,GET,PUT,DELETE"),
];

/// The uniform response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,

    /// JSON serialized body
    pub body: String,

    pub headers: BTreeMap<String, String>,
}

impl Envelope {
    fn new(status_code: StatusCode, body: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            body,
            headers: CORS_HEADERS
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (
            status_code,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.body,
        )
            .into_response();

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: V,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data,
        }
    }

    pub fn into_envelope(self) -> Envelope {
        match serde_json::to_string(&self.data) {
            Ok(body) => Envelope::new(self.status_code, body),
            Err(err) => Error::internal_server_error(err).into_envelope(),
        }
    }
}

/// A plain message body, `{"message": ...}`
#[derive(Debug, Serialize)]
pub struct Message {
    message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status_code: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method Not Allowed".to_string(),
        }
    }

    /// Log the cause, only a generic message reaches the caller
    pub fn internal_server_error<E>(cause: E) -> Self
    where
        E: Display,
    {
        tracing::error!("Internal server error: {cause}");

        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal Server Error".to_string(),
        }
    }

    pub fn into_envelope(self) -> Envelope {
        let body = serde_json::json!({ "error": self.message }).to_string();

        Envelope::new(self.status_code, body)
    }
}

impl<V> From<Result<Success<V>, Error>> for Envelope
where
    V: Serialize,
{
    fn from(result: Result<Success<V>, Error>) -> Self {
        match result {
            Ok(success) => success.into_envelope(),
            Err(error) => error.into_envelope(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_cors(envelope: &Envelope) {
        for (name, value) in CORS_HEADERS {
            assert_eq!(Some(&value.to_string()), envelope.headers.get(name));
        }
    }

    #[test]
    fn test_success_envelope() {
        let envelope = Success::created(Message::new("Made it")).into_envelope();

        assert_eq!(201, envelope.status_code);
        assert_eq!(r#"{"message":"Made it"}"#, envelope.body);
        assert_cors(&envelope);
    }

    #[test]
    fn test_error_envelope() {
        let envelope = Error::not_found("Mood entry not found").into_envelope();

        assert_eq!(404, envelope.status_code);
        assert_eq!(r#"{"error":"Mood entry not found"}"#, envelope.body);
        assert_cors(&envelope);
    }

    #[test]
    fn test_internal_server_error_hides_cause() {
        let envelope = Error::internal_server_error("database on fire").into_envelope();

        assert_eq!(500, envelope.status_code);
        assert_eq!(r#"{"error":"Internal Server Error"}"#, envelope.body);
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let envelope = Error::method_not_allowed().into_envelope();

        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(405, value["statusCode"]);
        assert_eq!(r#"{"error":"Method Not Allowed"}"#, value["body"]);
        assert_eq!("*", value["headers"]["Access-Control-Allow-Origin"]);
    }

    #[test]
    fn test_envelope_into_response() {
        let response = Success::ok(Message::new("ok")).into_envelope().into_response();

        assert_eq!(StatusCode::OK, response.status());
        assert_eq!("application/json", response.headers()[CONTENT_TYPE]);
        assert_eq!("*", response.headers()["access-control-allow-origin"]);
        assert_eq!(
            "OPTIONS,POST,GET,PUT,DELETE",
            response.headers()["access-control-allow-methods"]
        );
    }
}
