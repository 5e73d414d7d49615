//! Inbound events
//!
//! An event is the HTTP request in gateway form: `httpMethod`, `pathParameters` and a raw
//! `body` string. Events come from a raw invoke or are built from a real HTTP request.

use std::collections::HashMap;

use axum::http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Error;

/// Body used when the event has none
const EMPTY_BODY: &str = "{}";

/// A parsed inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    http_method: String,
    path_parameters: HashMap<String, String>,
    body: Option<String>,
}

impl Event {
    /// Validate the shape of a raw event
    ///
    /// # Errors
    ///
    /// - Not an object: `Invalid event format`
    /// - No usable `httpMethod`: `httpMethod not found in event`
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(mut event) = value else {
            tracing::error!("Invalid event format, expected an object");

            return Err(Error::bad_request("Invalid event format"));
        };

        let http_method = match event.remove("httpMethod") {
            Some(Value::String(http_method)) if !http_method.is_empty() => http_method,
            _ => {
                tracing::error!("`httpMethod` not found in event");

                return Err(Error::bad_request("httpMethod not found in event"));
            }
        };

        let path_parameters = match event.remove("pathParameters") {
            None | Some(Value::Null) => HashMap::new(),
            Some(path_parameters) => serde_json::from_value(path_parameters)
                .map_err(|_| Error::bad_request("Invalid event format"))?,
        };

        let body = match event.remove("body") {
            None | Some(Value::Null) => None,
            Some(Value::String(body)) => Some(body),
            Some(_) => return Err(Error::bad_request("Invalid event format")),
        };

        Ok(Self {
            http_method,
            path_parameters,
            body,
        })
    }

    /// Build an event from a real HTTP request
    ///
    /// An empty body counts as no body
    pub fn from_http(method: &Method, mood_id: Option<String>, body: String) -> Self {
        let path_parameters = mood_id
            .map(|mood_id| HashMap::from([(super::MOOD_ID.to_string(), mood_id)]))
            .unwrap_or_default();

        Self {
            http_method: method.as_str().to_string(),
            path_parameters,
            body: if body.is_empty() { None } else { Some(body) },
        }
    }

    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    /// A non-empty path parameter
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Deserialize the JSON body, an absent body is an empty object
    ///
    /// # Errors
    ///
    /// A body that can not be deserialized is an internal server error
    pub fn body<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(self.body.as_deref().unwrap_or(EMPTY_BODY))
            .map_err(Error::internal_server_error)
    }
}
