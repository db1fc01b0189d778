//! # Request/Response Marshaling
//!
//! Every session call becomes one [`ApiRequest`] and comes back as one
//! [`RawReply`]. This module owns both directions of the translation:
//!
//! - **Requests**: named parameters collected into a JSON object. Queries
//!   travel as `GET` with the parameters in the query string; everything
//!   else is a `POST` with the object as its JSON body.
//! - **Replies**: a 2xx body is JSON (string, number, bool, array) or plain
//!   text. A non-2xx status, or a JSON object with an `error` member, is an
//!   application error carrying the application's message verbatim.
//!
//! ```text
//! Session::add_node(0, 0, 0)
//!   └─▶ POST /node/add  {"x":0.0,"y":0.0,"z":0.0}
//!   ◀── 200 "1"                       ─▶ Ok(NodeId("1"))
//!   ◀── 400 {"error":"Duplicate node"} ─▶ Err(Application { .. })
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ClientError, ClientResult, OperationKind};

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One logical operation, ready for a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Session method that produced the request (used in errors and logs)
    pub operation: &'static str,
    pub kind: OperationKind,
    pub method: Method,
    /// Path below the base URL, e.g. `/node/add`
    pub path: &'static str,
    pub params: Map<String, Value>,
}

impl ApiRequest {
    /// Queries are sent as `GET`, every other kind as `POST`.
    pub fn new(operation: &'static str, kind: OperationKind, path: &'static str) -> Self {
        let method = match kind {
            OperationKind::Query => Method::Get,
            _ => Method::Post,
        };
        ApiRequest {
            operation,
            kind,
            method,
            path,
            params: Map::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Add `key` only when a value is given; the application then applies
    /// its own default.
    pub fn optional_param<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Look up a parameter (mostly for tests and logging)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Parameters flattened for a URL query string. Arrays are sent comma
    /// separated.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), query_value(value)))
            .collect()
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(query_value).collect::<Vec<_>>().join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Status and body exactly as received from the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        RawReply {
            status,
            body: body.into(),
        }
    }

    /// A 200 reply with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        RawReply::new(200, body)
    }

    /// A 200 reply carrying `value` as JSON
    pub fn json(value: &Value) -> Self {
        RawReply::ok(value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A decoded success body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn parse(body: &str) -> Payload {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Payload::Empty;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(trimmed.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Payload::Empty => String::new(),
            Payload::Json(value) => value.to_string(),
            Payload::Text(text) => text.clone(),
        }
    }

    /// Boolean spelled as JSON or as `True`/`False` text
    fn as_flag(&self) -> Option<bool> {
        match self {
            Payload::Json(Value::Bool(flag)) => Some(*flag),
            Payload::Json(Value::String(text)) | Payload::Text(text) => parse_flag(text),
            _ => None,
        }
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// `error` member of a JSON error descriptor, with its optional code
fn error_descriptor(value: &Value) -> Option<(String, Option<i64>)> {
    let object = value.as_object()?;
    let error = object.get("error")?;
    let (message, nested_code) = match error {
        Value::String(message) => (message.clone(), None),
        Value::Object(inner) => (
            inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            inner.get("code").and_then(Value::as_i64),
        ),
        other => (other.to_string(), None),
    };
    let code = object.get("code").and_then(Value::as_i64).or(nested_code);
    Some((message, code))
}

/// Turn a raw reply into a success payload or an application error.
pub fn interpret(request: &ApiRequest, reply: RawReply) -> ClientResult<Payload> {
    let payload = Payload::parse(&reply.body);

    if !reply.is_success() {
        let (message, code) = match &payload {
            Payload::Json(Value::String(text)) => (text.trim().to_string(), None),
            Payload::Json(value) => match error_descriptor(value) {
                Some(found) => found,
                None => (payload.describe(), None),
            },
            Payload::Text(text) => (text.clone(), None),
            Payload::Empty => (format!("HTTP {}", reply.status), None),
        };
        let message = if message.is_empty() {
            format!("HTTP {}", reply.status)
        } else {
            message
        };
        return Err(ClientError::application(
            request.operation,
            request.kind,
            message,
            code.or(Some(i64::from(reply.status))),
        ));
    }

    if let Payload::Json(value) = &payload {
        if let Some((message, code)) = error_descriptor(value) {
            return Err(ClientError::application(request.operation, request.kind, message, code));
        }
    }

    Ok(payload)
}

// ============================================================================
// Typed decoders
// ============================================================================

impl Payload {
    /// Identifier of a newly created entity
    pub fn into_id(self, request: &ApiRequest) -> ClientResult<String> {
        if self.as_flag() == Some(false) {
            return Err(rejected(request));
        }
        let id = match self {
            Payload::Json(Value::String(id)) | Payload::Text(id) => id,
            Payload::Json(Value::Number(n)) => number_to_id(&n),
            Payload::Empty => String::new(),
            other => {
                return Err(ClientError::unexpected_reply(
                    request.operation,
                    other.describe(),
                    "expected an identifier",
                ))
            }
        };
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err(ClientError::application(
                request.operation,
                request.kind,
                "application returned no identifier",
                None,
            ));
        }
        Ok(id)
    }

    /// Identifier of an entity the caller names itself. A bare `True` or an
    /// empty body means the application kept `name`.
    pub fn into_id_or(self, request: &ApiRequest, name: &str) -> ClientResult<String> {
        if matches!(self, Payload::Empty) || self.as_flag() == Some(true) {
            return Ok(name.to_string());
        }
        self.into_id(request)
    }

    /// Success indicator of a mutation. An explicit `false` is a rejection;
    /// an empty body or any other value counts as accepted.
    pub fn into_accepted(self, request: &ApiRequest) -> ClientResult<()> {
        match self.as_flag() {
            Some(false) => Err(rejected(request)),
            _ => Ok(()),
        }
    }

    pub fn into_f64(self, request: &ApiRequest) -> ClientResult<f64> {
        let value = match &self {
            Payload::Json(Value::Number(n)) => n.as_f64(),
            Payload::Json(Value::String(text)) | Payload::Text(text) => text.trim().parse().ok(),
            _ => None,
        };
        value.ok_or_else(|| ClientError::unexpected_reply(request.operation, self.describe(), "expected a number"))
    }

    pub fn into_count(self, request: &ApiRequest) -> ClientResult<usize> {
        let count = match &self {
            Payload::Json(Value::Number(n)) => n.as_u64(),
            Payload::Json(Value::String(text)) | Payload::Text(text) => text.trim().parse().ok(),
            _ => None,
        };
        count
            .and_then(|c| usize::try_from(c).ok())
            .ok_or_else(|| ClientError::unexpected_reply(request.operation, self.describe(), "expected a count"))
    }

    pub fn into_text(self) -> String {
        match self {
            Payload::Json(Value::String(text)) | Payload::Text(text) => text,
            other => other.describe(),
        }
    }

    /// Ordered identifier list; an empty body is an empty list
    pub fn into_ids(self, request: &ApiRequest) -> ClientResult<Vec<String>> {
        match self {
            Payload::Empty => Ok(Vec::new()),
            Payload::Json(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(id) => Ok(id.clone()),
                    Value::Number(n) => Ok(number_to_id(n)),
                    other => Err(ClientError::unexpected_reply(
                        request.operation,
                        other.to_string(),
                        "identifier list holds a non-identifier",
                    )),
                })
                .collect(),
            other => Err(ClientError::unexpected_reply(
                request.operation,
                other.describe(),
                "expected an identifier list",
            )),
        }
    }

    /// Fixed-length list of numbers (coordinates and the like)
    pub fn into_numbers<const N: usize>(self, request: &ApiRequest) -> ClientResult<[f64; N]> {
        let described = self.describe();
        let fail = |reason: String| ClientError::unexpected_reply(request.operation, described.clone(), reason);
        let items = match self {
            Payload::Json(Value::Array(items)) => items,
            _ => return Err(fail(format!("expected a list of {} numbers", N))),
        };
        if items.len() != N {
            return Err(fail(format!("expected {} numbers, got {}", N, items.len())));
        }
        let mut out = [0.0; N];
        for (slot, item) in out.iter_mut().zip(&items) {
            *slot = match item {
                Value::Number(n) => n.as_f64(),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            }
            .ok_or_else(|| fail(format!("'{}' is not a number", item)))?;
        }
        Ok(out)
    }

    /// Fixed-length list of flags; `0`/`1` are accepted too
    pub fn into_flags<const N: usize>(self, request: &ApiRequest) -> ClientResult<[bool; N]> {
        let described = self.describe();
        let fail = |reason: String| ClientError::unexpected_reply(request.operation, described.clone(), reason);
        let items = match self {
            Payload::Json(Value::Array(items)) if items.len() == N => items,
            _ => return Err(fail(format!("expected a list of {} flags", N))),
        };
        let mut out = [false; N];
        for (slot, item) in out.iter_mut().zip(&items) {
            *slot = match item {
                Value::Bool(flag) => Some(*flag),
                Value::Number(n) => n.as_i64().map(|v| v != 0),
                Value::String(text) => parse_flag(text),
                _ => None,
            }
            .ok_or_else(|| fail(format!("'{}' is not a flag", item)))?;
        }
        Ok(out)
    }

    /// Property value: numeric when it parses as a number, text otherwise
    pub fn into_property(self) -> PropertyValue {
        match self {
            Payload::Json(Value::Number(n)) => match n.as_f64() {
                Some(value) => PropertyValue::Number(value),
                None => PropertyValue::Text(n.to_string()),
            },
            Payload::Json(Value::Bool(flag)) => PropertyValue::Text(flag.to_string()),
            other => {
                let text = other.into_text();
                match text.trim().parse::<f64>() {
                    Ok(value) => PropertyValue::Number(value),
                    Err(_) => PropertyValue::Text(text),
                }
            }
        }
    }
}

fn number_to_id(n: &serde_json::Number) -> String {
    if let Some(v) = n.as_u64() {
        v.to_string()
    } else if let Some(v) = n.as_i64() {
        v.to_string()
    } else {
        match n.as_f64() {
            Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
            _ => n.to_string(),
        }
    }
}

fn rejected(request: &ApiRequest) -> ClientError {
    ClientError::application(
        request.operation,
        request.kind,
        format!("{} was rejected by the application", request.operation),
        None,
    )
}

/// A material, section or element property as reported by the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(value) => Some(*value),
            PropertyValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Number(value) => value.to_string(),
            PropertyValue::Text(text) => text.clone(),
        }
    }
}
