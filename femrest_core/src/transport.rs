//! HTTP transport.
//!
//! [`Transport`] is the seam between the session facade and the wire. The
//! production implementation, [`HttpTransport`], sends each request as one
//! blocking reqwest call. Tests swap in a recording transport.

use std::error::Error as StdError;

use reqwest::blocking::{Client, RequestBuilder};
use tracing::debug;

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};
use crate::protocol::{ApiRequest, Method, RawReply};

/// Header carrying the configured user token
pub const USER_HEADER: &str = "user";

/// Sends one request and returns the application's raw reply.
///
/// Implementations report only transport failures as errors; interpreting
/// the status and body is left to the session.
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> ClientResult<RawReply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &ApiRequest) -> ClientResult<RawReply> {
        (**self).execute(request)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build the HTTP client. No connection is opened until the first
    /// request.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(format!("femrest/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::config("http_client", format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpTransport {
            client,
            config: config.clone(),
        })
    }

    fn build(&self, request: &ApiRequest) -> ClientResult<(String, RequestBuilder)> {
        let url = self.config.endpoint_url(request.path)?;
        let endpoint = url.to_string();

        let mut builder = match request.method {
            Method::Get => self.client.get(url).query(&request.query_pairs()),
            Method::Post => self.client.post(url).json(&request.params),
        };
        if let Some(user) = &self.config.user {
            builder = builder.header(USER_HEADER, user);
        }
        Ok((endpoint, builder))
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> ClientResult<RawReply> {
        let (endpoint, builder) = self.build(request)?;

        let response = builder.send().map_err(|e| {
            if e.is_builder() {
                ClientError::config("request", describe(&e))
            } else {
                ClientError::connection(&endpoint, describe(&e))
            }
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ClientError::connection(&endpoint, format!("reading reply failed: {}", describe(&e))))?;

        debug!(%endpoint, status, bytes = body.len(), "reply received");
        Ok(RawReply { status, body })
    }
}

/// Flatten a reqwest error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut text = if err.is_timeout() {
        format!("timed out: {}", err)
    } else if err.is_connect() {
        format!("cannot connect: {}", err)
    } else {
        err.to_string()
    };
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
