//! # Session
//!
//! [`Session`] is the handle every model-building call goes through. It
//! holds the connection parameters and the transport; the model itself
//! lives inside the external application.
//!
//! Operations are grouped by domain under [`crate::ops`]; each one builds a
//! single [`ApiRequest`], sends it, and decodes the single reply.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::errors::ClientResult;
use crate::protocol::{interpret, ApiRequest, Payload};
use crate::transport::{HttpTransport, Transport};
use crate::units::UnitSystem;

/// Handle on the external application's current model.
///
/// Calls block until the application answers. Nothing is cached: every
/// identifier returned is the application's own.
pub struct Session<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    units: Option<UnitSystem>,
}

impl Session<HttpTransport> {
    /// Session over HTTP using `config`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the base URL is invalid. The
    /// application is not contacted until the first call.
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Session::with_transport(config, transport))
    }

    /// Session configured from `FEMREST_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Session::connect(ClientConfig::from_env()?)
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Session {
            config,
            transport,
            units: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Unit pair last set through this session, if any
    pub fn units(&self) -> Option<UnitSystem> {
        self.units
    }

    pub(crate) fn remember_units(&mut self, units: Option<UnitSystem>) {
        self.units = units;
    }

    /// Send one request and interpret the reply.
    pub(crate) fn call(&self, request: &ApiRequest) -> ClientResult<Payload> {
        debug!(
            operation = request.operation,
            kind = %request.kind,
            method = ?request.method,
            path = request.path,
            "sending request"
        );

        let reply = self.transport.execute(request).map_err(|err| {
            warn!(operation = request.operation, error = %err, "request failed");
            err
        })?;

        interpret(request, reply).map_err(|err| {
            warn!(operation = request.operation, error = %err, "application rejected request");
            err
        })
    }

    pub(crate) fn create(&self, request: ApiRequest) -> ClientResult<String> {
        self.call(&request)?.into_id(&request)
    }

    pub(crate) fn mutate(&self, request: ApiRequest) -> ClientResult<()> {
        self.call(&request)?.into_accepted(&request)
    }

    pub(crate) fn generate(&self, request: ApiRequest) -> ClientResult<Vec<String>> {
        let ids = self.call(&request)?.into_ids(&request)?;
        debug!(operation = request.operation, generated = ids.len(), "bulk operation finished");
        Ok(ids)
    }

    /// Blocking analysis call, timed for the log.
    pub(crate) fn solve(&self, request: ApiRequest) -> ClientResult<()> {
        info!(operation = request.operation, "analysis started");
        let started = Instant::now();
        let result = self.mutate(request);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => info!(elapsed_ms, "analysis finished"),
            Err(err) => warn!(elapsed_ms, error = %err, "analysis failed"),
        }
        result
    }
}
