/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, QueryError, Result};
use crate::input::{ping_request, Input, Operation};
use crate::json::parse_lenient;
use crate::response::{ConnectionTestResult, QueryResult};
use crate::transport::{ReqwestTransport, Transport};

/* Host interface */

#[async_trait]
pub trait QueryService: Send + Sync {
    /// The unique name of the protocol.
    const PROTOCOL: &'static str;
    /// The version of the protocol plugin.
    const VERSION: &'static str;

    /// Describe the request a query would issue, without sending it.
    fn show_query(
        &self,
        config: &Config,
        input: &Input,
    ) -> std::result::Result<Option<String>, QueryError>;

    async fn run(
        &self,
        config: &Config,
        input: &Input,
    ) -> std::result::Result<QueryResult, QueryError>;

    async fn test_connection(
        &self,
        config: &Config,
    ) -> Result<ConnectionTestResult>;
}

pub struct Plugin<T = ReqwestTransport> {
    transport: T,
}

impl Plugin {
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }
}

impl<T: Transport> Plugin<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport, mainly so tests can inspect what a mock
    /// transport was sent.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue the request for `operation` and parse the response body.
    pub async fn execute(
        &self,
        config: &Config,
        operation: &Operation,
    ) -> Result<QueryResult> {
        let request = operation.request(config)?;
        let response = self.transport.send(request).await?;
        let data = parse_lenient(Some(&response.body))?;
        Ok(QueryResult::ok(data))
    }

    /// Entry point for hosts that pass their option objects untyped.
    pub async fn run_json(
        &self,
        source_options: Value,
        query_options: Value,
    ) -> std::result::Result<QueryResult, QueryError> {
        let config: Config = from_options("source", source_options)
            .map_err(report)?;
        let input: Input =
            from_options("query", query_options).map_err(report)?;
        self.run(&config, &input).await
    }

    pub async fn test_connection_json(
        &self,
        source_options: Value,
    ) -> Result<ConnectionTestResult> {
        let config: Config = from_options("source", source_options)?;
        self.test_connection(&config).await
    }
}

#[async_trait]
impl<T: Transport> QueryService for Plugin<T> {
    const PROTOCOL: &'static str = "influxdb";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    fn show_query(
        &self,
        config: &Config,
        input: &Input,
    ) -> std::result::Result<Option<String>, QueryError> {
        input
            .operation()
            .map(|operation| operation.request(config)?.render())
            .transpose()
            .map_err(report)
    }

    async fn run(
        &self,
        config: &Config,
        input: &Input,
    ) -> std::result::Result<QueryResult, QueryError> {
        // Unknown operations are not an error: nothing is sent and the
        // result is empty.
        let Some(operation) = input.operation() else {
            debug!("no request for operation {:?}", input.operation);
            return Ok(QueryResult::empty());
        };
        debug!("running {} on {}", operation.name(), config.base_url());
        self.execute(config, &operation).await.map_err(report)
    }

    async fn test_connection(
        &self,
        config: &Config,
    ) -> Result<ConnectionTestResult> {
        self.transport.send(ping_request(config)).await?;
        Ok(ConnectionTestResult::ok())
    }
}

fn from_options<O: DeserializeOwned>(
    kind: &'static str,
    options: Value,
) -> Result<O> {
    serde_json::from_value(options).map_err(|e| Error::InvalidOptions(kind, e))
}

fn report(error: Error) -> QueryError {
    warn!("influxdb query failed: {error}");
    QueryError::from(error)
}
