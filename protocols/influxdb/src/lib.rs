/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! InfluxDB v2 protocol connector.
//!
//! Translates a host-supplied query descriptor into a single request against
//! the InfluxDB v2 REST API (bucket management and point writes) and
//! normalizes the answer into a uniform result or error envelope.

pub mod config;
mod error;
pub mod http;
pub mod input;
mod json;
mod plugin;
mod response;
pub mod transport;

pub use config::{Config, Scheme};
pub use error::{Error, QueryError, Result};
pub use input::{Input, Operation, WriteParams};
pub use json::parse_lenient;
pub use plugin::{Plugin, QueryService};
pub use response::{ConnectionTestResult, QueryResult, Status};
pub use transport::{ReqwestTransport, Transport};
