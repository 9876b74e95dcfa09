/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use reqwest::header::InvalidHeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to build a http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    #[error("error sending request: {0}")]
    SendRequest(#[source] reqwest::Error),
    #[error("received an invalid response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
    #[error("unable to read response body: {0}")]
    ReadResponse(#[source] reqwest::Error),
    #[error("{0}")]
    Transport(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("Tried sending a request with an invalid header: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error("unable to parse json: {0}")]
    Json5(#[from] json5::Error),
    #[error("Unable to serialize/deserialize data: {0}")]
    SerdeJSONError(#[from] serde_json::Error),
    #[error("Unable to encode url: {0}")]
    SerdeUrlEncodedError(#[from] serde_urlencoded::ser::Error),
    #[error("invalid {0} options: {1}")]
    InvalidOptions(&'static str, #[source] serde_json::Error),
}

/// The failure handed back to the host when a query cannot be completed.
#[derive(Serialize, Deserialize, Error, Clone, PartialEq, Debug)]
#[error("{summary}: {detail}")]
pub struct QueryError {
    pub summary: String,
    pub detail: String,
    pub context: Map<String, Value>,
}

impl QueryError {
    pub const SUMMARY: &'static str = "Query could not be completed";

    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            summary: Self::SUMMARY.to_string(),
            detail: detail.into(),
            context: Map::new(),
        }
    }
}

impl From<Error> for QueryError {
    fn from(error: Error) -> Self {
        Self::new(error.to_string())
    }
}
