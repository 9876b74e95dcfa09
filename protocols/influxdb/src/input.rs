/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::config::Config;
use super::error::Result;
use super::http::{auth_headers, token_header, HTTPMethod, Request};
use super::json::parse_lenient;

pub const BUCKETS_PATH: &str = "/api/v2/buckets";
pub const WRITE_PATH: &str = "/api/v2/write";
pub const PING_PATH: &str = "/influxdb/cloud/api//ping";

/// Query options as configured by the host. Only the fields belonging to
/// the selected operation are looked at.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
pub struct Input {
    #[serde(default)]
    pub operation: String,
    pub bucket_id: Option<String>,
    pub bucket: Option<String>,
    pub org: Option<String>,
    #[serde(rename = "orgID")]
    pub org_id: Option<String>,
    pub precision: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operation {
    ListBuckets,
    RetrieveBucket { bucket_id: String },
    CreateBucket { body: Option<String> },
    UpdateBucket { bucket_id: String, body: Option<String> },
    DeleteBucket { bucket_id: String },
    Write(WriteParams),
}

#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct WriteParams {
    pub bucket: Option<String>,
    pub org: Option<String>,
    pub org_id: Option<String>,
    pub precision: Option<String>,
}

impl Input {
    /// The operation selected by the `operation` tag, or `None` when the
    /// tag is not one we know.
    pub fn operation(&self) -> Option<Operation> {
        let bucket_id = || self.bucket_id.clone().unwrap_or_default();
        match self.operation.as_str() {
            "list_buckets" => Some(Operation::ListBuckets),
            "retrieve_bucket" => Some(Operation::RetrieveBucket {
                bucket_id: bucket_id(),
            }),
            "create_bucket" => Some(Operation::CreateBucket {
                body: self.body.clone(),
            }),
            "update_bucket" => Some(Operation::UpdateBucket {
                bucket_id: bucket_id(),
                body: self.body.clone(),
            }),
            "delete_bucket" => Some(Operation::DeleteBucket {
                bucket_id: bucket_id(),
            }),
            "write" => Some(Operation::Write(WriteParams {
                bucket: self.bucket.clone(),
                org: self.org.clone(),
                org_id: self.org_id.clone(),
                precision: self.precision.clone(),
            })),
            _ => None,
        }
    }
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListBuckets => "list_buckets",
            Self::RetrieveBucket { .. } => "retrieve_bucket",
            Self::CreateBucket { .. } => "create_bucket",
            Self::UpdateBucket { .. } => "update_bucket",
            Self::DeleteBucket { .. } => "delete_bucket",
            Self::Write(_) => "write",
        }
    }

    /// Builds the single API call for this operation. Fails only when a
    /// user-supplied body cannot be parsed.
    pub fn request(&self, config: &Config) -> Result<Request> {
        let headers = auth_headers(&config.api_token);
        let bucket_url = |id: &str| config.url(&format!("{BUCKETS_PATH}/{id}"));
        Ok(match self {
            Self::ListBuckets => {
                Request::new(HTTPMethod::GET, config.url(BUCKETS_PATH), headers)
            }
            Self::RetrieveBucket { bucket_id } => {
                Request::new(HTTPMethod::GET, bucket_url(bucket_id), headers)
            }
            Self::CreateBucket { body } => Request::new(
                HTTPMethod::POST,
                config.url(BUCKETS_PATH),
                headers,
            )
            .with_body(records(body.as_deref())?),
            Self::UpdateBucket { bucket_id, body } => {
                Request::new(HTTPMethod::PUT, bucket_url(bucket_id), headers)
                    .with_body(records(body.as_deref())?)
            }
            Self::DeleteBucket { bucket_id } => {
                Request::new(HTTPMethod::DELETE, bucket_url(bucket_id), headers)
            }
            Self::Write(params) => {
                Request::new(HTTPMethod::POST, config.url(WRITE_PATH), headers)
                    .with_query(params.query())
            }
        })
    }
}

impl WriteParams {
    /// Query string pairs, leaving out unset and empty values.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        [
            ("bucket", &self.bucket),
            ("org", &self.org),
            ("orgID", &self.org_id),
            ("precision", &self.precision),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value.as_deref() {
            None | Some("") => None,
            Some(value) => Some((key, value.to_string())),
        })
        .collect()
    }
}

fn records(body: Option<&str>) -> Result<serde_json::Value> {
    Ok(json!({ "records": parse_lenient(body)? }))
}

/// The health check issued by a connection test.
pub fn ping_request(config: &Config) -> Request {
    Request::new(
        HTTPMethod::GET,
        config.url(PING_PATH),
        vec![token_header(&config.api_token)],
    )
}
