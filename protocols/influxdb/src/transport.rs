/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use super::error::{Error, Result};
use super::http::{Request, Response};

/// Sends a single request and hands back the response body. Non-success
/// statuses are the transport's call: it may return them or fail.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// The default transport: a plain reqwest client with library defaults for
/// timeouts, TLS and keep-alive. Non-2xx statuses are reported as errors.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Client::builder()
            .user_agent("SmartAgent")
            .build()
            .map(Self::with_client)
            .map_err(Error::BuildClient)
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            headers.insert(name.clone(), HeaderValue::from_str(value)?);
        }

        debug!("requesting url: {} {}", request.method, &request.url);
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(Error::SendRequest)?;
        info!("request to {:?} returned {}", &request.url, response.status());
        let response =
            response.error_for_status().map_err(Error::InvalidResponse)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(Error::ReadResponse)?;
        debug!("with data: {}", &body);
        Ok(Response { status, body })
    }
}
