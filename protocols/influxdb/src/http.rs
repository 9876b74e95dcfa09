/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;

use reqwest::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::Result;

pub type Headers = Vec<(HeaderName, String)>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HTTPMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HTTPMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HTTPMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HTTPMethod> for reqwest::Method {
    fn from(method: HTTPMethod) -> Self {
        match method {
            HTTPMethod::GET => reqwest::Method::GET,
            HTTPMethod::POST => reqwest::Method::POST,
            HTTPMethod::PUT => reqwest::Method::PUT,
            HTTPMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

pub fn token_header(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Token {token}"))
}

/// Headers sent along with every API call.
pub fn auth_headers(token: &str) -> Headers {
    vec![
        token_header(token),
        (CONTENT_TYPE, String::from("application/json")),
    ]
}

/// A fully described outgoing request. Nothing is sent until it is handed
/// to a [`crate::Transport`].
#[derive(Clone, PartialEq, Debug)]
pub struct Request {
    pub method: HTTPMethod,
    pub url: String,
    pub headers: Headers,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: HTTPMethod, url: String, headers: Headers) -> Self {
        Self {
            method,
            url,
            headers,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn full_url(&self) -> Result<String> {
        if self.query.is_empty() {
            return Ok(self.url.clone());
        }
        Ok(format!(
            "{}?{}",
            self.url,
            serde_urlencoded::to_string(&self.query)?
        ))
    }

    /// Human-readable rendering with the credentials masked.
    pub fn render(&self) -> Result<String> {
        let mut text = format!("{} {}\n", self.method, self.full_url()?);
        for (name, value) in &self.headers {
            let value = if *name == AUTHORIZATION {
                "Token ****"
            } else {
                value.as_str()
            };
            text.push_str(&format!("{}: {}\n", name, value));
        }
        if let Some(body) = &self.body {
            text.push('\n');
            text.push_str(&serde_json::to_string_pretty(body)?);
            text.push('\n');
        }
        Ok(text)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Response {
    pub status: u16,
    pub body: String,
}
