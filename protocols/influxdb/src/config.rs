/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Connection settings for one InfluxDB server, supplied by the host on
/// every call.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(default)]
    pub protocol: Scheme,
    pub api_token: String,
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Config {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

// The token stays out of debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("api_token", &"****")
            .finish()
    }
}

/// Hosts send form values as strings, so both `8086` and `"8086"` are
/// accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum PortCompat {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortCompat::deserialize(deserializer)? {
        PortCompat::Number(port) => Ok(port),
        PortCompat::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid port: {text:?}"))
        }),
    }
}
