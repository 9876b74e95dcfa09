/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct QueryResult {
    pub status: Status,
    pub data: Value,
}

impl QueryResult {
    pub fn ok(data: Value) -> Self {
        Self {
            status: Status::Ok,
            data,
        }
    }

    pub fn empty() -> Self {
        Self::ok(Value::Object(Map::new()))
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ConnectionTestResult {
    pub status: Status,
}

impl ConnectionTestResult {
    pub fn ok() -> Self {
        Self { status: Status::Ok }
    }
}
