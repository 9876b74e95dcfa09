/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde_json::{Map, Value};

use super::error::Result;

/// Parses user-authored or server-returned JSON using the JSON5 grammar
/// (comments, trailing commas, unquoted keys). Absent or empty text yields
/// an empty object.
pub fn parse_lenient(text: Option<&str>) -> Result<Value> {
    match text {
        None | Some("") => Ok(Value::Object(Map::new())),
        Some(text) => Ok(json5::from_str(text)?),
    }
}
