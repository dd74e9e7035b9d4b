//! OpenCDC records: the envelope every input payload arrives in.

use std::borrow::Cow;
use std::collections::HashMap;

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};
use thiserror::Error;

pub const RAW_DATA_KEY: &str = "opencdc.rawData";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} is not valid base64: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{field} must be a base64 string, an object or null, found {found}")]
    InvalidData {
        field: &'static str,
        found: &'static str,
    },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<RecordError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    #[default]
    Create,
    Update,
    Delete,
    Snapshot,
}

/// Record payload: opaque bytes, or a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Raw(Vec<u8>),
    Structured(Map<String, Value>),
}

impl Data {
    /// Raw bytes as-is; structured data as its JSON encoding.
    pub fn bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Data::Raw(bytes) => Cow::Borrowed(bytes.as_slice()),
            Data::Structured(map) => Cow::Owned(Value::Object(map.clone()).to_string().into_bytes()),
        }
    }

    /// Submission bytes. A structured payload that only wraps raw data under
    /// [`RAW_DATA_KEY`] yields that raw data.
    pub fn payload_bytes(&self) -> Cow<'_, [u8]> {
        if let Data::Structured(map) = self {
            if let (1, Some(Value::String(raw))) = (map.len(), map.get(RAW_DATA_KEY)) {
                return Cow::Borrowed(raw.as_bytes());
            }
        }
        self.bytes()
    }

    fn from_value(field: &'static str, value: Value) -> Result<Option<Self>, RecordError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => general_purpose::STANDARD
                .decode(s.as_bytes())
                .map(|bytes| Some(Data::Raw(bytes)))
                .map_err(|source| RecordError::Base64 { field, source }),
            Value::Object(map) => Ok(Some(Data::Structured(map))),
            Value::Bool(_) => Err(RecordError::InvalidData { field, found: "a boolean" }),
            Value::Number(_) => Err(RecordError::InvalidData { field, found: "a number" }),
            Value::Array(_) => Err(RecordError::InvalidData { field, found: "an array" }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Change {
    pub before: Option<Data>,
    pub after: Option<Data>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub position: Vec<u8>,
    pub operation: Operation,
    pub metadata: HashMap<String, String>,
    pub key: Option<Data>,
    pub payload: Change,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    operation: Operation,
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    key: Value,
    #[serde(default)]
    payload: RawChange,
}

#[derive(Deserialize, Default)]
struct RawChange {
    #[serde(default)]
    before: Value,
    #[serde(default)]
    after: Value,
}

impl Record {
    /// A freshly created record carrying `payload` as raw data.
    pub fn raw(payload: Vec<u8>) -> Self {
        Record {
            payload: Change {
                before: None,
                after: Some(Data::Raw(payload)),
            },
            ..Default::default()
        }
    }

    /// Decode one record in the OpenCDC JSON layout.
    pub fn from_json_line(line: &str) -> Result<Self, RecordError> {
        let raw: RawRecord = serde_json::from_str(line)?;

        let position = match raw.position {
            Some(p) => general_purpose::STANDARD
                .decode(p.as_bytes())
                .map_err(|source| RecordError::Base64 {
                    field: "position",
                    source,
                })?,
            None => Vec::new(),
        };

        Ok(Record {
            position,
            operation: raw.operation,
            metadata: raw.metadata,
            key: Data::from_value("key", raw.key)?,
            payload: Change {
                before: Data::from_value("payload.before", raw.payload.before)?,
                after: Data::from_value("payload.after", raw.payload.after)?,
            },
        })
    }

    /// Decode a JSON-lines stream, skipping blank lines.
    pub fn read_json_lines(content: &str) -> Result<Vec<Self>, RecordError> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                Self::from_json_line(line).map_err(|e| RecordError::AtLine {
                    line: i + 1,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}
