//! Spire element sets already arrive in the UDL elset schema; they are only
//! validated by deserializing them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::udl::timestamp;

/// UDL `ElsetIngest` body. Only `epoch` is required to deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElsetIngest {
    #[serde(default)]
    pub classification_marking: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub epoch: DateTime<Utc>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub data_mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_elset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat_no: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_on_orbit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_orbit_determination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_motion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclination: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raan: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_of_perigee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_anomaly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_no: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_star: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_motion_dot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_motion_d_dot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi_major_axis: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apogee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perigee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephem_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_network: Option<String>,
    #[serde(rename = "rawFileURI", skip_serializing_if = "Option::is_none")]
    pub raw_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourced_data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourced_data_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

pub fn to_udl_elset(raw: &[u8]) -> Result<ElsetIngest, serde_json::Error> {
    serde_json::from_slice(raw)
}
