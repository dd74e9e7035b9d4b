use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DataMode;
use crate::udl::timestamp;

/// UDL `AISIngest` body. `None` fields are left out of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AisIngest {
    pub classification_marking: String,
    #[serde(with = "timestamp")]
    pub ts: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mmsi: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engaged_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_craft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel_flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub pos_hi_accuracy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antenna_ref_dimensions: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draught: Option<f64>,
    #[serde(
        rename = "destinationETA",
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_eta: Option<DateTime<Utc>>,
    #[serde(
        rename = "currentPortLOCODE",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_port_locode: Option<String>,
    pub data_mode: DataMode,
    pub source: String,
}
