use serde::Deserialize;

/// Spire Maritime vessel record. Every field falls back to its zero value
/// when absent; the mapper decides which of those count as "present".
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VesselData {
    pub id: String,
    pub static_data: StaticData,
    pub current_voyage: CurrentVoyage,
    pub last_position_update: LastPositionUpdate,
    pub update_timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticData {
    pub ais_class: String,
    #[serde(rename = "callsign")]
    pub call_sign: String,
    pub dimensions: Dimensions,
    pub flag: String,
    pub imo: i64,
    pub mmsi: i64,
    pub name: String,
    pub ship_sub_type: String,
    pub ship_type: String,
    pub timestamp: String,
    pub update_timestamp: String,
}

/// Antenna offsets `a`..`d` (bow, stern, port, starboard) and hull size, metres.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Dimensions {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub length: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LastPositionUpdate {
    pub accuracy: String,
    pub collection_type: String,
    pub course: f64,
    pub heading: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub maneuver: String,
    pub navigational_status: String,
    pub rot: f64,
    pub speed: f64,
    pub timestamp: String,
    pub update_timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentVoyage {
    pub destination: String,
    pub draught: f64,
    pub eta: String,
    pub matched_port: MatchedPort,
    pub timestamp: String,
    pub update_timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchedPort {
    pub match_score: f64,
    pub port: Port,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Port {
    pub center_point: GeoPoint,
    pub name: String,
    pub unlocode: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}
