use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::ais::error::AisError;
use crate::ais::ingest::AisIngest;
use crate::ais::normalize::normalize;
use crate::ais::ship_type::{
    cargo_type, to_title_case, udl_ship_type, CARGO_TYPES, ENGAGED_IN_TYPES, SPECIAL_CRAFT_TYPES,
};
use crate::ais::vessel::{Dimensions, VesselData};
use crate::config::DataMode;
use crate::udl::timestamp;

const SOURCE: &str = "Spire";
const HIGH_ACCURACY: &str = "HIGH";

/// Map one raw Spire vessel record onto a UDL AIS body.
pub fn to_udl_ais(
    raw: &[u8],
    data_mode: DataMode,
    classification_marking: &str,
) -> Result<AisIngest, AisError> {
    let mut value: Value = serde_json::from_slice(raw)?;
    normalize(&mut value);
    let vessel: VesselData = serde_json::from_value(value)?;

    let ts = timestamp::parse(&vessel.update_timestamp).map_err(|source| {
        AisError::InvalidTimestamp {
            value: vessel.update_timestamp.clone(),
            source,
        }
    })?;

    let static_data = &vessel.static_data;
    let position = &vessel.last_position_update;
    let voyage = &vessel.current_voyage;

    let mut ais = AisIngest {
        classification_marking: classification_marking.to_string(),
        ts,
        id: non_empty(&vessel.id),
        mmsi: (static_data.mmsi != 0).then_some(static_data.mmsi),
        ship_name: non_empty(&static_data.name),
        ship_type: udl_ship_type(&static_data.ship_type).map(str::to_string),
        engaged_in: None,
        special_craft: None,
        cargo_type: None,
        call_sign: non_empty(&static_data.call_sign),
        vessel_flag: non_empty(&static_data.flag),
        lat: non_zero(position.latitude),
        lon: non_zero(position.longitude),
        pos_hi_accuracy: position.accuracy == HIGH_ACCURACY,
        true_heading: non_zero(position.heading),
        course: non_zero(position.course),
        nav_status: non_empty(&position.navigational_status),
        antenna_ref_dimensions: antenna_dimensions(&static_data.dimensions),
        length: non_zero(static_data.dimensions.length),
        width: non_zero(static_data.dimensions.width),
        draught: non_zero(voyage.draught),
        destination_eta: destination_eta(&voyage.eta),
        current_port_locode: non_empty(&voyage.matched_port.port.unlocode),
        data_mode,
        source: SOURCE.to_string(),
    };
    classify(&mut ais, &static_data.ship_type, &static_data.ship_sub_type);

    log::debug!("mapped vessel {:?} to UDL AIS: {:?}", vessel.id, ais);
    Ok(ais)
}

/// Fill the category-specific fields for `ship_type`.
fn classify(ais: &mut AisIngest, ship_type: &str, ship_sub_type: &str) {
    let mut matched = 0;

    if ENGAGED_IN_TYPES.contains(&ship_type) {
        matched += 1;
        if !ship_sub_type.is_empty() {
            ais.engaged_in = Some(ship_sub_type.to_string());
        }
    }
    if SPECIAL_CRAFT_TYPES.contains(&ship_type) {
        matched += 1;
        ais.special_craft = Some(to_title_case(ship_type));
    }
    if CARGO_TYPES.contains(&ship_type) {
        matched += 1;
        ais.cargo_type = cargo_type(ship_type).map(str::to_string);
    }

    if matched > 1 {
        log::warn!(
            "ship type '{}' belongs to {} categories; every match was applied",
            ship_type,
            matched
        );
    }
}

fn destination_eta(eta: &str) -> Option<DateTime<Utc>> {
    if eta.is_empty() {
        return None;
    }
    match timestamp::parse(eta) {
        Ok(t) => Some(t),
        Err(e) => {
            log::debug!("dropping unparsable ETA '{}': {}", eta, e);
            None
        }
    }
}

fn antenna_dimensions(d: &Dimensions) -> Option<[f64; 4]> {
    let dims = [d.a, d.b, d.c, d.d];
    if all_zero(&dims) {
        None
    } else {
        Some(dims)
    }
}

fn all_zero(values: &[f64]) -> bool {
    values.iter().all(|v| *v == 0.0)
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn non_zero(v: f64) -> Option<f64> {
    (v != 0.0).then_some(v)
}
