//! Spire ship-type taxonomy mapped onto the UDL AIS vocabulary.
//!
//! Keys are Spire types after underscore normalization (`DRY_BULK` becomes
//! `DRY BULK`).

/// Types whose Spire sub-type names the activity the vessel is engaged in.
pub const ENGAGED_IN_TYPES: &[&str] = &[
    "FISHING",
    "DIVING",
    "DREDGING",
    "TOWING",
    "TOWING LONG WIDE",
    "MILITARY OPS",
    "SAILING",
];

/// Service craft reported to the UDL as `specialCraft`.
pub const SPECIAL_CRAFT_TYPES: &[&str] = &[
    "PILOT VESSEL",
    "SAR",
    "TUG",
    "PORT TENDER",
    "ANTI POLLUTION",
    "LAW ENFORCEMENT",
    "MEDICAL TRANS",
];

/// Types that carry a `cargoType`; see [`cargo_type`].
pub const CARGO_TYPES: &[&str] = &[
    "GENERAL CARGO",
    "DRY BULK",
    "BULK CARRIER",
    "CONTAINER",
    "REEFER",
    "ROLL ON ROLL OFF",
    "CAR CARRIER",
    "LIVESTOCK",
    "TANKER CRUDE",
    "TANKER PRODUCT",
    "TANKER CHEMICALS",
    "GAS CARRIER",
];

/// UDL `shipType` for a Spire type, `None` for anything unrecognised.
pub fn udl_ship_type(spire: &str) -> Option<&'static str> {
    let mapped = match spire {
        "CARGO" | "GENERAL CARGO" | "DRY BULK" | "BULK CARRIER" | "CONTAINER" | "REEFER"
        | "ROLL ON ROLL OFF" | "CAR CARRIER" | "LIVESTOCK" => "Cargo",
        "TANKER" | "TANKER CRUDE" | "TANKER PRODUCT" | "TANKER CHEMICALS" | "GAS CARRIER" => {
            "Tanker"
        }
        "PASSENGER" | "VEHICLE PASSENGER" => "Passenger",
        "FISHING" => "Fishing",
        "DIVING" => "Diving Ops",
        "DREDGING" => "Dredging or Underwater Ops",
        "TOWING" => "Towing",
        "TOWING LONG WIDE" => "Towing Long/Wide",
        "MILITARY OPS" => "Military Ops",
        "SAILING" => "Sailing",
        "PLEASURE CRAFT" => "Pleasure Craft",
        "HIGH SPEED CRAFT" => "High Speed Craft",
        "WIG" => "Wing in Ground",
        "PILOT VESSEL" => "Pilot Vessel",
        "SAR" => "Search and Rescue",
        "TUG" => "Tug",
        "PORT TENDER" => "Port Tender",
        "ANTI POLLUTION" => "Anti-Pollution",
        "LAW ENFORCEMENT" => "Law Enforcement",
        "MEDICAL TRANS" => "Medical Transport",
        "SPECIAL CRAFT" => "Special Craft",
        "OTHER" => "Other",
        _ => return None,
    };
    Some(mapped)
}

/// UDL `cargoType` for a Spire cargo type.
pub fn cargo_type(spire: &str) -> Option<&'static str> {
    let mapped = match spire {
        "GENERAL CARGO" => "General Cargo",
        "DRY BULK" | "BULK CARRIER" => "Dry Bulk",
        "CONTAINER" => "Container",
        "REEFER" => "Refrigerated",
        "ROLL ON ROLL OFF" => "Ro-Ro",
        "CAR CARRIER" => "Vehicles",
        "LIVESTOCK" => "Livestock",
        "TANKER CRUDE" => "Crude Oil",
        "TANKER PRODUCT" => "Oil Products",
        "TANKER CHEMICALS" => "Chemicals",
        "GAS CARRIER" => "Liquefied Gas",
        _ => return None,
    };
    Some(mapped)
}

/// `PILOT VESSEL` -> `Pilot Vessel`.
pub fn to_title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
