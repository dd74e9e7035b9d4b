//! Spire flight module (FM) number to NORAD catalog ID.
//!
//! The UDL files ephemeris against `idOnOrbit`, which is the public catalog
//! number, while Spire's SP3c products only carry the FM number.
//!
//! The table is supplied per deployment from Spire's constellation listing;
//! the entries below are the ones this build ships with. Extend it when new
//! flight modules are launched.

/// Sorted by flight module number.
const FLIGHT_MODULES: &[(u32, u32)] = &[
    (101, 47538),
    (102, 47539),
    (103, 47540),
    (104, 47541),
    (107, 47957),
    (108, 47958),
    (109, 47959),
    (110, 47960),
    (111, 48907),
    (112, 48908),
    (113, 48909),
    (115, 48911),
    (116, 48912),
    (117, 48913),
    (118, 48914),
    (121, 49400),
    (122, 49401),
    (123, 49402),
    (124, 49403),
    (131, 51036),
    (132, 51037),
    (138, 51074),
    (139, 51075),
    (143, 51076),
    (144, 51077),
    (145, 51078),
    (146, 51079),
    (150, 52735),
    (151, 52736),
    (152, 52737),
];

/// NORAD catalog ID for a Spire flight module, if one is registered.
pub fn norad_id(flight_module: u32) -> Option<u32> {
    FLIGHT_MODULES
        .binary_search_by_key(&flight_module, |&(fm, _)| fm)
        .ok()
        .map(|i| FLIGHT_MODULES[i].1)
}
