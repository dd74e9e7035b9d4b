use chrono::{DateTime, Utc};

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::flight_modules::norad_id;
use crate::ephemeris::report::{UdlEntry, UdlPosition, UdlReport, UdlVelocity};
use crate::ephemeris::sp3::{self, Position, Report, Velocity};

/// Two-digit year, day of year, time of day with milliseconds.
const UDL_TIME_FORMAT: &str = "%y%j%H%M%S%.3f";
const VELOCITY_WIDTH: usize = 11;
const DM_S_PER_KM_S: f64 = 10_000.0;

/// Parse a raw SP3c file and convert it into a UDL ephemeris report.
pub fn to_udl_ephemeris(raw: &[u8]) -> Result<UdlReport, EphemerisError> {
    let report = match sp3::parse(raw) {
        Ok(report) => report,
        Err(e) => {
            log::error!("error parsing sp3c ephemeris: {}", e);
            return Err(e.into());
        }
    };

    if let Some(first) = report.entries.first() {
        log::info!(
            "name: {} timestamp: {} flight module: {} entries: {}",
            report.satellite_name,
            first.timestamp,
            first.position.flight_module_number,
            report.entries.len()
        );
    }

    to_udl_report(&report)
}

/// Convert a parsed report. The NORAD ID is derived from the flight module,
/// so every entry must come from the same one.
pub fn to_udl_report(report: &Report) -> Result<UdlReport, EphemerisError> {
    let first = report.entries.first().ok_or(EphemerisError::EmptyReport)?;
    let fm = first.position.flight_module_number;

    let mut entries = Vec::with_capacity(report.entries.len());
    for (i, e) in report.entries.iter().enumerate() {
        for found in [
            e.position.flight_module_number,
            e.velocity.flight_module_number,
        ] {
            if found != fm {
                return Err(EphemerisError::MultipleFlightModules {
                    expected: fm,
                    found,
                    entry: i,
                });
            }
        }

        entries.push(UdlEntry {
            timestamp: udl_timestamp(e.timestamp),
            position: udl_position(&e.position),
            velocity: udl_velocity(&e.velocity)?,
        });
    }

    let id = norad_id(fm).ok_or(EphemerisError::UnmappedFlightModule(fm))?;

    Ok(UdlReport {
        id: id.to_string(),
        entries,
    })
}

fn udl_timestamp(t: DateTime<Utc>) -> String {
    t.format(UDL_TIME_FORMAT).to_string()
}

fn udl_position(p: &Position) -> UdlPosition {
    UdlPosition {
        x: p.x.clone(),
        y: p.y.clone(),
        z: p.z.clone(),
    }
}

fn udl_velocity(v: &Velocity) -> Result<UdlVelocity, EphemerisError> {
    Ok(UdlVelocity {
        x: km_s(&v.x)?,
        y: km_s(&v.y)?,
        z: km_s(&v.z)?,
    })
}

fn km_s(dm_s: &str) -> Result<String, EphemerisError> {
    let value: f64 = dm_s
        .parse()
        .map_err(|source| EphemerisError::InvalidVelocity {
            value: dm_s.to_string(),
            source,
        })?;
    Ok(fixed_width_float(value / DM_S_PER_KM_S, VELOCITY_WIDTH))
}

/// Format `num` with `width` significant columns: the integer digits of the
/// rounded value (sign excluded) plus enough decimals to fill the rest.
pub fn fixed_width_float(num: f64, width: usize) -> String {
    let whole = format!("{:.0}", num);
    let whole_digits = whole.trim_start_matches('-').len();
    let precision = width.saturating_sub(whole_digits);
    format!("{:.*}", precision, num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    const SAMPLE: &str = include_str!("../../tests/data/lemur2_fm143.sp3");

    fn entry(position_fm: u32, velocity_fm: u32, vx: &str) -> sp3::Entry {
        sp3::Entry {
            timestamp: Utc.with_ymd_and_hms(2009, 1, 2, 3, 4, 5).unwrap(),
            position: Position {
                flight_module_number: position_fm,
                x: "854.324972".into(),
                y: "-806.523053".into(),
                z: "7049.922417".into(),
                clock_error: "0.0".into(),
            },
            velocity: Velocity {
                flight_module_number: velocity_fm,
                x: vx.into(),
                y: "-26283.67346".into(),
                z: "-11337.33106".into(),
                clock_error_rate_of_change: "999999.999999".into(),
            },
        }
    }

    fn report(entries: Vec<sp3::Entry>) -> Report {
        Report {
            satellite_name: "LEMUR-2-TEST".into(),
            entries,
        }
    }

    #[test]
    fn test_fixed_width_float() {
        assert_eq!(fixed_width_float(6927.842084 / 10_000.0, 11), "0.6927842084");
        assert_eq!(fixed_width_float(-74566.102286 / 10_000.0, 11), "-7.4566102286");
        assert_eq!(fixed_width_float(12.5, 11), "12.500000000");
        assert_eq!(fixed_width_float(-0.25, 11), "-0.2500000000");
    }

    #[test]
    fn test_udl_timestamp() {
        let t = Utc
            .with_ymd_and_hms(2009, 1, 2, 3, 4, 5)
            .unwrap()
            .with_nanosecond(6)
            .unwrap();
        assert_eq!(udl_timestamp(t), "09002030405.000");

        let t = Utc.with_ymd_and_hms(2022, 7, 6, 1, 18, 13).unwrap();
        assert_eq!(udl_timestamp(t), "22187011813.000");
    }

    #[test]
    fn test_to_udl_report() {
        let got = to_udl_report(&report(vec![entry(143, 143, "68958.12284")])).unwrap();
        assert_eq!(got.id, "51076");
        assert_eq!(got.entries.len(), 1);
        let e = &got.entries[0];
        assert_eq!(e.timestamp, "09002030405.000");
        assert_eq!(e.position.x, "854.324972");
        assert_eq!(e.position.z, "7049.922417");
        assert_eq!(e.velocity.x, "6.8958122840");
        assert_eq!(e.velocity.y, "-2.6283673460");
    }

    #[test]
    fn test_sample_file_round_trip() {
        let got = to_udl_ephemeris(SAMPLE.as_bytes()).unwrap();
        assert_eq!(got.id, "51076");
        assert_eq!(got.entries.len(), 2);
        assert_eq!(got.entries[0].timestamp, "22187011813.000");
        assert_eq!(got.entries[1].timestamp, "22187011814.000");
        assert_eq!(got.entries[1].position.x, "-6657.474119");
        assert_eq!(got.entries[1].velocity.x, "0.6927842084");
        assert_eq!(got.entries[1].velocity.z, "-7.4554222095");
    }

    #[test]
    fn test_multiple_flight_modules_rejected() {
        let mixed = report(vec![entry(143, 143, "1.0"), entry(144, 144, "1.0")]);
        assert!(matches!(
            to_udl_report(&mixed),
            Err(EphemerisError::MultipleFlightModules {
                expected: 143,
                found: 144,
                entry: 1
            })
        ));

        let mixed_velocity = report(vec![entry(143, 144, "1.0")]);
        assert!(matches!(
            to_udl_report(&mixed_velocity),
            Err(EphemerisError::MultipleFlightModules { found: 144, .. })
        ));
    }

    #[test]
    fn test_unmapped_flight_module() {
        let err = to_udl_report(&report(vec![entry(999, 999, "1.0")])).unwrap_err();
        assert!(matches!(err, EphemerisError::UnmappedFlightModule(999)));
        assert_eq!(err.to_string(), "no norad mapping for flight ID 999");
    }

    #[test]
    fn test_invalid_velocity_aborts_report() {
        let bad = report(vec![entry(143, 143, "1.0"), entry(143, 143, "fast")]);
        assert!(matches!(
            to_udl_report(&bad),
            Err(EphemerisError::InvalidVelocity { .. })
        ));
    }

    #[test]
    fn test_empty_report() {
        assert!(matches!(
            to_udl_report(&report(Vec::new())),
            Err(EphemerisError::EmptyReport)
        ));
    }
}
