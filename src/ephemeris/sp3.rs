//! Reader for Spire's SP3c precise-orbit files.
//!
//! The Spire flavour of SP3c carries a fixed 22 line header, with the
//! satellite name on the 21st line, counted from the first non-blank line
//! (exports often start with an empty line), followed by one epoch/position/velocity
//! triple per sample:
//!
//! ```text
//! *  2022  7  6  1 18 13.00000000
//! P143  -6658.162753  -1527.302901   -971.376727  -3827.755483
//! V143   6844.820031  17028.031395 -74566.102286 999999.999999
//! ```

use chrono::{DateTime, NaiveDate, Utc};

use crate::ephemeris::error::Sp3Error;

pub const HEADER_LINES: usize = 22;
const SATELLITE_NAME_INDEX: usize = 20;
const SATELLITE_NAME_MARKER: &str = "/* SATELLITE NAME:";
const EPOCH_PREFIX: &str = "*  ";
const POSITION_PREFIX: char = 'P';
const VELOCITY_PREFIX: char = 'V';
const EOF_MARKER: &str = "EOF";

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub satellite_name: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub timestamp: DateTime<Utc>,
    pub position: Position,
    pub velocity: Velocity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Spire satellites are named by their 3-digit flight module (FM) number.
    pub flight_module_number: u32,
    /// km
    pub x: String,
    /// km
    pub y: String,
    /// km
    pub z: String,
    /// Receiver clock error from GPS time, microseconds.
    pub clock_error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    pub flight_module_number: u32,
    /// dm/s
    pub x: String,
    /// dm/s
    pub y: String,
    /// dm/s
    pub z: String,
    /// 10^-4 microseconds/s. Not estimated by Spire's POD, so always 999999.999999.
    pub clock_error_rate_of_change: String,
}

pub fn parse(raw: &[u8]) -> Result<Report, Sp3Error> {
    let text = std::str::from_utf8(raw)?;
    let satellite_name = extract_satellite_name(text)?;
    let entries = split_entries(text)?;

    Ok(Report {
        satellite_name,
        entries,
    })
}

pub fn extract_satellite_name(text: &str) -> Result<String, Sp3Error> {
    let file = header_checked_lines(text)?;
    let name = file.lines[SATELLITE_NAME_INDEX]
        .trim_start()
        .strip_prefix(SATELLITE_NAME_MARKER)
        .ok_or(Sp3Error::MissingSatelliteName {
            line: file.line_no(SATELLITE_NAME_INDEX),
        })?;
    Ok(name.trim().to_string())
}

/// File lines from the first non-blank one on; header offsets count from there.
struct Lines<'a> {
    lines: Vec<&'a str>,
    skipped: usize,
}

impl Lines<'_> {
    /// 1-based line number in the original text.
    fn line_no(&self, index: usize) -> usize {
        self.skipped + index + 1
    }
}

fn header_checked_lines(text: &str) -> Result<Lines<'_>, Sp3Error> {
    let all: Vec<&str> = text.lines().collect();
    let skipped = all.iter().take_while(|l| l.trim().is_empty()).count();
    let lines = all[skipped..].to_vec();
    if lines.len() < HEADER_LINES {
        return Err(Sp3Error::InvalidInput {
            expected: HEADER_LINES,
            found: lines.len(),
        });
    }
    Ok(Lines { lines, skipped })
}

fn split_entries(text: &str) -> Result<Vec<Entry>, Sp3Error> {
    let file = header_checked_lines(text)?;
    let lines = &file.lines;
    let mut entries = Vec::new();
    let mut cursor = HEADER_LINES;

    while cursor < lines.len() {
        let epoch_line = lines[cursor];
        if is_eof(epoch_line) {
            break;
        }
        if epoch_line.trim().is_empty() {
            cursor += 1;
            continue;
        }

        let timestamp = parse_epoch(epoch_line, file.line_no(cursor))?;

        let position_line = lines.get(cursor + 1).ok_or(Sp3Error::TruncatedEntry {
            line: file.line_no(cursor),
            missing: "position",
        })?;
        let position = parse_position(position_line, file.line_no(cursor + 1))?;

        let velocity_line = lines.get(cursor + 2).ok_or(Sp3Error::TruncatedEntry {
            line: file.line_no(cursor),
            missing: "velocity",
        })?;
        let velocity = parse_velocity(velocity_line, file.line_no(cursor + 2))?;

        entries.push(Entry {
            timestamp,
            position,
            velocity,
        });
        cursor += 3;
    }

    log::debug!("parsed {} sp3c entries", entries.len());
    Ok(entries)
}

fn is_eof(line: &str) -> bool {
    line.contains(EOF_MARKER)
}

/// Parse an epoch line such as `*  2022  7  6 13 18 13.00000000`.
pub fn parse_epoch(line: &str, line_no: usize) -> Result<DateTime<Utc>, Sp3Error> {
    let invalid = |message: String| Sp3Error::InvalidEpoch {
        line: line_no,
        content: line.trim_end().to_string(),
        message,
    };

    let body = line
        .strip_prefix(EPOCH_PREFIX)
        .ok_or_else(|| invalid(format!("missing '{}' prefix", EPOCH_PREFIX.trim_end())))?;

    let fields: Vec<&str> = body.split_whitespace().collect();
    let [year, month, day, hour, minute, seconds] = fields.as_slice() else {
        return Err(invalid(format!("expected 6 fields, found {}", fields.len())));
    };

    if year.len() != 4 {
        return Err(invalid(format!("year '{}' must have 4 digits", year)));
    }
    let (whole_seconds, fraction) = seconds.split_once('.').unwrap_or((*seconds, ""));

    let year: i32 = digits(year).ok_or_else(|| invalid("bad year".into()))?;
    let month: u32 = digits(month).ok_or_else(|| invalid("bad month".into()))?;
    let day: u32 = digits(day).ok_or_else(|| invalid("bad day".into()))?;
    let hour: u32 = digits(hour).ok_or_else(|| invalid("bad hour".into()))?;
    let minute: u32 = digits(minute).ok_or_else(|| invalid("bad minute".into()))?;
    let second: u32 = digits(whole_seconds).ok_or_else(|| invalid("bad seconds".into()))?;
    let nanos = fraction_nanos(fraction).ok_or_else(|| invalid("bad fractional seconds".into()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanos))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid("date out of range".into()))
}

/// Unsigned decimal field; rejects signs so `+5` is not taken for `5`.
fn digits<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn fraction_nanos(fraction: &str) -> Option<u32> {
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let truncated: String = fraction.chars().take(9).collect();
    format!("{:0<9}", truncated).parse().ok()
}

pub fn parse_position(line: &str, line_no: usize) -> Result<Position, Sp3Error> {
    let body = line
        .strip_prefix(POSITION_PREFIX)
        .ok_or(Sp3Error::InvalidPositionLine {
            line: line_no,
            components: 0,
        })?;
    let compacted = compact(body);
    let components: Vec<&str> = compacted.split(' ').collect();
    let [fm, x, y, z, clock_error] = components.as_slice() else {
        log::debug!("position components({}): {:?}", components.len(), components);
        return Err(Sp3Error::InvalidPositionLine {
            line: line_no,
            components: components.len(),
        });
    };

    Ok(Position {
        flight_module_number: fm
            .parse()
            .map_err(|source| Sp3Error::InvalidFlightModule {
                line: line_no,
                source,
            })?,
        x: x.to_string(),
        y: y.to_string(),
        z: z.to_string(),
        clock_error: clock_error.to_string(),
    })
}

pub fn parse_velocity(line: &str, line_no: usize) -> Result<Velocity, Sp3Error> {
    let body = line
        .strip_prefix(VELOCITY_PREFIX)
        .ok_or(Sp3Error::InvalidVelocityLine {
            line: line_no,
            components: 0,
        })?;
    let compacted = compact(body);
    let components: Vec<&str> = compacted.split(' ').collect();
    let [fm, x, y, z, rate] = components.as_slice() else {
        log::debug!("velocity components({}): {:?}", components.len(), components);
        return Err(Sp3Error::InvalidVelocityLine {
            line: line_no,
            components: components.len(),
        });
    };

    Ok(Velocity {
        flight_module_number: fm
            .parse()
            .map_err(|source| Sp3Error::InvalidFlightModule {
                line: line_no,
                source,
            })?,
        x: x.to_string(),
        y: y.to_string(),
        z: z.to_string(),
        clock_error_rate_of_change: rate.to_string(),
    })
}

/// Collapse runs of whitespace (column padding) into single spaces.
pub fn compact(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = include_str!("../../tests/data/lemur2_fm143.sp3");

    fn header() -> String {
        SAMPLE.lines().take(HEADER_LINES).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_extract_satellite_name() {
        assert_eq!(
            extract_satellite_name(SAMPLE).unwrap(),
            "LEMUR-2-JOHN-TREIRES"
        );
    }

    #[test]
    fn test_extract_satellite_name_short_input() {
        let short = SAMPLE.lines().take(10).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            extract_satellite_name(&short),
            Err(Sp3Error::InvalidInput { found: 10, .. })
        ));
    }

    #[test]
    fn test_extract_satellite_name_missing_marker() {
        let shifted = format!("#extra header line\n{}", SAMPLE);
        assert!(matches!(
            extract_satellite_name(&shifted),
            Err(Sp3Error::MissingSatelliteName { line: 21 })
        ));
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let text = format!("\n{}", SAMPLE);
        assert_eq!(
            extract_satellite_name(&text).unwrap(),
            "LEMUR-2-JOHN-TREIRES"
        );
        let report = parse(text.as_bytes()).unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[1].position.x, "-6657.474119");

        let padded = format!("\n  \n{}", SAMPLE);
        assert_eq!(parse(padded.as_bytes()).unwrap().entries.len(), 2);
    }

    #[test]
    fn test_line_numbers_count_skipped_lines() {
        let text = format!(
            "\n{}\n*  2022  7  6  1 18 13.00000000\nP143 1 2 3\nV143 5 6 7 8\n",
            header()
        );
        assert!(matches!(
            parse(text.as_bytes()),
            Err(Sp3Error::InvalidPositionLine { line: 25, .. })
        ));

        let shifted = format!("\n#extra header line\n{}", SAMPLE);
        assert!(matches!(
            extract_satellite_name(&shifted),
            Err(Sp3Error::MissingSatelliteName { line: 22 })
        ));
    }

    #[test]
    fn test_parse_epoch() {
        let ts = parse_epoch("*  2022  7  6 13 18 13.00000000", 1).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2022, 7, 6, 13, 18, 13).unwrap());

        let ts = parse_epoch("*  2022 12 31 23 59 59.50000000", 1).unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_epoch_rejects_malformed() {
        for line in [
            "2022  7  6 13 18 13.00000000",
            "*  2022  7  6 13 18",
            "*  22  7  6 13 18 13.00000000",
            "*  2022 13  6 13 18 13.00000000",
            "*  2022  7  6 13 18 +3.00000000",
        ] {
            assert!(
                matches!(parse_epoch(line, 7), Err(Sp3Error::InvalidEpoch { line: 7, .. })),
                "{:?}",
                line
            );
        }
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact("This   is   a    test"), "This is a test");
        assert_eq!(compact("  padded\t value  "), "padded value");
    }

    #[test]
    fn test_parse_position() {
        let position =
            parse_position("P143  -6657.474119  -1525.599224   -978.832746  -3827.858503", 1)
                .unwrap();
        assert_eq!(
            position,
            Position {
                flight_module_number: 143,
                x: "-6657.474119".into(),
                y: "-1525.599224".into(),
                z: "-978.832746".into(),
                clock_error: "-3827.858503".into(),
            }
        );
    }

    #[test]
    fn test_parse_velocity() {
        let velocity =
            parse_velocity("V143   6927.842084  17045.492627 -74554.222095 999999.999999", 1)
                .unwrap();
        assert_eq!(
            velocity,
            Velocity {
                flight_module_number: 143,
                x: "6927.842084".into(),
                y: "17045.492627".into(),
                z: "-74554.222095".into(),
                clock_error_rate_of_change: "999999.999999".into(),
            }
        );
    }

    #[test]
    fn test_parse_position_wrong_component_count() {
        assert!(matches!(
            parse_position("P143  -6657.474119  -1525.599224   -978.832746", 4),
            Err(Sp3Error::InvalidPositionLine {
                line: 4,
                components: 4
            })
        ));
        assert!(matches!(
            parse_velocity("V143 1 2 3 4 5", 5),
            Err(Sp3Error::InvalidVelocityLine {
                line: 5,
                components: 6
            })
        ));
    }

    #[test]
    fn test_parse_position_bad_flight_module() {
        assert!(matches!(
            parse_position("PL43  -6657.474119  -1525.599224   -978.832746  -3827.858503", 9),
            Err(Sp3Error::InvalidFlightModule { line: 9, .. })
        ));
    }

    #[test]
    fn test_parse_sample_file() {
        let report = parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(report.satellite_name, "LEMUR-2-JOHN-TREIRES");
        assert_eq!(report.entries.len(), 2);
        for entry in &report.entries {
            assert_eq!(entry.position.flight_module_number, 143);
            assert_eq!(entry.velocity.flight_module_number, 143);
        }
        assert_eq!(
            report.entries[1].timestamp - report.entries[0].timestamp,
            chrono::Duration::seconds(1)
        );
        assert_eq!(report.entries[0].velocity.x, "6844.820031");
    }

    #[test]
    fn test_parse_stops_at_eof() {
        let text = format!(
            "{}\n*  2022  7  6  1 18 13.00000000\nP143 1 2 3 4\nV143 5 6 7 8\nEOF\ngarbage after eof\n",
            header()
        );
        let report = parse(text.as_bytes()).unwrap();
        assert_eq!(report.entries.len(), 1);
    }

    #[test]
    fn test_parse_header_only() {
        let report = parse(header().as_bytes()).unwrap();
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_parse_truncated_entry() {
        let text = format!("{}\n*  2022  7  6  1 18 13.00000000\nP143 1 2 3 4\n", header());
        assert!(matches!(
            parse(text.as_bytes()),
            Err(Sp3Error::TruncatedEntry {
                line: 23,
                missing: "velocity"
            })
        ));
    }

    #[test]
    fn test_parse_reports_failing_line() {
        let text = format!(
            "{}\n*  2022  7  6  1 18 13.00000000\nP143 1 2 3\nV143 5 6 7 8\n",
            header()
        );
        assert!(matches!(
            parse(text.as_bytes()),
            Err(Sp3Error::InvalidPositionLine { line: 24, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_utf8() {
        assert!(matches!(
            parse(&[0xff, 0xfe, 0x00]),
            Err(Sp3Error::NotUtf8(_))
        ));
    }
}
