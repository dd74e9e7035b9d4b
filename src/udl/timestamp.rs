//! UDL date-time layout, `2022-01-10T00:00:00.000Z`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serializer;

const UDL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
/// Fractional seconds are optional and may have any precision.
const SPIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, SPIRE_FORMAT).map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&t.format(UDL_FORMAT))
}

pub mod option {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        t: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => super::serialize(t, serializer),
            None => serializer.serialize_none(),
        }
    }
}
