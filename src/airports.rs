use crate::error::{Error, Result};
use crate::geo::LatLon;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Airport code to airport record, in input order.
pub type AirportTable = Map<String, Value>;

pub fn load_table<P: AsRef<Path>>(path: P) -> Result<AirportTable> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let file = File::open(path).map_err(|source| Error::ReadInput {
        path: name.clone(),
        source,
    })?;
    read_table(BufReader::new(file), &name)
}

/// Parse an airport table. `name` identifies the input in errors.
pub fn read_table<R: Read>(reader: R, name: &str) -> Result<AirportTable> {
    let value = serde_json::from_reader(reader).map_err(|source| Error::Json {
        path: name.to_string(),
        source,
    })?;
    match value {
        Value::Object(table) => Ok(table),
        _ => Err(Error::NotATable {
            path: name.to_string(),
        }),
    }
}

/// Numeric value of a record field. Numbers pass through, strings are
/// parsed after trimming, everything else is rejected.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => coerce_str(s),
        _ => None,
    }
}

pub fn coerce_str(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

/// Position of a record, or `None` if `lat`/`lon` are missing or not numeric.
pub fn record_position(record: &Value) -> Option<LatLon> {
    let lat = coerce_f64(record.get("lat")?)?;
    let lon = coerce_f64(record.get("lon")?)?;
    Some(LatLon::new(lat, lon))
}

/// Records whose great-circle distance from `center` is at most `radius_km`.
///
/// Malformed records are skipped. A NaN distance never compares `<=` so
/// it is skipped as well.
pub fn filter_within_radius(table: &AirportTable, center: LatLon, radius_km: f64) -> AirportTable {
    table
        .iter()
        .filter(|(_, record)| {
            record_position(record)
                .map(|pos| center.distance_km(pos) <= radius_km)
                .unwrap_or(false)
        })
        .map(|(code, record)| (code.clone(), record.clone()))
        .collect()
}

/// Number of records `filter_within_radius` would skip as malformed.
pub fn count_malformed(table: &AirportTable) -> usize {
    table.values().filter(|r| record_position(r).is_none()).count()
}
