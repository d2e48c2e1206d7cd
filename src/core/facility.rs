//! Facility records and coordinate parsing
//!
//! Facilities are owned by an external registration flow. The core only
//! observes them, so parsing here is tolerant: any field may be missing and
//! a record is only rejected when it has no usable coordinate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A geographic point in raw degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line distance in degree space.
    ///
    /// This is NOT a geodesic distance: a degree of longitude shrinks toward
    /// the poles. Proximity thresholds are calibrated against this planar
    /// approximation.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lng - other.lng).powi(2)).sqrt()
    }
}

/// A registered public-service facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Identifier, stable across reloads
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Free-form category name, see [`crate::core::category::Category`]
    #[serde(rename = "type", default)]
    pub facility_type: String,

    /// Region the facility belongs to
    #[serde(default)]
    pub wilaya: String,

    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Opening time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Closing time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Creation timestamp as stored, see [`Facility::created_at`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Facility {
    /// Build a facility from an untyped record.
    ///
    /// Returns `None` when the record is not an object or when `lat` or
    /// `lng` is absent, empty, zero or not numeric. Every other field is
    /// optional.
    pub fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;

        let lat = coordinate_field(fields, "lat")?;
        let lng = coordinate_field(fields, "lng")?;

        Some(Self {
            id: text_field(fields, "id").unwrap_or_default(),
            name: text_field(fields, "name").unwrap_or_default(),
            facility_type: text_field(fields, "type").unwrap_or_default(),
            wilaya: text_field(fields, "wilaya").unwrap_or_default(),
            address: text_field(fields, "address").unwrap_or_default(),
            phone: text_field(fields, "phone"),
            email: text_field(fields, "email"),
            from: text_field(fields, "from"),
            to: text_field(fields, "to"),
            created: text_field(fields, "created"),
            coordinate: Coordinate::new(lat, lng),
        })
    }

    /// Parsed creation time.
    ///
    /// RFC 3339 strings, `YYYY-MM-DD HH:MM:SS` (also with a `T`), plain
    /// `YYYY-MM-DD` dates and epoch milliseconds are understood. Naive
    /// values are read as UTC.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created.as_deref()?.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(parsed.and_utc());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|parsed| parsed.and_utc());
        }

        raw.parse::<i64>()
            .ok()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }

    /// Key ordering facilities from oldest to newest.
    ///
    /// Parsed times rank above everything else. A non-empty value that does
    /// not parse still ranks above a missing one and compares by its raw
    /// text.
    pub fn creation_key(&self) -> (Option<DateTime<Utc>>, Option<&str>) {
        match self.created_at() {
            Some(parsed) => (Some(parsed), None),
            None => (
                None,
                self.created.as_deref().map(str::trim).filter(|raw| !raw.is_empty()),
            ),
        }
    }

    /// Opening hours rendered as `"from — to"`, only when both ends are known
    pub fn opening_hours(&self) -> Option<String> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => {
                Some(format!("{} — {}", from, to))
            }
            _ => None,
        }
    }
}

/// Read a string-ish field. Numbers are stringified so numeric ids and
/// epoch timestamps survive; empty strings count as absent.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a coordinate that is present and not zero-equivalent.
fn coordinate_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (value.is_finite() && value != 0.0).then_some(value)
}
