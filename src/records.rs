//! The persisted unit of forecast data.

use crate::variables::Variable;
use chrono::NaiveDateTime;

/// One extracted forecast value for one point, variable and valid time.
///
/// The identity key is (valid time, run time, latitude, longitude, variable);
/// inserting a record whose key is already stored is a no-op. Latitude and
/// longitude are the query point as supplied by the caller, not the
/// coordinates of the grid cell the value was read from. Times are UTC.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub valid_time: NaiveDateTime,
    pub run_time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub variable: Variable,
    pub value: f64,
    pub source_s3: String,
}
