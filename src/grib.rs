//! Decoded GRIB2 sub-datasets, filtered to a single level group.

use std::{collections::HashMap, path::Path};

use chrono::{NaiveDate, NaiveDateTime};
use eccodes::{CodesHandle, FallibleIterator, KeyType, KeyedMessage, ProductKind};
use ndarray::Array2;
use strum::AsStaticRef;

use crate::{
    errors::HrrrIngestErr,
    variables::{LevelType, StepType},
};

/// The level-type/level/step-type combination a sub-dataset is filtered to.
///
/// The underlying format can expose several fields with the same short name at
/// different vertical levels, so an unfiltered open is ambiguous. Every read
/// goes through a filter that pins all three keys.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LevelFilter {
    pub level_type: LevelType,
    pub level: Option<i64>,
    pub step_type: StepType,
}

/// A decoded sub-dataset holding every field of one level group.
#[derive(Debug)]
pub struct LevelDataset {
    latitudes: Array2<f64>,
    longitudes: Array2<f64>,
    valid_time: NaiveDateTime,
    forecast_hour: i64,
    fields: HashMap<String, Array2<f64>>,
}

impl LevelFilter {
    fn matches(&self, msg: &KeyedMessage) -> Result<bool, eccodes::errors::CodesError> {
        if msg.read_key("typeOfLevel")?.value != KeyType::Str(self.level_type.as_static().to_owned())
        {
            return Ok(false);
        }

        if msg.read_key("stepType")?.value != KeyType::Str(self.step_type.as_static().to_owned()) {
            return Ok(false);
        }

        if let Some(level) = self.level {
            if msg.read_key("level")?.value != KeyType::Int(level) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl LevelDataset {
    /// Build a dataset from already-decoded parts.
    pub fn new(
        latitudes: Array2<f64>,
        longitudes: Array2<f64>,
        valid_time: NaiveDateTime,
        forecast_hour: i64,
        fields: HashMap<String, Array2<f64>>,
    ) -> Self {
        LevelDataset {
            latitudes,
            longitudes,
            valid_time,
            forecast_hour,
            fields,
        }
    }

    /// Open a GRIB2 file and decode the messages matching `filter`.
    ///
    /// Returns `Ok(None)` when no message matches, which callers treat as
    /// every requested variable being absent from the source. Any decode
    /// failure is fatal for the file.
    pub fn open(path: &Path, filter: &LevelFilter) -> Result<Option<Self>, HrrrIngestErr> {
        let handle = CodesHandle::new_from_file(path, ProductKind::GRIB)?;

        let messages: Vec<KeyedMessage> = handle.filter(|msg| filter.matches(msg)).collect()?;

        // Grids and times are aligned across every message in a level group,
        // so the first message can speak for all of them.
        let first = match messages.first() {
            Some(msg) => msg,
            None => return Ok(None),
        };

        let rows = read_int(first, "Nj")? as usize;
        let cols = read_int(first, "Ni")? as usize;

        let latitudes = grid_array(first, "latitudes", rows, cols)?;
        let longitudes = grid_array(first, "longitudes", rows, cols)?;
        let valid_time = read_valid_time(first)?;
        let forecast_hour = read_step_hours(first)?;

        let mut fields = HashMap::new();
        for msg in &messages {
            let short_name = read_str(msg, "shortName")?;
            let values = grid_array(msg, "values", rows, cols)?;
            fields.insert(short_name, values);
        }

        Ok(Some(LevelDataset {
            latitudes,
            longitudes,
            valid_time,
            forecast_hour,
            fields,
        }))
    }

    /// The 2-D latitude grid.
    pub fn latitudes(&self) -> &Array2<f64> {
        &self.latitudes
    }

    /// The 2-D longitude grid, in the 0..360 convention of the archive.
    pub fn longitudes(&self) -> &Array2<f64> {
        &self.longitudes
    }

    /// The time the forecast values apply to.
    pub fn valid_time(&self) -> NaiveDateTime {
        self.valid_time
    }

    /// Whole hours since the model run was initialized.
    pub fn forecast_hour(&self) -> i64 {
        self.forecast_hour
    }

    /// The decoded 2-D field for a short name, if the source carried it.
    pub fn field(&self, short_name: &str) -> Option<&Array2<f64>> {
        self.fields.get(short_name)
    }
}

fn read_int(msg: &KeyedMessage, key: &'static str) -> Result<i64, HrrrIngestErr> {
    if let KeyType::Int(val) = msg.read_key(key)?.value {
        Ok(val)
    } else {
        Err(HrrrIngestErr::IncorrectKeyType(key))
    }
}

fn read_str(msg: &KeyedMessage, key: &'static str) -> Result<String, HrrrIngestErr> {
    if let KeyType::Str(val) = msg.read_key(key)?.value {
        Ok(val)
    } else {
        Err(HrrrIngestErr::IncorrectKeyType(key))
    }
}

fn grid_array(
    msg: &KeyedMessage,
    key: &'static str,
    rows: usize,
    cols: usize,
) -> Result<Array2<f64>, HrrrIngestErr> {
    let values = if let KeyType::FloatArray(vals) = msg.read_key(key)?.value {
        vals
    } else {
        return Err(HrrrIngestErr::IncorrectKeyType(key));
    };

    Array2::from_shape_vec((rows, cols), values).map_err(|_| {
        HrrrIngestErr::GeneralError(format!(
            "GRIB key {} does not fill a {}x{} grid",
            key, rows, cols
        ))
    })
}

fn read_valid_time(msg: &KeyedMessage) -> Result<NaiveDateTime, HrrrIngestErr> {
    let date = read_int(msg, "validityDate")?;
    let time = read_int(msg, "validityTime")?;

    NaiveDate::from_ymd_opt((date / 10_000) as i32, (date / 100 % 100) as u32, (date % 100) as u32)
        .and_then(|d| d.and_hms_opt((time / 100) as u32, (time % 100) as u32, 0))
        .ok_or(HrrrIngestErr::MissingValidTime)
}

// The step key comes back as an integer or a string depending on the ecCodes
// version, both meaning whole hours for instant fields.
fn read_step_hours(msg: &KeyedMessage) -> Result<i64, HrrrIngestErr> {
    match msg.read_key("step")?.value {
        KeyType::Int(val) => Ok(val),
        KeyType::Str(val) => val
            .trim()
            .parse()
            .map_err(|_| HrrrIngestErr::IncorrectKeyType("step")),
        _ => Err(HrrrIngestErr::IncorrectKeyType("step")),
    }
}
