//! Module for errors.
use eccodes::errors::CodesError;
use std::{error::Error, fmt::Display};

/// Error from the ingest pipeline.
#[derive(Debug)]
pub enum HrrrIngestErr {
    // Inherited errors from the GRIB stack
    /// Error forwarded from eccodes
    Grib(CodesError),
    /// A GRIB key was present but held an unexpected type.
    IncorrectKeyType(&'static str),

    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Database error
    Database(::rusqlite::Error),
    /// Error forwarded from the strum crate
    StrumError(strum::ParseError),
    /// Error forwarded from reqwest
    Download(::reqwest::Error),
    /// General error with any cause information erased and replaced by a string
    GeneralError(String),

    // My own errors from this crate
    /// Logical variable name not in the supported table.
    UnknownVariable(String),
    /// A height-above-ground variable was requested with no numeric level.
    MissingLevelSpecification(String),
    /// A resolved variable was absent from the decoded sub-dataset.
    VariableNotInSource(String),
    /// Failure locating or reading a scalar for one point.
    PointExtraction {
        /// Latitude of the query point.
        latitude: f64,
        /// Longitude of the query point.
        longitude: f64,
        /// Logical name of the variable being read.
        variable: String,
    },
    /// The message was missing a valid time.
    MissingValidTime,
    /// The database structure is wrong.
    InvalidSchema,
    /// A line of the points file could not be parsed.
    BadPointsLine(usize, String),
}

impl Display for HrrrIngestErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::HrrrIngestErr::*;

        match self {
            Grib(err) => write!(f, "error from eccodes: {}", err),
            IncorrectKeyType(key) => write!(f, "unexpected type for GRIB key: {}", key),

            IO(err) => write!(f, "std lib io error: {}", err),

            Database(err) => write!(f, "database error: {}", err),
            StrumError(err) => write!(f, "error forwarded from strum crate: {}", err),
            Download(err) => write!(f, "error forwarded from reqwest: {}", err),
            GeneralError(msg) => write!(f, "general error forwarded: {}", msg),

            UnknownVariable(name) => write!(f, "unknown variable: {}", name),
            MissingLevelSpecification(name) => write!(
                f,
                "no level specified for height-above-ground variable: {}",
                name
            ),
            VariableNotInSource(name) => write!(f, "variable not in source: {}", name),
            PointExtraction {
                latitude,
                longitude,
                variable,
            } => write!(
                f,
                "failed to extract {} at point ({}, {})",
                variable, latitude, longitude
            ),
            MissingValidTime => write!(f, "message missing a valid time"),
            InvalidSchema => write!(f, "invalid index format"),
            BadPointsLine(line_no, line) => {
                write!(f, "unparseable points file line {}: {}", line_no, line)
            }
        }
    }
}

impl Error for HrrrIngestErr {}

impl From<CodesError> for HrrrIngestErr {
    fn from(err: CodesError) -> HrrrIngestErr {
        HrrrIngestErr::Grib(err)
    }
}

impl From<::std::io::Error> for HrrrIngestErr {
    fn from(err: ::std::io::Error) -> HrrrIngestErr {
        HrrrIngestErr::IO(err)
    }
}

impl From<::rusqlite::Error> for HrrrIngestErr {
    fn from(err: ::rusqlite::Error) -> HrrrIngestErr {
        HrrrIngestErr::Database(err)
    }
}

impl From<strum::ParseError> for HrrrIngestErr {
    fn from(err: strum::ParseError) -> HrrrIngestErr {
        HrrrIngestErr::StrumError(err)
    }
}

impl From<::reqwest::Error> for HrrrIngestErr {
    fn from(err: ::reqwest::Error) -> HrrrIngestErr {
        HrrrIngestErr::Download(err)
    }
}

impl From<Box<dyn Error>> for HrrrIngestErr {
    fn from(err: Box<dyn Error>) -> HrrrIngestErr {
        HrrrIngestErr::GeneralError(err.to_string())
    }
}
