//! Query points read from a plain-text points file.

use crate::errors::HrrrIngestErr;
use std::{fs, path::Path};

/// The latitude and longitude of a query point.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl From<(f64, f64)> for Coords {
    fn from(pair: (f64, f64)) -> Self {
        Self {
            lat: pair.0,
            lon: pair.1,
        }
    }
}

/// Parse the text of a points file.
///
/// One `lat,lon` pair per line. Blank lines and lines ending in `%` are
/// ignored. Anything else that does not parse is an error carrying the
/// 1-based line number.
pub fn parse_points(text: &str) -> Result<Vec<Coords>, HrrrIngestErr> {
    let mut points = vec![];

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.ends_with('%') {
            continue;
        }

        let mut parts = line.splitn(2, ',');
        let lat = parts.next().and_then(|val| val.trim().parse().ok());
        let lon = parts.next().and_then(|val| val.trim().parse().ok());

        match (lat, lon) {
            (Some(lat), Some(lon)) => points.push(Coords { lat, lon }),
            _ => return Err(HrrrIngestErr::BadPointsLine(line_no + 1, line.to_owned())),
        }
    }

    Ok(points)
}

/// Read and parse a points file from disk.
pub fn read_points_file(path: &dyn AsRef<Path>) -> Result<Vec<Coords>, HrrrIngestErr> {
    parse_points(&fs::read_to_string(path.as_ref())?)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_points() {
        let text = "46.87,-113.99\n\n47.61, -122.33\nheader line%\n";

        let points = parse_points(text).expect("parse failed");
        assert_eq!(
            points,
            vec![
                Coords {
                    lat: 46.87,
                    lon: -113.99
                },
                Coords {
                    lat: 47.61,
                    lon: -122.33
                },
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_no_points() {
        assert!(parse_points("").expect("parse failed").is_empty());
        assert!(parse_points("\n  \n%\n").expect("parse failed").is_empty());
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let text = "46.87,-113.99\nnot a point\n";

        match parse_points(text) {
            Err(HrrrIngestErr::BadPointsLine(line_no, line)) => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "not a point");
            }
            _ => panic!("bad line did not error"),
        }
    }
}
