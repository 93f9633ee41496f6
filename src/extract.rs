//! Point extraction from decoded level groups.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, error, warn};

use crate::{
    archive::Archive,
    errors::HrrrIngestErr,
    grib::{LevelDataset, LevelFilter},
    locate::nearest_grid_point,
    points::Coords,
    records::ForecastRecord,
    remote,
    variables::{LevelType, Variable, VariableSpec},
};

/// Variables sharing one level-type/level/step-type combination, extracted
/// from the same decoded sub-dataset.
#[derive(Debug, PartialEq)]
pub struct LevelGroup {
    filter: LevelFilter,
    variables: Vec<Variable>,
}

/// Resolve logical names against the supported-variable table.
///
/// Unknown names are logged and dropped; one bad variable never aborts the
/// batch.
pub(crate) fn resolve_variables(names: &[String]) -> Vec<(Variable, VariableSpec)> {
    names
        .iter()
        .filter_map(|name| match Variable::from_name(name) {
            Ok(variable) => Some((variable, variable.spec())),
            Err(err) => {
                error!("{}", err);
                None
            }
        })
        .collect()
}

/// Partition resolved variables into level groups.
///
/// The groups come back in a fixed order, surface first and then
/// height-above-ground by ascending level, so runs over the same variable set
/// process and log in the same order every time. Height-above-ground specs
/// without a numeric level are logged and dropped, never defaulted.
pub(crate) fn level_groups(specs: &[(Variable, VariableSpec)]) -> Vec<LevelGroup> {
    let mut groups: Vec<LevelGroup> = vec![];

    for &(variable, spec) in specs {
        if spec.level_type == LevelType::HeightAboveGround && spec.level.is_none() {
            error!(
                "{}",
                HrrrIngestErr::MissingLevelSpecification(variable.to_string())
            );
            continue;
        }

        let filter = LevelFilter {
            level_type: spec.level_type,
            level: spec.level,
            step_type: spec.step_type,
        };

        if let Some(group) = groups.iter_mut().find(|group| group.filter == filter) {
            group.variables.push(variable);
        } else {
            groups.push(LevelGroup {
                filter,
                variables: vec![variable],
            });
        }
    }

    groups.sort_by_key(|group| (group.filter.level_type, group.filter.level));

    groups
}

/// Extract records for every variable and point of one level group.
///
/// Per-variable and per-point failures are logged and skipped. Records whose
/// identity key is already in the archive are filtered out before they reach
/// the output batch.
pub fn extract_level_group(
    arch: &Archive,
    dataset: &LevelDataset,
    variables: &[Variable],
    points: &[Coords],
    run_time: NaiveDateTime,
) -> Vec<ForecastRecord> {
    let mut records = vec![];

    let valid_time = dataset.valid_time();
    let source_s3 = remote::s3_uri(&run_time, dataset.forecast_hour());

    for &variable in variables {
        let spec = variable.spec();

        let field = match dataset.field(spec.short_name) {
            Some(field) => field,
            None => {
                warn!(
                    "{}",
                    HrrrIngestErr::VariableNotInSource(variable.to_string())
                );
                continue;
            }
        };

        for &point in points {
            let (row, col) = nearest_grid_point(
                point.lat,
                point.lon,
                dataset.latitudes(),
                dataset.longitudes(),
            );

            let value = match field.get((row, col)) {
                Some(&value) => value,
                None => {
                    error!(
                        "{}",
                        HrrrIngestErr::PointExtraction {
                            latitude: point.lat,
                            longitude: point.lon,
                            variable: variable.to_string(),
                        }
                    );
                    continue;
                }
            };

            let already_stored = arch
                .exists(&run_time, &valid_time, point.lat, point.lon, variable)
                .unwrap_or(false);

            if already_stored {
                debug!(
                    "already stored: {} at ({}, {}) valid {}",
                    variable, point.lat, point.lon, valid_time
                );
                continue;
            }

            records.push(ForecastRecord {
                valid_time,
                run_time,
                latitude: point.lat,
                longitude: point.lon,
                variable,
                value,
                source_s3: source_s3.clone(),
            });
        }
    }

    records
}

/// Process one downloaded GRIB2 file.
///
/// Resolves the requested variables, opens the decoded sub-dataset for each
/// level group in turn and extracts every requested point. A group whose
/// sub-dataset cannot be opened is fatal for the file; everything smaller is
/// logged and skipped.
pub fn process_grib_file(
    arch: &Archive,
    grib_file: &Path,
    points: &[Coords],
    variables: &[String],
    run_time: NaiveDateTime,
) -> Result<Vec<ForecastRecord>, HrrrIngestErr> {
    let resolved = resolve_variables(variables);

    let mut records = vec![];

    for group in level_groups(&resolved) {
        let dataset = match LevelDataset::open(grib_file, &group.filter) {
            Ok(Some(dataset)) => dataset,
            Ok(None) => {
                for variable in &group.variables {
                    warn!(
                        "{}",
                        HrrrIngestErr::VariableNotInSource(variable.to_string())
                    );
                }
                continue;
            }
            Err(err) => {
                error!(
                    "error opening {} for level group {:?}: {}",
                    grib_file.display(),
                    group.filter,
                    err
                );
                return Err(err);
            }
        };

        records.extend(extract_level_group(
            arch,
            &dataset,
            &group.variables,
            points,
            run_time,
        ));
    }

    Ok(records)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::variables::StepType;

    use std::collections::HashMap;

    use chrono::NaiveDate;
    use ndarray::Array2;
    use tempdir::TempDir;

    fn test_archive() -> (TempDir, Archive) {
        let tmp = TempDir::new("hrrr-ingest-test-extract").expect("tempdir");
        let arch = Archive::create(&tmp.path().join("data.db")).expect("create archive");
        (tmp, arch)
    }

    // A 3x3 surface-style dataset with latitudes 30..32 and longitudes
    // 270..272, carrying 2m temperature only.
    fn test_dataset() -> LevelDataset {
        let lats = Array2::from_shape_fn((3, 3), |(row, _col)| 30.0 + row as f64);
        let lons = Array2::from_shape_fn((3, 3), |(_row, col)| 270.0 + col as f64);
        let t2m = Array2::from_shape_fn((3, 3), |(row, col)| 280.0 + (row * 3 + col) as f64);

        let mut fields = HashMap::new();
        fields.insert("t2m".to_owned(), t2m);

        LevelDataset::new(
            lats,
            lons,
            NaiveDate::from_ymd(2025, 5, 1).and_hms(12, 0, 0),
            6,
            fields,
        )
    }

    fn test_run_time() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd(2025, 5, 1).and_hms(6, 0, 0)
    }

    #[test]
    fn test_resolve_drops_unknown_names_and_keeps_the_rest() {
        let names = vec![
            "temperature_2m".to_owned(),
            "not_a_variable".to_owned(),
            "surface_pressure".to_owned(),
        ];

        let resolved = resolve_variables(&names);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0, Variable::Temperature2m);
        assert_eq!(resolved[1].0, Variable::SurfacePressure);
    }

    #[test]
    fn test_level_groups_are_ordered_and_merged() {
        let names = vec![
            "u_component_wind_80m".to_owned(),
            "temperature_2m".to_owned(),
            "surface_pressure".to_owned(),
            "dewpoint_2m".to_owned(),
            "u_component_wind_10m".to_owned(),
        ];

        let groups = level_groups(&resolve_variables(&names));

        let keys: Vec<(LevelType, Option<i64>)> = groups
            .iter()
            .map(|group| (group.filter.level_type, group.filter.level))
            .collect();

        assert_eq!(
            keys,
            vec![
                (LevelType::Surface, None),
                (LevelType::HeightAboveGround, Some(2)),
                (LevelType::HeightAboveGround, Some(10)),
                (LevelType::HeightAboveGround, Some(80)),
            ]
        );

        // Both 2m variables landed in the same group.
        assert_eq!(
            groups[1].variables,
            vec![Variable::Temperature2m, Variable::Dewpoint2m]
        );
    }

    #[test]
    fn test_height_above_ground_without_a_level_is_dropped() {
        let specs = vec![(
            Variable::Temperature2m,
            VariableSpec {
                short_name: "t2m",
                level_type: LevelType::HeightAboveGround,
                level: None,
                step_type: StepType::Instant,
            },
        )];

        assert!(level_groups(&specs).is_empty());
    }

    #[test]
    fn test_extract_values_at_nearest_cells() {
        let (_tmp, arch) = test_archive();
        let dataset = test_dataset();

        let points = vec![Coords::from((31.0, -89.0)), Coords::from((30.5, -89.5))];

        let records = extract_level_group(
            &arch,
            &dataset,
            &[Variable::Temperature2m],
            &points,
            test_run_time(),
        );

        assert_eq!(records.len(), 2);

        // (31.0, -89.0) is exactly cell (1, 1); (30.5, -89.5) ties to (0, 0).
        assert_eq!(records[0].value, 284.0);
        assert_eq!(records[1].value, 280.0);

        // Records carry the query point, not the grid cell coordinates.
        assert_eq!(records[1].latitude, 30.5);
        assert_eq!(records[1].longitude, -89.5);

        assert_eq!(records[0].valid_time, dataset.valid_time());
        assert_eq!(records[0].run_time, test_run_time());
        assert_eq!(
            records[0].source_s3,
            "s3://noaa-hrrr-bdp-pds/hrrr.20250501/conus/hrrr.t06z.wrfsfcf06.grib2"
        );
    }

    #[test]
    fn test_extract_with_no_points_is_empty() {
        let (_tmp, arch) = test_archive();
        let dataset = test_dataset();

        let records = extract_level_group(
            &arch,
            &dataset,
            &[Variable::Temperature2m],
            &[],
            test_run_time(),
        );

        assert!(records.is_empty());
    }

    #[test]
    fn test_variables_missing_from_the_source_are_skipped() {
        let (_tmp, arch) = test_archive();
        let dataset = test_dataset();

        let points = vec![Coords::from((31.0, -89.0))];

        // Dewpoint is not in the test dataset; temperature is.
        let records = extract_level_group(
            &arch,
            &dataset,
            &[Variable::Dewpoint2m, Variable::Temperature2m],
            &points,
            test_run_time(),
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].variable, Variable::Temperature2m);
    }

    #[test]
    fn test_already_stored_records_are_filtered_out() {
        let (_tmp, arch) = test_archive();
        let dataset = test_dataset();

        let points = vec![Coords::from((31.0, -89.0)), Coords::from((30.5, -89.5))];

        let records = extract_level_group(
            &arch,
            &dataset,
            &[Variable::Temperature2m],
            &points,
            test_run_time(),
        );
        arch.insert_forecast_data(&records)
            .expect("Error inserting records.");

        // A second pass over the same file finds everything already stored.
        let records = extract_level_group(
            &arch,
            &dataset,
            &[Variable::Temperature2m],
            &points,
            test_run_time(),
        );

        assert!(records.is_empty());
    }
}
