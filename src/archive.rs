//! An archive of extracted HRRR point forecasts.

use std::path::PathBuf;

/// The archive.
///
/// A thin handle over the SQLite store. One handle is created per ingestion
/// run and passed by reference wherever the store is read or written; nothing
/// in this crate opens ad hoc connections of its own.
#[derive(Debug)]
pub struct Archive {
    db_file: PathBuf,              // The database file.
    db_conn: rusqlite::Connection, // An sqlite connection.
}

mod add_data;
mod query;
mod root;

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::{errors::HrrrIngestErr, records::ForecastRecord, variables::Variable};

    use chrono::NaiveDate;
    use tempdir::TempDir;

    // struct to hold temporary data for tests.
    struct TestArchive {
        tmp: TempDir,
        arch: Archive,
    }

    // Function to create a new archive to test.
    fn create_test_archive() -> Result<TestArchive, HrrrIngestErr> {
        let tmp = TempDir::new("hrrr-ingest-test-archive")?;
        let arch = Archive::create(&tmp.path().join("data.db"))?;

        Ok(TestArchive { tmp, arch })
    }

    // Function to build a small set of records for filling the archive.
    fn get_test_records() -> Vec<ForecastRecord> {
        let run_time = NaiveDate::from_ymd(2025, 5, 1).and_hms(6, 0, 0);
        let valid_time = NaiveDate::from_ymd(2025, 5, 1).and_hms(12, 0, 0);
        let source_s3 =
            "s3://noaa-hrrr-bdp-pds/hrrr.20250501/conus/hrrr.t06z.wrfsfcf06.grib2".to_owned();

        vec![
            ForecastRecord {
                valid_time,
                run_time,
                latitude: 46.87,
                longitude: -113.99,
                variable: Variable::Temperature2m,
                value: 285.4,
                source_s3: source_s3.clone(),
            },
            ForecastRecord {
                valid_time,
                run_time,
                latitude: 46.87,
                longitude: -113.99,
                variable: Variable::Dewpoint2m,
                value: 272.1,
                source_s3: source_s3.clone(),
            },
            ForecastRecord {
                valid_time,
                run_time,
                latitude: 47.61,
                longitude: -122.33,
                variable: Variable::Temperature2m,
                value: 283.9,
                source_s3,
            },
        ]
    }

    #[test]
    fn test_archive_create_new() {
        assert!(create_test_archive().is_ok());
    }

    #[test]
    fn test_archive_connect() {
        let TestArchive { tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");
        drop(arch);

        assert!(Archive::connect(&tmp.path().join("data.db")).is_ok());
        assert!(Archive::connect(&"unlikely_file_in_my_project.db").is_err());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let TestArchive { tmp: _tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");

        let records = get_test_records();

        let inserted = arch
            .insert_forecast_data(&records)
            .expect("Error inserting records.");
        assert_eq!(inserted, records.len());
        assert_eq!(arch.count().expect("db error"), records.len() as i64);

        // The same batch again must not add rows.
        let inserted = arch
            .insert_forecast_data(&records)
            .expect("Error inserting records.");
        assert_eq!(inserted, 0);
        assert_eq!(arch.count().expect("db error"), records.len() as i64);
    }

    #[test]
    fn test_records_differing_only_in_variable_both_store() {
        let TestArchive { tmp: _tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");

        let records: Vec<ForecastRecord> = get_test_records()
            .into_iter()
            .filter(|record| record.latitude == 46.87)
            .collect();

        assert_eq!(records.len(), 2);
        arch.insert_forecast_data(&records)
            .expect("Error inserting records.");

        assert_eq!(arch.count().expect("db error"), 2);
    }

    #[test]
    fn test_exists() {
        let TestArchive { tmp: _tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");

        let records = get_test_records();
        arch.insert_forecast_data(&records)
            .expect("Error inserting records.");

        let record = &records[0];

        assert!(arch
            .exists(
                &record.run_time,
                &record.valid_time,
                record.latitude,
                record.longitude,
                record.variable,
            )
            .expect("Error checking for existence"));

        // Same key except the variable.
        assert!(!arch
            .exists(
                &record.run_time,
                &record.valid_time,
                record.latitude,
                record.longitude,
                Variable::SurfacePressure,
            )
            .expect("Error checking for existence"));

        // Nearby, but not exactly equal, coordinates do not match.
        assert!(!arch
            .exists(
                &record.run_time,
                &record.valid_time,
                record.latitude + 0.0001,
                record.longitude,
                record.variable,
            )
            .expect("Error checking for existence"));
    }

    #[test]
    fn test_empty_insert_is_a_no_op() {
        let TestArchive { tmp: _tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");

        assert_eq!(arch.insert_forecast_data(&[]).expect("db error"), 0);
        assert_eq!(arch.count().expect("db error"), 0);
    }
}
