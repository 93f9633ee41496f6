//! Access to the remote HRRR archive.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use reqwest::{blocking::Client, StatusCode};
use tracing::warn;

use crate::errors::HrrrIngestErr;

/// The public object store holding the HRRR archive.
pub const HRRR_BUCKET: &str = "noaa-hrrr-bdp-pds";

/// The hour of the model run ingested by default, 06Z.
pub const DEFAULT_RUN_HOUR: u32 = 6;

/// The archive publishes 48 forecast hours per run of the surface product.
pub const MAX_FORECAST_HOURS: i64 = 48;

/// Object key of the surface file for one run time and forecast hour.
pub fn object_key(run_time: &NaiveDateTime, forecast_hour: i64) -> String {
    format!(
        "hrrr.{}/conus/hrrr.t{:02}z.wrfsfcf{:02}.grib2",
        run_time.format("%Y%m%d"),
        run_time.hour(),
        forecast_hour
    )
}

/// The `s3://` locator stamped into stored records.
pub fn s3_uri(run_time: &NaiveDateTime, forecast_hour: i64) -> String {
    format!("s3://{}/{}", HRRR_BUCKET, object_key(run_time, forecast_hour))
}

/// The anonymous-access HTTP form of the same object.
pub fn object_url(run_time: &NaiveDateTime, forecast_hour: i64) -> String {
    format!(
        "https://{}.s3.amazonaws.com/{}",
        HRRR_BUCKET,
        object_key(run_time, forecast_hour)
    )
}

/// Check whether the file for a run time and forecast hour has been published.
pub fn file_available(client: &Client, run_time: &NaiveDateTime, forecast_hour: i64) -> bool {
    let url = object_url(run_time, forecast_hour);

    match client.head(&url).send() {
        Ok(response) => response.status() == StatusCode::OK,
        Err(err) => {
            warn!("availability check failed for {}: {}", url, err);
            false
        }
    }
}

/// Download the file for a run time and forecast hour into `dest_dir`.
pub fn download_file(
    client: &Client,
    run_time: &NaiveDateTime,
    forecast_hour: i64,
    dest_dir: &Path,
) -> Result<PathBuf, HrrrIngestErr> {
    let url = object_url(run_time, forecast_hour);

    let mut response = client.get(&url).send()?;
    match response.status() {
        StatusCode::OK => {}
        StatusCode::NOT_FOUND => {
            return Err(HrrrIngestErr::GeneralError(format!(
                "URL {} does not exist",
                url
            )));
        }
        code => {
            return Err(HrrrIngestErr::GeneralError(format!(
                "HTTP error ({}): {}",
                code, url
            )));
        }
    }

    let file_name = format!(
        "hrrr.{}.t{:02}z.wrfsfcf{:02}.grib2",
        run_time.format("%Y%m%d"),
        run_time.hour(),
        forecast_hour
    );
    let dest = dest_dir.join(file_name);

    let mut file = fs::File::create(&dest)?;
    io::copy(&mut response, &mut file)?;

    Ok(dest)
}

/// Find the most recent run date with a complete forecast set available.
///
/// Walks back from yesterday up to a week, requiring both the first and last
/// forecast files before trusting a date. Falls back to a known good archive
/// date when nothing recent is complete.
pub fn last_available_run_date(client: &Client) -> NaiveDate {
    let mut check_date = Utc::now().naive_utc().date() - Duration::days(1);

    for _ in 0..7 {
        let run_time = check_date.and_hms(DEFAULT_RUN_HOUR, 0, 0);

        if file_available(client, &run_time, 0)
            && file_available(client, &run_time, MAX_FORECAST_HOURS - 1)
        {
            return check_date;
        }

        check_date -= Duration::days(1);
    }

    NaiveDate::from_ymd(2025, 5, 1)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    fn test_run_time() -> NaiveDateTime {
        NaiveDate::from_ymd(2025, 5, 1).and_hms(6, 0, 0)
    }

    #[test]
    fn test_object_key() {
        assert_eq!(
            object_key(&test_run_time(), 0),
            "hrrr.20250501/conus/hrrr.t06z.wrfsfcf00.grib2"
        );
        assert_eq!(
            object_key(&test_run_time(), 47),
            "hrrr.20250501/conus/hrrr.t06z.wrfsfcf47.grib2"
        );
    }

    #[test]
    fn test_s3_uri() {
        assert_eq!(
            s3_uri(&test_run_time(), 12),
            "s3://noaa-hrrr-bdp-pds/hrrr.20250501/conus/hrrr.t06z.wrfsfcf12.grib2"
        );
    }

    #[test]
    fn test_object_url() {
        assert_eq!(
            object_url(&test_run_time(), 0),
            "https://noaa-hrrr-bdp-pds.s3.amazonaws.com/hrrr.20250501/conus/hrrr.t06z.wrfsfcf00.grib2"
        );
    }
}
