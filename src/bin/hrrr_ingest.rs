//! HRRR point-forecast ingester.
//!
//! Downloads HRRR surface files and extracts point forecasts into your archive.

use std::{error::Error, fs};

use reqwest::blocking::Client;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use hrrr_ingest::{process_grib_file, read_points_file, remote, Archive, CmdLineArgs, HrrrIngestErr};

fn main() {
    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut cause: &dyn Error = e;
        while let Some(source) = cause.source() {
            println!("caused by: {}", source);
            cause = source;
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), HrrrIngestErr> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| HrrrIngestErr::GeneralError(err.to_string()))?;

    let app = CmdLineArgs::new_app(
        "hrrr-ingest",
        "Ingest HRRR point forecasts into your archive.",
    );
    let (args, _matches) = CmdLineArgs::matches(app)?;

    let arch = Archive::create(&args.db_file())?;
    let points = read_points_file(&args.points_file())?;
    let client = Client::new();

    let run_date = match args.run_date() {
        Some(date) => date,
        None => {
            let date = remote::last_available_run_date(&client);
            info!("using last available date: {}", date);
            date
        }
    };
    let run_time = run_date.and_hms(remote::DEFAULT_RUN_HOUR, 0, 0);

    let work_dir = std::env::temp_dir();

    for forecast_hour in 0..args.num_hours() {
        if !remote::file_available(&client, &run_time, forecast_hour) {
            warn!(
                "no data available for {} hour {}",
                run_time.format("%Y%m%d"),
                forecast_hour
            );
            continue;
        }

        let grib_file = match remote::download_file(&client, &run_time, forecast_hour, &work_dir) {
            Ok(path) => path,
            Err(err) => {
                warn!("failed to download forecast hour {}: {}", forecast_hour, err);
                continue;
            }
        };

        info!(
            "processing forecast for {} hour {}",
            run_time.format("%Y%m%d"),
            forecast_hour
        );
        let result = process_grib_file(&arch, &grib_file, &points, args.variables(), run_time);

        if let Err(err) = fs::remove_file(&grib_file) {
            warn!("failed to remove {}: {}", grib_file.display(), err);
        }

        let records = result?;

        if records.is_empty() {
            warn!("no new data to insert for hour {}", forecast_hour);
        } else {
            let inserted = arch.insert_forecast_data(&records)?;
            info!(
                "inserted {} of {} records for hour {}",
                inserted,
                records.len(),
                forecast_hour
            );
        }
    }

    info!("archive now holds {} records", arch.count()?);

    Ok(())
}
