//! Command line options for the ingest application.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{crate_version, App, Arg, ArgMatches};
use strum::{AsStaticRef, IntoEnumIterator};

use crate::{errors::HrrrIngestErr, variables::Variable};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CmdLineArgs {
    // Path to the points file, one lat,lon pair per line.
    points_file: PathBuf,
    // Run date to ingest, if given. Otherwise probe for the last available.
    run_date: Option<NaiveDate>,
    // Logical names of the variables to ingest.
    variables: Vec<String>,
    // Number of forecast hours to ingest.
    num_hours: i64,
    // Path to the archive database file.
    db_file: PathBuf,
}

impl<'a, 'b> CmdLineArgs {
    const DEFAULT_NUM_HOURS: &'static str = "48";
    const DEFAULT_DB_FILE: &'static str = "data.db";

    /// Create a new set of args.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .about(about)
            .version(crate_version!())
            .arg(
                Arg::with_name("points-file")
                    .index(1)
                    .required(true)
                    .help("File of points to extract, one 'lat,lon' pair per line."),
            )
            .arg(
                Arg::with_name("run-date")
                    .long("run-date")
                    .takes_value(true)
                    .help("Forecast run date (YYYY-MM-DD).")
                    .long_help(
                        "Forecast run date (YYYY-MM-DD). Defaults to the most recent \
                         date with a complete set of files in the remote archive.",
                    ),
            )
            .arg(
                Arg::with_name("variables")
                    .long("variables")
                    .takes_value(true)
                    .help("Comma separated list of variables to ingest.")
                    .long_help(
                        "Comma separated list of variables to ingest. Defaults to every \
                         supported variable.",
                    ),
            )
            .arg(
                Arg::with_name("num-hours")
                    .long("num-hours")
                    .takes_value(true)
                    .default_value(Self::DEFAULT_NUM_HOURS)
                    .help("Number of forecast hours to ingest (1 to 48)."),
            )
            .arg(
                Arg::with_name("db-file")
                    .long("db-file")
                    .takes_value(true)
                    .default_value(Self::DEFAULT_DB_FILE)
                    .help("Path to the archive database file."),
            )
    }

    /// Process an `App` to get the parsed values out of it and the matches object so an application
    /// can continue with further argument parsing.
    pub fn matches(app: App<'a, 'b>) -> Result<(Self, ArgMatches<'a>), HrrrIngestErr> {
        let matches = app.get_matches();

        let usage = matches.usage().to_owned();
        let print_usage_message = |msg: &str| -> ! {
            println!("\n{}\n\n{}\n", msg, usage);
            println!("Try the -h or --help option for more instructions.");
            ::std::process::exit(1);
        };

        let points_file = matches
            .value_of("points-file")
            .map(PathBuf::from)
            .expect("Missing required points file.");

        let run_date = matches.value_of("run-date").map(|val| {
            match NaiveDate::parse_from_str(val, "%Y-%m-%d") {
                Ok(date) => date,
                Err(_) => print_usage_message("Invalid run-date, it must be YYYY-MM-DD!"),
            }
        });

        let variables: Vec<String> = match matches.value_of("variables") {
            Some(list) => list.split(',').map(|name| name.trim().to_owned()).collect(),
            None => Variable::iter()
                .map(|variable| variable.as_static().to_owned())
                .collect(),
        };

        // Validate names against the supported table before they reach the core.
        for name in &variables {
            if Variable::from_name(name).is_err() {
                print_usage_message(&format!("Invalid variable: {}!", name));
            }
        }

        let num_hours = matches
            .value_of("num-hours")
            .and_then(|val| val.parse::<i64>().ok())
            .unwrap_or_else(|| print_usage_message("Invalid num-hours, not parseable as an integer!"));

        if num_hours < 1 || num_hours > 48 {
            print_usage_message("Invalid num-hours, it must be between 1 and 48!");
        }

        let db_file = matches
            .value_of("db-file")
            .map(PathBuf::from)
            .expect("Invalid db-file.");

        let cmd_line_opts = CmdLineArgs {
            points_file,
            run_date,
            variables,
            num_hours,
            db_file,
        };

        Ok((cmd_line_opts, matches))
    }

    /// Get the path to the points file.
    pub fn points_file(&self) -> &Path {
        &self.points_file
    }

    /// Get the run date, if one was given.
    pub fn run_date(&self) -> Option<NaiveDate> {
        self.run_date
    }

    /// Get the variables to ingest.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Get the number of forecast hours to ingest.
    pub fn num_hours(&self) -> i64 {
        self.num_hours
    }

    /// Get the path to the archive database file.
    pub fn db_file(&self) -> &Path {
        &self.db_file
    }
}
