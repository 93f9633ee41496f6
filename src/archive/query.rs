use chrono::NaiveDateTime;
use strum::AsStaticRef;

use super::Archive;

use crate::{errors::HrrrIngestErr, variables::Variable};

impl Archive {
    /// Check whether a record with this identity key is already stored.
    ///
    /// Exact-match only, including the latitude and longitude values, and
    /// read-only. The key columns are the table's primary key, so this is an
    /// indexed lookup and safe to call once per point and variable.
    pub fn exists(
        &self,
        run_time: &NaiveDateTime,
        valid_time: &NaiveDateTime,
        latitude: f64,
        longitude: f64,
        variable: Variable,
    ) -> Result<bool, HrrrIngestErr> {
        let num_records: i32 = self.db_conn.query_row(
            "SELECT COUNT(*) FROM hrrr_forecasts
                  WHERE run_time_utc = ?1 AND valid_time_utc = ?2
                  AND latitude = ?3 AND longitude = ?4 AND variable = ?5",
            &[
                run_time as &dyn rusqlite::types::ToSql,
                valid_time as &dyn rusqlite::types::ToSql,
                &latitude,
                &longitude,
                &variable.as_static(),
            ],
            |row| row.get(0),
        )?;

        Ok(num_records > 0)
    }

    /// The total number of stored records.
    pub fn count(&self) -> Result<i64, HrrrIngestErr> {
        let count: i64 = self.db_conn.query_row(
            "SELECT COUNT(*) FROM hrrr_forecasts",
            rusqlite::NO_PARAMS,
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
