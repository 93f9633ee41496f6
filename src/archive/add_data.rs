use super::Archive;

use crate::{errors::HrrrIngestErr, records::ForecastRecord};
use strum::AsStaticRef;

impl Archive {
    /// Insert a batch of forecast records.
    ///
    /// Records whose identity key is already stored are silently ignored, so
    /// re-ingesting the same file converges to one stored copy per key.
    /// Returns the number of rows actually inserted.
    pub fn insert_forecast_data(&self, records: &[ForecastRecord]) -> Result<usize, HrrrIngestErr> {
        let mut stmt = self.db_conn.prepare(
            "INSERT OR IGNORE INTO hrrr_forecasts
                  (valid_time_utc, run_time_utc, latitude, longitude, variable, value, source_s3)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        let mut inserted = 0;
        for record in records {
            inserted += stmt.execute(&[
                &record.valid_time as &dyn rusqlite::types::ToSql,
                &record.run_time as &dyn rusqlite::types::ToSql,
                &record.latitude,
                &record.longitude,
                &record.variable.as_static(),
                &record.value,
                &record.source_s3,
            ])?;
        }

        Ok(inserted)
    }
}
