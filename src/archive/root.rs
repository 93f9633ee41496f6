use std::path::Path;

use super::Archive;

use crate::errors::HrrrIngestErr;

impl Archive {
    const TABLE_NAME: &'static str = "hrrr_forecasts";

    /// Open an archive, creating the file and schema when missing.
    pub fn create(db_file: &dyn AsRef<Path>) -> Result<Self, HrrrIngestErr> {
        let db_file = db_file.as_ref().to_path_buf();

        let db_conn = rusqlite::Connection::open_with_flags(
            &db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        db_conn.execute_batch(include_str!("root/create_schema.sql"))?;

        Ok(Archive { db_file, db_conn })
    }

    /// Open an existing archive.
    pub fn connect(db_file: &dyn AsRef<Path>) -> Result<Self, HrrrIngestErr> {
        let db_file = db_file.as_ref().to_path_buf();

        let db_conn = rusqlite::Connection::open_with_flags(
            &db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE,
        )?;

        Self::validate_db_structure(&db_conn)?;

        Ok(Archive { db_file, db_conn })
    }

    /// Retrieve a path to the database file backing this archive.
    pub fn db_file(&self) -> &Path {
        &self.db_file
    }

    /// Validate the database structure is correct.
    fn validate_db_structure(db_conn: &rusqlite::Connection) -> Result<(), HrrrIngestErr> {
        // Check the number of tables
        let num_tables: i64 = db_conn.query_row(
            "SELECT COUNT(name) FROM sqlite_master WHERE type='table'",
            rusqlite::NO_PARAMS,
            |row| row.get(0),
        )?;

        if num_tables != 1 {
            return Err(HrrrIngestErr::InvalidSchema);
        }

        // Check the table name.
        let name: String = db_conn.query_row(
            "SELECT name FROM sqlite_master WHERE type='table'",
            rusqlite::NO_PARAMS,
            |row| row.get(0),
        )?;

        if name != Self::TABLE_NAME {
            return Err(HrrrIngestErr::InvalidSchema);
        }

        Ok(())
    }
}
