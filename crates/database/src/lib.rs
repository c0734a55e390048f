#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod current;
pub mod diesel_db;

use std::{fmt::Debug, path::PathBuf};

use config::Config;
use diesel_db::{
    DieselReadCloseHandle, DieselReadHandle, DieselWriteCloseHandle, DieselWriteHandle,
};
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use error_stack::{Report, Result, ResultExt};

pub use diesel_db::{ConnectionProvider, DieselConnection, DieselDatabaseError, PoolObject};
pub use model::schema;

pub const DIESEL_MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
    #[error("Diesel error")]
    Diesel,
    #[error("File path creation failed")]
    FilePathCreationFailed,
}

pub struct DatabaseHandleCreator {}

impl DatabaseHandleCreator {
    /// Create write handle for the database.
    ///
    /// Runs migrations.
    pub async fn create_write_handle_from_config(
        config: &Config,
        name: &str,
    ) -> Result<(DieselWriteHandle, DieselWriteCloseHandle), DatabaseError> {
        let db_file_path = create_dirs_and_get_sqlite_database_file_path(config, name)?;

        DieselWriteHandle::new(config, name, db_file_path, DIESEL_MIGRATIONS)
            .await
            .change_context(DatabaseError::Diesel)
    }

    /// Create read handle for the database.
    ///
    /// Create the write handle first. Only that runs migrations.
    pub async fn create_read_handle_from_config(
        config: &Config,
        name: &str,
    ) -> Result<(DieselReadHandle, DieselReadCloseHandle), DatabaseError> {
        let db_file_path = create_dirs_and_get_sqlite_database_file_path(config, name)?;

        DieselReadHandle::new(config, name, db_file_path)
            .await
            .change_context(DatabaseError::Diesel)
    }
}

fn create_dirs_and_get_sqlite_database_file_path(
    config: &Config,
    name: &str,
) -> Result<PathBuf, DatabaseError> {
    let mut path = config.data_dir().to_path_buf();
    if !config.sqlite_in_ram() && !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(&path)
            .change_context(DatabaseError::FilePathCreationFailed)?;
    }
    path.push(format!("{name}.db"));
    Ok(path)
}

pub trait IntoDatabaseError<Ok>: Sized {
    #[track_caller]
    fn into_db_error<T: Debug>(self, request_context: T) -> Result<Ok, DieselDatabaseError>;
}

impl<Ok> IntoDatabaseError<Ok> for std::result::Result<Ok, diesel::result::Error> {
    #[track_caller]
    fn into_db_error<T: Debug>(self, request_context: T) -> Result<Ok, DieselDatabaseError> {
        self.map_err(|e| {
            Report::from(e)
                .change_context(DieselDatabaseError::Execute)
                .attach_printable(format!("Request context: {request_context:?}"))
        })
    }
}
