use database::{
    DieselDatabaseError,
    current::{read::CurrentReadProfile, write::CurrentWriteProfile},
    diesel_db::{DieselReadHandle, DieselWriteHandle, ObjectExtensions},
};
use error_stack::{Result, ResultExt};
use model::{NewProfile, Profile};

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Database error")]
    Diesel,
    #[error("Profile already exists")]
    ProfileAlreadyExists,
}

pub struct ReadCommands<'a> {
    handle: &'a DieselReadHandle,
}

impl<'a> ReadCommands<'a> {
    pub fn new(handle: &'a DieselReadHandle) -> Self {
        Self { handle }
    }

    pub async fn profile_with_links(
        &self,
        profile_handle: &str,
    ) -> Result<Option<Profile>, DataError> {
        let conn = self
            .handle
            .pool()
            .get()
            .await
            .change_context(DataError::Diesel)?;
        let profile_handle = profile_handle.to_string();
        conn.interact(move |conn| {
            CurrentReadProfile::new(conn).profile_with_links(&profile_handle)
        })
        .await
        .change_context(DataError::Diesel)?
        .change_context(DataError::Diesel)
    }
}

pub struct WriteCommands<'a> {
    handle: &'a DieselWriteHandle,
}

impl<'a> WriteCommands<'a> {
    pub fn new(handle: &'a DieselWriteHandle) -> Self {
        Self { handle }
    }

    pub async fn create_profile(&self, data: NewProfile) -> Result<(), DataError> {
        let conn = self
            .handle
            .pool()
            .get()
            .await
            .change_context(DataError::Diesel)?;
        let result = conn
            .interact(move |conn| CurrentWriteProfile::new(conn).insert_profile(&data))
            .await
            .change_context(DataError::Diesel)?;
        result.map_err(|e| {
            let context = match e.current_context() {
                DieselDatabaseError::ProfileAlreadyExists => DataError::ProfileAlreadyExists,
                _ => DataError::Diesel,
            };
            e.change_context(context)
        })
    }
}
