use diesel::prelude::*;
use error_stack::Result;
use model::{Profile, ProfileLinkRow, ProfileRow};

use crate::{ConnectionProvider, DieselConnection, DieselDatabaseError, IntoDatabaseError};

pub struct CurrentReadProfile<C: ConnectionProvider> {
    conn: C,
}

impl<C: ConnectionProvider> CurrentReadProfile<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    fn conn(&mut self) -> &mut DieselConnection {
        self.conn.conn()
    }

    /// Profile with its links in display order. `None` if there is
    /// no profile with the requested handle.
    pub fn profile_with_links(
        &mut self,
        profile_handle: &str,
    ) -> Result<Option<Profile>, DieselDatabaseError> {
        use model::schema::{profile, profile_link};

        let row = profile::table
            .filter(profile::handle.eq(profile_handle))
            .select(ProfileRow::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(profile_handle)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let links = profile_link::table
            .filter(profile_link::profile_id.eq(row.id))
            .order(profile_link::display_order.asc())
            .select(ProfileLinkRow::as_select())
            .load(self.conn())
            .into_db_error(profile_handle)?;

        Ok(Some(Profile::new(row, links)))
    }
}
