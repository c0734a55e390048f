use diesel::{
    insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use error_stack::{Result, ResultExt};
use model::NewProfile;
use utils::ContextExt;

use crate::{ConnectionProvider, DieselConnection, DieselDatabaseError, IntoDatabaseError};

pub struct CurrentWriteProfile<C: ConnectionProvider> {
    conn: C,
}

impl<C: ConnectionProvider> CurrentWriteProfile<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    fn conn(&mut self) -> &mut DieselConnection {
        self.conn.conn()
    }

    /// Insert a new profile and its links in one transaction.
    ///
    /// The UNIQUE constraint on the handle column is the only
    /// duplicate handle check. A constraint violation maps to
    /// [DieselDatabaseError::ProfileAlreadyExists].
    pub fn insert_profile(&mut self, data: &NewProfile) -> Result<(), DieselDatabaseError> {
        use model::schema::{profile, profile_link};

        let result = self.conn().transaction::<_, DieselError, _>(|conn| {
            let profile_id: i64 = insert_into(profile::table)
                .values((
                    profile::handle.eq(&data.handle),
                    profile::description.eq(&data.description),
                    profile::image_url.eq(&data.image_url),
                ))
                .returning(profile::id)
                .get_result(conn)?;

            for (i, link) in data.links.iter().enumerate() {
                insert_into(profile_link::table)
                    .values((
                        profile_link::profile_id.eq(profile_id),
                        profile_link::display_order.eq(i as i64),
                        profile_link::title.eq(&link.title),
                        profile_link::url.eq(&link.url),
                    ))
                    .execute(conn)?;
            }

            Ok(())
        });

        match result {
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(DieselDatabaseError::ProfileAlreadyExists.report())
                    .attach_printable_lazy(|| format!("Handle: {}", data.handle))
            }
            other => other.into_db_error(&data.handle),
        }
    }
}
