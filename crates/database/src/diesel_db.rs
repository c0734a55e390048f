use std::{fmt, path::PathBuf};

use config::Config;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use error_stack::{Result, ResultExt};
use tracing::error;
use utils::{ContextExt, IntoReportFromString};

pub type DieselConnection = diesel::SqliteConnection;
pub type DieselPool = deadpool::unmanaged::Pool<DieselConnection>;
pub type PoolObject = deadpool::unmanaged::Object<DieselConnection>;

#[derive(thiserror::Error, Debug)]
pub enum DieselDatabaseError {
    #[error("Connecting to SQLite database failed")]
    Connect,
    #[error("SQLite connection setup failed")]
    Setup,
    #[error("Executing SQL query failed")]
    Execute,
    #[error("Running diesel database migrations failed")]
    Migrate,

    #[error("Running an action failed")]
    RunAction,
    #[error("Add connection to pool failed")]
    AddConnection,
    #[error("Connection get failed from connection pool")]
    GetConnection,

    #[error("Profile with the same handle already exists")]
    ProfileAlreadyExists,
}

async fn close_connections(pool: &DieselPool, connections: usize) {
    for _ in 0..connections {
        let result = pool.remove().await;
        match result {
            Ok(conn) => drop(conn),
            Err(_) => error!("Failed to remove connection from pool"),
        }
    }
}

pub trait ObjectExtensions<T>: Sized {
    fn interact<F: FnOnce(&mut SqliteConnection) -> R + Send + 'static, R: Send + 'static>(
        self,
        action: F,
    ) -> impl std::future::Future<Output = Result<R, DieselDatabaseError>> + Send;
}

impl ObjectExtensions<SqliteConnection> for PoolObject {
    async fn interact<F: FnOnce(&mut SqliteConnection) -> R + Send + 'static, R: Send + 'static>(
        mut self,
        action: F,
    ) -> Result<R, DieselDatabaseError> {
        let handle = tokio::task::spawn_blocking(move || {
            let conn = self.as_mut();
            action(conn)
        });
        match handle.await {
            Ok(value) => Ok(value),
            Err(e) => Err(e.report()).change_context(DieselDatabaseError::RunAction),
        }
    }
}

async fn create_pool(
    config: &Config,
    database_name: &str,
    db_path: PathBuf,
    connection_count: usize,
) -> Result<DieselPool, DieselDatabaseError> {
    let db_str = if config.sqlite_in_ram() {
        format!("file:{database_name}?mode=memory&cache=shared")
    } else {
        db_path.to_string_lossy().to_string()
    };

    let pool = deadpool::unmanaged::Pool::new(connection_count);
    for _ in 0..connection_count {
        let mut conn =
            SqliteConnection::establish(&db_str).change_context(DieselDatabaseError::Connect)?;
        sqlite_setup_connection(&mut conn)?;
        pool.add(conn)
            .await
            .map_err(|(_, e)| e)
            .change_context(DieselDatabaseError::AddConnection)?;
    }

    Ok(pool)
}

pub fn sqlite_setup_connection(conn: &mut SqliteConnection) -> Result<(), DieselDatabaseError> {
    let pragmas = &[
        "PRAGMA journal_mode=WAL;",
        "PRAGMA synchronous=NORMAL;",
        "PRAGMA foreign_keys=ON;",
    ];

    for pragma_str in pragmas {
        diesel::sql_query(*pragma_str)
            .execute(conn)
            .change_context(DieselDatabaseError::Setup)?;
    }

    Ok(())
}

#[derive(Clone)]
pub struct DieselWriteHandle {
    pool: DieselPool,
}

impl fmt::Debug for DieselWriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DieselWriteHandle").finish()
    }
}

impl DieselWriteHandle {
    /// Create new connection pool with a single connection
    /// and run the pending migrations.
    pub async fn new(
        config: &Config,
        database_name: &str,
        db_path: PathBuf,
        migrations: EmbeddedMigrations,
    ) -> Result<(Self, DieselWriteCloseHandle), DieselDatabaseError> {
        let connections = 1;
        let pool = create_pool(config, database_name, db_path, connections).await?;

        let conn = pool
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?;
        conn.interact(|conn| conn.run_pending_migrations(migrations).map(|_| ()))
            .await?
            .into_error_string(DieselDatabaseError::Migrate)?;

        let write_handle = DieselWriteHandle { pool: pool.clone() };

        let close_handle = DieselWriteCloseHandle {
            pool: pool.clone(),
            connections,
        };

        Ok((write_handle, close_handle))
    }

    pub fn pool(&self) -> &DieselPool {
        &self.pool
    }
}

pub struct DieselWriteCloseHandle {
    pool: DieselPool,
    connections: usize,
}

impl DieselWriteCloseHandle {
    /// Call this before closing the server.
    pub async fn close(self) {
        close_connections(&self.pool, self.connections).await;
        self.pool.close()
    }
}

#[derive(Clone)]
pub struct DieselReadHandle {
    pool: DieselPool,
}

impl fmt::Debug for DieselReadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DieselReadHandle").finish()
    }
}

impl DieselReadHandle {
    /// Create new connection pool for reading.
    ///
    /// Create the write handle first. Only that runs migrations.
    pub async fn new(
        config: &Config,
        database_name: &str,
        db_path: PathBuf,
    ) -> Result<(Self, DieselReadCloseHandle), DieselDatabaseError> {
        let connections = num_cpus::get();
        let pool = create_pool(config, database_name, db_path, connections).await?;

        let handle = DieselReadHandle { pool: pool.clone() };

        let close_handle = DieselReadCloseHandle { pool, connections };

        Ok((handle, close_handle))
    }

    pub fn pool(&self) -> &DieselPool {
        &self.pool
    }
}

pub struct DieselReadCloseHandle {
    pool: DieselPool,
    connections: usize,
}

impl DieselReadCloseHandle {
    /// Call this before closing the server.
    pub async fn close(self) {
        close_connections(&self.pool, self.connections).await;
        self.pool.close()
    }
}

pub trait ConnectionProvider {
    fn conn(&mut self) -> &mut DieselConnection;
}

impl ConnectionProvider for &mut DieselConnection {
    fn conn(&mut self) -> &mut DieselConnection {
        self
    }
}
